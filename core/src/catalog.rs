//! catalog.rs
//! Command name <-> command id lookup.
//!
//! The catalog is read-only reference data owned by the caller and shared
//! across decode/encode calls. Ids the catalog does not know decode to the
//! placeholder `Command #<id>`, which always encodes back to `<id>`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::TsiError;

const PLACEHOLDER_PREFIX: &str = "Command #";

pub trait CommandCatalog: Send + Sync {
    fn name_of(&self, id: u32) -> Option<&str>;
    fn id_of(&self, name: &str) -> Option<u32>;
}

/// Catalog that knows no names; every command uses its placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCatalog;

impl CommandCatalog for PlaceholderCatalog {
    fn name_of(&self, _id: u32) -> Option<&str> {
        None
    }

    fn id_of(&self, _name: &str) -> Option<u32> {
        None
    }
}

/// Name for `id`, falling back to the placeholder.
pub fn command_name(catalog: &dyn CommandCatalog, id: u32) -> String {
    match catalog.name_of(id) {
        Some(name) => name.to_string(),
        None => placeholder_name(id),
    }
}

/// Id for `name`, trying the catalog first and the placeholder form second.
pub fn command_id(catalog: &dyn CommandCatalog, name: &str) -> Option<u32> {
    catalog.id_of(name).or_else(|| parse_placeholder(name))
}

pub fn placeholder_name(id: u32) -> String {
    format!("{PLACEHOLDER_PREFIX}{id}")
}

pub fn parse_placeholder(name: &str) -> Option<u32> {
    name.strip_prefix(PLACEHOLDER_PREFIX)?.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CommandList {
    commands: Vec<CommandDef>,
}

/// In-memory bidirectional catalog.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    by_id: HashMap<u32, String>,
    by_name: HashMap<String, u32>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A later definition for the same id or name wins.
    pub fn insert(&mut self, id: u32, name: impl Into<String>) {
        let name = name.into();
        if let Some(old_name) = self.by_id.remove(&id) {
            self.by_name.remove(&old_name);
        }
        if let Some(old_id) = self.by_name.remove(&name) {
            self.by_id.remove(&old_id);
        }
        self.by_id.insert(id, name.clone());
        self.by_name.insert(name, id);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Load `{"commands": [{"id": 100, "name": "Play/Pause"}, ...]}`.
    pub fn from_json(text: &str) -> Result<Self, TsiError> {
        let list: CommandList = serde_json::from_str(text)?;
        Ok(list.commands.into_iter().collect())
    }
}

impl FromIterator<CommandDef> for CommandTable {
    fn from_iter<I: IntoIterator<Item = CommandDef>>(iter: I) -> Self {
        let mut table = CommandTable::new();
        for def in iter {
            table.insert(def.id, def.name);
        }
        table
    }
}

impl CommandCatalog for CommandTable {
    fn name_of(&self, id: u32) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    fn id_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }
}
