use serde::{Deserialize, Serialize};

use crate::constants::FORMAT_VERSION;
use crate::model::entry::MappingEntry;

/// One controller definition with its ordered mappings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub comment: String,
    pub in_port: String,
    pub out_port: String,
    pub mappings: Vec<MappingEntry>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Append a mapping, giving it the next position id.
    pub fn push(&mut self, mut entry: MappingEntry) -> usize {
        let id = self.mappings.len();
        entry.id = id;
        self.mappings.push(entry);
        id
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Whole mapping file: format version plus devices in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingFile {
    pub version: u32,
    pub devices: Vec<Device>,
}

impl Default for MappingFile {
    fn default() -> Self {
        Self { version: FORMAT_VERSION, devices: Vec::new() }
    }
}

impl MappingFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping_count(&self) -> usize {
        self.devices.iter().map(Device::len).sum()
    }
}
