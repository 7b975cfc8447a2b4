use crate::binding::BindingAllocator;
use crate::catalog::{command_id, CommandCatalog};
use crate::constants::UNASSIGNED_COMMAND_ID;
use crate::framing::{FrameTag, FrameWriter};
use crate::mapping::encode_mapping;
use crate::model::{Device, MappingEntry, ModelError};
use crate::types::TsiError;
use crate::wstring::put_wstring;

/// Everything resolved for one device before any byte is written.
#[derive(Debug)]
pub struct DevicePlan<'a> {
    pub device: &'a Device,
    pub bindings: BindingAllocator,
    /// `(entry, binding id, command id)` in mapping order.
    pub items: Vec<(&'a MappingEntry, u32, u32)>,
}

/// Resolve command ids and assign binding ids for `device`.
///
/// Expects a validated device; an entry with both note and CC set is still
/// refused here rather than encoded, as are two encoders on one control
/// with different modes.
pub fn plan_device<'a>(
    index: usize,
    device: &'a Device,
    catalog: &dyn CommandCatalog,
) -> Result<DevicePlan<'a>, TsiError> {
    let mut bindings = BindingAllocator::new();
    let mut items = Vec::with_capacity(device.mappings.len());

    for entry in &device.mappings {
        let invalid = |source| TsiError::InvalidModel { device: index, mapping: Some(entry.id), source };

        let command = command_id(catalog, &entry.command)
            .filter(|id| *id != UNASSIGNED_COMMAND_ID)
            .ok_or_else(|| invalid(ModelError::UnknownCommand(entry.command.clone())))?;

        let control = entry.control().ok_or_else(|| {
            invalid(ModelError::NoteAndCc { note: entry.note.unwrap_or_default(), cc: entry.cc.unwrap_or_default() })
        })?;

        let binding = bindings
            .assign(&control.to_string(), entry.controller, entry.encoder_mode)
            .map_err(invalid)?;
        items.push((entry, binding, command));
    }

    Ok(DevicePlan { device, bindings, items })
}

/// Write one `DEVI` frame from a resolved plan.
pub fn encode_device(w: &mut FrameWriter, plan: &DevicePlan<'_>) -> Result<(), TsiError> {
    let device = plan.device;
    w.frame(FrameTag::Devi, |w| {
        put_wstring(w, &device.name);
        w.frame(FrameTag::Ddat, |w| {
            w.frame(FrameTag::Ddic, |w| {
                put_wstring(w, &device.comment);
                Ok::<(), TsiError>(())
            })?;
            w.frame(FrameTag::Ddpt, |w| {
                put_wstring(w, &device.in_port);
                put_wstring(w, &device.out_port);
                Ok::<(), TsiError>(())
            })?;

            w.frame(FrameTag::Dddc, |w| {
                w.frame(FrameTag::Ddci, |w| {
                    w.put_u32(plan.bindings.len() as u32);
                    for def in plan.bindings.definitions() {
                        w.frame(FrameTag::Dcdt, |w| {
                            def.write(w);
                            Ok::<(), TsiError>(())
                        })?;
                    }
                    Ok::<(), TsiError>(())
                })?;
                w.frame(FrameTag::Ddco, |w| {
                    w.put_u32(0);
                    Ok::<(), TsiError>(())
                })
            })?;

            w.frame(FrameTag::Ddcb, |w| {
                w.frame(FrameTag::Cmas, |w| {
                    w.put_u32(plan.items.len() as u32);
                    for (entry, binding, command) in &plan.items {
                        encode_mapping(w, entry, *binding, *command)?;
                    }
                    Ok::<(), TsiError>(())
                })?;
                w.frame(FrameTag::Dcbm, |w| {
                    w.put_u32(plan.bindings.len() as u32);
                    plan.bindings.write_bindings(w)?;
                    Ok::<(), TsiError>(())
                })
            })
        })
    })
}
