use crate::constants::CMAD_MARKER;
use crate::framing::{FrameError, FrameTag, FrameWriter};
use crate::model::{MappingEntry, ModifierCondition};
use crate::wstring::put_wstring;

/// Write one `CMAI` frame (with nested `CMAD`) for `entry`.
///
/// `Unassigned` controller, interaction and target values are written as
/// button, hold and global; the format cannot express "unassigned" there,
/// so those fields do not survive a round trip. Auto-repeat is always 0.
pub fn encode_mapping(
    w: &mut FrameWriter,
    entry: &MappingEntry,
    binding_id: u32,
    command_id: u32,
) -> Result<(), FrameError> {
    w.frame(FrameTag::Cmai, |w| {
        w.put_u32(binding_id);
        w.put_u32(entry.direction.to_wire());
        w.put_u32(command_id);

        w.frame(FrameTag::Cmad, |w| {
            w.put_u32(CMAD_MARKER);
            w.put_u32(entry.controller.to_wire());
            w.put_u32(entry.interaction.to_wire());
            w.put_i32(entry.target.to_wire());
            w.put_u32(0);
            w.put_u32(u32::from(entry.invert));
            w.put_u32(u32::from(entry.soft_takeover));
            w.put_f32(entry.rotary_sensitivity);
            w.put_f32(entry.rotary_acceleration);
            w.put_zeros(8);
            w.put_f32(entry.set_to_value);
            put_wstring(w, &entry.comment);

            for condition in entry.modifiers {
                let (id, value) = ModifierCondition::to_wire(condition);
                w.put_u32(id);
                w.put_u32(value);
            }

            let out = &entry.output;
            w.put_u32(out.value_ui_type);
            w.put_f32(out.led_min);
            w.put_f32(out.led_max);
            w.put_u32(out.midi_min);
            w.put_u32(out.midi_max);
            w.put_u32(u32::from(out.led_invert));
            w.put_u32(u32::from(out.led_blend));
            Ok(())
        })
    })
}
