use tracing::debug;

use crate::catalog::CommandCatalog;
use crate::config::CodecOptions;
use crate::device::{encode_device, plan_device};
use crate::framing::{FrameTag, FrameWriter};
use crate::model::MappingFile;
use crate::types::TsiError;

/// Encode a model into the binary payload (no envelope).
///
/// The whole model is validated and every command / binding resolved
/// before the first byte is written. Text limits come from `opts`, so the
/// decoder built with the same options reads back every string.
pub fn encode_payload(
    file: &MappingFile,
    catalog: &dyn CommandCatalog,
    opts: &CodecOptions,
) -> Result<Vec<u8>, TsiError> {
    file.validate_with(opts)?;
    let plans = file
        .devices
        .iter()
        .enumerate()
        .map(|(index, device)| plan_device(index, device, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    let mut w = FrameWriter::with_capacity(256 + 128 * file.mapping_count());
    w.frame(FrameTag::Diom, |w| {
        w.frame(FrameTag::Dioi, |w| {
            w.put_u32(file.version);
            Ok::<(), TsiError>(())
        })?;
        w.frame(FrameTag::Devs, |w| {
            w.put_u32(plans.len() as u32);
            for plan in &plans {
                encode_device(w, plan)?;
            }
            Ok::<(), TsiError>(())
        })
    })?;

    debug!(devices = plans.len(), bytes = w.len(), "payload encoded");
    Ok(w.into_bytes())
}
