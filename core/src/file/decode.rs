use tracing::{debug, info_span, warn};

use crate::catalog::CommandCatalog;
use crate::config::CodecOptions;
use crate::constants::FORMAT_VERSION;
use crate::device::decode_device;
use crate::framing::{find_child, find_frame, fmt_tag, read_frame, ByteReader, FrameError, FrameIter, FrameTag};
use crate::model::MappingFile;
use crate::telemetry::DecodeReport;
use crate::types::TsiError;

/// Decode a binary payload (Base64 already removed).
///
/// Fatal: no readable `DIOM` root or no `DEVS` container.
/// Everything below is recovered locally and counted in the report.
pub fn decode_payload(
    bytes: &[u8],
    catalog: &dyn CommandCatalog,
    opts: &CodecOptions,
) -> Result<(MappingFile, DecodeReport), TsiError> {
    let _span = info_span!("decode_payload", len = bytes.len()).entered();
    let mut report = DecodeReport::new();

    let root = match read_frame(bytes, 0) {
        Ok((frame, _)) if frame.is(FrameTag::Diom) => frame,
        Ok((frame, _)) => find_frame(bytes, FrameTag::Diom).ok_or(TsiError::Region {
            region: "DIOM root",
            source: FrameError::UnexpectedTag { expected: FrameTag::Diom, found: frame.id },
        })?,
        Err(e) => return Err(TsiError::Region { region: "DIOM root", source: e }),
    };

    let version = match find_child(root.payload, 0, FrameTag::Dioi) {
        Some(frame) => ByteReader::new(frame.payload).read_u32().map_err(TsiError::region("DIOI version"))?,
        None => {
            warn!("no DIOI frame, assuming version {FORMAT_VERSION}");
            FORMAT_VERSION
        }
    };

    let devs = find_child(root.payload, 0, FrameTag::Devs)
        .ok_or(TsiError::Region { region: "DEVS", source: FrameError::Missing { tag: FrameTag::Devs } })?;
    let declared = ByteReader::new(devs.payload).read_u32().map_err(TsiError::region("DEVS count"))?;

    let mut file = MappingFile { version, devices: Vec::with_capacity(declared.min(64) as usize) };
    let mut frames = FrameIter::at(devs.payload, 4);
    for frame in frames.by_ref() {
        if !frame.is(FrameTag::Devi) {
            warn!(tag = %fmt_tag(&frame.id), "unexpected frame in device list");
            report.add_unknown_frame(frame.id);
            continue;
        }
        match decode_device(frame.payload, catalog, opts, &mut report) {
            Ok(device) => file.devices.push(device),
            Err(e) if opts.strict => return Err(e),
            Err(e) => {
                report.skipped_devices += 1;
                warn!(error = %e, "skipping unreadable device");
            }
        }
    }
    if let Some(e) = frames.stopped.take() {
        if opts.strict {
            return Err(TsiError::Strict { region: "DEVI", detail: e.to_string() });
        }
        report.skipped_devices += 1;
        warn!(error = %e, "truncated device list");
    }

    if file.devices.len() as u64 + report.skipped_devices != u64::from(declared) {
        debug!(declared, decoded = file.devices.len(), "device count differs from DEVS header");
    }
    report.devices = file.devices.len() as u64;
    Ok((file, report))
}
