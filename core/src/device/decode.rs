use tracing::{debug, warn};

use crate::binding::build_binding_table_from;
use crate::catalog::CommandCatalog;
use crate::config::CodecOptions;
use crate::framing::{find_child, find_frame, fmt_tag, ByteReader, FrameIter, FrameTag, FrameView};
use crate::mapping::{decode_mapping, MappingContext};
use crate::model::Device;
use crate::telemetry::DecodeReport;
use crate::types::TsiError;
use crate::wstring::read_wstring_from;

/// Decode one `DEVI` payload.
///
/// Only a missing/garbled device name is an error; every defect below that
/// is skipped, counted in `report`, and logged (or refused in strict mode).
pub fn decode_device(
    payload: &[u8],
    catalog: &dyn CommandCatalog,
    opts: &CodecOptions,
    report: &mut DecodeReport,
) -> Result<Device, TsiError> {
    let mut r = ByteReader::new(payload);
    let name = read_wstring_from(&mut r, opts.max_wstring_chars).map_err(TsiError::region("DEVI name"))?;
    let region = r.rest();

    let ddat = match r.read_frame() {
        Ok(frame) if frame.is(FrameTag::Ddat) => frame.payload,
        _ => find_frame(region, FrameTag::Ddat).map_or(region, |f| f.payload),
    };

    let mut device = Device::new(name);
    flag_unknown_frames(ddat, report);
    read_comment(ddat, &mut device, opts);
    read_ports(ddat, &mut device, opts);

    // DDAT > DDCB > {CMAS, DCBM}; a device without DDCB may still carry
    // the lists loose in DDAT.
    let ddcb = find_child(ddat, 0, FrameTag::Ddcb).map_or(ddat, |f| f.payload);
    let bindings = find_child(ddcb, 0, FrameTag::Dcbm).map_or(region, |f| f.payload);
    let definitions = find_child(ddat, 0, FrameTag::Dddc).map_or(region, |f| f.payload);

    let table = build_binding_table_from(bindings, definitions, opts);
    report.bindings_primary += table.primary as u64;
    report.bindings_fallback += table.fallback as u64;

    let Some(cmas) = find_child(ddcb, 0, FrameTag::Cmas) else {
        debug!(device = %device.name, "device has no mapping list");
        return Ok(device);
    };

    let ctx = MappingContext { table: &table, catalog, opts };
    let mut list = ByteReader::new(cmas.payload);
    let declared = list.read_u32().map_err(TsiError::region("CMAS count"))?;

    let mut items = FrameIter::at(cmas.payload, 4);
    let mut seen = 0u32;
    for frame in items.by_ref() {
        if !frame.is(FrameTag::Cmai) {
            warn!(tag = %fmt_tag(&frame.id), "unexpected frame in mapping list");
            continue;
        }
        seen += 1;
        match decode_mapping(frame.payload, ctx) {
            Ok(Some(decoded)) => {
                if !decoded.resolved {
                    report.unresolved_bindings += 1;
                    warn!(binding_id = decoded.binding_id, "binding id has no control descriptor");
                }
                device.push(decoded.entry);
            }
            Ok(None) => report.skipped_unassigned += 1,
            Err(e) => {
                skip_malformed("CMAI", &e.to_string(), opts, report)?;
            }
        }
    }
    if let Some(e) = items.stopped.take() {
        skip_malformed("CMAS", &e.to_string(), opts, report)?;
    }
    if seen != declared {
        debug!(declared, seen, "mapping count differs from CMAS header");
    }

    report.mappings += device.mappings.len() as u64;
    debug!(device = %device.name, mappings = device.mappings.len(), bindings = table.len(), "device decoded");
    Ok(device)
}

/// Count and log a locally recoverable defect; strict mode refuses it.
pub(crate) fn skip_malformed(
    region: &'static str,
    detail: &str,
    opts: &CodecOptions,
    report: &mut DecodeReport,
) -> Result<(), TsiError> {
    if opts.strict {
        return Err(TsiError::Strict { region, detail: detail.to_string() });
    }
    report.skipped_malformed += 1;
    warn!(region, detail, "skipping malformed record");
    Ok(())
}

fn read_comment(ddat: &[u8], device: &mut Device, opts: &CodecOptions) {
    let Some(frame) = find_child(ddat, 0, FrameTag::Ddic) else { return };
    match read_wstring_from(&mut ByteReader::new(frame.payload), opts.max_wstring_chars) {
        Ok(comment) => device.comment = comment,
        Err(e) => warn!(error = %e, "unreadable device comment"),
    }
}

fn read_ports(ddat: &[u8], device: &mut Device, opts: &CodecOptions) {
    let Some(frame) = find_child(ddat, 0, FrameTag::Ddpt) else { return };
    let mut r = ByteReader::new(frame.payload);
    let mut read = || read_wstring_from(&mut r, opts.max_wstring_chars);
    match (read(), read()) {
        (Ok(input), Ok(output)) => {
            device.in_port = input;
            device.out_port = output;
        }
        (Err(e), _) | (_, Err(e)) => warn!(error = %e, "unreadable device ports"),
    }
}

/// Byte offset of the first child frame for container tags.
fn children_offset(tag: FrameTag) -> Option<usize> {
    match tag {
        FrameTag::Ddat | FrameTag::Dddc | FrameTag::Ddcb => Some(0),
        FrameTag::Ddci | FrameTag::Ddco | FrameTag::Cmas | FrameTag::Dcbm => Some(4),
        _ => None,
    }
}

/// Known tags whose payload layout the codec does not decode.
fn is_unmodelled(tag: FrameTag) -> bool {
    matches!(tag, FrameTag::Ddif | FrameTag::Ddiv | FrameTag::Dvst)
}

/// Container nesting never goes deeper than DDAT > DDCB > CMAS.
const MAX_CONTAINER_DEPTH: usize = 4;

/// Walk the container tree and report any tag outside the known set.
fn flag_unknown_frames(ddat: &[u8], report: &mut DecodeReport) {
    fn walk(frames: FrameIter<'_>, depth: usize, report: &mut DecodeReport) {
        for frame in frames {
            visit(frame, depth, report);
        }
    }
    fn visit(frame: FrameView<'_>, depth: usize, report: &mut DecodeReport) {
        match frame.tag() {
            None => {
                warn!(tag = %fmt_tag(&frame.id), "unknown frame in device data");
                report.add_unknown_frame(frame.id);
            }
            Some(tag) if is_unmodelled(tag) => {
                warn!(%tag, "device frame not decoded");
                report.add_unknown_frame(frame.id);
            }
            Some(tag) => {
                if let Some(offset) = children_offset(tag).filter(|_| depth < MAX_CONTAINER_DEPTH) {
                    walk(FrameIter::at(frame.payload, offset), depth + 1, report);
                }
            }
        }
    }
    walk(FrameIter::new(ddat), 0, report);
}
