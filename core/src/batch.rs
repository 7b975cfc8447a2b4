//! batch.rs
//! Decode / encode many independent files on scoped worker threads.
//!
//! - Inputs are split into one contiguous chunk per worker.
//! - Results come back in input order, one per input.
//! - A panicking worker turns its chunk into `TsiError::Worker` results.

use crate::codec::TsiCodec;
use crate::model::MappingFile;
use crate::telemetry::DecodeReport;
use crate::types::TsiError;

/// Decode `.tsi` documents in parallel.
pub fn decode_all<B>(codec: &TsiCodec<'_>, files: &[B]) -> Vec<Result<(MappingFile, DecodeReport), TsiError>>
where
    B: AsRef<[u8]> + Sync,
{
    run_batch(files, |bytes| codec.decode_file_with_report(bytes.as_ref()))
}

/// Encode models into `.tsi` documents in parallel.
pub fn encode_all(codec: &TsiCodec<'_>, models: &[MappingFile]) -> Vec<Result<Vec<u8>, TsiError>> {
    run_batch(models, |model| codec.encode_file(model))
}

/// Merge the reports of every successful decode.
pub fn merge_reports<'a, I>(results: I) -> DecodeReport
where
    I: IntoIterator<Item = &'a Result<(MappingFile, DecodeReport), TsiError>>,
{
    let mut total = DecodeReport::new();
    for (_, report) in results.into_iter().flatten() {
        total.merge(report);
    }
    total
}

fn run_batch<I, O, F>(inputs: &[I], job: F) -> Vec<Result<O, TsiError>>
where
    I: Sync,
    O: Send,
    F: Fn(&I) -> Result<O, TsiError> + Sync,
{
    if inputs.is_empty() {
        return Vec::new();
    }
    let workers = num_cpus::get().clamp(1, inputs.len());
    let chunk = inputs.len().div_ceil(workers);
    let job = &job;

    let joined = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .chunks(chunk)
            .map(|part| (part.len(), s.spawn(move |_| part.iter().map(job).collect::<Vec<_>>())))
            .collect();

        let mut out = Vec::with_capacity(inputs.len());
        for (len, handle) in handles {
            match handle.join() {
                Ok(results) => out.extend(results),
                Err(_) => out.extend((0..len).map(|_| Err(worker_panicked()))),
            }
        }
        out
    });

    joined.unwrap_or_else(|_| inputs.iter().map(|_| Err(worker_panicked())).collect())
}

fn worker_panicked() -> TsiError {
    TsiError::Worker("batch worker panicked".to_string())
}
