use serbench_api::util::{format_iso_millis, now_ms};
use serbench_api::{BenchError, Payload, Record};

/// Build the deterministic dataset: `count` records plus the generation
/// timestamp.
///
/// Apart from `generated_at` (wall clock), the output depends only on
/// `count`, so repeated calls yield identical record sequences. Runs in
/// O(count) time and memory.
pub fn generate(count: usize) -> Result<Payload, BenchError> {
    if count == 0 {
        return Err(BenchError::InvalidArgument("record count must be positive".into()));
    }
    if count > i32::MAX as usize {
        return Err(BenchError::InvalidArgument(format!(
            "record count {count} exceeds the id range"
        )));
    }

    let records = (0..count)
        .map(|i| Record {
            id: (i + 1) as i32,
            title: format!("Record {}", i + 1),
            category: format!("Category {}", i % 10),
            score: ((i * 13) % 997) as i32,
            active: i % 2 == 0,
        })
        .collect();

    Ok(Payload {
        generated_at: format_iso_millis(now_ms()),
        records,
    })
}
