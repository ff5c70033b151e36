use std::sync::Arc;
use std::time::Instant;

use serbench_api::{BenchError, Payload, PayloadCodec};

/// Mean duration of one repeatedly-timed operation.
#[derive(Debug)]
pub struct OpSample {
    pub operation: String,
    pub mean_ms: f64,
    pub samples: u32,
}

/// An operation that failed during trials. Recorded per codec so the
/// other codecs' results stay valid.
#[derive(Debug)]
pub struct OpFailure {
    pub operation: String,
    pub error: BenchError,
}

#[derive(Debug)]
pub struct TrialReport {
    /// Ranked by mean duration, fastest first.
    pub samples: Vec<OpSample>,
    pub failures: Vec<OpFailure>,
}

impl TrialReport {
    pub fn fastest(&self) -> Option<&OpSample> {
        self.samples.first()
    }
}

/// Time `iterations` encode calls and `iterations` decode calls per
/// codec, sequentially on the caller's thread so measurements stay
/// uncontended.
///
/// Each codec is warmed up first with one untimed encode+decode. The
/// warmup triggers lazy per-codec state ahead of the timed loop and
/// produces that codec's private pre-encoded buffer for the decode
/// trials — nothing is shared between codecs.
pub fn run_trials(
    codecs: &[Arc<dyn PayloadCodec>],
    payload: &Payload,
    iterations: u32,
) -> Result<TrialReport, BenchError> {
    if iterations == 0 {
        return Err(BenchError::InvalidArgument("iterations must be positive".into()));
    }

    let mut samples = Vec::new();
    let mut failures = Vec::new();

    for codec in codecs {
        let encode_op = format!("{} encode", codec.name());
        let decode_op = format!("{} decode", codec.name());

        // Warmup; a codec that cannot round-trip at all gets a failure
        // entry per operation and no timings.
        let encoded = match codec.encode(payload) {
            Ok(bytes) => bytes,
            Err(error) => {
                failures.push(OpFailure { operation: encode_op, error });
                continue;
            }
        };
        if let Err(error) = codec.decode(&encoded) {
            failures.push(OpFailure { operation: decode_op, error });
            continue;
        }

        match time_op(iterations, || codec.encode(payload).map(drop)) {
            Ok(mean_ms) => samples.push(OpSample { operation: encode_op, mean_ms, samples: iterations }),
            Err(error) => failures.push(OpFailure { operation: encode_op, error }),
        }
        match time_op(iterations, || codec.decode(&encoded).map(drop)) {
            Ok(mean_ms) => samples.push(OpSample { operation: decode_op, mean_ms, samples: iterations }),
            Err(error) => failures.push(OpFailure { operation: decode_op, error }),
        }
    }

    samples.sort_by(|a, b| a.mean_ms.total_cmp(&b.mean_ms));

    Ok(TrialReport { samples, failures })
}

fn time_op(iterations: u32, mut op: impl FnMut() -> Result<(), BenchError>) -> Result<f64, BenchError> {
    let start = Instant::now();
    for _ in 0..iterations {
        op()?;
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / f64::from(iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generate;
    use serbench_codecs::default_codecs;

    #[test]
    fn zero_iterations_is_rejected() {
        let payload = generate(10).unwrap();
        let err = run_trials(&default_codecs().unwrap(), &payload, 0).unwrap_err();
        assert!(matches!(err, BenchError::InvalidArgument(_)));
    }

    #[test]
    fn reports_two_operations_per_codec() {
        let payload = generate(50).unwrap();
        let codecs = default_codecs().unwrap();
        let report = run_trials(&codecs, &payload, 3).unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(report.samples.len(), codecs.len() * 2);
        for sample in &report.samples {
            assert!(sample.mean_ms >= 0.0);
            assert_eq!(sample.samples, 3);
        }
    }

    #[test]
    fn samples_are_ranked_ascending() {
        let payload = generate(50).unwrap();
        let report = run_trials(&default_codecs().unwrap(), &payload, 3).unwrap();
        let means: Vec<f64> = report.samples.iter().map(|s| s.mean_ms).collect();
        assert!(means.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(report.fastest().unwrap().mean_ms, means[0]);
    }
}
