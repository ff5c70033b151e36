use serbench_api::BenchError;
use serbench_codecs::default_codecs;
use serbench_engine::{generate, run_trials, verify};

use crate::config::OpsArgs;

// ═══════════════════════════════════════════════════════════════
//  In-process trials: sizes, then timed encode/decode per codec
// ═══════════════════════════════════════════════════════════════

pub fn run(args: &OpsArgs) -> Result<(), BenchError> {
    tracing::info!(records = args.records, iterations = args.iterations, "running trials");

    let payload = generate(args.records)?;
    let codecs = default_codecs()?;

    println!("Payload sizes ({} records)", args.records);
    println!("------------------------------");
    for codec in &codecs {
        match verify(codec.as_ref(), &payload) {
            Ok(result) => {
                let note = if result.lossless { "" } else { "  (lossy)" };
                println!("{:<10} {:>10} bytes{note}", result.codec, result.size_bytes);
            }
            Err(e) => println!("{:<10} failed: {e}", codec.name()),
        }
    }

    println!();
    println!("Benchmarking ({} iterations per operation)", args.iterations);
    println!("------------------------------");
    let report = run_trials(&codecs, &payload, args.iterations)?;
    for sample in &report.samples {
        println!(
            "{:<16} {:>10.3} ms mean  ({} samples)",
            sample.operation, sample.mean_ms, sample.samples
        );
    }
    for failure in &report.failures {
        println!("{:<16} failed: {}", failure.operation, failure.error);
    }

    if let Some(fastest) = report.fastest() {
        println!();
        println!("Fastest is {}", fastest.operation);
    }

    Ok(())
}
