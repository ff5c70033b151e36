use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serbench_api::BenchError;

use crate::config::HttpArgs;

// ═══════════════════════════════════════════════════════════════
//  HTTP load: fixed connections, fixed duration, per codec route
// ═══════════════════════════════════════════════════════════════

/// Aggregate of one fixed-duration run against a single endpoint.
#[derive(Default)]
struct EndpointStats {
    requests: u64,
    /// Connection-level failures. Counted, never retried.
    errors: u64,
    bytes: u64,
    total_latency_ms: f64,
    /// Response count per status code, non-2xx included.
    status: BTreeMap<u16, u64>,
}

impl EndpointStats {
    fn merge(&mut self, other: EndpointStats) {
        self.requests += other.requests;
        self.errors += other.errors;
        self.bytes += other.bytes;
        self.total_latency_ms += other.total_latency_ms;
        for (code, count) in other.status {
            *self.status.entry(code).or_insert(0) += count;
        }
    }
}

pub async fn run(args: &HttpArgs) -> Result<(), BenchError> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| BenchError::Transport(format!("http client: {e}")))?;

    println!(
        "Starting benchmarks: {} connections, {}s per endpoint",
        args.connections, args.duration_secs
    );

    let base = args.base_url.trim_end_matches('/');
    for route in ["json", "msgpack", "avro"] {
        let url = format!("{base}/api/{route}");
        tracing::info!(url = %url, "benchmarking endpoint");
        let stats = run_endpoint(
            &client,
            &url,
            args.connections,
            Duration::from_secs(args.duration_secs),
        )
        .await;
        print_stats(route, &url, args, &stats);
    }

    println!("Benchmarks completed");
    Ok(())
}

async fn run_endpoint(
    client: &reqwest::Client,
    url: &str,
    connections: usize,
    duration: Duration,
) -> EndpointStats {
    let deadline = Instant::now() + duration;

    let mut workers = Vec::with_capacity(connections);
    for _ in 0..connections {
        let client = client.clone();
        let url = url.to_string();
        workers.push(tokio::spawn(async move {
            let mut stats = EndpointStats::default();
            while Instant::now() < deadline {
                let started = Instant::now();
                match client.get(&url).send().await {
                    Ok(resp) => {
                        let code = resp.status().as_u16();
                        match resp.bytes().await {
                            Ok(body) => {
                                stats.requests += 1;
                                stats.bytes += body.len() as u64;
                                stats.total_latency_ms += started.elapsed().as_secs_f64() * 1000.0;
                                *stats.status.entry(code).or_insert(0) += 1;
                            }
                            Err(_) => stats.errors += 1,
                        }
                    }
                    Err(_) => stats.errors += 1,
                }
            }
            stats
        }));
    }

    let mut total = EndpointStats::default();
    for worker in workers {
        if let Ok(stats) = worker.await {
            total.merge(stats);
        }
    }
    total
}

fn print_stats(title: &str, url: &str, args: &HttpArgs, stats: &EndpointStats) {
    let secs = args.duration_secs as f64;
    let rps = stats.requests as f64 / secs;
    let mean_latency = if stats.requests > 0 {
        stats.total_latency_ms / stats.requests as f64
    } else {
        0.0
    };
    let status: Vec<String> = stats
        .status
        .iter()
        .map(|(code, count)| format!("{code}: {count}"))
        .collect();

    println!();
    println!("{title} endpoint");
    println!("------------------------------");
    println!("URL:          {url}");
    println!("Connections:  {}", args.connections);
    println!("Duration:     {secs:.0}s");
    println!("Requests/sec: {rps:.0}");
    println!("Throughput:   {}/s", format_bytes(stats.bytes as f64 / secs));
    println!("Avg latency:  {mean_latency:.2} ms");
    println!(
        "Status codes: {}",
        if status.is_empty() { "-".to_string() } else { status.join(", ") }
    );
    println!("Errors:       {}", stats.errors);
    println!("------------------------------");
}

fn format_bytes(n: f64) -> String {
    if n >= 1e9 {
        format!("{:.2} GB", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.2} MB", n / 1e6)
    } else if n >= 1e3 {
        format!("{:.2} kB", n / 1e3)
    } else {
        format!("{n:.0} B")
    }
}
