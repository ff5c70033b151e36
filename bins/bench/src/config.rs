use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "serbench-bench", about = "Codec benchmarks: in-process trials and HTTP load")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Time encode/decode per codec and compare payload sizes
    Ops(OpsArgs),
    /// Drive concurrent load against a running server
    Http(HttpArgs),
}

#[derive(Args, Clone, Debug)]
pub struct OpsArgs {
    /// Records in the trial dataset
    #[arg(long, default_value_t = 1000)]
    pub records: usize,

    /// Timed calls per operation
    #[arg(long, default_value_t = 30)]
    pub iterations: u32,
}

#[derive(Args, Clone, Debug)]
pub struct HttpArgs {
    /// Base URL of a running serbench-server
    #[arg(long, default_value = "http://localhost:3000", env = "SERBENCH_URL")]
    pub base_url: String,

    /// Concurrent client connections
    #[arg(long, default_value_t = 10)]
    pub connections: usize,

    /// Wall-clock length of each endpoint's run, in seconds
    #[arg(long, default_value_t = 10)]
    pub duration_secs: u64,
}
