#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("{0}")]
    Bench(#[from] serbench_api::BenchError),

    #[error("signal: {0}")]
    Signal(#[from] std::io::Error),
}
