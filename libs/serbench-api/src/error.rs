use std::fmt;

/// Error type shared by the generator, the codecs and the benchmark
/// pipeline. One codec's failure is reported under its own name so it
/// never invalidates another codec's result.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("encode ({codec}): {detail}")]
    Encode { codec: &'static str, detail: String },

    #[error("decode ({codec}): {detail}")]
    Decode { codec: &'static str, detail: String },

    #[error("transport: {0}")]
    Transport(String),
}

impl BenchError {
    pub fn encode(codec: &'static str, detail: impl fmt::Display) -> Self {
        Self::Encode { codec, detail: detail.to_string() }
    }

    pub fn decode(codec: &'static str, detail: impl fmt::Display) -> Self {
        Self::Decode { codec, detail: detail.to_string() }
    }

    /// Add context to the error, preserving the variant.
    ///
    /// Produces `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            Self::InvalidArgument(msg) => Self::InvalidArgument(format!("{ctx}: {msg}")),
            Self::Encode { codec, detail } => Self::Encode { codec, detail: format!("{ctx}: {detail}") },
            Self::Decode { codec, detail } => Self::Decode { codec, detail: format!("{ctx}: {detail}") },
            Self::Transport(msg) => Self::Transport(format!("{ctx}: {msg}")),
        }
    }
}
