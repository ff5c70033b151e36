use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "serbench-server", about = "Codec comparison server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Path to a TOML config file; defaults apply without one
    #[arg(long, env = "CONFIG_PATH")]
    pub config: Option<String>,
}

// ---- TOML Config ----

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Records in the generated dataset.
    #[serde(default = "default_record_count")]
    pub record_count: usize,
    /// Serve bytes encoded once at startup instead of running the full
    /// round trip per request.
    #[serde(default)]
    pub transport_only: bool,
}

fn default_port() -> u16 {
    3000
}
fn default_record_count() -> usize {
    100_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            record_count: default_record_count(),
            transport_only: false,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<Self, crate::error::ServerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::ServerError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        toml::from_str(&content)
            .map_err(|e| crate::error::ServerError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_recognized_options() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.record_count, 100_000);
        assert!(!config.transport_only);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: ServerConfig = toml::from_str("port = 8080").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.record_count, 100_000);
    }
}
