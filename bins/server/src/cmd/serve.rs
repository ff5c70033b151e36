use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::{ServeArgs, ServerConfig};
use crate::error::ServerError;
use serbench_api_server::ServeMode;
use serbench_codecs::default_codecs;
use serbench_engine::{generate, verify};

pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    tracing::info!("serbench-server starting");

    // --- Load config ---
    let config = match &args.config {
        Some(path) => {
            let config = ServerConfig::load(path)?;
            tracing::info!(config = %path, "loaded config");
            config
        }
        None => ServerConfig::default(),
    };

    // --- Generate dataset ---
    // A generation failure is fatal: there is nothing to serve or
    // benchmark without the payload.
    let payload = Arc::new(generate(config.record_count)?);
    tracing::info!(
        records = payload.records.len(),
        generated_at = %payload.generated_at,
        "dataset ready"
    );

    // --- Build codecs ---
    // Compiles the Avro schema once; the warm round trip below also
    // logs the size comparison before the first request arrives.
    let codecs = default_codecs()?;
    for codec in &codecs {
        let result = verify(codec.as_ref(), &payload)?;
        tracing::info!(
            codec = result.codec,
            size_bytes = result.size_bytes,
            lossless = result.lossless,
            "codec ready"
        );
    }

    let mode = if config.transport_only {
        ServeMode::TransportOnly
    } else {
        ServeMode::RoundTrip
    };
    tracing::info!(mode = ?mode, "serving mode");

    // --- API server ---
    let token = CancellationToken::new();
    let api_token = token.clone();
    let port = config.port;
    let api_handle = tokio::spawn(async move {
        if let Err(e) = serbench_api_server::run(port, payload, codecs, mode, api_token).await {
            tracing::error!(error = %e, "api server error");
        }
    });

    tracing::info!(port = config.port, "api server listening");
    tracing::info!("server ready");

    // --- Wait for Ctrl+C ---
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down...");

    token.cancel();
    let _ = api_handle.await;

    tracing::info!("shutdown complete");
    Ok(())
}
