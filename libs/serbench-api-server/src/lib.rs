mod middleware;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio_util::sync::CancellationToken;

use serbench_api::{BenchError, Payload, PayloadCodec};
use serbench_engine::verify;

/// How `/api/{codec}` bodies are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    /// Encode→decode→re-encode on every request. The default: proves
    /// codec fidelity under real request load at a real CPU cost.
    RoundTrip,
    /// Serve bytes encoded once at startup; isolates transport cost
    /// from codec cost.
    TransportOnly,
}

#[derive(Clone)]
struct AppState {
    payload: Arc<Payload>,
    codecs: Arc<Vec<Arc<dyn PayloadCodec>>>,
    mode: ServeMode,
    /// Startup-encoded bodies, populated only in `TransportOnly` mode.
    precoded: Arc<HashMap<&'static str, Vec<u8>>>,
}

/// Codec comparison HTTP server: one route per codec plus a status root.
pub async fn run(
    port: u16,
    payload: Arc<Payload>,
    codecs: Vec<Arc<dyn PayloadCodec>>,
    mode: ServeMode,
    shutdown: CancellationToken,
) -> Result<(), String> {
    let app = router(payload, codecs, mode).map_err(|e| e.to_string())?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| format!("bind api :{port}: {e}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| format!("axum serve: {e}"))?;

    Ok(())
}

/// Build the router. Exposed separately so tests can bind an ephemeral
/// port and serve it themselves.
pub fn router(
    payload: Arc<Payload>,
    codecs: Vec<Arc<dyn PayloadCodec>>,
    mode: ServeMode,
) -> Result<Router, BenchError> {
    let mut precoded = HashMap::new();
    if mode == ServeMode::TransportOnly {
        for codec in &codecs {
            precoded.insert(codec.name(), codec.encode(&payload)?);
        }
    }

    let state = AppState {
        payload,
        codecs: Arc::new(codecs),
        mode,
        precoded: Arc::new(precoded),
    };

    Ok(Router::new()
        .route("/", get(handle_root))
        .route("/api/{codec}", get(handle_codec))
        .layer(axum::middleware::from_fn(middleware::track_request))
        .with_state(state))
}

// --- GET / ---

async fn handle_root() -> &'static str {
    "serbench: codec comparison server"
}

// --- GET /api/{codec} ---

async fn handle_codec(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let codec = match state.codecs.iter().find(|c| c.name() == name) {
        Some(codec) => codec.clone(),
        None => {
            return (StatusCode::NOT_FOUND, format!("unknown codec: {name}")).into_response();
        }
    };

    let body = match state.mode {
        ServeMode::TransportOnly => match state.precoded.get(codec.name()) {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(BenchError::encode(codec.name(), "missing pre-encoded body")),
        },
        ServeMode::RoundTrip => verify(codec.as_ref(), &state.payload).map(|result| {
            if !result.lossless {
                tracing::warn!(codec = %result.codec, "round trip was not lossless");
            }
            result.bytes
        }),
    };

    match body {
        Ok(bytes) => codec_response(codec.as_ref(), bytes),
        Err(e) => {
            // No partial bytes on failure: status only, empty body.
            tracing::error!(codec = %name, error = %e, "round trip failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn codec_response(codec: &dyn PayloadCodec, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, codec.content_type()),
            (header::CACHE_CONTROL, "no-store"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        bytes,
    )
        .into_response()
}
