use std::time::Instant;

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Logs one line per request with its wall-clock duration.
///
/// The timer is a guard that records on drop, so a client abort that
/// cancels the request future still produces the log line — there is no
/// exit path that skips it.
pub(crate) async fn track_request(req: Request, next: Next) -> Response {
    let mut timer = RequestTimer {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        started: Instant::now(),
        status: None,
    };

    let response = next.run(req).await;
    timer.status = Some(response.status());
    response
}

struct RequestTimer {
    method: Method,
    path: String,
    started: Instant,
    status: Option<StatusCode>,
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        let duration_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        match self.status {
            Some(status) => tracing::info!(
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                duration_ms = format_args!("{duration_ms:.2}"),
                "request"
            ),
            None => tracing::warn!(
                method = %self.method,
                path = %self.path,
                duration_ms = format_args!("{duration_ms:.2}"),
                "request aborted"
            ),
        }
    }
}
