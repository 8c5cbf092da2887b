//! Request span and completion logging
//!
//! Every request runs inside an `http.request` span carrying its request id
//! and matched route, so handler events ("Order created", database
//! failures) can be tied back to the request that caused them.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info, warn};

use super::REQUEST_ID_HEADER;

/// How a finished request is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    ClientError,
    ServerError,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::Ok
        }
    }
}

/// Run the request in its span, then log status and latency
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    // Templated route, e.g. "/orders/{id}"
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
    );

    let response = next.run(req).instrument(span.clone()).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    span.in_scope(|| match Outcome::of(response.status()) {
        Outcome::ServerError => warn!(status, latency_ms, "Request failed"),
        Outcome::ClientError => warn!(status, latency_ms, "Request rejected"),
        Outcome::Ok => info!(status, latency_ms, "Request completed"),
    });

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_by_status() {
        assert_eq!(Outcome::of(StatusCode::CREATED), Outcome::Ok);
        assert_eq!(Outcome::of(StatusCode::NOT_FOUND), Outcome::ClientError);
        assert_eq!(Outcome::of(StatusCode::BAD_REQUEST), Outcome::ClientError);
        assert_eq!(
            Outcome::of(StatusCode::INTERNAL_SERVER_ERROR),
            Outcome::ServerError
        );
    }
}
