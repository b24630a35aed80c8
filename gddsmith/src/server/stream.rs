//! Progress events as a line-delimited JSON response body.

use crate::core::ProgressEvent;
use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Events buffered between a run and its response body.
pub const EVENT_BUFFER: usize = 32;

/// Streams every event received on `rx` as one JSON line, ending when the
/// sending side is dropped.
pub fn ndjson_response(rx: mpsc::Receiver<ProgressEvent>) -> Response {
    let lines = ReceiverStream::new(rx).map(|event| event.to_line().map(Bytes::from));

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Body::from_stream(lines),
    )
        .into_response()
}
