//! HTTP response building module
//!
//! Builders for every response shape the service produces, decoupled from
//! the delivery logic. Bodies are boxed so buffered error responses and
//! streamed file responses share one type.

use std::io;

use futures_util::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::Response;
use tokio_util::io::ReaderStream;

use crate::error::DeliveryError;
use crate::http::cache;

/// Unified response body type: buffered for errors and revalidations,
/// streamed for file content.
pub type Body = BoxBody<Bytes, io::Error>;

/// Read chunk size for streamed file bodies
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Empty buffered body
fn empty_body() -> Body {
    Full::new(Bytes::new()).map_err(io::Error::other).boxed()
}

/// Buffered body from in-memory bytes
fn full_body(data: Bytes) -> Body {
    Full::new(data).map_err(io::Error::other).boxed()
}

/// JSON error payload in the `{"detail": ...}` shape callers expect
fn detail_body(detail: &str) -> Bytes {
    Bytes::from(serde_json::json!({ "detail": detail }).to_string())
}

/// Build 200 response streaming a file's content.
///
/// The body is read in chunks as the connection drains it; dropping the
/// response (client disconnect, timeout) drops the file handle with it.
/// `Content-Length` comes from metadata so it is known before the first
/// chunk is read.
pub fn build_file_response(
    file: tokio::fs::File,
    meta: &std::fs::Metadata,
    content_type: &'static str,
    etag: &str,
    is_head: bool,
) -> Response<Body> {
    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", meta.len())
        .header("Accept-Ranges", "none")
        .header("ETag", etag);

    if let Some(modified) = cache::http_date(meta) {
        builder = builder.header("Last-Modified", modified);
    }

    let body = if is_head {
        empty_body()
    } else {
        let stream = ReaderStream::with_capacity(file, STREAM_CHUNK_SIZE);
        StreamBody::new(stream.map_ok(Frame::data)).boxed()
    };

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(empty_body())
    })
}

/// Build the 400/404/500 response for a failed delivery
pub fn build_error_response(err: &DeliveryError) -> Response<Body> {
    let payload = detail_body(err.detail());
    Response::builder()
        .status(err.status())
        .header("Content-Type", "application/json")
        .header("Content-Length", payload.len())
        .body(full_body(payload))
        .unwrap_or_else(|e| {
            log_build_error("error", &e);
            Response::new(empty_body())
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Body> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(empty_body())
        })
}

/// Build 404 Not Found response for paths outside the package route
pub fn build_404_response() -> Response<Body> {
    let payload = detail_body("not found");
    Response::builder()
        .status(404)
        .header("Content-Type", "application/json")
        .header("Content-Length", payload.len())
        .body(full_body(payload))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(empty_body())
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Body> {
    let payload = detail_body("method not allowed");
    Response::builder()
        .status(405)
        .header("Content-Type", "application/json")
        .header("Content-Length", payload.len())
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(full_body(payload))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(empty_body())
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Body> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(empty_body())
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
