//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, and access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::handler::packages;
use crate::http::{self, Body};
use crate::logger::{self, AccessLogEntry};

/// Request context encapsulating what the delivery handler needs
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Body>, Infallible> {
    let started = Instant::now();
    let is_head = *req.method() == Method::HEAD;

    let ctx = RequestContext {
        path: req.uri().path(),
        is_head,
        if_none_match: header_string(&req, "if-none-match"),
    };

    let response = match req.method() {
        &Method::GET | &Method::HEAD => route_request(&ctx, &state).await,
        &Method::OPTIONS => http::build_options_response(),
        method => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    if state.cached_access_log.load(Ordering::Relaxed) {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            http_version: version_label(req.version()),
            status: response.status().as_u16(),
            body_bytes: response_body_bytes(&response, is_head),
            referer: header_string(&req, "referer"),
            user_agent: header_string(&req, "user-agent"),
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path; everything outside `/packages/` is a 404
async fn route_request(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Body> {
    match ctx.path.strip_prefix("/packages/") {
        Some(raw_name) => packages::serve_package(ctx, state, raw_name).await,
        None => http::build_404_response(),
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Bytes that will cross the wire as the response body. HEAD advertises
/// a length but sends nothing; 304 has no length header at all.
fn response_body_bytes(response: &Response<Body>, is_head: bool) -> u64 {
    if is_head {
        return 0;
    }
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}
