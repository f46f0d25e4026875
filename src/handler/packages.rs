//! Package delivery module
//!
//! Resolves a validated name against the serving root and streams the
//! file back. The file is opened only after the name has passed
//! validation, and the handle travels inside the response body so every
//! exit path releases it on drop.

use std::sync::Arc;

use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::error::DeliveryError;
use crate::handler::resolve;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, Body};
use crate::logger;

/// Serve `GET`/`HEAD /packages/{name}`.
///
/// `raw_name` is the still-encoded segment taken from the URL.
pub async fn serve_package(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
    raw_name: &str,
) -> Response<Body> {
    match deliver(ctx, state, raw_name).await {
        Ok(resp) => resp,
        Err(err) => {
            match &err {
                DeliveryError::InvalidName => {
                    logger::log_warning(&format!("Rejected unsafe package name: {raw_name:?}"));
                }
                // Missing files are routine (404), not worth a log line
                DeliveryError::NotFound => {}
                DeliveryError::Io(cause) => {
                    logger::log_error(&format!("Failed to serve package {raw_name:?}: {cause}"));
                }
            }
            http::build_error_response(&err)
        }
    }
}

async fn deliver(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
    raw_name: &str,
) -> Result<Response<Body>, DeliveryError> {
    let name = resolve::validate_name(raw_name)?;
    let path = resolve::resolve_path(&state.root, &name)?;

    let file = fs::File::open(&path).await.map_err(open_error)?;
    let meta = file.metadata().await?;
    if !meta.is_file() {
        return Err(DeliveryError::NotFound);
    }

    let etag = cache::metadata_etag(&meta);
    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return Ok(http::build_304_response(&etag));
    }

    let content_type = mime::content_type_for(&path);
    Ok(http::build_file_response(
        file,
        &meta,
        content_type,
        &etag,
        ctx.is_head,
    ))
}

/// The path canonicalized moments ago, so a missing file here is a race
/// with a concurrent delete. Still a plain 404 to the caller.
fn open_error(e: std::io::Error) -> DeliveryError {
    if e.kind() == std::io::ErrorKind::NotFound {
        DeliveryError::NotFound
    } else {
        DeliveryError::Io(e)
    }
}
