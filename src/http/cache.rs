//! Conditional request support.
//!
//! `ETag` and `Last-Modified` are derived from file metadata (size and
//! modification time), so a revalidation never has to read file content.
//! This matters here: package files are large and mostly immutable.

use std::fs::Metadata;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};

/// Generate a weak-equivalent `ETag` from file metadata.
///
/// Format: `"{size:x}-{mtime_secs:x}"`, quoted. Files with no readable
/// mtime fall back to a size-only tag.
pub fn metadata_etag(meta: &Metadata) -> String {
    let mtime = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_secs());
    format!("\"{:x}-{mtime:x}\"", meta.len())
}

/// Check if the client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single tag, a comma-separated list, and the `*` wildcard.
/// Returns true if matched (should return 304).
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format the file's modification time as an HTTP-date (RFC 7231)
/// for the `Last-Modified` header.
pub fn http_date(meta: &Metadata) -> Option<String> {
    let modified: DateTime<Utc> = meta.modified().ok()?.into();
    Some(modified.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn metadata_for(content: &[u8]) -> Metadata {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.as_file().metadata().unwrap()
    }

    #[test]
    fn test_etag_is_quoted_and_reflects_size() {
        let meta = metadata_for(b"0123456789");
        let etag = metadata_etag(&meta);
        assert!(etag.starts_with("\"a-"), "unexpected etag: {etag}");
        assert!(etag.ends_with('"'));
    }

    #[test]
    fn test_etag_matching() {
        let etag = "\"a-1b2c3\"";
        assert!(etag_matches(Some("\"a-1b2c3\""), etag));
        assert!(etag_matches(Some("\"zzz\", \"a-1b2c3\""), etag));
        assert!(etag_matches(Some("*"), etag));
        assert!(!etag_matches(Some("\"different\""), etag));
        assert!(!etag_matches(None, etag));
    }

    #[test]
    fn test_http_date_shape() {
        let meta = metadata_for(b"x");
        let date = http_date(&meta).unwrap();
        // e.g. "Tue, 05 Aug 2026 10:00:00 GMT"
        assert!(date.ends_with(" GMT"));
        assert_eq!(date.matches(':').count(), 2);
    }
}
