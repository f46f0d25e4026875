//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.
//! The table is oriented towards the payloads a package root typically
//! holds: firmware images, archives, and their checksum/manifest sidecars.
//! Anything unrecognized is served as a generic binary.

use std::path::Path;

/// Get MIME Content-Type for a file path
pub fn content_type_for(path: &Path) -> &'static str {
    from_extension(path.extension().and_then(|e| e.to_str()))
}

/// Get MIME Content-Type based on file extension
///
/// # Examples
/// ```
/// use pkgserve::http::mime::from_extension;
/// assert_eq!(from_extension(Some("tgz")), "application/gzip");
/// assert_eq!(from_extension(Some("img")), "application/octet-stream");
/// assert_eq!(from_extension(None), "application/octet-stream");
/// ```
pub fn from_extension(extension: Option<&str>) -> &'static str {
    match extension {
        // Archives and compressed images
        Some("tgz" | "gz" | "gzip") => "application/gzip",
        Some("tar") => "application/x-tar",
        Some("zip") => "application/zip",
        Some("xz") => "application/x-xz",
        Some("bz2") => "application/x-bzip2",

        // Installer / package formats
        Some("rpm") => "application/x-rpm",
        Some("deb") => "application/vnd.debian.binary-package",
        Some("pdf") => "application/pdf",

        // Checksum and manifest sidecars
        Some("txt" | "md5" | "sha1" | "sha256" | "asc") => "text/plain; charset=utf-8",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("yaml" | "yml") => "application/yaml",
        Some("html" | "htm") => "text/html; charset=utf-8",

        // Raw firmware/disk images and everything else
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_types() {
        assert_eq!(from_extension(Some("tgz")), "application/gzip");
        assert_eq!(from_extension(Some("tar")), "application/x-tar");
        assert_eq!(from_extension(Some("zip")), "application/zip");
        assert_eq!(from_extension(Some("rpm")), "application/x-rpm");
    }

    #[test]
    fn test_sidecar_types() {
        assert_eq!(from_extension(Some("sha256")), "text/plain; charset=utf-8");
        assert_eq!(from_extension(Some("json")), "application/json");
    }

    #[test]
    fn test_unknown_extension_is_binary() {
        assert_eq!(from_extension(Some("img")), "application/octet-stream");
        assert_eq!(from_extension(Some("bin")), "application/octet-stream");
        assert_eq!(from_extension(Some("xyz")), "application/octet-stream");
        assert_eq!(from_extension(None), "application/octet-stream");
    }

    #[test]
    fn test_content_type_for_path() {
        assert_eq!(
            content_type_for(Path::new("junos-21.4.tgz")),
            "application/gzip"
        );
        // No extension at all
        assert_eq!(
            content_type_for(Path::new("firmware")),
            "application/octet-stream"
        );
    }
}
