//! Package name validation and path resolution.
//!
//! The request name is untrusted. Validation happens entirely on the
//! decoded string, before any filesystem access; containment is then
//! re-checked on the canonicalized path so a symlink cannot escape the
//! serving root even when the name itself looks harmless.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::DeliveryError;
use crate::http::percent;

/// Validate the raw (still percent-encoded) name segment from the URL.
///
/// Returns the decoded name. Rejects without touching the filesystem:
/// malformed escapes, empty names, NUL bytes, `.`/`..` names, and any
/// separator. The route serves single path segments only, so a slash
/// (plain or smuggled through `%2f`) has no legitimate reading.
pub fn validate_name(raw: &str) -> Result<String, DeliveryError> {
    let name = percent::decode(raw).ok_or(DeliveryError::InvalidName)?;

    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(DeliveryError::InvalidName);
    }

    Ok(name)
}

/// Resolve a validated name to a canonical path inside `root`.
///
/// `root` must already be canonical. Symlinks are resolved first, then
/// the result must still live under the root; a link pointing elsewhere
/// is rejected the same way a traversal name is.
pub fn resolve_path(root: &Path, name: &str) -> Result<PathBuf, DeliveryError> {
    let candidate = root.join(name);

    let resolved = candidate.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DeliveryError::NotFound,
        _ => DeliveryError::Io(e),
    })?;

    if !resolved.starts_with(root) {
        return Err(DeliveryError::InvalidName);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(raw: &str) {
        assert!(
            matches!(validate_name(raw), Err(DeliveryError::InvalidName)),
            "expected '{raw}' to be rejected"
        );
    }

    #[test]
    fn test_accepts_plain_names() {
        assert_eq!(validate_name("junos-21.4.img").unwrap(), "junos-21.4.img");
        assert_eq!(validate_name("a%20b.tgz").unwrap(), "a b.tgz");
        assert_eq!(validate_name("..hidden").unwrap(), "..hidden");
    }

    #[test]
    fn test_rejects_traversal_names() {
        assert_invalid("..");
        assert_invalid("../etc/passwd");
        assert_invalid("..%2f..%2fetc%2fpasswd");
        assert_invalid("%2e%2e");
        assert_invalid("%2e%2e%2fpasswd");
    }

    #[test]
    fn test_rejects_absolute_and_nested_paths() {
        assert_invalid("/etc/passwd");
        assert_invalid("%2fetc%2fpasswd");
        assert_invalid("sub/file.img");
        assert_invalid("sub%5cfile.img");
    }

    #[test]
    fn test_rejects_empty_and_malformed() {
        assert_invalid("");
        assert_invalid(".");
        assert_invalid("%");
        assert_invalid("%zz");
        assert_invalid("file%00.img");
    }

    #[test]
    fn test_resolve_finds_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::write(root.join("pkg.img"), b"data").unwrap();

        let resolved = resolve_path(&root, "pkg.img").unwrap();
        assert_eq!(resolved, root.join("pkg.img"));
    }

    #[test]
    fn test_resolve_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert!(matches!(
            resolve_path(&root, "absent.img"),
            Err(DeliveryError::NotFound)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlink_escaping_root() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("root");
        std::fs::create_dir(&root).unwrap();
        let root = root.canonicalize().unwrap();

        let secret = base.path().join("secret.txt");
        std::fs::write(&secret, b"outside").unwrap();
        std::os::unix::fs::symlink(&secret, root.join("link.txt")).unwrap();

        assert!(matches!(
            resolve_path(&root, "link.txt"),
            Err(DeliveryError::InvalidName)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_allows_symlink_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::write(root.join("real.img"), b"data").unwrap();
        std::os::unix::fs::symlink(root.join("real.img"), root.join("alias.img")).unwrap();

        let resolved = resolve_path(&root, "alias.img").unwrap();
        assert_eq!(resolved, root.join("real.img"));
    }
}
