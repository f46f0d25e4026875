// Application state module
// Read-only state shared across request tasks.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use super::types::Config;

/// Application state
///
/// Everything here is fixed once the server enters its serving loop;
/// request tasks only read it, so no locking is needed.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root. Every file the service returns must
    /// resolve to a descendant of this directory.
    pub root: PathBuf,
    /// Access-log toggle cached for lock-free reads on the request path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Resolve the configured package root and build the shared state.
    ///
    /// Startup fails here when the root does not exist or cannot be
    /// canonicalized; the service never starts serving with an
    /// unresolvable root.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = Path::new(&config.packages.root)
            .canonicalize()
            .map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("cannot resolve package root '{}': {e}", config.packages.root),
                )
            })?;

        Ok(Self {
            cached_access_log: AtomicBool::new(config.logging.access_log),
            config,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config(root: &str) -> Config {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.packages.root = root.to_string();
        cfg
    }

    #[test]
    fn test_root_is_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(test_config(dir.path().to_str().unwrap())).unwrap();
        assert!(state.root.is_absolute());
        assert_eq!(state.root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = AppState::new(test_config("/definitely/not/a/real/dir")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
