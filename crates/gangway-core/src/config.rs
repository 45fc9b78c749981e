// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one bridge instance, supplied by the host at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Writable directory the engine binds its persistent state to.
    /// On mobile this is the app sandbox data directory.
    pub storage_dir: PathBuf,
    /// Worker threads on the bridge's dedicated runtime.
    pub worker_threads: usize,
    /// Optional per-call deadline. `None` means a hung engine call hangs its
    /// one-shot result indefinitely.
    pub call_timeout: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::new(),
            worker_threads: 2,
            call_timeout: None,
        }
    }
}

impl BridgeConfig {
    /// Config rooted at the given storage directory, everything else default.
    pub fn for_storage_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: dir.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_timeout() {
        let config = BridgeConfig::default();
        assert!(config.call_timeout.is_none());
        assert_eq!(config.worker_threads, 2);
    }

    #[test]
    fn for_storage_dir_sets_only_the_dir() {
        let config = BridgeConfig::for_storage_dir("/tmp/appdata");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/appdata"));
        assert!(config.call_timeout.is_none());
    }
}
