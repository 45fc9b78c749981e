// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait the bridge dispatches against.
//
// Implementations are synchronous on purpose: engines tend to sit on
// blocking storage (SQLite, the filesystem), so the bridge runs every call
// inside `tokio::task::spawn_blocking` rather than forcing async down here.

use gangway_core::error::Result;
use serde_json::Value;
use std::path::Path;

/// An embedded engine the bridge can initialize and call into.
///
/// Implementations must be internally synchronized: after `setup` returns,
/// `execute` may be invoked from multiple worker threads concurrently and
/// the engine decides whether to serialize or parallelize.
pub trait NativeEngine: Send + Sync {
    /// Short engine name for log lines (e.g. "kv", "mls-frontend").
    fn name(&self) -> &str;

    /// One-time setup, binding persistent state to `storage_dir`.
    ///
    /// Called at most once per process by the lifecycle handle, under its
    /// init lock. Must leave no partial state behind on failure.
    fn setup(&self, storage_dir: &Path) -> Result<()>;

    /// Execute one named operation with free-form JSON arguments.
    ///
    /// Returns the response value, or `NativeFault` for well-formed requests
    /// the engine cannot honor (unknown op, bad arguments, domain errors).
    fn execute(&self, op: &str, args: Value) -> Result<Value>;
}
