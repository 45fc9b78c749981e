// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Gangway bridge.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier attached to a call for tracing.
///
/// Calls have no identity at the protocol level — the id exists so log lines
/// from the worker can be correlated with the submission that spawned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One decoded request envelope: an operation name plus free-form arguments.
///
/// The wire form is JSON text, `{"op": "kv.set", "args": {...}}`. `args` may
/// be omitted entirely for argument-less operations like `ping`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    /// Operation name, owned by the engine (this layer never interprets it).
    pub op: String,
    /// Free-form arguments forwarded to the engine untouched.
    #[serde(default)]
    pub args: serde_json::Value,
}

/// The failure half of a call result, as delivered to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFailure {
    /// Machine-readable kind (see `GangwayError::kind`).
    pub kind: String,
    /// Human-readable message for logs and error surfaces.
    pub message: String,
}

impl From<&crate::GangwayError> for CallFailure {
    fn from(err: &crate::GangwayError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Lifecycle states of the engine handle.
///
/// Exactly one successful `init` per process; `Failed` is terminal and keeps
/// the engine's setup error message for every later rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No init attempt has completed yet.
    Uninitialized,
    /// Setup succeeded — calls may be dispatched.
    Initialized,
    /// Setup failed; the message is what the engine reported.
    Failed(String),
}
