// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Gangway.
//
// Every failure that can reach the host runtime is a variant here, and every
// variant maps to a stable machine-readable kind string. The host sees the
// kind plus a human-readable message — never a panic across the boundary.

use thiserror::Error;

/// Top-level error type for all Gangway operations.
#[derive(Debug, Error)]
pub enum GangwayError {
    // -- Lifecycle errors --
    #[error("engine initialization failed: {0}")]
    Init(String),

    #[error("engine already initialized")]
    AlreadyInitialized,

    #[error("engine not initialized")]
    NotInitialized,

    // -- Call errors --
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("native engine fault in '{op}': {message}")]
    NativeFault { op: String, message: String },

    #[error("call exceeded the configured deadline")]
    Timeout,

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GangwayError {
    /// Stable machine-readable kind delivered with every rejection.
    ///
    /// Hosts dispatch on these strings, so they are part of the wire
    /// contract and must not change between releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init(_) => "init_error",
            Self::AlreadyInitialized => "already_initialized",
            Self::NotInitialized => "not_initialized",
            Self::MalformedRequest(_) => "malformed_request",
            Self::NativeFault { .. } => "native_fault",
            Self::Timeout => "timeout",
            Self::Database(_) => "database",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GangwayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(GangwayError::NotInitialized.kind(), "not_initialized");
        assert_eq!(
            GangwayError::MalformedRequest("eof".into()).kind(),
            "malformed_request"
        );
        assert_eq!(
            GangwayError::NativeFault {
                op: "ping".into(),
                message: "boom".into()
            }
            .kind(),
            "native_fault"
        );
        assert_eq!(GangwayError::Timeout.kind(), "timeout");
    }

    #[test]
    fn serde_json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let converted: GangwayError = err.into();
        assert_eq!(converted.kind(), "serialization");
    }
}
