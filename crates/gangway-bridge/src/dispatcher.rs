// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Call dispatcher: decode, gate, invoke, re-encode.
//
// The dispatcher never retries and invokes the engine at most once per
// request. Lifecycle and decode failures are caught here, before the engine
// is touched at all.

use std::sync::Arc;

use tracing::{debug, instrument};

use gangway_core::error::{GangwayError, Result};
use gangway_core::types::CallRequest;
use gangway_engine::EngineHandle;

/// Translates one request text into one engine invocation and one reply.
pub struct Dispatcher {
    handle: Arc<EngineHandle>,
}

impl Dispatcher {
    pub fn new(handle: Arc<EngineHandle>) -> Self {
        Self { handle }
    }

    /// The lifecycle handle this dispatcher gates on.
    pub fn handle(&self) -> &Arc<EngineHandle> {
        &self.handle
    }

    /// Run one call end to end, synchronously.
    ///
    /// Order matters: the init gate comes first (a pre-init call is
    /// `NotInitialized` even if its payload is also malformed), then the
    /// decode, then exactly one `execute`.
    #[instrument(skip_all)]
    pub fn dispatch(&self, request_text: &str) -> Result<String> {
        self.handle.ensure_initialized()?;

        let request: CallRequest = serde_json::from_str(request_text)
            .map_err(|e| GangwayError::MalformedRequest(e.to_string()))?;

        debug!(op = %request.op, "dispatching to engine");
        let response = self.handle.engine().execute(&request.op, request.args)?;

        Ok(serde_json::to_string(&response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gangway_core::error::Result;
    use gangway_engine::NativeEngine;
    use serde_json::{Value, json};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine that counts invocations and answers `ping` only.
    struct CountingEngine {
        calls: AtomicUsize,
    }

    impl CountingEngine {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl NativeEngine for CountingEngine {
        fn name(&self) -> &str {
            "counting"
        }

        fn setup(&self, _storage_dir: &Path) -> Result<()> {
            Ok(())
        }

        fn execute(&self, op: &str, _args: Value) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match op {
                "ping" => Ok(json!({ "pong": true })),
                _ => Err(GangwayError::NativeFault {
                    op: op.to_string(),
                    message: "unknown operation".to_string(),
                }),
            }
        }
    }

    fn initialized_dispatcher() -> (Dispatcher, Arc<CountingEngine>, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = Arc::new(CountingEngine::new());
        let handle = Arc::new(EngineHandle::new(Arc::clone(&engine) as _));
        handle.init(dir.path()).expect("init");
        (Dispatcher::new(handle), engine, dir)
    }

    #[test]
    fn well_formed_call_round_trips() {
        let (dispatcher, engine, _dir) = initialized_dispatcher();

        let reply = dispatcher.dispatch(r#"{"op":"ping"}"#).expect("dispatch");
        assert_eq!(reply, r#"{"pong":true}"#);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pre_init_call_never_reaches_the_engine() {
        let engine = Arc::new(CountingEngine::new());
        let handle = Arc::new(EngineHandle::new(Arc::clone(&engine) as _));
        let dispatcher = Dispatcher::new(handle);

        let err = dispatcher
            .dispatch(r#"{"op":"ping"}"#)
            .expect_err("gate closed");
        assert_eq!(err.kind(), "not_initialized");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn malformed_payload_never_reaches_the_engine() {
        let (dispatcher, engine, _dir) = initialized_dispatcher();

        for bad in ["not json", "", r#"{"op":"#, r#"{"args":{}}"#] {
            let err = dispatcher.dispatch(bad).expect_err("malformed");
            assert_eq!(err.kind(), "malformed_request", "payload: {bad:?}");
        }
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn engine_rejection_surfaces_as_native_fault() {
        let (dispatcher, engine, _dir) = initialized_dispatcher();

        let err = dispatcher
            .dispatch(r#"{"op":"nope"}"#)
            .expect_err("fault");
        assert_eq!(err.kind(), "native_fault");
        // The engine was invoked exactly once — no retry.
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }
}
