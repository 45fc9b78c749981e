// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async result bridge.
//
// Owns a dedicated tokio runtime so the host runtime's thread is never
// parked: every submission becomes one `spawn_blocking` task, and its single
// terminal result travels back over a oneshot channel. Per call the state
// machine is Submitted → Dispatched → {Resolved | Rejected}, visible in the
// trace log.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tracing::{debug, info};

use gangway_core::config::BridgeConfig;
use gangway_core::error::{GangwayError, Result};
use gangway_core::types::{CallFailure, CallId};
use gangway_engine::{EngineHandle, NativeEngine};

use crate::dispatcher::Dispatcher;
use crate::promise::HostPromise;
use crate::ticket::{CallOutcome, CallTicket};

/// One process-wide bridge instance: runtime, dispatcher, engine handle.
///
/// Dropping the bridge shuts the runtime down; results still in flight are
/// discarded, which their tickets and promises observe as teardown rather
/// than as a crash.
pub struct Bridge {
    dispatcher: Arc<Dispatcher>,
    config: BridgeConfig,
    runtime: Runtime,
}

impl Bridge {
    /// Build a bridge around the given engine.
    ///
    /// Spawns the worker runtime immediately; the engine stays Uninitialized
    /// until `submit_init` succeeds.
    pub fn new(config: BridgeConfig, engine: Arc<dyn NativeEngine>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name("gangway-worker")
            .enable_all()
            .build()?;

        let handle = Arc::new(EngineHandle::new(engine));
        info!(workers = config.worker_threads.max(1), "bridge runtime started");

        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new(handle)),
            config,
            runtime,
        })
    }

    /// The lifecycle handle, for hosts that want to inspect engine state.
    pub fn engine_handle(&self) -> &Arc<EngineHandle> {
        self.dispatcher.handle()
    }

    /// Initialize the engine against the configured storage directory,
    /// off the calling thread, with the same one-shot contract as a call.
    ///
    /// Resolves with `null` on success. No timeout applies: setup may
    /// legitimately run long (first-launch migrations).
    pub fn submit_init(&self) -> CallTicket {
        let call_id = CallId::new();
        let (tx, rx) = oneshot::channel();
        let handle = Arc::clone(self.dispatcher.handle());
        let storage_dir = self.config.storage_dir.clone();

        debug!(%call_id, dir = %storage_dir.display(), "init submitted");
        self.runtime.spawn(async move {
            let work =
                tokio::task::spawn_blocking(move || handle.init(&storage_dir).map(|()| "null".to_string()));
            let outcome = settle(call_id, flatten(work.await, Origin::Init));
            let _ = tx.send(outcome);
        });

        CallTicket::new(call_id, rx)
    }

    /// Submit one call; the returned ticket settles exactly once.
    ///
    /// When `call_timeout` is configured, a call that overruns it rejects
    /// with kind `timeout`; the blocking worker is not killed, and whatever
    /// it eventually produces is discarded on arrival.
    pub fn submit(&self, request_text: String) -> CallTicket {
        let call_id = CallId::new();
        let (tx, rx) = oneshot::channel();
        let dispatcher = Arc::clone(&self.dispatcher);
        let timeout = self.config.call_timeout;

        debug!(%call_id, "call submitted");
        self.runtime.spawn(async move {
            debug!(%call_id, "call dispatched");
            let work = tokio::task::spawn_blocking(move || dispatcher.dispatch(&request_text));

            let result = match timeout {
                Some(deadline) => match tokio::time::timeout(deadline, work).await {
                    Ok(joined) => flatten(joined, Origin::Call),
                    Err(_) => Err(GangwayError::Timeout),
                },
                None => flatten(work.await, Origin::Call),
            };

            let _ = tx.send(settle(call_id, result));
        });

        CallTicket::new(call_id, rx)
    }

    /// `submit`, delivered through a host promise instead of a ticket.
    pub fn submit_with_promise(&self, request_text: String, promise: Box<dyn HostPromise>) {
        self.complete_promise(self.submit(request_text), promise);
    }

    /// `submit_init`, delivered through a host promise.
    pub fn init_with_promise(&self, promise: Box<dyn HostPromise>) {
        self.complete_promise(self.submit_init(), promise);
    }

    /// Forward one ticket's terminal event into one promise settlement.
    /// A ticket that reports teardown settles nothing — the promise is
    /// dropped with the host runtime, per the documented limitation.
    fn complete_promise(&self, ticket: CallTicket, promise: Box<dyn HostPromise>) {
        self.runtime.spawn(async move {
            match ticket.settled().await {
                Some(Ok(payload)) => promise.resolve(&payload),
                Some(Err(failure)) => promise.reject(&failure.kind, &failure.message),
                None => {}
            }
        });
    }
}

/// Which submission a worker result belongs to — decides the error kind a
/// panicked worker surfaces as.
#[derive(Clone, Copy)]
enum Origin {
    Init,
    Call,
}

/// Collapse a join result: a panicked worker becomes a rejection, not a
/// hang. A panic during setup is an init failure; during a call, a fault.
fn flatten(
    joined: std::result::Result<Result<String>, tokio::task::JoinError>,
    origin: Origin,
) -> Result<String> {
    match joined {
        Ok(result) => result,
        Err(join_err) => Err(match origin {
            Origin::Init => GangwayError::Init(format!("worker task failed: {join_err}")),
            Origin::Call => GangwayError::NativeFault {
                op: "call".to_string(),
                message: format!("worker task failed: {join_err}"),
            },
        }),
    }
}

/// Convert to the wire outcome and trace the terminal transition.
fn settle(call_id: CallId, result: Result<String>) -> CallOutcome {
    match result {
        Ok(payload) => {
            debug!(%call_id, "call resolved");
            Ok(payload)
        }
        Err(err) => {
            debug!(%call_id, kind = err.kind(), "call rejected");
            Err(CallFailure::from(&err))
        }
    }
}
