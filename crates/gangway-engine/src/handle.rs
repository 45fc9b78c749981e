// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine lifecycle handle.
//
// Exactly one successful init per process. Concurrent init calls race under
// an init guard to exactly one winner; losers get `AlreadyInitialized`. The
// state transitions to Initialized only after setup has returned, and setup
// runs outside the state lock — a call submitted while init is still in
// flight observes Uninitialized without blocking and is rejected.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, instrument, warn};

use gangway_core::error::{GangwayError, Result};
use gangway_core::types::EngineState;

use crate::traits::NativeEngine;

/// Owns the engine and gates every dispatch on its lifecycle state.
///
/// `Failed` is terminal: once setup has failed, later init attempts are
/// rejected with the original failure message rather than retried, so the
/// host cannot end up with two half-initialized storage layouts.
pub struct EngineHandle {
    engine: Arc<dyn NativeEngine>,
    /// Serializes init attempts. Held across `setup`, which may block.
    init_guard: Mutex<()>,
    /// Lifecycle state. Only ever locked briefly — never across `setup` —
    /// so dispatchers read it without waiting on an in-flight init.
    state: Mutex<EngineState>,
}

impl EngineHandle {
    /// Wrap an engine in an uninitialized handle.
    pub fn new(engine: Arc<dyn NativeEngine>) -> Self {
        Self {
            engine,
            init_guard: Mutex::new(()),
            state: Mutex::new(EngineState::Uninitialized),
        }
    }

    /// One-time engine setup bound to `storage_dir`.
    ///
    /// The directory must be non-empty and denote an existing directory.
    /// The state stays Uninitialized until the engine's own `setup` has
    /// returned: a call dispatched meanwhile is rejected, never queued
    /// behind the setup and never shown a half-built engine.
    #[instrument(skip(self), fields(engine = self.engine.name()))]
    pub fn init(&self, storage_dir: &Path) -> Result<()> {
        let _init = self
            .init_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match self.state() {
            EngineState::Initialized => return Err(GangwayError::AlreadyInitialized),
            EngineState::Failed(message) => {
                return Err(GangwayError::Init(format!(
                    "previous initialization failed: {message}"
                )));
            }
            EngineState::Uninitialized => {}
        }

        if storage_dir.as_os_str().is_empty() {
            return Err(GangwayError::Init("storage directory is empty".into()));
        }
        if !storage_dir.is_dir() {
            return Err(GangwayError::Init(format!(
                "storage directory is not an accessible directory: {}",
                storage_dir.display()
            )));
        }

        let transition = match self.engine.setup(storage_dir) {
            Ok(()) => {
                info!(dir = %storage_dir.display(), "engine initialized");
                EngineState::Initialized
            }
            Err(err) => {
                warn!(error = %err, "engine setup failed");
                EngineState::Failed(err.to_string())
            }
        };

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = transition.clone();
        drop(state);

        match transition {
            EngineState::Failed(message) => Err(GangwayError::Init(message)),
            _ => Ok(()),
        }
    }

    /// Current lifecycle state (cloned snapshot).
    pub fn state(&self) -> EngineState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Gate for the dispatcher: `Ok` only once Initialized.
    pub fn ensure_initialized(&self) -> Result<()> {
        match self.state() {
            EngineState::Initialized => Ok(()),
            EngineState::Uninitialized | EngineState::Failed(_) => {
                Err(GangwayError::NotInitialized)
            }
        }
    }

    /// The wrapped engine. Callers must check `ensure_initialized` first.
    pub fn engine(&self) -> Arc<dyn NativeEngine> {
        Arc::clone(&self.engine)
    }
}
