// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host module registration.
//
// No reflection, no annotation scanning: the host calls `register` once at
// process startup and gets back a named module exposing two asynchronous
// operations (`init`, `call`) and one synchronous lookup (`app_dir`). The
// sandbox path is supplied BY the host — the platform knows where its app
// data lives, this layer only stores and returns it.

use std::sync::Arc;

use tracing::info;

use gangway_core::config::BridgeConfig;
use gangway_core::error::Result;
use gangway_engine::NativeEngine;

use crate::bridge::Bridge;
use crate::promise::HostPromise;

/// The surface a host runtime binds its native module to.
pub struct NativeModule {
    name: String,
    app_dir: String,
    bridge: Bridge,
}

impl NativeModule {
    /// Register a module whose engine stores its state in the app sandbox
    /// directory the host provides.
    pub fn register(
        name: impl Into<String>,
        engine: Arc<dyn NativeEngine>,
        app_dir: impl Into<String>,
    ) -> Result<Self> {
        let app_dir = app_dir.into();
        let config = BridgeConfig::for_storage_dir(&app_dir);
        Self::register_with_config(name, engine, app_dir, config)
    }

    /// Register with an explicit config (worker count, timeout, or a storage
    /// directory different from the host sandbox path).
    pub fn register_with_config(
        name: impl Into<String>,
        engine: Arc<dyn NativeEngine>,
        app_dir: impl Into<String>,
        config: BridgeConfig,
    ) -> Result<Self> {
        let name = name.into();
        let app_dir = app_dir.into();
        let bridge = Bridge::new(config, engine)?;

        info!(module = %name, app_dir = %app_dir, "native module registered");
        Ok(Self {
            name,
            app_dir,
            bridge,
        })
    }

    /// Module name the host runtime exposes to its scripts.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Synchronous lookup of the host-supplied sandbox path.
    pub fn app_dir(&self) -> &str {
        &self.app_dir
    }

    /// Asynchronous `init`: settles the promise once setup finishes.
    pub fn init(&self, promise: Box<dyn HostPromise>) {
        self.bridge.init_with_promise(promise);
    }

    /// Asynchronous `call`: settles the promise with the engine's reply.
    pub fn call(&self, request_text: impl Into<String>, promise: Box<dyn HostPromise>) {
        self.bridge.submit_with_promise(request_text.into(), promise);
    }

    /// Direct access for hosts that prefer tickets over promises.
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}
