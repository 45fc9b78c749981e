// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gangway — Host-facing bridge: dispatcher, one-shot results, registration.
//
// This crate is what a host runtime embeds. The host registers a named
// module once at startup (no reflection, no annotation scanning), then
// issues `init` and `call` through it; every submission completes exactly
// one promise or ticket off the host's own thread.

pub mod bridge;
pub mod dispatcher;
pub mod module;
pub mod promise;
pub mod telemetry;
pub mod ticket;

pub use bridge::Bridge;
pub use dispatcher::Dispatcher;
pub use module::NativeModule;
pub use promise::{HostPromise, LogPromise};
pub use telemetry::init_telemetry;
pub use ticket::{CallOutcome, CallTicket};
