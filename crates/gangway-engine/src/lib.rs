// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gangway — Native engine abstraction and lifecycle.
//
// The engine is the opaque subsystem that actually performs work. This crate
// defines the trait the bridge dispatches against, the process-wide lifecycle
// handle (exactly one successful init), and a built-in SQLite-backed
// key/value engine used on desktop and in tests.

pub mod handle;
pub mod kv;
pub mod traits;

pub use handle::EngineHandle;
pub use kv::KvEngine;
pub use traits::NativeEngine;
