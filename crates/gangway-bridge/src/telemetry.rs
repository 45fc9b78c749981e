// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Opt-in tracing setup for hosts without their own subscriber.

/// Install a formatted subscriber honoring `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once — later calls are no-ops, so a host and an
/// embedded test harness can both ask for telemetry.
pub fn init_telemetry() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
