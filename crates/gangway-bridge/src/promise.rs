// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Promise delivery back into the host runtime.
//
// Each platform (JS engine on Android/iOS, test harness on desktop) supplies
// its own `HostPromise`. The methods consume the promise, so delivering a
// second terminal event is unrepresentable.

use tracing::info;

/// One host-side promise: settled exactly once, then gone.
///
/// `resolve` carries the bare response payload text; `reject` carries the
/// machine-readable kind plus a human-readable message. Implementations must
/// be safe to settle from a worker thread.
pub trait HostPromise: Send {
    /// Settle successfully with the response payload.
    fn resolve(self: Box<Self>, payload: &str);

    /// Settle with a failure.
    fn reject(self: Box<Self>, kind: &str, message: &str);
}

/// Promise that just logs its terminal event.
///
/// Stands in for a real host on desktop builds and in smoke tests, the same
/// role the platform stubs play elsewhere.
pub struct LogPromise;

impl HostPromise for LogPromise {
    fn resolve(self: Box<Self>, payload: &str) {
        info!(payload, "promise resolved");
    }

    fn reject(self: Box<Self>, kind: &str, message: &str) {
        info!(kind, message, "promise rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    /// Promise that forwards its terminal event over a channel.
    struct ChannelPromise(mpsc::Sender<Result<String, (String, String)>>);

    impl HostPromise for ChannelPromise {
        fn resolve(self: Box<Self>, payload: &str) {
            let _ = self.0.send(Ok(payload.to_string()));
        }

        fn reject(self: Box<Self>, kind: &str, message: &str) {
            let _ = self.0.send(Err((kind.to_string(), message.to_string())));
        }
    }

    #[test]
    fn channel_promise_delivers_resolution() {
        let (tx, rx) = mpsc::channel();
        let promise: Box<dyn HostPromise> = Box::new(ChannelPromise(tx));
        promise.resolve("{}");
        assert_eq!(rx.recv().expect("event"), Ok("{}".to_string()));
    }

    #[test]
    fn channel_promise_delivers_rejection() {
        let (tx, rx) = mpsc::channel();
        let promise: Box<dyn HostPromise> = Box::new(ChannelPromise(tx));
        promise.reject("timeout", "too slow");
        assert_eq!(
            rx.recv().expect("event"),
            Err(("timeout".to_string(), "too slow".to_string()))
        );
    }
}
