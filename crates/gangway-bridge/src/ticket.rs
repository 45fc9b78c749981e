// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot call result.
//
// The worker writes the result once; the ticket holder reads it once. If the
// bridge is torn down before the worker finishes, the pending result is
// discarded and the ticket reports the teardown instead of hanging.

use tokio::sync::oneshot;

use gangway_core::types::{CallFailure, CallId};

/// Terminal outcome of one call: the bare response payload text, or the
/// `{kind, message}` rejection.
pub type CallOutcome = Result<String, CallFailure>;

/// Receiving half of one submitted call.
pub struct CallTicket {
    id: CallId,
    rx: oneshot::Receiver<CallOutcome>,
}

impl CallTicket {
    pub(crate) fn new(id: CallId, rx: oneshot::Receiver<CallOutcome>) -> Self {
        Self { id, rx }
    }

    /// Tracing id of the call this ticket belongs to.
    pub fn id(&self) -> CallId {
        self.id
    }

    /// Block the current thread until the call settles.
    ///
    /// Returns `None` if the bridge was dropped before the result arrived
    /// (the documented teardown discard). Must not be called from inside an
    /// async context — hosts embedding the bridge are not async callers.
    pub fn wait(self) -> Option<CallOutcome> {
        self.rx.blocking_recv().ok()
    }

    /// Await the call from an async context.
    pub async fn settled(self) -> Option<CallOutcome> {
        self.rx.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_returns_the_single_result() {
        let (tx, rx) = oneshot::channel();
        let ticket = CallTicket::new(CallId::new(), rx);
        tx.send(Ok("{}".to_string())).expect("send");
        assert_eq!(ticket.wait(), Some(Ok("{}".to_string())));
    }

    #[test]
    fn wait_observes_teardown_as_none() {
        let (tx, rx) = oneshot::channel::<CallOutcome>();
        let ticket = CallTicket::new(CallId::new(), rx);
        drop(tx);
        assert_eq!(ticket.wait(), None);
    }
}
