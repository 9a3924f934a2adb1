//! # One-shot teardown signal.
//!
//! [`TeardownSignal`] marks owner destruction. It wraps a
//! [`CancellationToken`]: firing is idempotent, every clone observes the same
//! state, and waiters are woken exactly once.

use tokio_util::sync::CancellationToken;

/// One-shot event fired when the owner is destroyed.
#[derive(Clone, Debug, Default)]
pub struct TeardownSignal {
    token: CancellationToken,
}

impl TeardownSignal {
    /// Creates a signal that has not fired yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal. Subsequent calls have no effect.
    pub fn fire(&self) {
        self.token.cancel();
    }

    /// Returns `true` once the signal has fired.
    pub fn is_fired(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes when the signal fires (immediately if it already has).
    pub async fn fired(&self) {
        self.token.cancelled().await
    }

    /// Returns the underlying token, e.g. to hand a child token to a spawned task.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl From<CancellationToken> for TeardownSignal {
    fn from(token: CancellationToken) -> Self {
        Self { token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = TeardownSignal::new();
        let b = a.clone();
        assert!(!b.is_fired());
        a.fire();
        a.fire();
        assert!(b.is_fired());
    }

    #[tokio::test]
    async fn fired_resolves_after_fire() {
        let s = TeardownSignal::new();
        let waiter = {
            let s = s.clone();
            tokio::spawn(async move { s.fired().await })
        };
        s.fire();
        waiter.await.unwrap();
        assert!(s.token().is_cancelled());
    }
}
