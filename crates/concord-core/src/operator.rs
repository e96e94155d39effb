//! Operator control state for a running negotiation.
//!
//! [`OperatorHandle`] is cheap to clone and shared between the turn loop and
//! whatever drives it (the binary's Ctrl-C handler, a test, a dashboard).
//! The turn loop consults it before every agent cycle; a generation already
//! in flight is allowed to finish.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

/// Reason a run stopped before or at its final turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationEndReason {
    /// Every configured turn ran.
    Completed,
    /// An operator issued a stop command.
    OperatorStop,
}

#[derive(Debug, Default)]
struct OperatorState {
    paused: AtomicBool,
    stop_requested: AtomicBool,
    wake: Notify,
}

/// Shared handle to pause, resume or stop a run.
#[derive(Debug, Clone, Default)]
pub struct OperatorHandle {
    state: Arc<OperatorState>,
}

impl OperatorHandle {
    /// Create a handle in the running, not-stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Check whether the run is currently paused.
    pub fn is_paused(&self) -> bool {
        self.state.paused.load(Ordering::Acquire)
    }

    /// Pause before the next agent cycle.
    pub fn pause(&self) {
        self.state.paused.store(true, Ordering::Release);
    }

    /// Resume a paused run.
    pub fn resume(&self) {
        self.state.paused.store(false, Ordering::Release);
        self.state.wake.notify_waiters();
    }

    /// Wait until the run is resumed or a stop is requested.
    ///
    /// Returns immediately if not paused.
    pub async fn wait_if_paused(&self) {
        loop {
            let notified = self.state.wake.notified();
            if !self.is_paused() || self.is_stop_requested() {
                return;
            }
            notified.await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop at the next agent-cycle boundary.
    pub fn request_stop(&self) {
        self.state.stop_requested.store(true, Ordering::Release);
        self.state.wake.notify_waiters();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.state.stop_requested.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn fresh_handle_is_running() {
        let handle = OperatorHandle::new();
        assert!(!handle.is_paused());
        assert!(!handle.is_stop_requested());
    }

    #[test]
    fn clones_share_state() {
        let handle = OperatorHandle::new();
        let remote = handle.clone();
        remote.pause();
        assert!(handle.is_paused());
        remote.request_stop();
        assert!(handle.is_stop_requested());
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_running() {
        let handle = OperatorHandle::new();
        let waited = tokio::time::timeout(Duration::from_millis(50), handle.wait_if_paused()).await;
        assert!(waited.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn resume_wakes_waiter() {
        let handle = OperatorHandle::new();
        handle.pause();
        let remote = handle.clone();
        let waiter = tokio::spawn(async move { handle.wait_if_paused().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());
        remote.resume();
        assert!(waiter.await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_releases_paused_waiter() {
        let handle = OperatorHandle::new();
        handle.pause();
        let remote = handle.clone();
        let waiter = tokio::spawn(async move { handle.wait_if_paused().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        remote.request_stop();
        assert!(waiter.await.is_ok());
    }
}
