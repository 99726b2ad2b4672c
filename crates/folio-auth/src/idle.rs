//! Idle monitor for an admin session.
//!
//! A spawned task keeps two countdowns from the last activity: a warning
//! and a hard timeout. Activity resets both. The warning fires once per
//! idle stretch; the timeout fires once and ends the task.

use std::time::Duration;

use folio_config::IdleConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::error::AuthError;

/// Signals emitted to the session's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// No activity for the warning delay; `remaining` until the timeout.
    Warn { remaining: Duration },
    /// No activity for the full timeout. The owner should end the session.
    Expired,
}

/// Cloneable handle that reports user activity to the monitor.
#[derive(Debug, Clone)]
pub struct ActivityHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl ActivityHandle {
    /// Reset both countdowns. A no-op once the monitor has stopped.
    pub fn touch(&self) {
        let _ = self.tx.send(());
    }
}

#[derive(Debug)]
pub struct IdleMonitor {
    activity: ActivityHandle,
    signals: mpsc::Receiver<SessionSignal>,
    task: JoinHandle<()>,
}

impl IdleMonitor {
    /// Start monitoring on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// [`AuthError::IdleWindow`] unless `warning < timeout`.
    pub fn spawn(warning: Duration, timeout: Duration) -> Result<Self, AuthError> {
        if warning >= timeout {
            return Err(AuthError::IdleWindow { warning, timeout });
        }
        let (activity_tx, activity_rx) = mpsc::unbounded_channel();
        let (signal_tx, signal_rx) = mpsc::channel(4);
        let task = tokio::spawn(run(warning, timeout, activity_rx, signal_tx));
        tracing::debug!(?warning, ?timeout, "idle monitor started");
        Ok(Self {
            activity: ActivityHandle { tx: activity_tx },
            signals: signal_rx,
            task,
        })
    }

    /// # Errors
    ///
    /// [`AuthError::IdleWindow`] unless the configured warning precedes the
    /// timeout.
    pub fn from_config(config: &IdleConfig) -> Result<Self, AuthError> {
        Self::spawn(config.warning(), config.timeout())
    }

    #[must_use]
    pub fn activity(&self) -> ActivityHandle {
        self.activity.clone()
    }

    pub fn touch(&self) {
        self.activity.touch();
    }

    /// Next signal, or `None` after [`SessionSignal::Expired`] has been
    /// delivered.
    pub async fn next_signal(&mut self) -> Option<SessionSignal> {
        self.signals.recv().await
    }
}

impl Drop for IdleMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    warning: Duration,
    timeout: Duration,
    mut activity: mpsc::UnboundedReceiver<()>,
    signals: mpsc::Sender<SessionSignal>,
) {
    let mut last_activity = Instant::now();
    let mut warned = false;
    loop {
        let warn_at = last_activity + warning;
        let expire_at = last_activity + timeout;
        tokio::select! {
            biased;
            touched = activity.recv() => {
                if touched.is_none() {
                    return;
                }
                last_activity = Instant::now();
                warned = false;
            }
            () = sleep_until(warn_at), if !warned => {
                warned = true;
                tracing::debug!("idle warning");
                let remaining = timeout - warning;
                if signals.send(SessionSignal::Warn { remaining }).await.is_err() {
                    return;
                }
            }
            () = sleep_until(expire_at) => {
                tracing::info!("idle timeout reached");
                let _ = signals.send(SessionSignal::Expired).await;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WARNING: Duration = Duration::from_millis(5_000);
    const TIMEOUT: Duration = Duration::from_millis(10_000);

    fn assert_near(actual: Duration, expected_ms: u64) {
        let expected = Duration::from_millis(expected_ms);
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(5),
            "expected ~{expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn warning_must_precede_timeout() {
        // Rejected before anything is spawned, so no runtime is needed.
        let err = IdleMonitor::spawn(TIMEOUT, TIMEOUT).unwrap_err();
        assert!(matches!(err, AuthError::IdleWindow { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn expires_without_activity() {
        let start = Instant::now();
        let mut monitor = IdleMonitor::spawn(WARNING, TIMEOUT).unwrap();

        assert_eq!(
            monitor.next_signal().await,
            Some(SessionSignal::Warn {
                remaining: Duration::from_secs(5)
            })
        );
        assert_near(start.elapsed(), 5_000);

        assert_eq!(monitor.next_signal().await, Some(SessionSignal::Expired));
        assert_near(start.elapsed(), 10_000);
        assert_eq!(monitor.next_signal().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn activity_resets_both_countdowns() {
        let start = Instant::now();
        let mut monitor = IdleMonitor::spawn(WARNING, TIMEOUT).unwrap();

        assert!(matches!(
            monitor.next_signal().await,
            Some(SessionSignal::Warn { .. })
        ));
        sleep_until(start + Duration::from_millis(9_999)).await;
        monitor.touch();

        assert!(matches!(
            monitor.next_signal().await,
            Some(SessionSignal::Warn { .. })
        ));
        assert_near(start.elapsed(), 14_999);
        assert_eq!(monitor.next_signal().await, Some(SessionSignal::Expired));
        assert_near(start.elapsed(), 19_999);
    }

    #[tokio::test(start_paused = true)]
    async fn handles_outlive_touches_from_other_tasks() {
        let start = Instant::now();
        let mut monitor = IdleMonitor::spawn(WARNING, TIMEOUT).unwrap();
        let handle = monitor.activity();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(3_000)).await;
            handle.touch();
        });

        assert!(matches!(
            monitor.next_signal().await,
            Some(SessionSignal::Warn { .. })
        ));
        assert_near(start.elapsed(), 8_000);
    }
}
