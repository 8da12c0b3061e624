//! Cancellable delayed-task primitive for write coalescing.
//!
//! A single deadline per document: arming replaces any earlier deadline
//! (reset, never stacked), cancelling clears it. The owner polls
//! [`Debounce::fired`] from its event loop; the future stays pending forever
//! while disarmed, which makes it safe to race against an event channel in a
//! `select!`.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct Debounce {
    duration: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(duration: Duration) -> Self {
        Debounce {
            duration,
            deadline: None,
        }
    }

    /// Start (or restart) the delay from now.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.duration);
    }

    /// Clear any pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolves when the armed deadline elapses and disarms; pending forever
    /// while disarmed.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Await an optional deadline without borrowing the timer; used by event
/// loops that need the timer mutable in another `select!` arm.
pub async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
