//! Trailing-edge debounce timer
//!
//! A single-shot deadline that every trigger pushes back by the window.
//! The owner polls it from its event loop; nothing here sleeps.

use std::time::Duration;
use tokio::time::Instant;

/// Single-shot rescheduling timer
///
/// Only the last trigger within a window fires: each `trigger` moves the
/// deadline to `now + window`.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer relative to `now`
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Drop a pending deadline without firing
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed
    ///
    /// Returns `true` exactly once per armed window.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.trigger(start);

        assert!(!debouncer.fire_if_due(start + Duration::from_millis(499)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(500)));
        // Single-shot
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(900)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_retrigger_pushes_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.trigger(start);
        debouncer.trigger(start + Duration::from_millis(300));

        assert!(!debouncer.fire_if_due(start + Duration::from_millis(600)));
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(800)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(800)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.trigger(start);
        debouncer.cancel();
        assert!(!debouncer.fire_if_due(start + Duration::from_secs(1)));
    }
}
