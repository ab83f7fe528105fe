// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus-retention guard as an explicit suppression window.
//!
//! Re-attaching or re-focusing a card can fire a spurious focus-out. Arming
//! the window right before such a change suppresses focus-loss handling until
//! the window expires. Expiry is checked against a caller-supplied monotonic
//! clock, so no timer has to be scheduled or cancelled.
//!
//! ```
//! use ideaboard_gesture::guard::SuppressionWindow;
//!
//! let mut guard = SuppressionWindow::default();
//! guard.arm(1_000, 100);
//! assert!(guard.is_active(1_050));
//! assert!(!guard.is_active(1_100));
//! ```

/// A one-shot window during which focus loss is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuppressionWindow {
    until_ms: Option<u64>,
}

impl SuppressionWindow {
    /// Arms the window for `duration_ms` starting at `now_ms`.
    ///
    /// Re-arming replaces the previous expiry.
    pub fn arm(&mut self, now_ms: u64, duration_ms: u64) {
        self.until_ms = Some(now_ms.saturating_add(duration_ms));
    }

    /// Returns `true` if `now_ms` is before the expiry.
    #[must_use]
    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until_ms.is_some_and(|until| now_ms < until)
    }

    /// Returns the expiry, if armed.
    #[must_use]
    pub fn expires_at(&self) -> Option<u64> {
        self.until_ms
    }

    /// Disarms the window.
    pub fn clear(&mut self) {
        self.until_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::SuppressionWindow;

    #[test]
    fn idle_window_never_suppresses() {
        let guard = SuppressionWindow::default();
        assert!(!guard.is_active(0));
        assert!(guard.expires_at().is_none());
    }

    #[test]
    fn rearm_extends_and_clear_disarms() {
        let mut guard = SuppressionWindow::default();
        guard.arm(0, 100);
        guard.arm(80, 100);
        assert!(guard.is_active(150));
        assert_eq!(guard.expires_at(), Some(180));

        guard.clear();
        assert!(!guard.is_active(150));
    }

    #[test]
    fn arm_saturates_at_clock_end() {
        let mut guard = SuppressionWindow::default();
        guard.arm(u64::MAX - 1, 100);
        assert_eq!(guard.expires_at(), Some(u64::MAX));
        assert!(guard.is_active(u64::MAX - 1));
    }
}
