#![forbid(unsafe_code)]

//! Multi-click debouncing.
//!
//! Platforms report a repeat count ("detail") with every pointer-down, but
//! the value is unreliable across environments: it can jump straight from 1
//! to 3, or keep counting long after the user paused. [`ClickCounter`]
//! accepts the raw count and clamps it with three guards:
//!
//! 1. More than [`CLEAR_CLICK_COUNT_TIME`] since the previous accepted update
//!    resets the incoming count to 1.
//! 2. The count never grows by more than one per click.
//! 3. The count never exceeds the number of consecutive clicks that landed
//!    on exactly the same document position.
//!
//! # Invariants
//!
//! 1. The accepted count is always `>= 1`.
//! 2. `count_after <= count_before + 1`.
//! 3. `count <= same_position_streak`.

use std::time::Duration;

use web_time::Instant;

use crate::geometry::TextPosition;

/// Pause after which a click sequence starts over.
pub const CLEAR_CLICK_COUNT_TIME: Duration = Duration::from_millis(400);

/// Debounced click-count state for one editor.
///
/// Survives across drag sessions: only [`ClickCounter::reset`] clears it.
#[derive(Debug, Clone)]
pub struct ClickCounter {
    timeout: Duration,
    count: u32,
    last_position: Option<TextPosition>,
    same_position_streak: u32,
    last_set_time: Option<Instant>,
}

impl Default for ClickCounter {
    fn default() -> Self {
        Self::new(CLEAR_CLICK_COUNT_TIME)
    }
}

impl ClickCounter {
    /// Create a counter with the given multi-click timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            count: 0,
            last_position: None,
            same_position_streak: 0,
            last_set_time: None,
        }
    }

    /// Last accepted count (0 before the first click).
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Position of the last accepted click.
    #[inline]
    #[must_use]
    pub fn last_position(&self) -> Option<TextPosition> {
        self.last_position
    }

    /// Feed a pointer-down's raw repeat count and logical position.
    ///
    /// Returns the accepted count.
    pub fn try_set_count(&mut self, raw_count: u32, position: TextPosition, now: Instant) -> u32 {
        let mut incoming = raw_count.max(1);

        let expired = self
            .last_set_time
            .is_none_or(|last| now.saturating_duration_since(last) > self.timeout);
        if expired {
            incoming = 1;
        }
        self.last_set_time = Some(now);

        let ceiling = self.count.saturating_add(1);
        if incoming > ceiling {
            #[cfg(feature = "tracing")]
            tracing::debug!(raw_count, ceiling, "click count clamped");
            incoming = ceiling;
        }

        if self.last_position == Some(position) {
            self.same_position_streak = self.same_position_streak.saturating_add(1);
        } else {
            self.same_position_streak = 1;
        }
        self.last_position = Some(position);

        self.count = incoming.min(self.same_position_streak);
        self.count
    }

    /// Forget the click sequence.
    pub fn reset(&mut self) {
        *self = Self::new(self.timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: TextPosition = TextPosition::new(3, 7);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_click_is_single() {
        let mut c = ClickCounter::default();
        assert_eq!(c.count(), 0);
        assert_eq!(c.try_set_count(3, P, Instant::now()), 1);
    }

    #[test]
    fn pause_resets_relative_to_last_update() {
        let mut c = ClickCounter::default();
        let t = Instant::now();
        assert_eq!(c.try_set_count(1, P, t), 1);
        assert_eq!(c.try_set_count(2, P, t + ms(100)), 2);
        // 800ms since the previous update, not since the first click.
        assert_eq!(c.try_set_count(3, P, t + ms(900)), 1);
    }

    #[test]
    fn raw_jump_is_clamped_to_one_step() {
        let mut c = ClickCounter::default();
        let t = Instant::now();
        c.try_set_count(1, P, t);
        assert_eq!(c.try_set_count(5, P, t + ms(50)), 2);
        assert_eq!(c.try_set_count(5, P, t + ms(100)), 3);
    }

    #[test]
    fn different_position_restarts_streak() {
        let mut c = ClickCounter::default();
        let t = Instant::now();
        c.try_set_count(1, P, t);
        assert_eq!(c.try_set_count(2, TextPosition::new(3, 8), t + ms(100)), 1);
        assert_eq!(c.try_set_count(2, TextPosition::new(3, 8), t + ms(200)), 2);
    }

    #[test]
    fn exactly_at_timeout_still_counts() {
        let mut c = ClickCounter::default();
        let t = Instant::now();
        c.try_set_count(1, P, t);
        assert_eq!(c.try_set_count(2, P, t + CLEAR_CLICK_COUNT_TIME), 2);
    }

    #[test]
    fn raw_zero_is_treated_as_one() {
        let mut c = ClickCounter::default();
        assert_eq!(c.try_set_count(0, P, Instant::now()), 1);
    }

    #[test]
    fn raw_count_lower_than_streak_wins() {
        let mut c = ClickCounter::default();
        let t = Instant::now();
        c.try_set_count(1, P, t);
        c.try_set_count(2, P, t + ms(50));
        assert_eq!(c.try_set_count(1, P, t + ms(100)), 1);
    }

    #[test]
    fn reset_clears_sequence_but_keeps_timeout() {
        let mut c = ClickCounter::new(ms(250));
        let t = Instant::now();
        c.try_set_count(1, P, t);
        c.reset();
        assert_eq!(c.count(), 0);
        assert_eq!(c.last_position(), None);
        c.try_set_count(1, P, t + ms(300));
        // Custom timeout survived the reset.
        assert_eq!(c.try_set_count(2, P, t + ms(600)), 1);
    }
}
