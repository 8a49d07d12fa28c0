#![forbid(unsafe_code)]

//! Edge autoscroll while a drag holds the pointer outside the editor.
//!
//! One [`EdgeAutoscroll`] exists per axis. While running it nudges the scroll
//! position toward the crossed edge every [`AUTOSCROLL_INTERVAL`] by an
//! amount proportional to how far past the edge the pointer sits and how
//! long it has been since the previous nudge. The drag machine re-resolves
//! the pointer after every nudge so the selection follows the content.

use std::time::Duration;

use glide_core::{Axis, OutsideEdge, Point};
use web_time::Instant;

use crate::host::ScrollStore;
use crate::scheduler::{FrameScheduler, Timer, TimerId, TimerSlot};

/// Delay between autoscroll nudges.
pub const AUTOSCROLL_INTERVAL: Duration = Duration::from_millis(16);

/// Where the pointer was last seen while outside the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoscrollTarget {
    pub point: Point,
    pub outside: OutsideEdge,
}

/// Pixels to nudge for one tick, always at least 1.
#[must_use]
pub fn autoscroll_step(distance: f64, elapsed: Duration, speed: f64) -> f64 {
    let raw = distance.abs() * elapsed.as_secs_f64() * speed;
    raw.ceil().max(1.0)
}

/// Periodic scroller for one axis.
#[derive(Debug, Clone)]
pub struct EdgeAutoscroll {
    axis: Axis,
    timer: Timer,
    target: Option<AutoscrollTarget>,
    last_tick: Option<Instant>,
}

impl EdgeAutoscroll {
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        let slot = match axis {
            Axis::Vertical => TimerSlot::VerticalAutoscroll,
            Axis::Horizontal => TimerSlot::HorizontalAutoscroll,
        };
        Self {
            axis,
            timer: Timer::new(slot),
            target: None,
            last_tick: None,
        }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_armed()
    }

    #[must_use]
    pub fn target(&self) -> Option<AutoscrollTarget> {
        self.target
    }

    /// Start scrolling toward `target`, or retarget if already running.
    pub fn start<S: FrameScheduler + ?Sized>(
        &mut self,
        target: AutoscrollTarget,
        now: Instant,
        scheduler: &mut S,
    ) {
        debug_assert_eq!(target.outside.edge.axis(), self.axis);
        self.target = Some(target);
        if !self.timer.is_armed() {
            tracing::debug!(
                axis = ?self.axis,
                edge = ?target.outside.edge,
                distance = target.outside.distance,
                "autoscroll started"
            );
            self.last_tick = Some(now);
            self.timer.arm(scheduler, AUTOSCROLL_INTERVAL);
        }
    }

    /// Stop scrolling. Idempotent.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.timer.is_armed() {
            tracing::debug!(axis = ?self.axis, "autoscroll stopped");
        }
        self.timer.disarm(scheduler);
        self.target = None;
        self.last_tick = None;
    }

    /// Deliver a timer firing.
    ///
    /// Returns the pointer location to re-resolve after a nudge, or `None`
    /// if the id is not ours.
    pub fn on_timer<H: ScrollStore + FrameScheduler + ?Sized>(
        &mut self,
        id: TimerId,
        now: Instant,
        speed: f64,
        host: &mut H,
    ) -> Option<Point> {
        if !self.timer.fire(id) {
            return None;
        }
        let target = self.target?;

        let elapsed = self
            .last_tick
            .map_or(AUTOSCROLL_INTERVAL, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        let step = autoscroll_step(target.outside.distance, elapsed, speed);
        let current = host.current_scroll_position();
        let along = current.along(self.axis) + target.outside.edge.direction() * step;
        let next = host.validate_scroll_position(current.with(self.axis, along));
        host.set_scroll_position_now(next);
        tracing::trace!(axis = ?self.axis, step, offset = next.along(self.axis), "autoscroll tick");

        self.timer.arm(host, AUTOSCROLL_INTERVAL);
        Some(target.point)
    }
}
