#![forbid(unsafe_code)]

//! Wheel-driven scroll motion with an optional inertial coast.
//!
//! [`ScrollMotionController`] turns one normalized [`WheelEvent`] into a new
//! scroll position for its host [`ScrollStore`](crate::host::ScrollStore):
//!
//! 1. Feed the shared wheel classifier (zoom-compensated raw deltas).
//! 2. Scale by the configured sensitivity.
//! 3. Suppress the minor axis of diagonal gestures (predominant-axis mode).
//! 4. Flip axes, then map vertical-only gestures to horizontal when
//!    `scroll_y_to_x` is on or Shift is held off macOS.
//! 5. Apply the fast-scroll multiplier while Alt is held.
//! 6. Convert notches to pixels (50 px per notch, rounded away from zero).
//! 7. Seed inertia, then move smoothly (physical wheel) or immediately.
//!
//! # Inertial coast
//!
//! Each wheel event *replaces* the velocity with `sign(d) * |d|^1.02`. A
//! 60 Hz one-shot timer then subtracts `velocity * 100` px per tick and decays
//! velocity by 0.9, snapping components below 0.01 to exactly zero. The timer
//! is re-armed only while some velocity remains, and a wheel event arms it
//! whenever no tick is outstanding.

use std::time::Duration;

use glide_core::{
    Axis, ClassifierHandle, Modifiers, Platform, ScrollConfig, ScrollPosition, WheelEvent,
};

use crate::host::ScrollHost;
use crate::scheduler::{Timer, TimerId, TimerSlot};

/// Pixels scrolled per wheel notch.
pub const SCROLL_WHEEL_SENSITIVITY: f64 = 50.0;

/// Inertial tick period (1000/60 ms).
pub const INERTIAL_TICK_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Pixels moved per unit of velocity per tick.
pub const INERTIAL_DISPLACEMENT_SCALE: f64 = 100.0;

/// Velocity multiplier applied after every tick.
pub const INERTIAL_DECAY: f64 = 0.9;

/// Velocity components below this magnitude snap to zero.
pub const INERTIAL_STOP_VELOCITY: f64 = 0.01;

/// Exponent applied to wheel deltas when seeding velocity.
pub const INERTIAL_VELOCITY_EXPONENT: f64 = 1.02;

/// Per-axis coast velocity, in notches per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InertialState {
    pub velocity_x: f64,
    pub velocity_y: f64,
}

impl InertialState {
    /// Velocity seeded from a processed wheel delta.
    #[must_use]
    pub fn seeded(delta_x: f64, delta_y: f64) -> Self {
        Self {
            velocity_x: seed_velocity(delta_x),
            velocity_y: seed_velocity(delta_y),
        }
    }

    /// Both components are exactly zero.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.velocity_x == 0.0 && self.velocity_y == 0.0
    }

    /// Apply one tick of decay and snap small components to zero.
    pub fn decay(&mut self) {
        self.velocity_x = decay_component(self.velocity_x);
        self.velocity_y = decay_component(self.velocity_y);
    }
}

fn seed_velocity(delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    delta.signum() * delta.abs().powf(INERTIAL_VELOCITY_EXPONENT)
}

fn decay_component(v: f64) -> f64 {
    let v = v * INERTIAL_DECAY;
    if v.abs() < INERTIAL_STOP_VELOCITY { 0.0 } else { v }
}

/// Pixel offset for a delta in notches, rounded away from zero.
///
/// Any non-zero delta moves at least one pixel.
#[must_use]
pub fn scroll_offset_delta(delta: f64) -> f64 {
    let px = SCROLL_WHEEL_SENSITIVITY * delta;
    if px > 0.0 {
        px.ceil()
    } else if px < 0.0 {
        px.floor()
    } else {
        0.0
    }
}

/// What a wheel event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelOutcome {
    /// The host should suppress default handling and propagation.
    pub consumed: bool,
    /// The scroll position changed (or started animating).
    pub scrolled: bool,
}

/// Wheel handling and inertial coast for one scrollable surface.
#[derive(Debug)]
pub struct ScrollMotionController {
    config: ScrollConfig,
    classifier: ClassifierHandle,
    inertia: InertialState,
    coast: Timer,
}

impl ScrollMotionController {
    /// Create a controller sharing `classifier` with other surfaces.
    #[must_use]
    pub fn new(config: ScrollConfig, classifier: ClassifierHandle) -> Self {
        Self {
            config,
            classifier,
            inertia: InertialState::default(),
            coast: Timer::new(TimerSlot::InertialCoast),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Replace the configuration. A running coast keeps going.
    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    #[must_use]
    pub fn classifier(&self) -> &ClassifierHandle {
        &self.classifier
    }

    #[must_use]
    pub fn inertia(&self) -> InertialState {
        self.inertia
    }

    /// Whether an inertial tick is pending.
    #[must_use]
    pub fn is_coasting(&self) -> bool {
        self.coast.is_armed()
    }

    /// Deltas after sensitivity, axis selection, flipping, and fast-scroll.
    #[must_use]
    pub fn resolve_deltas(&self, event: &WheelEvent) -> (f64, f64) {
        let cfg = &self.config;
        let mut dx = event.delta_x * cfg.mouse_wheel_scroll_sensitivity;
        let mut dy = event.delta_y * cfg.mouse_wheel_scroll_sensitivity;

        if cfg.scroll_predominant_axis {
            if cfg.scroll_y_to_x && dx + dy == 0.0 {
                // Perfect diagonal: no meaningful direction to map.
                dx = 0.0;
                dy = 0.0;
            } else if dy.abs() >= dx.abs() {
                dx = 0.0;
            } else {
                dy = 0.0;
            }
        }

        if cfg.flip_axes {
            std::mem::swap(&mut dx, &mut dy);
        }

        let shift_to_horizontal =
            event.modifiers.contains(Modifiers::SHIFT) && cfg.platform != Platform::MacOs;
        if dx == 0.0 && (cfg.scroll_y_to_x || shift_to_horizontal) {
            dx = dy;
            dy = 0.0;
        }

        if event.modifiers.contains(Modifiers::ALT) {
            dx *= cfg.fast_scroll_sensitivity;
            dy *= cfg.fast_scroll_sensitivity;
        }

        (dx, dy)
    }

    /// Process one wheel event.
    pub fn handle_wheel<H: ScrollHost + ?Sized>(
        &mut self,
        event: &WheelEvent,
        host: &mut H,
    ) -> WheelOutcome {
        // Undo the browser's division by page zoom before scoring.
        self.classifier.accept(
            event.timestamp,
            event.delta_x * event.zoom_factor,
            event.delta_y * event.zoom_factor,
        );

        let mut scrolled = false;
        if event.has_delta() {
            let (dx, dy) = self.resolve_deltas(event);
            let future = host.future_scroll_position();
            let candidate = host.validate_scroll_position(ScrollPosition::new(
                future.scroll_left - scroll_offset_delta(dx),
                future.scroll_top - scroll_offset_delta(dy),
            ));

            if self.config.inertial_scroll && (dx != 0.0 || dy != 0.0) {
                self.inertia = InertialState::seeded(dx, dy);
                if !self.coast.is_armed() && !self.inertia.is_idle() {
                    tracing::debug!(
                        velocity_x = self.inertia.velocity_x,
                        velocity_y = self.inertia.velocity_y,
                        "inertial coast started"
                    );
                    self.coast.arm(host, INERTIAL_TICK_INTERVAL);
                }
            }

            if candidate != future {
                if self.config.mouse_wheel_smooth_scroll && self.classifier.is_physical_wheel() {
                    host.set_scroll_position_smooth(candidate);
                } else {
                    host.set_scroll_position_now(candidate);
                }
                scrolled = true;
            }
        }

        let consumed = scrolled
            || self.config.always_consume_mouse_wheel
            || (self.config.consume_mouse_wheel_if_scrollbar_is_needed
                && (host.is_scrollbar_needed(Axis::Horizontal)
                    || host.is_scrollbar_needed(Axis::Vertical)));

        WheelOutcome { consumed, scrolled }
    }

    /// Deliver a timer firing. Returns `false` if the id is not ours.
    pub fn on_timer<H: ScrollHost + ?Sized>(&mut self, id: TimerId, host: &mut H) -> bool {
        if !self.coast.fire(id) {
            return false;
        }
        if self.inertia.is_idle() {
            return true;
        }

        let current = host.current_scroll_position();
        let next = host.validate_scroll_position(ScrollPosition::new(
            current.scroll_left - self.inertia.velocity_x * INERTIAL_DISPLACEMENT_SCALE,
            current.scroll_top - self.inertia.velocity_y * INERTIAL_DISPLACEMENT_SCALE,
        ));
        host.set_scroll_position_now(next);
        self.inertia.decay();

        tracing::trace!(
            velocity_x = self.inertia.velocity_x,
            velocity_y = self.inertia.velocity_y,
            scroll_top = next.scroll_top,
            "inertial tick"
        );

        if self.inertia.is_idle() {
            tracing::debug!(
                scroll_left = next.scroll_left,
                scroll_top = next.scroll_top,
                "inertial coast settled"
            );
        } else {
            self.coast.arm(host, INERTIAL_TICK_INTERVAL);
        }
        true
    }

    /// Cancel a running coast and zero the velocity.
    pub fn stop_inertia<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.coast.is_armed() {
            tracing::debug!(
                velocity_x = self.inertia.velocity_x,
                velocity_y = self.inertia.velocity_y,
                "inertial coast stopped"
            );
        }
        self.coast.disarm(host);
        self.inertia = InertialState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{FrameScheduler, ManualScheduler};
    use web_time::Instant;

    struct Surface {
        position: ScrollPosition,
        max: ScrollPosition,
        smooth_calls: usize,
        now_calls: usize,
        scrollbar_needed: bool,
        sched: ManualScheduler,
    }

    impl Surface {
        fn new() -> Self {
            Self {
                position: ScrollPosition::new(500.0, 5_000.0),
                max: ScrollPosition::new(1_000.0, 10_000.0),
                smooth_calls: 0,
                now_calls: 0,
                scrollbar_needed: false,
                sched: ManualScheduler::new(Instant::now()),
            }
        }
    }

    impl crate::host::ScrollStore for Surface {
        fn current_scroll_position(&self) -> ScrollPosition {
            self.position
        }
        fn future_scroll_position(&self) -> ScrollPosition {
            self.position
        }
        fn validate_scroll_position(&self, c: ScrollPosition) -> ScrollPosition {
            ScrollPosition::new(
                c.scroll_left.clamp(0.0, self.max.scroll_left),
                c.scroll_top.clamp(0.0, self.max.scroll_top),
            )
        }
        fn set_scroll_position_now(&mut self, p: ScrollPosition) {
            self.now_calls += 1;
            self.position = p;
        }
        fn set_scroll_position_smooth(&mut self, p: ScrollPosition) {
            self.smooth_calls += 1;
            self.position = p;
        }
        fn is_scrollbar_needed(&self, _axis: Axis) -> bool {
            self.scrollbar_needed
        }
    }

    impl FrameScheduler for Surface {
        fn schedule(&mut self, timer: TimerId, delay: Duration) {
            self.sched.schedule(timer, delay);
        }
        fn cancel(&mut self, timer: TimerId) {
            self.sched.cancel(timer);
        }
    }

    fn controller(config: ScrollConfig) -> ScrollMotionController {
        ScrollMotionController::new(config, ClassifierHandle::new())
    }

    fn other_platform() -> ScrollConfig {
        ScrollConfig {
            platform: Platform::Other,
            ..ScrollConfig::default()
        }
    }

    fn wheel(dx: f64, dy: f64) -> WheelEvent {
        WheelEvent::new(dx, dy, Instant::now())
    }

    #[test]
    fn offset_delta_rounds_away_from_zero() {
        assert_eq!(scroll_offset_delta(0.3), 15.0);
        assert_eq!(scroll_offset_delta(0.01), 1.0);
        assert_eq!(scroll_offset_delta(-0.01), -1.0);
        assert_eq!(scroll_offset_delta(-1.0), -50.0);
        assert_eq!(scroll_offset_delta(0.0), 0.0);
    }

    #[test]
    fn notch_down_scrolls_fifty_pixels() {
        let mut c = controller(other_platform());
        let mut s = Surface::new();
        let out = c.handle_wheel(&wheel(0.0, -1.0), &mut s);
        assert_eq!(out, WheelOutcome { consumed: true, scrolled: true });
        assert_eq!(s.position.scroll_top, 5_050.0);
        assert_eq!(s.now_calls, 1);
    }

    #[test]
    fn predominant_axis_drops_minor_component() {
        let c = controller(other_platform());
        assert_eq!(c.resolve_deltas(&wheel(0.4, -1.0)), (0.0, -1.0));
        assert_eq!(c.resolve_deltas(&wheel(-2.0, 1.0)), (-2.0, 0.0));
        // Ties keep the vertical axis.
        assert_eq!(c.resolve_deltas(&wheel(1.0, 1.0)), (0.0, 1.0));
    }

    #[test]
    fn perfect_diagonal_with_y_to_x_is_dropped() {
        let c = controller(ScrollConfig {
            scroll_y_to_x: true,
            ..other_platform()
        });
        assert_eq!(c.resolve_deltas(&wheel(1.0, -1.0)), (0.0, 0.0));
        assert_eq!(c.resolve_deltas(&wheel(0.0, -1.0)), (-1.0, 0.0));
    }

    #[test]
    fn shift_maps_vertical_to_horizontal_off_mac() {
        let c = controller(other_platform());
        let ev = wheel(0.0, 1.0).with_modifiers(Modifiers::SHIFT);
        assert_eq!(c.resolve_deltas(&ev), (1.0, 0.0));

        let mac = controller(ScrollConfig {
            platform: Platform::MacOs,
            ..ScrollConfig::default()
        });
        assert_eq!(mac.resolve_deltas(&ev), (0.0, 1.0));
    }

    #[test]
    fn flip_then_alt_multiplier() {
        let c = controller(ScrollConfig {
            flip_axes: true,
            scroll_predominant_axis: false,
            ..other_platform()
        });
        let ev = wheel(0.5, 1.0).with_modifiers(Modifiers::ALT);
        assert_eq!(c.resolve_deltas(&ev), (5.0, 2.5));
    }

    #[test]
    fn sensitivity_scales_deltas() {
        let c = controller(ScrollConfig {
            mouse_wheel_scroll_sensitivity: 2.0,
            ..other_platform()
        });
        assert_eq!(c.resolve_deltas(&wheel(0.0, 1.5)), (0.0, 3.0));
    }

    #[test]
    fn smooth_only_for_physical_wheel() {
        let mut c = controller(ScrollConfig {
            mouse_wheel_smooth_scroll: true,
            ..other_platform()
        });
        let mut s = Surface::new();
        c.handle_wheel(&wheel(0.0, -1.0), &mut s);
        assert_eq!(s.smooth_calls, 1);

        // Fractional dual-axis samples push the verdict toward precision device.
        for _ in 0..5 {
            c.handle_wheel(&wheel(0.3, -0.7), &mut s);
        }
        assert!(!c.classifier().is_physical_wheel());
        let before = s.now_calls;
        c.handle_wheel(&wheel(0.0, -1.0), &mut s);
        assert_eq!(s.now_calls, before + 1);
    }

    #[test]
    fn consumption_when_nothing_scrolled() {
        let mut s = Surface::new();
        s.position = ScrollPosition::new(0.0, 0.0);

        let mut always = controller(other_platform());
        let out = always.handle_wheel(&wheel(0.0, 1.0), &mut s);
        assert_eq!(out, WheelOutcome { consumed: true, scrolled: false });

        let mut never = controller(ScrollConfig {
            always_consume_mouse_wheel: false,
            ..other_platform()
        });
        assert!(!never.handle_wheel(&wheel(0.0, 1.0), &mut s).consumed);

        let mut if_needed = controller(ScrollConfig {
            always_consume_mouse_wheel: false,
            consume_mouse_wheel_if_scrollbar_is_needed: true,
            ..other_platform()
        });
        assert!(!if_needed.handle_wheel(&wheel(0.0, 1.0), &mut s).consumed);
        s.scrollbar_needed = true;
        assert!(if_needed.handle_wheel(&wheel(0.0, 1.0), &mut s).consumed);
    }

    #[test]
    fn zero_delta_feeds_classifier_only() {
        let mut c = controller(other_platform());
        let mut s = Surface::new();
        let out = c.handle_wheel(&wheel(0.0, 0.0), &mut s);
        assert!(!out.scrolled);
        assert_eq!(c.classifier().snapshot().len(), 1);
        assert_eq!(s.now_calls, 0);
    }

    #[test]
    fn inertia_seeds_and_arms_once() {
        let mut c = controller(ScrollConfig {
            inertial_scroll: true,
            ..other_platform()
        });
        let mut s = Surface::new();
        c.handle_wheel(&wheel(0.0, -2.0), &mut s);
        let v = c.inertia().velocity_y;
        assert!((v - (-(2.0f64.powf(1.02)))).abs() < 1e-12);
        assert!(c.is_coasting());

        // A second event replaces velocity without a second pending tick.
        c.handle_wheel(&wheel(0.0, -1.0), &mut s);
        assert_eq!(c.inertia().velocity_y, -1.0);
        assert_eq!(s.sched.pending_len(), 1);
    }

    #[test]
    fn inertia_decays_to_exact_zero_and_stops() {
        let mut c = controller(ScrollConfig {
            inertial_scroll: true,
            ..other_platform()
        });
        let mut s = Surface::new();
        c.handle_wheel(&wheel(0.0, -1.0), &mut s);

        let mut ticks = 0;
        while c.is_coasting() {
            for id in s.sched.advance(INERTIAL_TICK_INTERVAL) {
                assert!(c.on_timer(id, &mut s));
            }
            ticks += 1;
            assert!(ticks < 100, "coast must settle");
        }
        assert!(c.inertia().is_idle());
        // 0.9^n < 0.01 first at n = 44.
        assert_eq!(ticks, 44);
        assert_eq!(s.sched.pending_len(), 0);
    }

    #[test]
    fn stop_inertia_ignores_late_delivery() {
        let mut c = controller(ScrollConfig {
            inertial_scroll: true,
            ..other_platform()
        });
        let mut s = Surface::new();
        c.handle_wheel(&wheel(0.0, -1.0), &mut s);
        let late = TimerId {
            owner: c.coast.owner(),
            slot: TimerSlot::InertialCoast,
            generation: 1,
        };
        c.stop_inertia(&mut s);
        c.stop_inertia(&mut s);
        assert!(!c.is_coasting());
        assert!(!c.on_timer(late, &mut s));
        assert!(c.inertia().is_idle());
    }

    #[test]
    fn zoom_factor_scales_classifier_input() {
        let mut c = controller(other_platform());
        let mut s = Surface::new();
        c.handle_wheel(&wheel(0.0, -1.5).with_zoom_factor(2.0), &mut s);
        let snap = c.classifier().snapshot();
        let sample = snap.iter_newest_first().next().copied();
        assert_eq!(sample.map(|x| x.delta_y), Some(-3.0));
    }

    #[test]
    fn zoomed_notch_classifies_as_physical_wheel() {
        let mut c = controller(other_platform());
        let mut s = Surface::new();
        // At 200% zoom a whole notch arrives as half a notch.
        for _ in 0..3 {
            c.handle_wheel(&wheel(0.0, -0.5).with_zoom_factor(2.0), &mut s);
        }
        assert!(c.classifier().is_physical_wheel());

        let mut unzoomed = controller(other_platform());
        for _ in 0..3 {
            unzoomed.handle_wheel(&wheel(0.0, -0.5), &mut s);
        }
        assert!(!unzoomed.classifier().is_physical_wheel());
    }

    #[test]
    fn stalled_coast_is_rearmed_by_next_wheel() {
        let mut c = controller(ScrollConfig {
            inertial_scroll: true,
            ..other_platform()
        });
        let mut s = Surface::new();
        c.handle_wheel(&wheel(0.0, -1.0), &mut s);
        // The host dropped the pending tick without telling the controller.
        s.sched = ManualScheduler::new(s.sched.now());
        c.coast.disarm(&mut s);
        assert!(!c.inertia().is_idle());

        c.handle_wheel(&wheel(0.0, -1.0), &mut s);
        assert!(c.is_coasting());
        assert_eq!(s.sched.pending_len(), 1);
    }
}
