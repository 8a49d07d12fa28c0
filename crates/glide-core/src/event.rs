#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! # Design Notes
//!
//! - Wheel deltas are normalized to "notches": positive `delta_y` scrolls
//!   toward the start of the document, positive `delta_x` toward the left.
//!   [`WheelEvent::from_dom`] performs that normalization for hosts that
//!   receive DOM-style deltas.
//! - Pointer coordinates are window pixels (see [`Point`]).
//! - `Modifiers` and `PointerButtons` use bitflags for easy combination.

use bitflags::bitflags;
use web_time::Instant;

use crate::geometry::Point;

/// Pixels a DOM pixel-mode wheel delta spends per normalized notch.
pub const DOM_PIXELS_PER_NOTCH: f64 = 40.0;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// Any modifier other than Shift.
    ///
    /// Shift alone extends a selection; anything else turns a click into a
    /// chord (multi-cursor, column select, link open, ...).
    #[must_use]
    pub fn is_chord(self) -> bool {
        self.intersects(Self::ALT | Self::CTRL | Self::SUPER)
    }
}

bitflags! {
    /// Pointer buttons held during a pointer event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        const LEFT   = 0b001;
        const RIGHT  = 0b010;
        const MIDDLE = 0b100;
    }
}

/// Unit a DOM wheel delta is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaMode {
    /// `DOM_DELTA_PIXEL`
    Pixel,
    /// `DOM_DELTA_LINE`
    Line,
}

/// A wheel event with deltas already normalized to notches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Horizontal notches (positive = toward the left edge).
    pub delta_x: f64,
    /// Vertical notches (positive = toward the top).
    pub delta_y: f64,
    /// When the host received the event.
    pub timestamp: Instant,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// Page zoom factor in effect when the event was produced (1.0 = none).
    ///
    /// Browsers divide wheel deltas by the page zoom, so a notch at 200%
    /// reports half a notch. Multiplying by this factor recovers device units.
    pub zoom_factor: f64,
}

impl WheelEvent {
    /// Create a wheel event with no modifiers and no page zoom.
    #[must_use]
    pub fn new(delta_x: f64, delta_y: f64, timestamp: Instant) -> Self {
        Self {
            delta_x,
            delta_y,
            timestamp,
            modifiers: Modifiers::NONE,
            zoom_factor: 1.0,
        }
    }

    /// Normalize DOM `WheelEvent` deltas.
    ///
    /// DOM deltas grow downward/rightward; notches grow toward the start.
    /// Pixel-mode deltas are divided by [`DOM_PIXELS_PER_NOTCH`].
    #[must_use]
    pub fn from_dom(dom_dx: f64, dom_dy: f64, mode: DeltaMode, timestamp: Instant) -> Self {
        let scale = match mode {
            DeltaMode::Pixel => DOM_PIXELS_PER_NOTCH,
            DeltaMode::Line => 1.0,
        };
        Self::new(-dom_dx / scale, -dom_dy / scale, timestamp)
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the page zoom factor.
    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    /// Whether either axis carries motion.
    #[must_use]
    pub fn has_delta(&self) -> bool {
        self.delta_x != 0.0 || self.delta_y != 0.0
    }
}

/// A pointer-down, move, or up event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer location in window pixels.
    pub point: Point,
    /// Buttons held during the event.
    pub buttons: PointerButtons,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// Platform-reported repeat count ("detail"). Not trusted as-is.
    pub detail: u32,
    /// Identifies the pointer for capture.
    pub pointer_id: u32,
    /// When the host received the event.
    pub timestamp: Instant,
}

impl PointerEvent {
    /// Primary-button event at `point` with a repeat count of 1.
    #[must_use]
    pub fn new(point: Point, timestamp: Instant) -> Self {
        Self {
            point,
            buttons: PointerButtons::LEFT,
            modifiers: Modifiers::NONE,
            detail: 1,
            pointer_id: 1,
            timestamp,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: u32) -> Self {
        self.detail = detail;
        self
    }

    #[must_use]
    pub fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    #[inline]
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}
