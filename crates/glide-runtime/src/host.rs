#![forbid(unsafe_code)]

//! Host capabilities the state machines drive.
//!
//! Glide never owns a viewport, a text model, or an event loop. Everything it
//! reads or mutates goes through the traits here, implemented by the editor
//! that embeds it. All calls happen on the UI thread.

use glide_core::{
    Axis, Modifiers, OutsideEdge, Point, PointerButtons, Rect, ScrollPosition, TextPosition,
};

use crate::scheduler::FrameScheduler;

/// The scrollable surface's offsets.
pub trait ScrollStore {
    /// Offsets as currently rendered.
    fn current_scroll_position(&self) -> ScrollPosition;

    /// Where an in-flight smooth transition will land (equals the current
    /// position when nothing is animating).
    fn future_scroll_position(&self) -> ScrollPosition;

    /// Clamp a candidate into the scrollable range.
    fn validate_scroll_position(&self, candidate: ScrollPosition) -> ScrollPosition;

    /// Jump to `position` without animation.
    fn set_scroll_position_now(&mut self, position: ScrollPosition);

    /// Animate to `position`.
    fn set_scroll_position_smooth(&mut self, position: ScrollPosition);

    /// Whether content overflows the viewport along `axis`.
    fn is_scrollbar_needed(&self, axis: Axis) -> bool;
}

/// What a pointer location maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    ContentText,
    ContentEmpty,
    ContentViewZone,
    GutterLineNumbers,
    GutterGlyphMargin,
    GutterViewZone,
    /// Past one of the editor's edges.
    OutsideEditor,
    Unknown,
}

/// Document positions bracketing a view zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewZoneBounds {
    /// Last position before the zone.
    pub before: TextPosition,
    /// First position after the zone.
    pub after: TextPosition,
}

/// Result of hit-testing a pointer location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    pub kind: TargetKind,
    /// Logical position, or `None` when the location resolves to nothing.
    pub position: Option<TextPosition>,
    /// Set when the point lies inside a view zone.
    pub view_zone: Option<ViewZoneBounds>,
    /// Set when the point lies outside the content bounds.
    pub outside: Option<OutsideEdge>,
}

impl HitTarget {
    /// A target over plain text at `position`.
    #[must_use]
    pub fn text(position: TextPosition) -> Self {
        Self::at(TargetKind::ContentText, position)
    }

    /// A target of `kind` at `position`.
    #[must_use]
    pub fn at(kind: TargetKind, position: TextPosition) -> Self {
        Self {
            kind,
            position: Some(position),
            view_zone: None,
            outside: None,
        }
    }

    /// A target that resolves to no document position.
    #[must_use]
    pub fn unresolved(kind: TargetKind) -> Self {
        Self {
            kind,
            position: None,
            view_zone: None,
            outside: None,
        }
    }

    #[must_use]
    pub fn with_view_zone(mut self, before: TextPosition, after: TextPosition) -> Self {
        self.view_zone = Some(ViewZoneBounds { before, after });
        self
    }
}

/// Maps pointer locations onto the document.
pub trait HitTester {
    /// Content area in window pixels; anything outside triggers autoscroll.
    fn content_bounds(&self) -> Rect;

    /// Hit-test any point, including points outside the content bounds
    /// (which should resolve to the nearest visible line).
    fn resolve(&self, point: Point) -> HitTarget;

    /// Visual column under `point`, used for column selection.
    fn mouse_column_for(&self, point: Point) -> u32;
}

/// Whether the editor should scroll to keep the caret visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealType {
    /// Scroll just enough to show the caret.
    Minimal,
    /// Leave the viewport alone.
    None,
}

/// A selection change requested by a drag session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionUpdate {
    pub position: TextPosition,
    pub mouse_column: u32,
    /// Debounced click count (1 = char, 2 = word, 3 = line).
    pub click_count: u32,
    /// Extend from the anchor instead of placing a caret.
    pub in_selection_mode: bool,
    pub started_on_line_numbers: bool,
    pub modifiers: Modifiers,
    pub buttons: PointerButtons,
    pub reveal: RevealType,
}

/// Receives selection changes and drag-and-drop outcomes.
pub trait SelectionSink {
    fn apply_selection(&mut self, update: SelectionUpdate);

    /// Hover feedback while dragging the selection itself.
    fn selection_drag_over(&mut self, target: HitTarget) {
        let _ = target;
    }

    /// A selection drag ended with a pointer-up at `target`.
    fn selection_dropped(&mut self, target: Option<HitTarget>, modifiers: Modifiers);

    /// A selection drag was aborted from the keyboard.
    fn selection_drop_canceled(&mut self);
}

/// Why a pointer-monitoring session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorEnd {
    /// The monitored button was released.
    PointerUp,
    /// The session was aborted from the keyboard (e.g. Escape).
    Keyboard,
}

/// Captures pointer events outside the editor for the length of a drag.
pub trait PointerMonitor {
    /// Begin routing moves and the eventual release to the drag machine.
    fn start_monitoring(&mut self, pointer_id: u32, buttons: PointerButtons);

    /// Release the capture. Safe to call when not monitoring.
    fn stop_monitoring(&mut self);
}

/// Everything the scroll motion controller needs from its host.
pub trait ScrollHost: ScrollStore + FrameScheduler {}

impl<T: ScrollStore + FrameScheduler + ?Sized> ScrollHost for T {}

/// Everything the drag selection machine needs from its host.
pub trait DragHost: ScrollStore + HitTester + SelectionSink + PointerMonitor + FrameScheduler {}

impl<T> DragHost for T where
    T: ScrollStore + HitTester + SelectionSink + PointerMonitor + FrameScheduler + ?Sized
{
}
