#![forbid(unsafe_code)]

//! Pointer-driven selection from pointer-down to release.
//!
//! [`PointerDragSelectionMachine`] is `Idle` until a pointer-down arrives via
//! [`start`](PointerDragSelectionMachine::start). It then runs one of two
//! sessions until the host reports the end of pointer monitoring:
//!
//! - **Plain drag**: every move extends the selection from its anchor. When
//!   the pointer leaves the content bounds, the matching [`EdgeAutoscroll`]
//!   takes over and re-dispatches the selection after each nudge.
//! - **Drag-and-drop of the selection**: a press inside a non-empty selection
//!   moves the selection itself. Moves only report hover targets; release
//!   drops, a keyboard abort cancels.
//!
//! The click counter outlives sessions so double and triple clicks are
//! recognized across them.

use std::time::Duration;

use glide_core::{
    Axis, ClickCounter, DragConfig, Modifiers, Point, PointerButtons, PointerEvent, Selection,
    TextPosition,
};
use web_time::Instant;

use crate::edge_autoscroll::{AutoscrollTarget, EdgeAutoscroll};
use crate::host::{
    DragHost, HitTarget, MonitorEnd, RevealType, SelectionUpdate, TargetKind, ViewZoneBounds,
};
use crate::scheduler::{Timer, TimerId, TimerSlot};

/// Delay before re-resolving the pointer after the viewport scrolled.
pub const SCROLL_RESYNC_DELAY: Duration = Duration::from_millis(10);

/// Which kind of session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Idle,
    /// Extending a selection.
    Selecting,
    /// Moving the existing selection.
    DraggingSelection,
}

/// Per-session state, recreated on every pointer-down that starts a drag.
#[derive(Debug, Clone, Copy, Default)]
struct DragSession {
    started_on_line_numbers: bool,
    buttons: PointerButtons,
    modifiers: Modifiers,
    is_drag_and_drop: bool,
    last_event: Option<PointerEvent>,
}

/// Pick the side of a view zone to land on, keeping the selection growing
/// away from its anchor.
#[must_use]
pub fn snap_past_view_zone(zone: ViewZoneBounds, anchor: TextPosition) -> TextPosition {
    if zone.before.is_before(anchor) {
        zone.before
    } else {
        zone.after
    }
}

/// Drag selection state for one editor.
#[derive(Debug, Clone)]
pub struct PointerDragSelectionMachine {
    config: DragConfig,
    active: bool,
    session: DragSession,
    clicks: ClickCounter,
    selection: Selection,
    vertical: EdgeAutoscroll,
    horizontal: EdgeAutoscroll,
    resync: Timer,
}

impl PointerDragSelectionMachine {
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        let clicks = ClickCounter::new(config.multi_click_timeout());
        Self {
            config,
            active: false,
            session: DragSession::default(),
            clicks,
            selection: Selection::caret(TextPosition::new(1, 1)),
            vertical: EdgeAutoscroll::new(Axis::Vertical),
            horizontal: EdgeAutoscroll::new(Axis::Horizontal),
            resync: Timer::new(TimerSlot::ScrollResync),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Replace the configuration. A new multi-click timeout restarts the
    /// click sequence.
    pub fn set_config(&mut self, config: DragConfig) {
        if config.multi_click_timeout() != self.config.multi_click_timeout() {
            self.clicks = ClickCounter::new(config.multi_click_timeout());
        }
        self.config = config;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match (self.active, self.session.is_drag_and_drop) {
            (false, _) => DragPhase::Idle,
            (true, false) => DragPhase::Selecting,
            (true, true) => DragPhase::DraggingSelection,
        }
    }

    /// Debounced count of the last accepted click.
    #[must_use]
    pub fn click_count(&self) -> u32 {
        self.clicks.count()
    }

    /// The primary selection as last reported by the host.
    #[must_use]
    pub fn current_selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn is_autoscrolling(&self, axis: Axis) -> bool {
        match axis {
            Axis::Vertical => self.vertical.is_running(),
            Axis::Horizontal => self.horizontal.is_running(),
        }
    }

    /// Track the host's primary selection.
    pub fn on_cursor_state_changed(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Handle a pointer-down on the editor.
    pub fn start<H: DragHost + ?Sized>(
        &mut self,
        target_kind: TargetKind,
        event: &PointerEvent,
        host: &mut H,
    ) {
        if !self.active {
            self.session = DragSession::default();
        }
        self.session.last_event = Some(*event);
        self.session.started_on_line_numbers = target_kind == TargetKind::GutterLineNumbers;
        self.session.buttons = event.buttons;
        self.session.modifiers = event.modifiers;

        let Some((target, position)) = self.find_target(event.point, host) else {
            return;
        };
        let count = self
            .clicks
            .try_set_count(event.detail, position, event.timestamp);

        if self.can_drag_selection(&target, position, event.modifiers, count) {
            self.session.is_drag_and_drop = true;
            self.active = true;
            tracing::debug!(
                pointer_id = event.pointer_id,
                line = position.line,
                column = position.column,
                "selection drag started"
            );
            host.start_monitoring(event.pointer_id, event.buttons);
            return;
        }

        self.session.is_drag_and_drop = false;
        self.dispatch(position, event.point, event.shift(), RevealType::Minimal, host);

        if !self.active {
            self.active = true;
            tracing::debug!(
                pointer_id = event.pointer_id,
                click_count = count,
                started_on_line_numbers = self.session.started_on_line_numbers,
                "drag session started"
            );
            host.start_monitoring(event.pointer_id, event.buttons);
        }
    }

    /// Handle a monitored pointer move.
    pub fn on_pointer_move<H: DragHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) {
        if !self.active {
            return;
        }
        self.session.last_event = Some(*event);
        self.session.modifiers = event.modifiers;

        let Some((target, position)) = self.find_target(event.point, host) else {
            return;
        };

        if self.session.is_drag_and_drop {
            host.selection_drag_over(target);
            return;
        }

        match target.outside {
            Some(outside) => {
                let autoscroll = AutoscrollTarget {
                    point: event.point,
                    outside,
                };
                let (start, stop) = match outside.edge.axis() {
                    Axis::Vertical => (&mut self.vertical, &mut self.horizontal),
                    Axis::Horizontal => (&mut self.horizontal, &mut self.vertical),
                };
                start.start(autoscroll, event.timestamp, host);
                stop.stop(host);
            }
            None => {
                self.vertical.stop(host);
                self.horizontal.stop(host);
                self.dispatch(position, event.point, true, RevealType::Minimal, host);
            }
        }
    }

    /// The host's pointer monitor ended (release or keyboard abort).
    pub fn on_monitor_end<H: DragHost + ?Sized>(&mut self, reason: MonitorEnd, host: &mut H) {
        if !self.active {
            return;
        }
        if self.session.is_drag_and_drop {
            match reason {
                MonitorEnd::Keyboard => {
                    tracing::debug!(modifiers = ?self.session.modifiers, "selection drop canceled");
                    host.selection_drop_canceled();
                }
                MonitorEnd::PointerUp => {
                    let target = self
                        .session
                        .last_event
                        .and_then(|e| self.find_target(e.point, &*host))
                        .map(|(target, _)| target);
                    tracing::debug!(resolved = target.is_some(), "selection dropped");
                    host.selection_dropped(target, self.session.modifiers);
                }
            }
        }
        self.finish(reason, host);
    }

    /// Force an active drag to end, releasing pointer capture.
    ///
    /// A selection drag stopped this way is reported as canceled.
    pub fn stop<H: DragHost + ?Sized>(&mut self, host: &mut H) {
        if !self.active {
            return;
        }
        if self.session.is_drag_and_drop {
            tracing::debug!(forced = true, "selection drop canceled");
            host.selection_drop_canceled();
        }
        host.stop_monitoring();
        self.finish(MonitorEnd::Keyboard, host);
    }

    /// Editor height changed; layout under the pointer is no longer valid.
    pub fn on_height_changed<H: DragHost + ?Sized>(&mut self, host: &mut H) {
        self.stop(host);
    }

    /// The viewport scrolled while dragging.
    ///
    /// After a short debounce the last pointer position is re-resolved: a
    /// plain drag extends the selection, a selection drag refreshes its
    /// drag-over target.
    pub fn on_scroll_changed<H: DragHost + ?Sized>(&mut self, host: &mut H) {
        if self.active && !self.resync.is_armed() {
            self.resync.arm(host, SCROLL_RESYNC_DELAY);
        }
    }

    /// Deliver a timer firing. Returns `false` if the id is not ours.
    pub fn on_timer<H: DragHost + ?Sized>(
        &mut self,
        id: TimerId,
        now: Instant,
        host: &mut H,
    ) -> bool {
        let speed = self.config.autoscroll_speed;
        match id.slot {
            TimerSlot::VerticalAutoscroll => match self.vertical.on_timer(id, now, speed, host) {
                Some(point) => {
                    self.redispatch(point, host);
                    true
                }
                None => false,
            },
            TimerSlot::HorizontalAutoscroll => match self.horizontal.on_timer(id, now, speed, host) {
                Some(point) => {
                    self.redispatch(point, host);
                    true
                }
                None => false,
            },
            TimerSlot::ScrollResync => {
                if !self.resync.fire(id) {
                    return false;
                }
                if let (true, Some(e)) = (self.active, self.session.last_event) {
                    if self.session.is_drag_and_drop {
                        if let Some((target, _)) = self.find_target(e.point, &*host) {
                            host.selection_drag_over(target);
                        }
                    } else {
                        self.redispatch(e.point, host);
                    }
                }
                true
            }
            TimerSlot::InertialCoast => false,
        }
    }

    fn finish<H: DragHost + ?Sized>(&mut self, reason: MonitorEnd, host: &mut H) {
        tracing::debug!(
            ?reason,
            drag_and_drop = self.session.is_drag_and_drop,
            "drag session ended"
        );
        self.active = false;
        self.session = DragSession::default();
        self.vertical.stop(host);
        self.horizontal.stop(host);
        self.resync.disarm(host);
    }

    fn can_drag_selection(
        &self,
        target: &HitTarget,
        position: TextPosition,
        modifiers: Modifiers,
        count: u32,
    ) -> bool {
        !self.config.read_only
            && self.config.drag_and_drop
            && !self.config.column_selection
            && !modifiers.is_chord()
            && count < 2
            && !self.active
            && !self.selection.is_empty()
            && target.kind == TargetKind::ContentText
            && self.selection.contains(position)
    }

    /// Hit-test `point`, marking outside targets and snapping past view zones.
    fn find_target<H: DragHost + ?Sized>(
        &self,
        point: Point,
        host: &H,
    ) -> Option<(HitTarget, TextPosition)> {
        let mut target = host.resolve(point);
        if let Some(outside) = host.content_bounds().outside_edge(point) {
            target.kind = TargetKind::OutsideEditor;
            target.outside = Some(outside);
        }
        if let Some(zone) = target.view_zone {
            target.position = Some(snap_past_view_zone(zone, self.selection.anchor));
        }
        let position = target.position?;
        Some((target, position))
    }

    fn redispatch<H: DragHost + ?Sized>(&mut self, point: Point, host: &mut H) {
        if let Some((_, position)) = self.find_target(point, host) {
            self.dispatch(position, point, true, RevealType::None, host);
        }
    }

    fn dispatch<H: DragHost + ?Sized>(
        &self,
        position: TextPosition,
        point: Point,
        in_selection_mode: bool,
        reveal: RevealType,
        host: &mut H,
    ) {
        let update = SelectionUpdate {
            position,
            mouse_column: host.mouse_column_for(point),
            click_count: self.clicks.count(),
            in_selection_mode,
            started_on_line_numbers: self.session.started_on_line_numbers,
            modifiers: self.session.modifiers,
            buttons: self.session.buttons,
            reveal,
        };
        host.apply_selection(update);
    }
}
