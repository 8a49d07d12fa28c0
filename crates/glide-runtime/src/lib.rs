#![forbid(unsafe_code)]

//! Runtime: scroll motion, inertial coast, drag selection, edge autoscroll.
//!
//! # Role in Glide
//! `glide-runtime` holds the stateful machinery that turns `glide-core`
//! input events into scroll and selection changes. It owns no viewport and
//! no clock: every effect goes through the host traits in [`host`], and all
//! periodic work is a one-shot [`scheduler::Timer`] the host delivers back
//! through `on_timer`.
//!
//! # Threading
//! Everything runs on the UI thread. Handlers and timer deliveries never
//! overlap, and the shared wheel classifier is `!Send`.

pub mod drag_selection;
pub mod edge_autoscroll;
pub mod host;
pub mod scheduler;
pub mod scroll_controller;

pub use drag_selection::{DragPhase, PointerDragSelectionMachine, SCROLL_RESYNC_DELAY};
pub use edge_autoscroll::{AUTOSCROLL_INTERVAL, AutoscrollTarget, EdgeAutoscroll};
pub use host::{
    DragHost, HitTarget, HitTester, MonitorEnd, PointerMonitor, RevealType, ScrollHost,
    ScrollStore, SelectionSink, SelectionUpdate, TargetKind, ViewZoneBounds,
};
pub use scheduler::{FrameScheduler, ManualScheduler, Timer, TimerId, TimerSlot};
pub use scroll_controller::{
    INERTIAL_TICK_INTERVAL, InertialState, SCROLL_WHEEL_SENSITIVITY, ScrollMotionController,
    WheelOutcome,
};
