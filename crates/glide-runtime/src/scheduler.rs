#![forbid(unsafe_code)]

//! One-shot, self-rescheduling timers on a host-provided scheduler.
//!
//! Nothing in Glide runs on a background thread. Periodic work (inertial
//! coast, edge autoscroll, scroll resync) is a one-shot [`Timer`] that its
//! owner re-arms after each firing while there is still work to do.
//!
//! # How it works
//!
//! 1. The owner calls [`Timer::arm`], which mints a fresh [`TimerId`] and asks
//!    the host [`FrameScheduler`] to hand it back after a delay.
//! 2. When the delay elapses the host passes the id to the owner's
//!    `on_timer` entry point.
//! 3. The owner calls [`Timer::fire`]; only the id of the currently armed
//!    generation is accepted, so a delivery that raced with a
//!    [`Timer::disarm`] is ignored.
//!
//! Disarming is idempotent and never fails.
//!
//! Every [`Timer`] carries its own owner tag, so ids minted by different
//! surfaces never collide on a scheduler they share.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use web_time::Instant;

/// Which piece of periodic work a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// 60 Hz inertial coast of a scroll surface.
    InertialCoast,
    /// Edge autoscroll while the pointer is above/below the editor.
    VerticalAutoscroll,
    /// Edge autoscroll while the pointer is left/right of the editor.
    HorizontalAutoscroll,
    /// Debounced selection refresh after the viewport scrolled mid-drag.
    ScrollResync,
}

static NEXT_TIMER_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identifies one armed generation of one timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    /// Unique per [`Timer`] instance.
    pub owner: u64,
    pub slot: TimerSlot,
    pub generation: u64,
}

/// Host capability: deliver timer ids back after a delay.
///
/// Implementations typically map this onto an animation-frame callback or
/// an event-loop timer. Deliveries must happen on the UI thread and never
/// overlap each other or an input handler.
pub trait FrameScheduler {
    /// Arrange for `timer` to be delivered once, `delay` from now.
    fn schedule(&mut self, timer: TimerId, delay: Duration);

    /// Drop a pending delivery. Unknown or already-delivered ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}

/// A one-shot timer slot with generation-tagged cancellation.
#[derive(Debug, Clone)]
pub struct Timer {
    owner: u64,
    slot: TimerSlot,
    generation: u64,
    pending: Option<TimerId>,
}

impl Timer {
    #[must_use]
    pub fn new(slot: TimerSlot) -> Self {
        Self {
            owner: NEXT_TIMER_OWNER.fetch_add(1, Ordering::Relaxed),
            slot,
            generation: 0,
            pending: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn owner(&self) -> u64 {
        self.owner
    }

    #[inline]
    #[must_use]
    pub fn slot(&self) -> TimerSlot {
        self.slot
    }

    /// Whether a delivery is outstanding.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule the next delivery, replacing any outstanding one.
    pub fn arm<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S, delay: Duration) -> TimerId {
        if let Some(stale) = self.pending.take() {
            scheduler.cancel(stale);
        }
        self.generation = self.generation.wrapping_add(1);
        let id = TimerId {
            owner: self.owner,
            slot: self.slot,
            generation: self.generation,
        };
        self.pending = Some(id);
        scheduler.schedule(id, delay);
        tracing::trace!(
            owner = id.owner,
            slot = ?id.slot,
            generation = id.generation,
            ?delay,
            "timer armed"
        );
        id
    }

    /// Cancel the outstanding delivery, if any.
    pub fn disarm<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
            tracing::trace!(
                owner = id.owner,
                slot = ?id.slot,
                generation = id.generation,
                "timer disarmed"
            );
        }
    }

    /// Accept a delivery. Returns `false` for ids this timer no longer owns.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// ManualScheduler
// ---------------------------------------------------------------------------

/// Deterministic scheduler driven by explicit clock advances.
///
/// Useful for headless hosts and tests: nothing fires until
/// [`advance`](ManualScheduler::advance) moves the clock past a deadline.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now: Instant,
    pending: Vec<(Instant, TimerId)>,
}

impl ManualScheduler {
    /// Create a scheduler whose clock starts at `start`.
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self {
            now: start,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Whether any delivery for `slot` is outstanding.
    #[must_use]
    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.pending.iter().any(|(_, id)| id.slot == slot)
    }

    /// Number of outstanding deliveries.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock and return every id that came due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(Instant, TimerId)> = Vec::new();
        self.pending.retain(|&(deadline, id)| {
            if deadline <= now {
                due.push((deadline, id));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        self.pending.push((self.now + delay, timer));
    }

    fn cancel(&mut self, timer: TimerId) {
        self.pending.retain(|&(_, id)| id != timer);
    }
}
