#![forbid(unsafe_code)]

//! Wheel-source classification: physical mouse wheel vs. precision device.
//!
//! Wheel events carry no reliable device identity. [`WheelClassifier`] keeps
//! the last [`WHEEL_HISTORY_CAPACITY`] samples, scores each one on arrival by
//! how "trackpad-like" it looks, and aggregates the scores with exponential
//! recency weighting.
//!
//! # Scoring
//!
//! A sample's score is fixed when it is inserted and depends only on the
//! sample and its immediate predecessor:
//!
//! 1. Motion on both axes at once scores `1.0` (a detented wheel is
//!    single-axis by construction).
//! 2. Otherwise start from `0.5`.
//! 3. A non-integral delta on either axis adds `0.25` (OS acceleration).
//! 4. When consecutive deltas are integer multiples of each other on both
//!    axes, subtract `0.5` (detented wheels emit multiples of a base unit).
//! 5. Clamp to `[0, 1]`.
//!
//! # Invariants
//!
//! 1. Every stored score lies in `[0, 1]`.
//! 2. The recency weights for `n` samples (`1 <= n <= capacity`) sum to 1.
//! 3. Insertion never allocates; the oldest sample is overwritten when full.
//! 4. An empty classifier reports a physical wheel.
//!
//! # Sharing
//!
//! Device behavior is a property of the host machine, so every scrollable in
//! a process should feed and read the same classifier. The host creates one
//! [`ClassifierHandle`] and clones it into each consumer.

use std::cell::RefCell;
use std::rc::Rc;

use web_time::Instant;

/// Number of recent samples the classifier remembers.
pub const WHEEL_HISTORY_CAPACITY: usize = 5;

/// Absolute tolerance for the "almost an integer" delta test.
///
/// Tight enough that only exact integers (give or take float slack) pass.
pub const ALMOST_INT_EPSILON: f64 = f64::EPSILON * 100.0;

/// Verdicts at or below this value mean "physical wheel".
pub const PHYSICAL_WHEEL_THRESHOLD: f64 = 0.5;

/// One scored wheel sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSample {
    pub timestamp: Instant,
    pub delta_x: f64,
    pub delta_y: f64,
    /// Trackpad likelihood in `[0, 1]`.
    pub score: f64,
}

/// Fixed-capacity ring buffer of scored wheel samples.
#[derive(Debug, Clone, Default)]
pub struct WheelClassifier {
    samples: [Option<WheelSample>; WHEEL_HISTORY_CAPACITY],
    /// Slot holding the newest sample.
    newest: usize,
    len: usize,
}

impl WheelClassifier {
    /// Create an empty classifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a wheel sample.
    pub fn accept(&mut self, timestamp: Instant, delta_x: f64, delta_y: f64) {
        let previous = self.newest_sample();
        let score = score_sample(delta_x, delta_y, previous.as_ref());

        let slot = if self.len == 0 {
            0
        } else {
            (self.newest + 1) % WHEEL_HISTORY_CAPACITY
        };
        self.samples[slot] = Some(WheelSample {
            timestamp,
            delta_x,
            delta_y,
            score,
        });
        self.newest = slot;
        self.len = (self.len + 1).min(WHEEL_HISTORY_CAPACITY);

        #[cfg(feature = "tracing")]
        tracing::trace!(delta_x, delta_y, score, len = self.len, "wheel sample scored");
    }

    /// Whether the recent stream looks like a detented mouse wheel.
    #[must_use]
    pub fn is_physical_wheel(&self) -> bool {
        self.verdict()
            .is_none_or(|verdict| verdict <= PHYSICAL_WHEEL_THRESHOLD)
    }

    /// Recency-weighted trackpad likelihood, or `None` with no history.
    #[must_use]
    pub fn verdict(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        let weights = recency_weights(self.len);
        let verdict = self
            .iter_newest_first()
            .zip(weights.iter())
            .map(|(sample, weight)| sample.score * weight)
            .sum();
        Some(verdict)
    }

    /// Stored samples, newest first.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &WheelSample> + '_ {
        (0..self.len).filter_map(move |age| {
            let slot = (self.newest + WHEEL_HISTORY_CAPACITY - age) % WHEEL_HISTORY_CAPACITY;
            self.samples[slot].as_ref()
        })
    }

    /// Number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn newest_sample(&self) -> Option<WheelSample> {
        if self.len == 0 {
            None
        } else {
            self.samples[self.newest]
        }
    }
}

/// Score a new sample against its predecessor.
#[must_use]
pub fn score_sample(delta_x: f64, delta_y: f64, previous: Option<&WheelSample>) -> f64 {
    if delta_x.abs() > 0.0 && delta_y.abs() > 0.0 {
        return 1.0;
    }

    let mut score: f64 = 0.5;

    if !is_almost_int(delta_x) || !is_almost_int(delta_y) {
        score += 0.25;
    }

    if let Some(prev) = previous {
        let (min_x, max_x) = min_max_magnitude(delta_x, prev.delta_x);
        let (min_y, max_y) = min_max_magnitude(delta_y, prev.delta_y);
        if max_x % min_x == 0.0 && max_y % min_y == 0.0 {
            score -= 0.5;
        }
    }

    score.clamp(0.0, 1.0)
}

/// Weight of each sample by age (index 0 = newest) for `len` stored samples.
///
/// The k-th newest sample weighs `2^-k`; the oldest absorbs what remains so
/// the first `len` entries sum to exactly 1. Entries past `len` are zero.
#[must_use]
pub fn recency_weights(len: usize) -> [f64; WHEEL_HISTORY_CAPACITY] {
    let mut weights = [0.0; WHEEL_HISTORY_CAPACITY];
    let len = len.min(WHEEL_HISTORY_CAPACITY);
    if len == 0 {
        return weights;
    }
    let mut remaining = 1.0;
    let mut influence = 0.5;
    for weight in weights.iter_mut().take(len - 1) {
        *weight = influence;
        remaining -= influence;
        influence /= 2.0;
    }
    weights[len - 1] = remaining;
    weights
}

fn is_almost_int(value: f64) -> bool {
    (value.round() - value).abs() < ALMOST_INT_EPSILON
}

/// `(max(1, min(|a|, |b|)), max(|a|, |b|))`; the floor of 1 keeps the modulo
/// defined when one side is zero.
fn min_max_magnitude(a: f64, b: f64) -> (f64, f64) {
    let (a, b) = (a.abs(), b.abs());
    (a.min(b).max(1.0), a.max(b))
}

// ---------------------------------------------------------------------------
// Shared handle
// ---------------------------------------------------------------------------

/// Process-wide classifier shared by every scrollable on the UI thread.
///
/// Cloning the handle shares the same history. The handle is `!Send`: all
/// reads and writes happen on the thread that owns the event loop.
#[derive(Debug, Clone, Default)]
pub struct ClassifierHandle {
    inner: Rc<RefCell<WheelClassifier>>,
}

impl ClassifierHandle {
    /// Create a handle to a fresh, empty classifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a wheel sample.
    pub fn accept(&self, timestamp: Instant, delta_x: f64, delta_y: f64) {
        self.inner.borrow_mut().accept(timestamp, delta_x, delta_y);
    }

    /// See [`WheelClassifier::is_physical_wheel`].
    #[must_use]
    pub fn is_physical_wheel(&self) -> bool {
        self.inner.borrow().is_physical_wheel()
    }

    /// See [`WheelClassifier::verdict`].
    #[must_use]
    pub fn verdict(&self) -> Option<f64> {
        self.inner.borrow().verdict()
    }

    /// Copy of the current classifier state.
    #[must_use]
    pub fn snapshot(&self) -> WheelClassifier {
        self.inner.borrow().clone()
    }

    /// Whether two handles share the same classifier.
    #[must_use]
    pub fn same_classifier(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
