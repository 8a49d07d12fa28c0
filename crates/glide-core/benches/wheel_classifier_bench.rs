//! Benchmark: wheel classifier accept and verdict cost.
//!
//! Run with: `cargo bench -p glide-core --bench wheel_classifier_bench`
//!
//! Every wheel event feeds the classifier and smooth-scroll hosts query the
//! verdict right after, so both sit on the per-event hot path.

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use glide_core::wheel_classifier::score_sample;
use glide_core::{ClassifierHandle, WheelClassifier, WheelSample};
use web_time::Instant;

fn bench_accept(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier_accept");
    let t0 = Instant::now();

    group.bench_function("mouse_notches", |b| {
        let mut cls = WheelClassifier::new();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            cls.accept(t0 + Duration::from_millis(i), 0.0, black_box(-3.0));
        });
    });

    group.bench_function("trackpad_fractional", |b| {
        let mut cls = WheelClassifier::new();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            let dy = -0.1 * (i % 17) as f64 - 0.05;
            cls.accept(t0 + Duration::from_millis(i), black_box(0.0), black_box(dy));
        });
    });

    group.bench_function("shared_handle", |b| {
        let handle = ClassifierHandle::new();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            handle.accept(t0 + Duration::from_millis(i), 0.0, black_box(-1.0));
        });
    });

    group.finish();
}

fn bench_verdict(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier_verdict");
    let t0 = Instant::now();

    let mut full = WheelClassifier::new();
    for i in 0..8u64 {
        full.accept(t0 + Duration::from_millis(i * 16), 1.1, -3.2);
    }
    group.bench_function("full_history", |b| {
        b.iter(|| black_box(full.is_physical_wheel()));
    });

    let empty = WheelClassifier::new();
    group.bench_function("empty", |b| {
        b.iter(|| black_box(empty.is_physical_wheel()));
    });

    let prev = WheelSample {
        timestamp: t0,
        delta_x: 0.0,
        delta_y: -120.0,
        score: 0.5,
    };
    group.bench_function("score_sample", |b| {
        b.iter(|| black_box(score_sample(black_box(0.0), black_box(-240.0), Some(&prev))));
    });

    group.finish();
}

criterion_group!(benches, bench_accept, bench_verdict);
criterion_main!(benches);
