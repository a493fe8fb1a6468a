//! Benchmarks for the tuning math, DSP primitives and keyboard scenarios.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - tuning       Frequency lookup for whole grids
//!   - dsp/*        Oscillator and gain ramp primitives
//!   - scenarios/*  Chords and slides rendered through the offline graph

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use decimal_synth::{grid, Scale, Tuning, ZoomLevel};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub const SAMPLE_RATE: f32 = 48_000.0;

fn bench_tuning(c: &mut Criterion) {
    let mut group = c.benchmark_group("tuning");
    let tuning = Tuning::DECIMAL;
    let scale = Scale::default();

    for level in ZoomLevel::SUPPORTED {
        let Ok(zoom) = ZoomLevel::new(level) else {
            continue;
        };
        let tones: Vec<f64> = grid::generate(zoom).tones().collect();

        group.bench_with_input(BenchmarkId::new("grid", level), &tones, |b, tones| {
            b.iter(|| {
                tones
                    .iter()
                    .map(|&tone| tuning.frequency(black_box(tone), scale))
                    .sum::<f64>()
            })
        });
    }

    group.bench_function("generate_10x", |b| {
        let zoom = ZoomLevel::new(10).unwrap_or_default();
        b.iter(|| grid::generate(black_box(zoom)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tuning,
    // Low-level DSP primitives
    dsp::bench_oscillator,
    dsp::bench_ramp,
    // Keyboard scenarios
    scenarios::bench_chords,
    scenarios::bench_slide,
);
criterion_main!(benches);
