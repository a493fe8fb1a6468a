//! Benchmarks for exponential gain ramps, evaluated once per sample.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use decimal_synth::dsp::GainParam;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");

    for &size in BLOCK_SIZES {
        let mut param = GainParam::new(0.2);
        param.ramp_exponential(0.0001, 0.0, 0.3);

        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, &size| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for i in 0..size {
                    acc += param.value_at(black_box(i as f64 / SAMPLE_RATE as f64));
                }
                acc
            })
        });

        let param = GainParam::new(0.2);
        group.bench_with_input(BenchmarkId::new("steady", size), &size, |b, &size| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for i in 0..size {
                    acc += param.value_at(black_box(i as f64 / SAMPLE_RATE as f64));
                }
                acc
            })
        });
    }

    group.finish();
}
