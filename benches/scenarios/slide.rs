//! A glissando retargeting its voice once per block.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use decimal_synth::{GlideController, OfflineBackend, Scale, VoiceRegistry, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const KEY_WIDTH: f64 = 48.0;

pub fn bench_slide(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/slide");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut registry = VoiceRegistry::new(OfflineBackend::offline(SAMPLE_RATE));
        let mut glide = GlideController::new();
        glide.start(&mut registry, 0.0, 3.0, Scale::default(), Waveform::Sine);

        // Sweep back and forth across five keys
        let mut step = 0u32;
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, _| {
            b.iter(|| {
                step = (step + 1) % 480;
                let offset = f64::from(step.min(480 - step));
                glide.move_to(&mut registry, offset, KEY_WIDTH, Scale::default());
                registry.backend_mut().render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
