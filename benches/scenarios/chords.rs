//! Held chords and key churn rendered through the offline graph.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use decimal_synth::{backend::RenderGraph, OfflineBackend, Scale, VoiceRegistry, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn held(tones: &[f64], waveform: Waveform) -> VoiceRegistry<OfflineBackend> {
    let backend = OfflineBackend::new(RenderGraph::with_capacity(SAMPLE_RATE, 64));
    let mut registry = VoiceRegistry::new(backend);
    for &tone in tones {
        registry.press(tone, Scale::default(), waveform);
    }
    registry
}

pub fn bench_chords(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chords");

    // Every named tone of one scale at once
    let all_tones: Vec<f64> = (1..=10).map(f64::from).collect();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut registry = held(&[8.0], Waveform::Sine);
        group.bench_with_input(BenchmarkId::new("single_sine", size), &size, |b, _| {
            b.iter(|| registry.backend_mut().render(black_box(&mut buffer)))
        });

        let mut registry = held(&[1.0, 4.0, 6.0], Waveform::Sawtooth);
        group.bench_with_input(BenchmarkId::new("triad_saw", size), &size, |b, _| {
            b.iter(|| registry.backend_mut().render(black_box(&mut buffer)))
        });

        let mut registry = held(&all_tones, Waveform::Sine);
        group.bench_with_input(BenchmarkId::new("ten_sines", size), &size, |b, _| {
            b.iter(|| registry.backend_mut().render(black_box(&mut buffer)))
        });

        // Press and release one key per block; released voices pile up until
        // their fade finishes
        let mut registry = held(&[], Waveform::Triangle);
        let mut next = 0usize;
        group.bench_with_input(BenchmarkId::new("churn", size), &size, |b, _| {
            b.iter(|| {
                let tone = all_tones[next % all_tones.len()];
                next += 1;
                registry.press(tone, Scale::default(), Waveform::Triangle);
                registry.backend_mut().render(black_box(&mut buffer));
                registry.release(tone);
            })
        });
    }

    group.finish();
}
