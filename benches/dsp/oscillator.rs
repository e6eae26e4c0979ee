//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use duo_synth::dsp::oscillator::{Oscillator, OscillatorWaveform};

use crate::BLOCK_SIZES;

const WAVEFORMS: &[(&str, OscillatorWaveform)] = &[
    ("sine", OscillatorWaveform::Sine),         // sin() transcendental
    ("sawtooth", OscillatorWaveform::Sawtooth), // linear ramp
    ("square", OscillatorWaveform::Square),     // branch per sample
    ("triangle", OscillatorWaveform::Triangle), // absolute value
];

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        // slight vibrato so the per-sample frequency path is exercised
        let frequency: Vec<f32> = (0..size)
            .map(|i| 440.0 * (1.0 + 0.01 * (i as f32 * 0.01).sin()))
            .collect();

        for &(name, waveform) in WAVEFORMS {
            let mut osc = Oscillator::new(waveform);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer), black_box(&frequency), 48_000.0);
                })
            });
        }
    }

    group.finish();
}
