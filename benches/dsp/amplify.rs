//! Benchmarks for signal amplification primitives.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use duo_synth::dsp::amplify;

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let modulator: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();

        let mut signal_copy = signal.clone();
        group.bench_with_input(
            BenchmarkId::new("multiply_in_place", size),
            &size,
            |b, _| {
                b.iter(|| {
                    signal_copy.copy_from_slice(&signal);
                    amplify::multiply_in_place(black_box(&mut signal_copy), black_box(&modulator))
                })
            },
        );

        let mut signal_copy = signal.clone();
        group.bench_with_input(BenchmarkId::new("sum_into", size), &size, |b, _| {
            b.iter(|| {
                signal_copy.copy_from_slice(&signal);
                amplify::sum_into(black_box(&mut signal_copy), black_box(&modulator))
            })
        });

        // dB conversion per sample, as the output stage does it
        let mut signal_copy = signal.clone();
        group.bench_with_input(BenchmarkId::new("db_gain", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in signal_copy.iter_mut().enumerate() {
                    *s = signal[i] * amplify::db_to_gain(black_box(-10.0));
                }
            })
        });
    }

    group.finish();
}
