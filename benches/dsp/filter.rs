//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use duo_synth::dsp::filter::{FilterType, SVFilter};

use crate::BLOCK_SIZES;

const RESPONSES: &[(&str, FilterType)] = &[
    ("lowpass", FilterType::LowPass),
    ("highpass", FilterType::HighPass),
    ("bandpass", FilterType::BandPass),
    ("notch", FilterType::Notch),
];

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for &(name, filter_type) in RESPONSES {
            let mut filter = SVFilter::new(filter_type, 0.5);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(1_000.0), 48_000.0);
                })
            });
        }
    }

    group.finish();
}
