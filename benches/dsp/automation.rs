//! Benchmarks for automation curve evaluation and scheduling.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use duo_synth::dsp::{automation::AutomationCurve, envelope::Envelope};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f64 = 48_000.0;

pub fn bench_automation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/automation");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Exponential glide: the portamento case
        let mut glide = AutomationCurve::new(220.0);
        glide.set_value_at_time(220.0, 0.0).unwrap();
        glide.exponential_ramp_to_value_at_time(440.0, 1.0).unwrap();
        group.bench_with_input(BenchmarkId::new("value_at_exponential", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in buffer.iter_mut().enumerate() {
                    *s = glide.value_at(black_box(0.5 + i as f64 / SAMPLE_RATE));
                }
            })
        });

        // A long log of points: lookup cost grows with binary search depth
        let mut dense = AutomationCurve::new(0.0);
        for step in 0..1_000 {
            let t = step as f64 * 0.01;
            dense.linear_ramp_to_value_at_time((step % 7) as f32, t).unwrap();
        }
        group.bench_with_input(BenchmarkId::new("value_at_dense", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in buffer.iter_mut().enumerate() {
                    *s = dense.value_at(black_box(5.0 + i as f64 / SAMPLE_RATE));
                }
            })
        });
    }

    // Retriggering an envelope: cancel-and-hold plus two ramps
    let envelope = Envelope::adsr(0.01, 0.1, 0.7, 0.3);
    let mut curve = AutomationCurve::new(0.0);
    let mut time = 0.0;
    group.bench_function("envelope_retrigger", |b| {
        b.iter(|| {
            time += 0.05;
            envelope
                .trigger_attack(black_box(&mut curve), black_box(time), 1.0)
                .unwrap();
            curve.prune_before(time);
        })
    });

    group.finish();
}
