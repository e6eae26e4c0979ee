//! Benchmarks for a complete duo synth block.
//!
//! This is the whole audio callback: graph, two voices, output stage.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use duo_synth::{Clock, DuoSynth, DuoSynthOptions, Instrument, Note, Time};

use crate::BLOCK_SIZES;

pub fn bench_duo_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/duo_synth");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Held note, default patch
        let clock = Arc::new(Clock::new(48_000.0));
        clock.start();
        let mut synth = DuoSynth::new(clock.clone(), &DuoSynthOptions::default()).unwrap();
        synth
            .trigger_attack(Note::Midi(45), Some(Time::at(0.0)), None)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("held_note", size), &size, |b, _| {
            b.iter(|| {
                synth.render_block(black_box(&mut buffer)).unwrap();
                clock.advance(buffer.len());
            })
        });

        // A new gliding note every block: scheduling plus rendering
        let clock = Arc::new(Clock::new(48_000.0));
        clock.start();
        let mut synth = DuoSynth::new(clock.clone(), &DuoSynthOptions::gliding_fifth()).unwrap();
        let mut note = 0u8;

        group.bench_with_input(BenchmarkId::new("retrigger_glide", size), &size, |b, _| {
            b.iter(|| {
                note = (note + 5) % 24;
                synth
                    .trigger_attack(Note::Midi(48 + note), None, Some(0.8))
                    .unwrap();
                synth.render_block(black_box(&mut buffer)).unwrap();
                clock.advance(buffer.len());
            })
        });
    }

    group.finish();
}
