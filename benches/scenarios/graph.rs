//! Benchmarks for rendering the duo synth's routing graph on its own.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use duo_synth::graph::{Inlet, Lfo, Param, SignalGraph, Units};

use crate::BLOCK_SIZES;

pub fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/graph");

    for &size in BLOCK_SIZES {
        let mut graph = SignalGraph::new();
        let frequency = graph.add_param("frequency", Param::new("frequency", Units::Hertz, 440.0));
        let harmonicity =
            graph.add_param("harmonicity", Param::new("harmonicity", Units::Ratio, 1.5));
        let multiply = graph.add_multiply("multiply");
        let vibrato = graph.add_lfo("vibrato", Lfo::sine(5.0, -50.0, 50.0, 0.0));
        let amount = graph.add_param("amount", Param::new("amount", Units::Gain, 0.5));
        let gain = graph.add_gain("gain");
        let port0 = graph.add_port("voice0.detune");
        let port1 = graph.add_port("voice1.detune");

        graph.connect(frequency, multiply, Inlet::Signal).unwrap();
        graph.connect(harmonicity, multiply, Inlet::Control).unwrap();
        graph.connect(vibrato, gain, Inlet::Signal).unwrap();
        graph.connect(amount, gain, Inlet::Control).unwrap();
        graph.connect(gain, port0, Inlet::Signal).unwrap();
        graph.connect(gain, port1, Inlet::Signal).unwrap();

        let mut start = 0.0;
        group.bench_with_input(BenchmarkId::new("duo_routing", size), &size, |b, &size| {
            b.iter(|| {
                graph.render_block(black_box(start), 48_000.0, size);
                start += size as f64 / 48_000.0;
            })
        });
    }

    group.finish();
}
