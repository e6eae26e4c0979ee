//! Real-world scenario benchmarks.
//!
//! These benchmarks model what the audio callback actually does: render the
//! routing graph, then render the whole duo synth with a note held.

mod duo_synth;
mod graph;

pub use duo_synth::bench_duo_synth;
pub use graph::bench_graph;
