pub mod dsp;
pub mod engine; // Rendering clock shared by every instrument
pub mod error;
pub mod graph; // Scheduled parameters and the owned signal graph
pub mod sequencing; // Notes and musical time descriptors
pub mod synth; // Instrument contracts, voices and the duo synth

pub use engine::clock::Clock;
pub use error::{AutomationError, GraphError, ParseError, SynthError};
pub use sequencing::{Frequency, Note, Time, TimeValue};
pub use synth::{
    duo_synth::DuoSynth,
    instrument::Instrument,
    mono_synth::MonoSynth,
    monophonic::Monophonic,
    options::{DuoSynthOptions, MonoSynthOptions},
    voice::Voice,
};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f64 = 1.0 / 48_000.0;
