// Purpose: Instrument contracts, the default voice and the duo synth
// This layer sits above the graph and turns triggers into automation

pub mod duo_synth;
pub mod instrument;
pub mod message;
pub mod mono_synth;
pub mod monophonic;
pub mod options;
pub mod voice;

pub use duo_synth::DuoSynth;
pub use instrument::{Instrument, Output};
pub use message::{dispatch, MessageReceiver, SynthMessage};
pub use mono_synth::MonoSynth;
pub use monophonic::Monophonic;
pub use options::{DuoSynthOptions, MonoSynthOptions};
pub use voice::{Voice, VoiceInputs, VoiceView};
