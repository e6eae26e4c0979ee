use std::ops::Deref;

use crate::{
    error::SynthError,
    graph::param::ParamView,
    sequencing::{Note, Time, TimeValue},
    synth::{instrument::Instrument, monophonic::Monophonic},
};

/*
Voice Contract
==============

A voice is a monophonic instrument that can also be played by a parent
instrument. The parent owns the voice outright and drives two of its inputs
with per-sample signals:

    parent graph ──frequency──→ ┌───────┐
                                │ voice │──→ audio
    parent graph ──detune─────→ └───────┘

Driven inputs add to the voice's own parameter values:

    effective_hz = (frequency param + driven frequency)
                   × 2 ^ ((detune param + driven detune) / 1200)

A parent that drives the frequency input zeroes the voice's own frequency
and detune first, so the driven signal is the whole pitch.

The parent fires the voice's envelopes directly. The amplitude envelope and
the filter envelope can each be started on their own; the filter one ignores
velocity. The voice's own attack hook starts both.

Handing a Voice Out
-------------------

A parent exposes its voices through `VoiceView`: callers can schedule on the
voice's parameters and trigger it, but cannot swap the voice for another.
*/

/// Per-sample signals a parent feeds into a voice for one block.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceInputs<'a> {
    /// Hz added to the voice's own frequency
    pub frequency: Option<&'a [f32]>,
    /// Cents added to the voice's own detune
    pub detune: Option<&'a [f32]>,
}

impl VoiceInputs<'_> {
    #[inline]
    pub fn frequency_at(&self, i: usize) -> f32 {
        self.frequency.and_then(|b| b.get(i)).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn detune_at(&self, i: usize) -> f32 {
        self.detune.and_then(|b| b.get(i)).copied().unwrap_or(0.0)
    }
}

pub trait Voice: Monophonic {
    /// Detune in cents.
    fn detune(&mut self) -> Result<ParamView<'_>, SynthError>;

    /// Start only the amplitude envelope at `time`.
    fn trigger_amplitude_envelope_attack(
        &mut self,
        time: f64,
        velocity: f32,
    ) -> Result<(), SynthError>;

    /// Start only the filter envelope at `time`, at full level.
    fn trigger_filter_envelope_attack(&mut self, time: f64) -> Result<(), SynthError>;

    /// Render one block starting at `start` seconds with driven inputs.
    ///
    /// `out` must not be longer than `MAX_BLOCK_SIZE`.
    fn render_driven(
        &mut self,
        out: &mut [f32],
        inputs: &VoiceInputs<'_>,
        start: f64,
    ) -> Result<(), SynthError>;

    /// Effective pitch of each sample in the last rendered block.
    fn rendered_frequency(&self) -> &[f32];
}

/// External handle to a voice owned by another instrument.
pub struct VoiceView<'a, V: Voice> {
    voice: &'a mut V,
}

impl<'a, V: Voice> VoiceView<'a, V> {
    pub(crate) fn new(voice: &'a mut V) -> Self {
        Self { voice }
    }

    pub fn frequency(&mut self) -> Result<ParamView<'_>, SynthError> {
        self.voice.frequency()
    }

    pub fn detune(&mut self) -> Result<ParamView<'_>, SynthError> {
        self.voice.detune()
    }

    pub fn volume(&mut self) -> Result<ParamView<'_>, SynthError> {
        self.voice.volume()
    }

    pub fn set_portamento(&mut self, seconds: f64) -> &mut Self {
        self.voice.set_portamento(seconds);
        self
    }

    pub fn trigger_attack(
        &mut self,
        note: Note,
        time: Option<Time>,
        velocity: Option<f32>,
    ) -> Result<&mut Self, SynthError> {
        self.voice.trigger_attack(note, time, velocity)?;
        Ok(self)
    }

    pub fn trigger_release(&mut self, time: Option<Time>) -> Result<&mut Self, SynthError> {
        self.voice.trigger_release(time)?;
        Ok(self)
    }

    pub fn trigger_attack_release(
        &mut self,
        note: Note,
        duration: TimeValue,
        time: Option<Time>,
        velocity: Option<f32>,
    ) -> Result<&mut Self, SynthError> {
        self.voice
            .trigger_attack_release(note, duration, time, velocity)?;
        Ok(self)
    }

    pub fn trigger_amplitude_envelope_attack(
        &mut self,
        time: f64,
        velocity: f32,
    ) -> Result<&mut Self, SynthError> {
        self.voice.trigger_amplitude_envelope_attack(time, velocity)?;
        Ok(self)
    }

    pub fn trigger_filter_envelope_attack(&mut self, time: f64) -> Result<&mut Self, SynthError> {
        self.voice.trigger_filter_envelope_attack(time)?;
        Ok(self)
    }
}

impl<V: Voice> Deref for VoiceView<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.voice
    }
}
