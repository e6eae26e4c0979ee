#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{envelope::Envelope, filter::FilterType, oscillator::OscillatorWaveform},
    engine::Clock,
    sequencing::{Duration, Frequency, TimeValue},
};

/*
Configuration Tree
==================

Every option is optional and falls back to the defaults below. Time and
rate fields take descriptors, so a config can say "4n" instead of 0.5 and
have it resolved against the clock's tempo when the instrument is built.

    DuoSynthOptions
    ├── vibratoAmount   0.5
    ├── vibratoRate     5 Hz
    ├── vibratoDelay    1 s (held, never scheduled)
    ├── harmonicity     1.5
    ├── portamento      0
    ├── volume          0 dB
    ├── voice0          MonoSynthOptions
    └── voice1          MonoSynthOptions

    MonoSynthOptions
    ├── volume          unset: 0 dB standalone, -10 dB inside a duo synth
    ├── portamento      0
    ├── detune          0 cents
    ├── oscillator      { type: sine }
    ├── envelope        { attack .01, decay 0, sustain 1, release .5 }
    ├── filterEnvelope  { same, baseFrequency 200, octaves 7 }
    └── filter          { type: lowpass, q: 0 }

With the `serde` feature, keys are camelCase and any field may be left out.
*/

/// Level of each duo synth voice when its config leaves `volume` unset.
pub const DUO_VOICE_VOLUME_DB: f32 = -10.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OscillatorOptions {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub waveform: OscillatorWaveform,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeOptions {
    pub attack: TimeValue,
    pub decay: TimeValue,
    pub sustain: f32,
    pub release: TimeValue,
}

impl Default for EnvelopeOptions {
    fn default() -> Self {
        Self {
            attack: TimeValue::Seconds(0.01),
            decay: TimeValue::Seconds(0.0),
            sustain: 1.0,
            release: TimeValue::Seconds(0.5),
        }
    }
}

impl EnvelopeOptions {
    /// Resolve descriptors to an envelope in seconds.
    pub fn resolve(&self, clock: &Clock) -> Envelope {
        Envelope::adsr(
            clock.seconds(self.attack),
            clock.seconds(self.decay),
            self.sustain,
            clock.seconds(self.release),
        )
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterEnvelopeOptions {
    pub attack: TimeValue,
    pub decay: TimeValue,
    pub sustain: f32,
    pub release: TimeValue,
    /// Cutoff when the envelope is at zero
    pub base_frequency: Frequency,
    /// Octaves above `base_frequency` the cutoff reaches at full level
    pub octaves: f32,
}

impl Default for FilterEnvelopeOptions {
    fn default() -> Self {
        let shape = EnvelopeOptions::default();
        Self {
            attack: shape.attack,
            decay: shape.decay,
            sustain: shape.sustain,
            release: shape.release,
            base_frequency: Frequency::Hertz(200.0),
            octaves: 7.0,
        }
    }
}

impl FilterEnvelopeOptions {
    pub fn shape(&self) -> EnvelopeOptions {
        EnvelopeOptions {
            attack: self.attack,
            decay: self.decay,
            sustain: self.sustain,
            release: self.release,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterOptions {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub filter_type: FilterType,
    /// Resonance, 0.0 - 0.99
    pub q: f32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoSynthOptions {
    /// Output level in dB; `None` lets the owning instrument pick
    pub volume: Option<f32>,
    pub portamento: TimeValue,
    /// Detune in cents
    pub detune: f32,
    pub oscillator: OscillatorOptions,
    pub envelope: EnvelopeOptions,
    pub filter_envelope: FilterEnvelopeOptions,
    pub filter: FilterOptions,
}

impl Default for MonoSynthOptions {
    fn default() -> Self {
        Self {
            volume: None,
            portamento: TimeValue::Seconds(0.0),
            detune: 0.0,
            oscillator: OscillatorOptions::default(),
            envelope: EnvelopeOptions::default(),
            filter_envelope: FilterEnvelopeOptions::default(),
            filter: FilterOptions::default(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuoSynthOptions {
    pub vibrato_amount: f32,
    pub vibrato_rate: Frequency,
    pub vibrato_delay: TimeValue,
    /// voice1 / voice0 frequency ratio
    pub harmonicity: f32,
    pub portamento: TimeValue,
    /// Output level in dB
    pub volume: f32,
    pub voice0: MonoSynthOptions,
    pub voice1: MonoSynthOptions,
}

impl Default for DuoSynthOptions {
    fn default() -> Self {
        Self {
            vibrato_amount: 0.5,
            vibrato_rate: Frequency::Hertz(5.0),
            vibrato_delay: TimeValue::Seconds(1.0),
            harmonicity: 1.5,
            portamento: TimeValue::Seconds(0.0),
            volume: 0.0,
            voice0: MonoSynthOptions::default(),
            voice1: MonoSynthOptions::default(),
        }
    }
}

impl DuoSynthOptions {
    /// Default duo with a sixteenth-note glide between notes.
    pub fn gliding_fifth() -> Self {
        Self {
            portamento: TimeValue::Note(Duration::SIXTEENTH),
            ..Default::default()
        }
    }
}
