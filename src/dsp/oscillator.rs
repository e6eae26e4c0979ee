#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/*
Phase Accumulator Oscillator
============================

The oscillator keeps a phase in [0, 1) and advances it by frequency /
sample_rate every sample. The waveform is a function of the phase only, so
frequency can change on every sample (glides, vibrato) without clicks.

    phase:  0.0 ──────────────→ 1.0 (wraps)
    sine:   sin(2π × phase)
    square: +1 for phase < 0.5, -1 after
    saw:    2 × phase - 1
    tri:    1 - 4 × |phase - 0.5|   (starts at -1, peaks at phase 0.5)

Detune is expressed in cents. 100 cents = 1 semitone, 1200 cents = 1 octave:

    ratio = 2 ^ (cents / 1200)
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorWaveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl OscillatorWaveform {
    /// Bipolar waveform value for a phase in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            OscillatorWaveform::Sine => (TAU * phase).sin(),
            OscillatorWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscillatorWaveform::Sawtooth => 2.0 * phase - 1.0,
            OscillatorWaveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

pub struct Oscillator {
    waveform: OscillatorWaveform,
    phase: f64,
}

impl Oscillator {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn set_phase(&mut self, phase: f64) {
        self.phase = phase.rem_euclid(1.0);
    }

    /// Produce one sample at `frequency` Hz, then advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = self.waveform.sample(self.phase as f32);
        self.phase = (self.phase + frequency as f64 / sample_rate as f64).rem_euclid(1.0);
        value
    }

    /// Render with a per-sample frequency buffer.
    pub fn render(&mut self, out: &mut [f32], frequency: &[f32], sample_rate: f32) {
        debug_assert_eq!(out.len(), frequency.len());
        for (o, &f) in out.iter_mut().zip(frequency.iter()) {
            *o = self.next_sample(f, sample_rate);
        }
    }

}

/// Frequency ratio for a detune amount in cents.
#[inline]
pub fn cents_to_ratio(cents: f32) -> f32 {
    2.0_f32.powf(cents / 1200.0)
}
