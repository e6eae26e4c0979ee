use crate::{
    dsp::{
        lfo::scale_bipolar,
        oscillator::{Oscillator, OscillatorWaveform},
    },
    graph::param::{Param, Units},
};

/*
LFO Stage
=========

A low-frequency oscillator whose output is already scaled into a range. The
duo synth uses one sine LFO for vibrato, mapped onto [-50, 50] so that a
vibrato gain of 0.5 gives ±25 cents of detune.

    bipolar wave ──→ scale to [min, max] ──→ output

The Rate Is a Param
-------------------

The LFO owns its rate as a scheduled `Param`. Whoever exposes "vibrato rate"
hands out a view of this very parameter, so reading it back always returns
what the LFO is actually running at, and a ramp on it bends the LFO smoothly.

The rate is sampled per sample, and the phase accumulates across blocks.

Start Time
----------

Before `started_at` the LFO holds the waveform's phase-zero value. On the
first block it renders it aligns its phase to the time elapsed since
`started_at`. After that the phase only accumulates, unless a block arrives
out of sequence (a seek), in which case it re-aligns.
*/

pub struct Lfo {
    osc: Oscillator,
    rate: Param,
    min: f32,
    max: f32,
    started_at: f64,
    next_block: Option<f64>,
}

impl Lfo {
    pub fn new(
        waveform: OscillatorWaveform,
        rate_hz: f32,
        min: f32,
        max: f32,
        started_at: f64,
    ) -> Self {
        Self {
            osc: Oscillator::new(waveform),
            rate: Param::new("rate", Units::Hertz, rate_hz),
            min,
            max,
            started_at,
            next_block: None,
        }
    }

    pub fn sine(rate_hz: f32, min: f32, max: f32, started_at: f64) -> Self {
        Self::new(OscillatorWaveform::Sine, rate_hz, min, max, started_at)
    }

    pub fn rate(&self) -> &Param {
        &self.rate
    }

    pub fn rate_mut(&mut self) -> &mut Param {
        &mut self.rate
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.osc.waveform()
    }

    /// Render one block starting at `start` seconds.
    pub fn render_block(&mut self, out: &mut [f32], start: f64, sample_rate: f32) {
        let dt = 1.0 / sample_rate as f64;

        let in_sequence = self
            .next_block
            .is_some_and(|expected| (expected - start).abs() < 0.5 * dt);
        if !in_sequence {
            let elapsed = (start - self.started_at).max(0.0);
            self.osc
                .set_phase(elapsed * self.rate.value_at(start) as f64);
        }

        for (i, sample) in out.iter_mut().enumerate() {
            let t = start + i as f64 * dt;
            let wave = if t < self.started_at {
                self.osc.waveform().sample(0.0)
            } else {
                self.osc.next_sample(self.rate.value_at(t), sample_rate)
            };
            *sample = scale_bipolar(wave, self.min, self.max);
        }

        self.rate.curve_mut().prune_before(start);
        self.next_block = Some(start + out.len() as f64 * dt);
    }
}
