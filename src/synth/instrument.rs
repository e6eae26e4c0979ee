use std::sync::Arc;

use crate::{
    dsp::amplify::db_to_gain,
    engine::Clock,
    error::SynthError,
    graph::param::{Param, ParamView, Units},
    sequencing::{Note, Time, TimeValue},
};

/*
Instrument Contract
===================

Every playable thing in this crate is an `Instrument`:

    trigger_attack(note, time?, velocity?)   gate on
    trigger_release(time?)                   gate off
    trigger_attack_release(note, dur, ...)   both, provided
    render_block(out)                        pull audio
    dispose()                                one-shot teardown

Times are optional. `None` means "now" on the instrument's clock, which the
clock defines as its rendered position plus lookahead. Durations accept
seconds or notation ("8n") and resolve at the tempo in force when called.

Triggers never produce sound directly. They write automation, and the audio
shows up when `render_block()` reaches the scheduled time.

After Dispose
-------------

`dispose()` drops the instrument's parts. Every later call returns
`SynthError::Disposed`. Disposing twice is harmless and logs a warning.
*/

pub trait Instrument {
    /// The clock that resolves this instrument's time arguments.
    fn clock(&self) -> &Arc<Clock>;

    /// Output level in dB.
    fn volume(&mut self) -> Result<ParamView<'_>, SynthError>;

    fn trigger_attack(
        &mut self,
        note: Note,
        time: Option<Time>,
        velocity: Option<f32>,
    ) -> Result<&mut Self, SynthError>;

    fn trigger_release(&mut self, time: Option<Time>) -> Result<&mut Self, SynthError>;

    /// Attack at `time`, release `duration` later.
    fn trigger_attack_release(
        &mut self,
        note: Note,
        duration: TimeValue,
        time: Option<Time>,
        velocity: Option<f32>,
    ) -> Result<&mut Self, SynthError> {
        let clock = self.clock();
        let start = clock.resolve(time);
        let end = start + clock.seconds(duration);

        self.trigger_attack(note, Some(Time::at(start)), velocity)?;
        self.trigger_release(Some(Time::at(end)))
    }

    /// Render `out.len()` samples at the clock's current position.
    ///
    /// Does not advance the clock.
    fn render_block(&mut self, out: &mut [f32]) -> Result<(), SynthError>;

    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// Final level stage shared by every instrument.
#[derive(Debug, Clone)]
pub struct Output {
    volume: Param,
}

impl Output {
    pub fn new(volume_db: f32) -> Self {
        Self {
            volume: Param::new("volume", Units::Decibels, volume_db),
        }
    }

    pub fn volume(&self) -> &Param {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut Param {
        &mut self.volume
    }

    /// Scale `buffer` by the volume curve, starting at `start` seconds.
    pub fn process(&mut self, buffer: &mut [f32], start: f64, sample_rate: f32) {
        let dt = 1.0 / sample_rate as f64;
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= db_to_gain(self.volume.value_at(start + i as f64 * dt));
        }
        self.volume.curve_mut().prune_before(start);
    }
}
