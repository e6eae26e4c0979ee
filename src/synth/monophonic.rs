use crate::{
    error::{AutomationError, SynthError},
    graph::param::ParamView,
    sequencing::{Note, Time},
    synth::instrument::Instrument,
};

/*
Monophonic Pitch Policy
=======================

A monophonic instrument plays one pitch at a time from a single `frequency`
parameter. An attack does two things, in this order:

    1. envelope hook  trigger_envelope_attack(time, velocity)
    2. pitch          set_note(note, time)

A release only calls the envelope hook; the pitch stays where it was so the
release tail keeps sounding at the last note.

Glide (portamento)
------------------

  portamento > 0

    freq
     660 ┤              ╭────────
         │           ╭──╯
         │        ╭──╯            exponential: equal musical
     440 ┼────────╯               intervals per unit time
         └────────┬─────────┬──→ t
                 t       t + portamento

    hold the current value at t (cancelling anything after it),
    then ramp exponentially to the target, landing at t + portamento.

  portamento == 0

    hold the current value at t, then set the target at t. The pitch
    before t keeps whatever shape it had; it jumps exactly at t.

Both branches hold and cancel trailing automation first, so a retrigger in the middle
of a glide starts from wherever the glide had reached and never races against
the old ramp.

Hooks
-----

`trigger_envelope_attack` and `trigger_envelope_release` are required
methods. An instrument that forgets one does not compile.

Implementors get the shared attack/release flow from `trigger_attack()` and
`trigger_release()` in this module:

    impl Instrument for MySynth {
        fn trigger_attack(&mut self, note, time, velocity) -> ... {
            monophonic::trigger_attack(self, note, time, velocity)?;
            Ok(self)
        }
        ...
    }
*/

pub trait Monophonic: Instrument {
    /// Pitch in Hz.
    fn frequency(&mut self) -> Result<ParamView<'_>, SynthError>;

    /// Glide time in seconds.
    fn portamento(&self) -> f64;

    fn set_portamento(&mut self, seconds: f64);

    /// Start the amplitude (and any other) envelopes at `time`.
    fn trigger_envelope_attack(&mut self, time: f64, velocity: f32) -> Result<(), SynthError>;

    /// Release the envelopes at `time`.
    fn trigger_envelope_release(&mut self, time: f64) -> Result<(), SynthError>;

    /// Move the pitch to `note` at `time`, gliding if portamento is set.
    fn set_note(&mut self, note: Note, time: Option<Time>) -> Result<&mut Self, SynthError> {
        let time = self.clock().resolve(time);
        let portamento = self.portamento();

        let mut frequency = self.frequency()?;
        glide_to(&mut frequency, note.frequency(), time, portamento)?;

        Ok(self)
    }
}

/// Schedule a pitch change on `frequency`.
pub fn glide_to(
    frequency: &mut ParamView<'_>,
    hz: f32,
    time: f64,
    portamento: f64,
) -> Result<(), AutomationError> {
    if portamento > 0.0 {
        frequency.cancel_and_hold_at_time(time)?;
        frequency.exponential_ramp_to_value_at_time(hz, time + portamento)?;
    } else {
        frequency.cancel_and_hold_at_time(time)?;
        frequency.set_value_at_time(hz, time)?;
    }
    Ok(())
}

/// Shared attack flow: envelopes first, then pitch.
pub fn trigger_attack<M: Monophonic + ?Sized>(
    synth: &mut M,
    note: Note,
    time: Option<Time>,
    velocity: Option<f32>,
) -> Result<(), SynthError> {
    if synth.is_disposed() {
        return Err(SynthError::Disposed);
    }

    let time = synth.clock().resolve(time);
    tracing::trace!(?note, time, "trigger attack");

    synth.trigger_envelope_attack(time, velocity.unwrap_or(1.0))?;
    synth.set_note(note, Some(Time::at(time)))?;
    Ok(())
}

/// Shared release flow: envelopes only.
pub fn trigger_release<M: Monophonic + ?Sized>(
    synth: &mut M,
    time: Option<Time>,
) -> Result<(), SynthError> {
    if synth.is_disposed() {
        return Err(SynthError::Disposed);
    }

    let time = synth.clock().resolve(time);
    tracing::trace!(time, "trigger release");
    synth.trigger_envelope_release(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::param::{Param, Units};

    #[test]
    fn test_glide_lands_on_target() {
        let mut param = Param::new("frequency", Units::Hertz, 440.0);
        glide_to(&mut param.view(), 880.0, 1.0, 0.5).unwrap();

        assert_eq!(param.value_at(1.0), 440.0);
        assert!((param.value_at(1.5) - 880.0).abs() < 1e-3);
        // halfway through an octave glide is half an octave up
        assert!((param.value_at(1.25) - 440.0 * 2.0_f32.sqrt()).abs() < 0.05);
    }

    #[test]
    fn test_zero_portamento_is_discrete() {
        let mut param = Param::new("frequency", Units::Hertz, 440.0);
        glide_to(&mut param.view(), 660.0, 1.0, 0.0).unwrap();

        assert_eq!(param.value_at(0.999), 440.0);
        assert_eq!(param.value_at(1.0), 660.0);
    }

    #[test]
    fn test_discrete_set_replaces_same_instant() {
        let mut param = Param::new("frequency", Units::Hertz, 440.0);
        glide_to(&mut param.view(), 660.0, 1.0, 0.0).unwrap();
        glide_to(&mut param.view(), 330.0, 1.0, 0.0).unwrap();

        assert_eq!(param.value_at(1.0), 330.0);
        assert_eq!(param.curve().len(), 1);
    }

    #[test]
    fn test_retrigger_mid_glide_supersedes_old_ramp() {
        let mut param = Param::new("frequency", Units::Hertz, 220.0);
        glide_to(&mut param.view(), 880.0, 0.0, 1.0).unwrap();

        let midway = param.value_at(0.5);
        glide_to(&mut param.view(), 220.0, 0.5, 0.25).unwrap();

        assert!((param.value_at(0.5) - midway).abs() < 1e-3);
        assert!((param.value_at(0.75) - 220.0).abs() < 1e-3);
        // the first glide's target must not come back
        assert!((param.value_at(1.0) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn test_discrete_set_keeps_earlier_glide_shape() {
        let mut param = Param::new("frequency", Units::Hertz, 440.0);
        glide_to(&mut param.view(), 220.0, 0.0, 1.0).unwrap();
        let before = param.value_at(0.25);

        // portamento switched off while the glide is still moving
        glide_to(&mut param.view(), 330.0, 0.5, 0.0).unwrap();

        assert!((param.value_at(0.25) - before).abs() < 1e-3);
        assert!(param.value_at(0.25) < 440.0);
        assert_eq!(param.value_at(0.5), 330.0);
        assert_eq!(param.value_at(2.0), 330.0);
    }

    #[test]
    fn test_glide_rejects_non_positive_target() {
        let mut param = Param::new("frequency", Units::Hertz, 440.0);
        assert!(glide_to(&mut param.view(), 0.0, 0.0, 0.1).is_err());
    }
}
