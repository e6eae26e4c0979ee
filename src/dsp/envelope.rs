#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::automation::AutomationCurve, error::AutomationError, MIN_TIME};

/*
Scheduled ADSR Envelope
=======================

This envelope does not run a per-sample state machine. It writes its shape as
ramps onto an automation curve, and the renderer reads the curve like any
other parameter. Triggering at a future time is therefore sample-accurate for
free.

The Shape: Linear Ramps
-----------------------

  Level
    vel ┐     ╱╲
        │    ╱  ╲___________
    S×v │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release
         (A)   (D)      (S)      (R)

Attack  hold the current level at t, ramp to `velocity` at t + A
Decay   ramp to `sustain × velocity` at t + A + D
Release hold the current level at t, ramp to 0 at t + R

Attack and release both start from the level the curve already has at their
trigger time. Retriggering during a release ramps up from where the release
had got to, and releasing during the attack ramps down from the partial level.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack: f64,  // seconds to ramp to peak
    pub decay: f64,   // seconds to ramp peak -> sustain
    pub sustain: f32, // level to hold, relative to peak (0.0 - 1.0)
    pub release: f64, // seconds to ramp current -> 0
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

impl Envelope {
    pub fn adsr(attack: f64, decay: f64, sustain: f32, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Gate high at `time`.
    pub fn trigger_attack(
        &self,
        curve: &mut AutomationCurve,
        time: f64,
        velocity: f32,
    ) -> Result<(), AutomationError> {
        let attack_end = time + self.attack.max(MIN_TIME);
        let decay_end = attack_end + self.decay.max(MIN_TIME);
        let sustain = self.sustain.clamp(0.0, 1.0);

        curve.cancel_and_hold_at_time(time)?;
        curve.linear_ramp_to_value_at_time(velocity, attack_end)?;
        curve.linear_ramp_to_value_at_time(sustain * velocity, decay_end)?;
        Ok(())
    }

    /// Gate low at `time`.
    pub fn trigger_release(
        &self,
        curve: &mut AutomationCurve,
        time: f64,
    ) -> Result<(), AutomationError> {
        curve.cancel_and_hold_at_time(time)?;
        curve.linear_ramp_to_value_at_time(0.0, time + self.release.max(MIN_TIME))
    }

}
