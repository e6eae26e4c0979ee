//! Low Frequency Oscillator (LFO) helpers.

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running at sub-audio rates (~0.01 Hz to ~20 Hz). The
waveform math is identical to the audio oscillator; what differs is the use.
LFO output is a control signal that moves other parameters.

Vocabulary
----------

  bipolar     Output swings -1.0 to +1.0. Natural for vibrato, where pitch
              goes sharp AND flat around the note.

  unipolar    Output is 0.0 to 1.0.
              unipolar = (bipolar + 1.0) / 2.0

  range       The [min, max] the LFO output is scaled into. A vibrato source
              scaled to [-50, +50] emits cents: up to a quarter tone either
              side of the note before any depth control.

  free-running
              The LFO starts when it is created and never resets on notes.
              Every note lands on a different part of the cycle. The duo
              synth's vibrato works this way, so both voices always share one
              phase.


Typical Vibrato
---------------

    rate      2 - 7 Hz (5 Hz default)
    depth     ±5 to ±25 cents sounds like a singer; ±50 is a wide wobble

    cents ──┐  ╭─╮     ╭─╮     ╭─╮
      +25   │ ╱   ╲   ╱   ╲   ╱   ╲
        0 ──┼╱─────╲─╱─────╲─╱─────╲──→ time
      -25   │       ╰╯      ╰╯
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Map a bipolar signal onto `[min, max]`.
#[inline]
pub fn scale_bipolar(bipolar: f32, min: f32, max: f32) -> f32 {
    min + (max - min) * bipolar_to_unipolar(bipolar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bipolar_to_unipolar() {
        assert!((bipolar_to_unipolar(-1.0) - 0.0).abs() < 1e-6);
        assert!((bipolar_to_unipolar(0.0) - 0.5).abs() < 1e-6);
        assert!((bipolar_to_unipolar(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_bipolar_vibrato_range() {
        assert!((scale_bipolar(-1.0, -50.0, 50.0) + 50.0).abs() < 1e-4);
        assert!(scale_bipolar(0.0, -50.0, 50.0).abs() < 1e-4);
        assert!((scale_bipolar(1.0, -50.0, 50.0) - 50.0).abs() < 1e-4);
    }
}
