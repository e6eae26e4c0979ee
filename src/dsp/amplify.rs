//! Gain and level primitives.

/*
Levels in Decibels
==================

Instrument volume is expressed in decibels because hearing is logarithmic:
we perceive loudness ratios, not differences.

    dB   = 20 × log₁₀(gain)
    gain = 10 ^ (dB / 20)

Common reference points:
    ×1.0    =   0 dB  (unity, no change)
    ×0.5    ≈  -6 dB  (half amplitude)
    ×0.316  = -10 dB  (the duo synth's per-voice default)
    ×0.0    =  -∞ dB  (silence)

Two equal, uncorrelated voices summed are about +3 dB louder than one;
two identical in-phase voices are +6 dB. Attenuating each voice by 10 dB
keeps the pair comfortably at or under the loudness of a single voice at
0 dB.
*/

/// Convert decibels to a linear gain factor.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Multiply a signal by a modulator, writing result into signal buffer (in-place).
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}

/// Add `source` into `out` sample-by-sample (fan-in).
#[inline]
pub fn sum_into(out: &mut [f32], source: &[f32]) {
    debug_assert_eq!(out.len(), source.len());

    for (o, &s) in out.iter_mut().zip(source.iter()) {
        *o += s;
    }
}
