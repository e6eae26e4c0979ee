//! Low-level DSP primitives used by the graph stages and voices.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the math so the
//! instrument layers can concentrate on orchestration: when each stage is
//! driven and in what relationship.

/// Gain, decibel and summing helpers.
pub mod amplify;
/// Timestamped automation curves (set-points and ramps).
pub mod automation;
/// ADSR envelope that schedules its shape onto an automation curve.
pub mod envelope;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// LFO range helpers.
pub mod lfo;
/// Phase-accumulator oscillator waveforms.
pub mod oscillator;

pub use automation::{AutomationCurve, AutomationEvent, EventKind};
pub use envelope::Envelope;
