use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::sequencing::{Time, TimeSignature, TimeValue};

/*
Rendering Clock
===============

One clock per audio engine. It counts rendered frames and turns every time
argument an instrument receives into an absolute position in seconds.

    current_time = frames_rendered / sample_rate
    now          = current_time + lookahead

The lookahead lets a control thread schedule "now" slightly in the future,
so its writes land before the audio thread renders that moment. With a
lookahead of zero, "now" is the start of the next rendered block.

Lifecycle
---------

The owner of the subsystem starts and stops the clock explicitly. While
stopped, `advance()` does nothing: instruments can still schedule against a
frozen timeline (useful for offline setup), but time does not move.

Sharing
-------

The clock is shared as `Arc<Clock>` by every instrument and by whatever
thread drives rendering. All state is atomic, so the control thread can call
`now()` while the audio thread calls `advance()`.
*/

pub struct Clock {
    sample_rate: f32,
    frames: AtomicU64,
    running: AtomicBool,
    bpm_bits: AtomicU64,
    lookahead: f64,
    time_signature: TimeSignature,
}

impl Clock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frames: AtomicU64::new(0),
            running: AtomicBool::new(false),
            bpm_bits: AtomicU64::new(120.0_f64.to_bits()),
            lookahead: 0.0,
            time_signature: TimeSignature::FOUR_FOUR,
        }
    }

    pub fn with_bpm(self, bpm: f64) -> Self {
        self.set_bpm(bpm);
        self
    }

    pub fn with_time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.time_signature = time_signature;
        self
    }

    /// Seconds added to the rendered position to produce `now()`.
    pub fn with_lookahead(mut self, seconds: f64) -> Self {
        self.lookahead = seconds.max(0.0);
        self
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Move the clock forward by `frames` rendered samples.
    ///
    /// Does nothing while stopped. Returns the new position in seconds.
    pub fn advance(&self, frames: usize) -> f64 {
        if self.is_running() {
            self.frames.fetch_add(frames as u64, Ordering::AcqRel);
        }
        self.current_time()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Position of the next sample to render, in seconds.
    pub fn current_time(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// The time "now" resolves to: position plus lookahead.
    pub fn now(&self) -> f64 {
        self.current_time() + self.lookahead
    }

    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    pub fn bpm(&self) -> f64 {
        f64::from_bits(self.bpm_bits.load(Ordering::Acquire))
    }

    pub fn set_bpm(&self, bpm: f64) {
        self.bpm_bits.store(bpm.to_bits(), Ordering::Release);
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    /// Resolve an optional time argument to absolute seconds (default: now).
    pub fn resolve(&self, time: Option<Time>) -> f64 {
        match time.unwrap_or_default() {
            Time::Now => self.now(),
            Time::At(value) => self.seconds(value),
            Time::FromNow(value) => self.now() + self.seconds(value),
        }
    }

    /// Convert a duration descriptor to seconds at the current tempo.
    pub fn seconds(&self, value: TimeValue) -> f64 {
        value.to_seconds(self.bpm(), self.time_signature)
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("sample_rate", &self.sample_rate)
            .field("current_time", &self.current_time())
            .field("running", &self.is_running())
            .field("bpm", &self.bpm())
            .finish()
    }
}
