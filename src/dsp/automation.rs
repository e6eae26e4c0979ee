//! Timestamped automation curves for scalar parameters.

use crate::error::AutomationError;

/*
Automation Curves
=================

An automation curve is the schedule of a single parameter: an ordered list of
timestamped instructions ("be 440 at t=1.0", "ramp to 660 by t=1.5"). Writing
to a parameter never changes it immediately. Every write appends a point to
the curve, and the renderer evaluates the curve at each sample time.

Vocabulary
----------

  point       One scheduled instruction: a time, a value and a kind.

  set-point   Jump to `value` at `time`. No interpolation.

  ramp        Arrive at `value` exactly at `time`, interpolating from the
              previous point. A ramp's START is the point before it.

  hold        A set-point that pins whatever value the curve already has at
              some time. Used to start a glide from "wherever we are now".


Evaluation
----------

For a time t, find the last point at or before t (P0) and the first point
after t (P1):

    P1 is a linear ramp       v = V0 + (V1 - V0) × (t - T0) / (T1 - T0)
    P1 is an exponential ramp v = V0 × (V1 / V0) ^ ((t - T0) / (T1 - T0))
    otherwise                 v = V0

If no point precedes t, P0 is the default value at time 0.

    value
     660 ┤                  ╭──────────
         │               ╭──╯
         │            ╭──╯   exponential ramp
     440 ┤────────────╯
         └────────────┬──────┬─────────→ time
                    hold    ramp end


Why Exponential For Pitch
-------------------------

Musical intervals are ratios. An octave is ×2 whether you start at 110 Hz or
880 Hz. An exponential ramp moves through equal ratios in equal time, so a
glide from A3 to A4 spends the same time on every semitone. A linear ramp
would rush through the low semitones and crawl through the high ones.

Exponential math needs both ends positive. Targets ≤ 0 are rejected. If the
starting value is ≤ 0 the ramp holds the start value until its end point.


Superseding
-----------

The log is append-only, but a new write can make trailing points stale (a
retrigger while a glide is still in flight). Two cancellation tools exist:

  cancel_scheduled_values(t)   drop every point at or after t
  cancel_and_hold_at_time(t)   drop them too, but first pin the value at t;
                               an in-flight ramp is truncated to end at t so
                               its shape up to t is kept

Holding twice at the same t is the same as holding once: the point already
landing at t is kept, ramp kind and all.
*/

/// What a scheduled point does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SetValue,
    LinearRamp,
    ExponentialRamp,
}

/// One scheduled point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomationEvent {
    pub time: f64,
    pub value: f32,
    pub kind: EventKind,
}

/// Time-ordered log of scheduled points for one parameter.
#[derive(Debug, Clone)]
pub struct AutomationCurve {
    default_value: f32,
    events: Vec<AutomationEvent>,
}

impl AutomationCurve {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::new(),
        }
    }

    /// Value used before the first scheduled point.
    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Jump to `value` at `time`.
    ///
    /// A set-point at exactly the same time as an existing one replaces it.
    pub fn set_value_at_time(&mut self, value: f32, time: f64) -> Result<(), AutomationError> {
        validate(value, time)?;

        if let Some(existing) = self
            .events
            .iter_mut()
            .find(|e| e.time == time && e.kind == EventKind::SetValue)
        {
            existing.value = value;
            return Ok(());
        }

        self.insert(AutomationEvent {
            time,
            value,
            kind: EventKind::SetValue,
        });
        Ok(())
    }

    /// Ramp linearly from the previous point, arriving at `value` at `end_time`.
    pub fn linear_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end_time: f64,
    ) -> Result<(), AutomationError> {
        validate(value, end_time)?;
        self.insert(AutomationEvent {
            time: end_time,
            value,
            kind: EventKind::LinearRamp,
        });
        Ok(())
    }

    /// Ramp exponentially from the previous point, arriving at `value` at `end_time`.
    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end_time: f64,
    ) -> Result<(), AutomationError> {
        validate(value, end_time)?;
        if value <= 0.0 {
            return Err(AutomationError::NonPositiveTarget { value });
        }
        self.insert(AutomationEvent {
            time: end_time,
            value,
            kind: EventKind::ExponentialRamp,
        });
        Ok(())
    }

    /// Drop every point scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.events.retain(|e| e.time < time);
    }

    /// Drop every point at or after `time`, pinning the value the curve had there.
    ///
    /// Returns the held value.
    pub fn cancel_and_hold_at_time(&mut self, time: f64) -> Result<f32, AutomationError> {
        validate(0.0, time)?;
        let held = self.value_at(time);

        let idx = self.events.partition_point(|e| e.time < time);

        match self.events.get(idx) {
            // A point already lands exactly at `time` (an earlier hold, or a
            // ramp ending there): keep it so the shape before `time` survives.
            Some(landed) if landed.time == time => {
                let landed_value = landed.value;
                self.events.truncate(idx + 1);
                if landed_value != held {
                    self.events.push(AutomationEvent {
                        time,
                        value: held,
                        kind: EventKind::SetValue,
                    });
                }
            }
            next => {
                let kind = next
                    .filter(|e| e.kind != EventKind::SetValue)
                    .map_or(EventKind::SetValue, |e| e.kind);
                self.events.truncate(idx);
                self.events.push(AutomationEvent {
                    time,
                    value: held,
                    kind,
                });
            }
        }

        Ok(held)
    }

    /// Evaluate the curve at `time` (seconds).
    pub fn value_at(&self, time: f64) -> f32 {
        let idx = self.events.partition_point(|e| e.time <= time);

        let (start_time, start_value) = match idx.checked_sub(1) {
            Some(i) => (self.events[i].time, self.events[i].value),
            None => (0.0, self.default_value),
        };

        match self.events.get(idx) {
            Some(next) if next.kind != EventKind::SetValue => {
                let span = next.time - start_time;
                let progress = if span <= 0.0 {
                    1.0
                } else {
                    ((time - start_time) / span).clamp(0.0, 1.0) as f32
                };

                match next.kind {
                    EventKind::LinearRamp => linear_interpolate(start_value, next.value, progress),
                    _ => exponential_interpolate(start_value, next.value, progress),
                }
            }
            _ => start_value,
        }
    }

    /// Forget points that can no longer influence values at or after `time`.
    ///
    /// The last point at or before `time` is kept: it is the start of any ramp
    /// that follows.
    pub fn prune_before(&mut self, time: f64) {
        let idx = self.events.partition_point(|e| e.time <= time);
        if idx >= 2 {
            self.events.drain(..idx - 1);
        }
    }

    /// Remove every point and reset the default value.
    pub fn reset(&mut self, value: f32) {
        self.events.clear();
        self.default_value = value;
    }

    // Later writes at an equal time land after earlier ones.
    fn insert(&mut self, event: AutomationEvent) {
        let idx = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(idx, event);
    }
}

fn validate(value: f32, time: f64) -> Result<(), AutomationError> {
    if !value.is_finite() {
        return Err(AutomationError::NonFiniteValue { value });
    }
    if !time.is_finite() || time < 0.0 {
        return Err(AutomationError::InvalidTime { time });
    }
    Ok(())
}

/// Straight-line interpolation, `progress` in [0, 1].
#[inline]
pub fn linear_interpolate(start: f32, end: f32, progress: f32) -> f32 {
    start + (end - start) * progress
}

/// Equal-ratio interpolation, `progress` in [0, 1].
///
/// Holds `start` until the end point when either value is not positive.
#[inline]
pub fn exponential_interpolate(start: f32, end: f32, progress: f32) -> f32 {
    if start <= 0.0 || end <= 0.0 {
        return if progress >= 1.0 { end } else { start };
    }
    start * (end / start).powf(progress)
}
