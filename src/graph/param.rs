use std::ops::Deref;

use crate::{dsp::automation::AutomationCurve, error::AutomationError};

/*
Scheduled Parameters
====================

A `Param` is a named scalar with units and an automation curve. Nothing
writes its value directly; every write is a scheduling call that lands on
the curve and takes effect when the renderer reaches that time.

Two Views
---------

The instrument that owns a parameter holds the `Param` itself and may do
anything with it, including replacing it outright during teardown.

Everyone else gets a `ParamView`: a borrowed handle that can read values and
schedule or cancel future values, but cannot swap the parameter out from
under its owner. `ParamView` derefs to `&Param` for reads and deliberately
has no `DerefMut`.

    owner:    &mut Param      set, ramp, cancel, reset, replace
    external: ParamView<'_>   read, set, ramp, cancel
*/

/// Unit a parameter's values are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Hertz,
    Cents,
    Decibels,
    Gain,
    Ratio,
}

#[derive(Debug, Clone)]
pub struct Param {
    name: &'static str,
    units: Units,
    curve: AutomationCurve,
}

impl Param {
    pub fn new(name: &'static str, units: Units, default_value: f32) -> Self {
        Self {
            name,
            units,
            curve: AutomationCurve::new(default_value),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Value before any scheduled point.
    pub fn default_value(&self) -> f32 {
        self.curve.default_value()
    }

    /// Evaluate the automation at `time` (seconds).
    pub fn value_at(&self, time: f64) -> f32 {
        self.curve.value_at(time)
    }

    pub fn curve(&self) -> &AutomationCurve {
        &self.curve
    }

    pub(crate) fn curve_mut(&mut self) -> &mut AutomationCurve {
        &mut self.curve
    }

    /// Drop all automation and hold `value` from now on.
    pub fn set_value(&mut self, value: f32) {
        self.curve.reset(value);
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) -> Result<(), AutomationError> {
        tracing::trace!(param = self.name, value, time, "set value");
        self.curve.set_value_at_time(value, time)
    }

    pub fn linear_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end_time: f64,
    ) -> Result<(), AutomationError> {
        tracing::trace!(param = self.name, value, end_time, "linear ramp");
        self.curve.linear_ramp_to_value_at_time(value, end_time)
    }

    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end_time: f64,
    ) -> Result<(), AutomationError> {
        tracing::trace!(param = self.name, value, end_time, "exponential ramp");
        self.curve.exponential_ramp_to_value_at_time(value, end_time)
    }

    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.curve.cancel_scheduled_values(time);
    }

    pub fn cancel_and_hold_at_time(&mut self, time: f64) -> Result<f32, AutomationError> {
        self.curve.cancel_and_hold_at_time(time)
    }

    /// External, non-rebindable handle to this parameter.
    pub fn view(&mut self) -> ParamView<'_> {
        ParamView { param: self }
    }
}

/// Borrowed handle that schedules values but cannot replace the parameter.
pub struct ParamView<'a> {
    param: &'a mut Param,
}

impl<'a> ParamView<'a> {
    /// Drop all automation and hold `value`.
    pub fn set_value(&mut self, value: f32) -> &mut Self {
        self.param.set_value(value);
        self
    }

    pub fn set_value_at_time(
        &mut self,
        value: f32,
        time: f64,
    ) -> Result<&mut Self, AutomationError> {
        self.param.set_value_at_time(value, time)?;
        Ok(self)
    }

    pub fn linear_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end_time: f64,
    ) -> Result<&mut Self, AutomationError> {
        self.param.linear_ramp_to_value_at_time(value, end_time)?;
        Ok(self)
    }

    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f32,
        end_time: f64,
    ) -> Result<&mut Self, AutomationError> {
        self.param.exponential_ramp_to_value_at_time(value, end_time)?;
        Ok(self)
    }

    pub fn cancel_scheduled_values(&mut self, time: f64) -> &mut Self {
        self.param.cancel_scheduled_values(time);
        self
    }

    pub fn cancel_and_hold_at_time(&mut self, time: f64) -> Result<f32, AutomationError> {
        self.param.cancel_and_hold_at_time(time)
    }
}

impl Deref for ParamView<'_> {
    type Target = Param;

    fn deref(&self) -> &Param {
        self.param
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_schedules_on_owner() {
        let mut param = Param::new("frequency", Units::Hertz, 440.0);

        param
            .view()
            .set_value_at_time(220.0, 1.0)
            .unwrap()
            .linear_ramp_to_value_at_time(330.0, 2.0)
            .unwrap();

        assert_eq!(param.value_at(0.5), 440.0);
        assert_eq!(param.value_at(1.0), 220.0);
        assert!((param.value_at(1.5) - 275.0).abs() < 1e-3);
    }

    #[test]
    fn test_view_reads_through_deref() {
        let mut param = Param::new("vibrato amount", Units::Gain, 0.5);
        let view = param.view();
        assert_eq!(view.name(), "vibrato amount");
        assert_eq!(view.units(), Units::Gain);
        assert_eq!(view.value_at(3.0), 0.5);
    }

    #[test]
    fn test_set_value_clears_automation() {
        let mut param = Param::new("volume", Units::Decibels, 0.0);
        param.set_value_at_time(-6.0, 1.0).unwrap();
        param.set_value(-10.0);

        assert!(param.curve().is_empty());
        assert_eq!(param.value_at(2.0), -10.0);
    }
}
