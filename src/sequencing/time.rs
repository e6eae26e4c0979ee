use std::str::FromStr;

use crate::error::ParseError;

use super::{duration::Duration, time_signature::TimeSignature};

/*
Time Descriptors
================

Instrument operations accept times and durations either as seconds or in
musical notation. Notation is resolved against the clock's tempo at the
moment of the call.

    text        meaning                        at 120 bpm, 4/4
    ----        -------                        ---------------
    "0.25"      seconds                        0.25 s
    "0.25s"     seconds                        0.25 s
    "4n"        quarter note                   0.5 s
    "8t"        eighth-note triplet            0.1667 s
    "4n."       dotted quarter                 0.75 s
    "2m"        two measures                   4.0 s

A `Time` is a point on the rendering clock:

    "now"       the clock's current "now" (position + lookahead)
    "1.5"       absolute: 1.5 s on the clock
    "+4n"       relative: one quarter note after now

A `Frequency` is a rate. Notation means "one cycle per note value":

    "5"  "5hz"  5 Hz
    "4n"        one cycle per quarter note (2 Hz at 120 bpm)
*/

/// A length of time: seconds or musical notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeValue {
    Seconds(f64),
    Note(Duration),
    Measures(f64),
}

impl TimeValue {
    /// Seconds at the given tempo and meter.
    pub fn to_seconds(&self, bpm: f64, time_signature: TimeSignature) -> f64 {
        match *self {
            TimeValue::Seconds(s) => s,
            TimeValue::Note(duration) => duration.to_seconds(bpm),
            TimeValue::Measures(bars) => bars * time_signature.bar_seconds(bpm),
        }
    }
}

impl From<f64> for TimeValue {
    fn from(seconds: f64) -> Self {
        TimeValue::Seconds(seconds)
    }
}

impl From<Duration> for TimeValue {
    fn from(duration: Duration) -> Self {
        TimeValue::Note(duration)
    }
}

impl FromStr for TimeValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ParseError::InvalidTime(s.to_string());

        if let Some(bars) = text.strip_suffix('m') {
            return bars
                .parse::<f64>()
                .ok()
                .filter(|b| b.is_finite())
                .map(TimeValue::Measures)
                .ok_or_else(invalid);
        }

        if text.ends_with('n') || text.ends_with('t') || text.ends_with("n.") {
            return text.parse::<Duration>().map(TimeValue::Note).map_err(|_| invalid());
        }

        let seconds = text.strip_suffix('s').unwrap_or(text);
        seconds
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .map(TimeValue::Seconds)
            .ok_or_else(invalid)
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeValue::Seconds(s) => write!(f, "{}", s),
            TimeValue::Note(d) => write!(f, "{}", d),
            TimeValue::Measures(m) => write!(f, "{}m", m),
        }
    }
}

/// A point on the rendering clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Time {
    /// The clock's current "now"
    #[default]
    Now,
    /// Absolute position
    At(TimeValue),
    /// Offset from now
    FromNow(TimeValue),
}

impl Time {
    /// Absolute time in seconds.
    pub fn at(seconds: f64) -> Self {
        Time::At(TimeValue::Seconds(seconds))
    }

    /// Offset from now in seconds.
    pub fn from_now(seconds: f64) -> Self {
        Time::FromNow(TimeValue::Seconds(seconds))
    }
}

impl From<f64> for Time {
    fn from(seconds: f64) -> Self {
        Time::at(seconds)
    }
}

impl FromStr for Time {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("now") {
            return Ok(Time::Now);
        }
        match text.strip_prefix('+') {
            Some(offset) => offset
                .parse::<TimeValue>()
                .map(Time::FromNow)
                .map_err(|_| ParseError::InvalidTime(s.to_string())),
            None => text.parse::<TimeValue>().map(Time::At),
        }
    }
}

/// A rate: Hertz, or one cycle per note value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frequency {
    Hertz(f32),
    Period(TimeValue),
}

impl Frequency {
    /// Hertz at the given tempo and meter.
    pub fn to_hertz(&self, bpm: f64, time_signature: TimeSignature) -> f32 {
        match *self {
            Frequency::Hertz(hz) => hz,
            Frequency::Period(period) => (1.0 / period.to_seconds(bpm, time_signature)) as f32,
        }
    }
}

impl From<f32> for Frequency {
    fn from(hz: f32) -> Self {
        Frequency::Hertz(hz)
    }
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ParseError::InvalidFrequency(s.to_string());

        let lower = text.to_ascii_lowercase();
        let hz_text = lower.strip_suffix("hz").unwrap_or(&lower);
        if let Ok(hz) = hz_text.trim().parse::<f32>() {
            return if hz.is_finite() {
                Ok(Frequency::Hertz(hz))
            } else {
                Err(invalid())
            };
        }

        match text.parse::<TimeValue>() {
            Ok(TimeValue::Seconds(_)) | Err(_) => Err(invalid()),
            Ok(period) => Ok(Frequency::Period(period)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Hertz(hz) => write!(f, "{}", hz),
            Frequency::Period(p) => write!(f, "{}", p),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    //! Descriptors deserialize from a number (seconds / Hz) or a notation string.

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Frequency, TimeValue};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    impl Serialize for TimeValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                TimeValue::Seconds(s) => serializer.serialize_f64(*s),
                other => serializer.collect_str(other),
            }
        }
    }

    impl<'de> Deserialize<'de> for TimeValue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match Repr::deserialize(deserializer)? {
                Repr::Number(s) => Ok(TimeValue::Seconds(s)),
                Repr::Text(text) => text.parse().map_err(de::Error::custom),
            }
        }
    }

    impl Serialize for Frequency {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Frequency::Hertz(hz) => serializer.serialize_f32(*hz),
                other => serializer.collect_str(other),
            }
        }
    }

    impl<'de> Deserialize<'de> for Frequency {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match Repr::deserialize(deserializer)? {
                Repr::Number(hz) => Ok(Frequency::Hertz(hz as f32)),
                Repr::Text(text) => text.parse().map_err(de::Error::custom),
            }
        }
    }
}
