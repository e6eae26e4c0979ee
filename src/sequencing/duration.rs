use std::str::FromStr;

use crate::error::ParseError;

/// Musical note duration represented as a rational fraction of a whole note.
/// All operations preserve exact ratios; conversion to seconds happens last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    /// Numerator: how many parts
    pub numerator: u32,
    /// Denominator: of what size (4 = quarter, 8 = eighth, etc.)
    pub denominator: u32,
}

impl Duration {
    pub const WHOLE: Duration = Duration::new(1, 1);
    pub const HALF: Duration = Duration::new(1, 2);
    pub const QUARTER: Duration = Duration::new(1, 4);
    pub const EIGHTH: Duration = Duration::new(1, 8);
    pub const SIXTEENTH: Duration = Duration::new(1, 16);

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Duration {
            numerator,
            denominator,
        }
    }

    /// Apply a dot: multiply duration by 3/2
    pub const fn dotted(self) -> Self {
        Duration {
            numerator: self.numerator * 3,
            denominator: self.denominator * 2,
        }
        .reduce()
    }

    /// Three notes in the time of two: multiply duration by 2/3
    pub const fn triplet(self) -> Self {
        Duration {
            numerator: self.numerator * 2,
            denominator: self.denominator * 3,
        }
        .reduce()
    }

    /// Scale by a whole number of repetitions (`3 × 8n`).
    pub const fn times(self, count: u32) -> Self {
        Duration {
            numerator: self.numerator * count,
            denominator: self.denominator,
        }
        .reduce()
    }

    /// Reduce the fraction to lowest terms using GCD
    pub const fn reduce(self) -> Self {
        let gcd = const_gcd(self.numerator, self.denominator);
        if gcd == 0 {
            return self;
        }
        Duration {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Fraction of a whole note as a float.
    pub fn whole_notes(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Length in seconds at `bpm` quarter notes per minute.
    ///
    /// A whole note lasts four beats: `whole_notes × 4 × 60 / bpm`.
    pub fn to_seconds(&self, bpm: f64) -> f64 {
        self.whole_notes() * 240.0 / bpm
    }
}

/// Compute greatest common divisor (Euclidean algorithm)
const fn const_gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

/// Parses note-value notation: `"4n"` (quarter), `"8t"` (eighth triplet),
/// `"4n."` (dotted quarter).
impl FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidTime(s.to_string());
        let text = s.trim();

        let (text, dotted) = match text.strip_suffix('.') {
            Some(rest) => (rest, true),
            None => (text, false),
        };

        let (digits, triplet) = if let Some(d) = text.strip_suffix('n') {
            (d, false)
        } else if let Some(d) = text.strip_suffix('t') {
            (d, true)
        } else {
            return Err(invalid());
        };

        let denominator: u32 = digits.parse().map_err(|_| invalid())?;
        if denominator == 0 {
            return Err(invalid());
        }

        let mut duration = Duration::new(1, denominator);
        if triplet {
            duration = duration.triplet();
        }
        if dotted {
            duration = duration.dotted();
        }
        Ok(duration)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reduced = self.reduce();
        if reduced.numerator == 1 {
            write!(f, "{}n", reduced.denominator)
        } else if reduced.numerator == 3 && reduced.denominator % 2 == 0 {
            write!(f, "{}n.", reduced.denominator / 2)
        } else {
            write!(f, "{}/{}", reduced.numerator, reduced.denominator)
        }
    }
}
