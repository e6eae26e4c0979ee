use super::duration::Duration;

/// Time signature, used to resolve measure-based descriptors (`"1m"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per bar (numerator)
    pub numerator: u8,
    /// Note value that gets one beat (denominator: 4 = quarter, 8 = eighth)
    pub denominator: u8,
}

impl TimeSignature {
    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature::new(4, 4);

    /// 3/4 time (waltz)
    pub const THREE_FOUR: TimeSignature = TimeSignature::new(3, 4);

    /// 6/8 time (compound duple meter)
    pub const SIX_EIGHT: TimeSignature = TimeSignature::new(6, 8);

    pub const fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Length of one bar as a fraction of a whole note.
    pub const fn bar_duration(&self) -> Duration {
        Duration::new(self.numerator as u32, self.denominator as u32).reduce()
    }

    /// Seconds per bar at `bpm` quarter notes per minute.
    pub fn bar_seconds(&self, bpm: f64) -> f64 {
        self.bar_duration().to_seconds(bpm)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature::FOUR_FOUR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_four_bar() {
        let ts = TimeSignature::FOUR_FOUR;
        assert_eq!(ts.bar_duration(), Duration::WHOLE);
        assert!((ts.bar_seconds(120.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_three_four_bar() {
        let ts = TimeSignature::THREE_FOUR;
        assert_eq!(ts.bar_duration(), Duration::new(3, 4));
        assert!((ts.bar_seconds(120.0) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_six_eight_bar() {
        let ts = TimeSignature::SIX_EIGHT;
        // Six eighths = three quarters
        assert_eq!(ts.bar_duration(), Duration::new(3, 4));
    }
}
