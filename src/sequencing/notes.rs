use std::str::FromStr;

use crate::error::ParseError;

/*
Notes and Pitch
===============

A note can be given as a MIDI number, a raw frequency, or a scientific pitch
name. Names resolve to MIDI numbers first:

    note_number = 12 * (octave + 1) + semitone

    semitone: C=0, D=2, E=4, F=5, G=7, A=9, B=11
    accidentals: '#' or 's' = +1, 'b' = -1 (repeatable: "C##4", "Dbb4")

Middle C (C4) = 60, A4 = 69. Octave -1 is written "C-1" (MIDI 0).

Frequency uses 12-tone equal temperament with A4 = 440 Hz:

    f = 440 × 2 ^ ((note - 69) / 12)
*/

/// Reference pitch for A4.
pub const A4_HZ: f32 = 440.0;
/// MIDI number of A4.
pub const A4_MIDI: u8 = 69;

/// A pitch to play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Note {
    /// MIDI note number (69 = A4)
    Midi(u8),
    /// Raw frequency in Hz
    Hertz(f32),
}

impl Note {
    /// Parse a scientific pitch name such as `"A4"`, `"C#3"` or `"Bb2"`.
    pub fn parse(name: &str) -> Result<Self, ParseError> {
        name.parse()
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f32 {
        match *self {
            Note::Midi(note) => midi_note_to_freq(note),
            Note::Hertz(hz) => hz,
        }
    }
}

impl From<u8> for Note {
    fn from(note: u8) -> Self {
        Note::Midi(note)
    }
}

impl From<f32> for Note {
    fn from(hz: f32) -> Self {
        Note::Hertz(hz)
    }
}

impl FromStr for Note {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidNote(s.to_string());
        let text = s.trim();
        let mut chars = text.chars();

        let semitone: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let octave_start = rest
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(invalid)?;
        let (accidentals, octave) = rest.split_at(octave_start);

        let mut offset = 0;
        for c in accidentals.chars() {
            match c {
                '#' | 's' => offset += 1,
                'b' => offset -= 1,
                _ => return Err(invalid()),
            }
        }

        let octave: i32 = octave.parse().map_err(|_| invalid())?;
        let number = octave
            .checked_add(1)
            .and_then(|o| o.checked_mul(12))
            .and_then(|n| n.checked_add(semitone)?.checked_add(offset))
            .ok_or_else(invalid)?;

        u8::try_from(number)
            .ok()
            .filter(|n| *n <= 127)
            .map(Note::Midi)
            .ok_or_else(invalid)
    }
}

/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    A4_HZ * 2.0_f32.powf((note as f32 - A4_MIDI as f32) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a440_is_69() {
        assert_eq!(Note::parse("A4").unwrap(), Note::Midi(69));
        assert!((Note::parse("A4").unwrap().frequency() - 440.0).abs() < 1e-4);
    }

    #[test]
    fn middle_c_is_60() {
        assert_eq!(Note::parse("C4").unwrap(), Note::Midi(60));
        assert_eq!(Note::parse("c4").unwrap(), Note::Midi(60));
    }

    #[test]
    fn sharps_and_flats_are_equal() {
        assert_eq!(Note::parse("C#4").unwrap(), Note::parse("Db4").unwrap());
        assert_eq!(Note::parse("Fs3").unwrap(), Note::parse("Gb3").unwrap());
        assert_eq!(Note::parse("B#3").unwrap(), Note::Midi(60));
    }

    #[test]
    fn negative_octave() {
        assert_eq!(Note::parse("C-1").unwrap(), Note::Midi(0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Note::parse("H4").is_err());
        assert!(Note::parse("A").is_err());
        assert!(Note::parse("A#x4").is_err());
        // G9 is MIDI 127, the top of the range
        assert_eq!(Note::parse("G9").unwrap(), Note::Midi(127));
        assert!(Note::parse("G#9").is_err());
    }

    #[test]
    fn huge_octave_is_an_error() {
        assert_eq!(
            Note::parse("C2147483647"),
            Err(ParseError::InvalidNote("C2147483647".to_string()))
        );
        assert!(Note::parse("C2147483646").is_err());
        assert!(Note::parse("B-2147483648").is_err());
    }

    #[test]
    fn octaves_double_frequency() {
        assert!((midi_note_to_freq(81) - 880.0).abs() < 1e-3);
        assert!((midi_note_to_freq(57) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn raw_frequency_passes_through() {
        assert_eq!(Note::from(123.5_f32).frequency(), 123.5);
    }
}
