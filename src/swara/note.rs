//! The note bank.
//!
//! Twelve notes, one per semitone above the tonic C#. Each note carries its
//! Western pitch name, its swara label, the file name of its audio sample,
//! and whether it belongs to the seven-note major (Bilawal-shaped) subset.

use super::midi_to_frequency;

/// MIDI key number of the tonic, Sa = C#4.
pub const TONIC_MIDI_KEY: u8 = 61;

/// A single entry in the note bank.
///
/// Notes are statically defined and never mutated; the rest of the crate
/// passes them around as `&'static Note`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Note {
    /// Western pitch name, unique within the bank (e.g. "C#", "E#").
    pub pitch: &'static str,

    /// Swara name shown on the answer button (e.g. "Sa", "Komal Re").
    pub label: &'static str,

    /// File name of the audio sample for this note.
    pub sample: &'static str,

    /// Whether the note is one of the seven shuddha swaras.
    pub is_major: bool,

    /// Semitones above the tonic (0-11).
    pub semitone: u8,
}

impl Note {
    const fn new(
        pitch: &'static str,
        label: &'static str,
        sample: &'static str,
        is_major: bool,
        semitone: u8,
    ) -> Self {
        Self {
            pitch,
            label,
            sample,
            is_major,
            semitone,
        }
    }

    /// Returns the MIDI key number this note is sampled at.
    pub fn midi_key(&self) -> u8 {
        TONIC_MIDI_KEY + self.semitone
    }

    /// Returns the equal-tempered frequency of this note in Hz.
    pub fn frequency(&self) -> f32 {
        midi_to_frequency(self.midi_key())
    }
}

/// The full catalog, in ascending pitch order starting at Sa.
pub static NOTE_BANK: [Note; 12] = [
    Note::new("C#", "Sa", "Csharp.wav", true, 0),
    Note::new("D", "Komal Re", "D.wav", false, 1),
    Note::new("D#", "Re", "Dsharp.wav", true, 2),
    Note::new("E", "Komal Ga", "E.wav", false, 3),
    Note::new("E#", "Ga", "Esharp.wav", true, 4),
    Note::new("F#", "Ma", "Fsharp.wav", true, 5),
    Note::new("G", "Teevra Ma", "G.wav", false, 6),
    Note::new("G#", "Pa", "Gsharp.wav", true, 7),
    Note::new("A", "Komal Dha", "A.wav", false, 8),
    Note::new("A#", "Dha", "Asharp.wav", true, 9),
    Note::new("B", "Komal Ni", "B.wav", false, 10),
    Note::new("B#", "Ni", "Bsharp.wav", true, 11),
];

/// Looks up a note by its Western pitch name.
pub fn note_by_pitch(pitch: &str) -> Option<&'static Note> {
    NOTE_BANK.iter().find(|n| n.pitch == pitch)
}

/// Looks up a note by its sample file name.
pub fn note_by_sample(sample: &str) -> Option<&'static Note> {
    NOTE_BANK.iter().find(|n| n.sample == sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bank_has_twelve_unique_pitches() {
        assert_eq!(NOTE_BANK.len(), 12);
        let pitches: HashSet<&str> = NOTE_BANK.iter().map(|n| n.pitch).collect();
        assert_eq!(pitches.len(), 12);
        let samples: HashSet<&str> = NOTE_BANK.iter().map(|n| n.sample).collect();
        assert_eq!(samples.len(), 12);
    }

    #[test]
    fn test_bank_has_seven_major_notes() {
        let major: Vec<&str> = NOTE_BANK
            .iter()
            .filter(|n| n.is_major)
            .map(|n| n.label)
            .collect();
        assert_eq!(major, vec!["Sa", "Re", "Ga", "Ma", "Pa", "Dha", "Ni"]);
    }

    #[test]
    fn test_semitones_follow_bank_order() {
        for (i, note) in NOTE_BANK.iter().enumerate() {
            assert_eq!(note.semitone as usize, i);
        }
    }

    #[test]
    fn test_frequencies() {
        // Sa is C#4
        let sa = note_by_pitch("C#").unwrap();
        assert_eq!(sa.midi_key(), 61);
        assert!((sa.frequency() - 277.18).abs() < 0.01);

        let a = note_by_pitch("A").unwrap();
        assert_eq!(a.midi_key(), 69);
        assert!((a.frequency() - 440.0).abs() < 1e-3);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(note_by_pitch("G").map(|n| n.label), Some("Teevra Ma"));
        assert_eq!(note_by_sample("Bsharp.wav").map(|n| n.label), Some("Ni"));
        assert!(note_by_pitch("H").is_none());
        assert!(note_by_sample("missing.wav").is_none());
    }
}
