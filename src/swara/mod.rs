//! Swara data: the fixed note bank and the scales derived from it.
//!
//! The bank is the chromatic scale on C#, labeled with Hindustani swara
//! names. Scales are views over the bank and are always recomputed from it.

mod note;
mod scale;

pub use note::{note_by_pitch, note_by_sample, Note, NOTE_BANK, TONIC_MIDI_KEY};
pub use scale::{scale, ScaleKey};

/// Reference pitch for equal temperament (A4).
pub const A4_FREQUENCY: f32 = 440.0;

/// MIDI key number of A4.
pub const A4_MIDI_KEY: u8 = 69;

/// Converts a MIDI key number to a frequency in Hz (12-TET, A4 = 440 Hz).
///
/// # Examples
///
/// ```
/// use swaratui::swara::midi_to_frequency;
///
/// assert!((midi_to_frequency(69) - 440.0).abs() < 1e-3);
/// ```
pub fn midi_to_frequency(key: u8) -> f32 {
    A4_FREQUENCY * 2f32.powf((key as f32 - A4_MIDI_KEY as f32) / 12.0)
}
