//! Scale selection over the note bank.

use super::{Note, NOTE_BANK};
use serde::{Deserialize, Serialize};

/// The scales a quiz can draw from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKey {
    /// The seven shuddha swaras.
    #[default]
    Major,
    /// All twelve notes of the bank.
    Chromatic,
}

impl ScaleKey {
    /// All keys, in the order they are offered to the user.
    pub const ALL: [ScaleKey; 2] = [ScaleKey::Major, ScaleKey::Chromatic];

    /// Human-readable name shown in the scale selector.
    pub fn title(self) -> &'static str {
        match self {
            ScaleKey::Major => "C# Major (Sa Re Ga Ma Pa Dha Ni)",
            ScaleKey::Chromatic => "C# Chromatic (All 12 notes)",
        }
    }

    /// Returns the next key, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ScaleKey::Major => ScaleKey::Chromatic,
            ScaleKey::Chromatic => ScaleKey::Major,
        }
    }

    /// Number of columns used to lay out this scale's answer buttons.
    pub fn grid_columns(self) -> usize {
        match self {
            ScaleKey::Major => 2,
            ScaleKey::Chromatic => 3,
        }
    }
}

/// Returns the notes of a scale, in note bank order.
///
/// # Examples
///
/// ```
/// use swaratui::swara::{scale, ScaleKey};
///
/// assert_eq!(scale(ScaleKey::Major).len(), 7);
/// assert_eq!(scale(ScaleKey::Chromatic).len(), 12);
/// ```
pub fn scale(key: ScaleKey) -> Vec<&'static Note> {
    NOTE_BANK
        .iter()
        .filter(|note| match key {
            ScaleKey::Major => note.is_major,
            ScaleKey::Chromatic => true,
        })
        .collect()
}
