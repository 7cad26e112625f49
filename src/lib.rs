//! swaratui - A terminal ear-training quiz for Hindustani swaras.
//!
//! This library provides the note bank, the quiz engine, audio playback,
//! and the terminal UI used by the `swaratui` binary.

pub mod app;
pub mod audio;
pub mod config;
pub mod quiz;
pub mod swara;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use audio::{RodioPlayer, SilentPlayer, SoundPlayer};
pub use config::Settings;
pub use quiz::{Cue, NotePicker, QuizSession, QuizState, RandomPicker, Verdict};
pub use swara::{scale, Note, ScaleKey, NOTE_BANK};
