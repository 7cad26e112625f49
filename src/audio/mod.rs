//! Audio output for the quiz.
//!
//! This module provides:
//! - The [`SoundPlayer`] capability the app hands quiz cues to
//! - A rodio-backed player that streams WAV samples from disk
//! - Rendering of the note samples to WAV files

pub mod player;
pub mod render;

use std::path::PathBuf;
use thiserror::Error;

pub use player::{sample_path, RodioPlayer, SilentPlayer, SoundPlayer};
pub use render::{render_samples, SAMPLE_RATE};

/// Errors raised while opening audio output or loading samples.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio output: {0}")]
    Stream(#[from] rodio::StreamError),

    #[error("failed to create playback sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("failed to open sample {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode sample {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
