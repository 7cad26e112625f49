//! Sample playback.
//!
//! The quiz engine only emits cues; a [`SoundPlayer`] turns them into sound.
//! Playback is fire-and-forget: nothing waits for a sample to finish, and
//! starting a new sample cuts off the previous one.

use super::AudioError;
use crate::swara::note_by_sample;
use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Length of the fallback tone played when a sample is unavailable.
const FALLBACK_TONE_DURATION: Duration = Duration::from_millis(1200);

/// Fade-in applied to the fallback tone to avoid a click.
const FALLBACK_TONE_FADE: Duration = Duration::from_millis(15);

/// Gain of the fallback tone; a bare sine is much louder than a sample.
const FALLBACK_TONE_GAIN: f32 = 0.25;

/// Something that can play a note sample by its audio identifier.
pub trait SoundPlayer {
    /// Starts playing `sample`. Never blocks and never fails; problems are
    /// logged by the implementation.
    fn play(&mut self, sample: &str);
}

/// Resolves a sample's file on disk.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use swaratui::audio::sample_path;
///
/// assert_eq!(sample_path(Path::new("audio"), "D.wav"), PathBuf::from("audio/D.wav"));
/// ```
pub fn sample_path(samples_dir: &Path, sample: &str) -> PathBuf {
    samples_dir.join(sample)
}

/// Player that discards every cue.
///
/// Used with `--mute` and when no output device can be opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, sample: &str) {
        tracing::debug!("Muted playback of {}", sample);
    }
}

/// Plays WAV samples from a directory through the default output device.
pub struct RodioPlayer {
    /// Audio output stream (must be kept alive).
    _stream: OutputStream,
    /// Handle used to create a sink per sample.
    stream_handle: OutputStreamHandle,
    /// Sink of the sample currently sounding. Dropping it stops playback.
    current: Option<Sink>,
    /// Directory holding the note samples.
    samples_dir: PathBuf,
    /// Playback volume (1.0 = unchanged).
    volume: f32,
    /// Whether to synthesize a sine tone when a sample cannot be loaded.
    fallback_tone: bool,
}

impl RodioPlayer {
    /// Opens the default audio output.
    ///
    /// # Errors
    ///
    /// Returns an error if no output device is available.
    pub fn new(
        samples_dir: impl Into<PathBuf>,
        volume: f32,
        fallback_tone: bool,
    ) -> Result<Self, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        let samples_dir = samples_dir.into();
        tracing::info!("Audio output opened, samples from {:?}", samples_dir);

        Ok(Self {
            _stream: stream,
            stream_handle,
            current: None,
            samples_dir,
            volume,
            fallback_tone,
        })
    }

    /// Opens and decodes a sample file.
    fn open_sample(&self, sample: &str) -> Result<Decoder<BufReader<File>>, AudioError> {
        let path = sample_path(&self.samples_dir, sample);
        let file = File::open(&path).map_err(|source| AudioError::Open {
            path: path.clone(),
            source,
        })?;
        Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode { path, source })
    }

    /// Replaces whatever is playing with `source`.
    fn start<S>(&mut self, source: S) -> Result<(), AudioError>
    where
        S: Source<Item = f32> + Send + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)?;
        sink.set_volume(self.volume);
        sink.append(source);
        // The previous sink is dropped here, which stops it.
        self.current = Some(sink);
        Ok(())
    }

    fn try_play(&mut self, sample: &str) -> Result<(), AudioError> {
        match self.open_sample(sample) {
            Ok(decoder) => self.start(decoder.convert_samples::<f32>()),
            Err(e) => {
                let fallback = if self.fallback_tone {
                    note_by_sample(sample)
                } else {
                    None
                };
                match fallback {
                    Some(note) => {
                        tracing::warn!(
                            "{}; playing a {:.1} Hz tone instead",
                            e,
                            note.frequency()
                        );
                        let tone = SineWave::new(note.frequency())
                            .take_duration(FALLBACK_TONE_DURATION)
                            .fade_in(FALLBACK_TONE_FADE)
                            .amplify(FALLBACK_TONE_GAIN);
                        self.start(tone)
                    }
                    None => Err(e),
                }
            }
        }
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&mut self, sample: &str) {
        if let Err(e) = self.try_play(sample) {
            tracing::error!("Playback of {} failed: {}", sample, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_path() {
        let dir = Path::new("/srv/quiz/audio");
        assert_eq!(
            sample_path(dir, "Fsharp.wav"),
            PathBuf::from("/srv/quiz/audio/Fsharp.wav")
        );
    }

    #[test]
    fn test_every_note_has_a_sample_path() {
        let dir = Path::new("audio");
        for note in crate::swara::NOTE_BANK.iter() {
            let path = sample_path(dir, note.sample);
            assert_eq!(path.parent(), Some(dir));
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some("wav"));
        }
    }

    #[test]
    fn test_silent_player_accepts_anything() {
        let mut player = SilentPlayer;
        player.play("Csharp.wav");
        player.play("");
    }
}
