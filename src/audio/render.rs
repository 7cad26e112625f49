//! Rendering of the note samples.
//!
//! Writes one WAV file per note bank entry, named after the note's sample
//! identifier, so the player has assets to load. Notes are rendered through
//! a SoundFont when one is given, otherwise as a plain additive tone.

use crate::swara::{Note, NOTE_BANK};
use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use rustysynth::{SoundFont, Synthesizer, SynthesizerSettings};
use std::f32::consts::TAU;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Sample rate of rendered samples (44.1 kHz standard).
pub const SAMPLE_RATE: u32 = 44100;

/// Buffer size for synthesizer rendering chunks.
const RENDER_BUFFER_SIZE: usize = 4096;

/// Attack and release time of the additive tone, in seconds.
const TONE_EDGE_SECONDS: f32 = 0.02;

/// Relative amplitudes of the first harmonics of the additive tone.
const TONE_HARMONICS: [f32; 4] = [1.0, 0.5, 0.25, 0.125];

/// Peak amplitude of rendered samples.
const PEAK_LEVEL: f32 = 0.8;

/// Longest sample `render_samples` will write, in seconds.
pub const MAX_SAMPLE_SECONDS: f32 = 30.0;

/// Note-on velocity used for SoundFont rendering.
const VELOCITY: i32 = 100;

/// Fraction of the sample during which the SoundFont note is held.
const HOLD_FRACTION: f32 = 0.7;

/// Renders every note of the bank into `out_dir`.
///
/// # Arguments
///
/// * `out_dir` - Directory to write into (created if missing)
/// * `soundfont_path` - Optional SoundFont; program 0 of bank 0 is used
/// * `seconds` - Length of each sample, above 0 and at most [`MAX_SAMPLE_SECONDS`]
///
/// # Returns
///
/// The paths of the written files, in note bank order.
///
/// # Errors
///
/// Returns error if:
/// - `seconds` is not a finite length in range
/// - The directory cannot be created
/// - The SoundFont cannot be loaded
/// - A WAV file cannot be written
pub fn render_samples(
    out_dir: &Path,
    soundfont_path: Option<&Path>,
    seconds: f32,
) -> Result<Vec<PathBuf>> {
    if !seconds.is_finite() || seconds <= 0.0 || seconds > MAX_SAMPLE_SECONDS {
        anyhow::bail!(
            "Sample length must be above 0 and at most {} seconds, got {}",
            MAX_SAMPLE_SECONDS,
            seconds
        );
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create sample directory: {}", out_dir.display()))?;

    let mut synth = soundfont_path.map(load_synthesizer).transpose()?;
    let mut written = Vec::with_capacity(NOTE_BANK.len());

    for note in NOTE_BANK.iter() {
        let samples = match synth.as_mut() {
            Some(synth) => synth_note(synth, note, seconds),
            None => additive_tone(note.frequency(), seconds),
        };

        let path = out_dir.join(note.sample);
        write_wav(&path, &samples)?;
        tracing::info!("Rendered {} ({}) to {:?}", note.label, note.pitch, path);
        written.push(path);
    }

    Ok(written)
}

/// Loads a SoundFont and prepares a piano synthesizer.
fn load_synthesizer(soundfont_path: &Path) -> Result<Synthesizer> {
    let mut file = BufReader::new(File::open(soundfont_path).with_context(|| {
        format!("Failed to open SoundFont: {}", soundfont_path.display())
    })?);
    let soundfont = Arc::new(
        SoundFont::new(&mut file)
            .map_err(|e| anyhow::anyhow!("Failed to load SoundFont: {:?}", e))?,
    );

    let settings = SynthesizerSettings::new(SAMPLE_RATE as i32);
    let mut synth = Synthesizer::new(&soundfont, &settings)
        .map_err(|e| anyhow::anyhow!("Failed to create synthesizer: {:?}", e))?;

    // Program change to acoustic grand piano
    synth.process_midi_message(0, 0xC0, 0, 0);
    Ok(synth)
}

/// Renders a single note through the synthesizer as mono samples.
fn synth_note(synth: &mut Synthesizer, note: &Note, seconds: f32) -> Vec<f32> {
    let total = sample_count(seconds);
    let release_at = (total as f32 * HOLD_FRACTION) as usize;

    let mut left_buf = vec![0.0f32; RENDER_BUFFER_SIZE];
    let mut right_buf = vec![0.0f32; RENDER_BUFFER_SIZE];
    let mut samples = Vec::with_capacity(total);
    let mut released = false;

    synth.note_off_all(true);
    synth.note_on(0, note.midi_key() as i32, VELOCITY);

    while samples.len() < total {
        if !released && samples.len() >= release_at {
            synth.note_off(0, note.midi_key() as i32);
            released = true;
        }

        let chunk = (total - samples.len()).min(RENDER_BUFFER_SIZE);
        synth.render(&mut left_buf[..chunk], &mut right_buf[..chunk]);
        samples.extend(
            left_buf[..chunk]
                .iter()
                .zip(&right_buf[..chunk])
                .map(|(l, r)| (l + r) * 0.5),
        );
    }

    samples
}

/// Number of frames in `seconds` of audio, capped at [`MAX_SAMPLE_SECONDS`].
fn sample_count(seconds: f32) -> usize {
    if !seconds.is_finite() {
        return 0;
    }
    (seconds.clamp(0.0, MAX_SAMPLE_SECONDS) * SAMPLE_RATE as f32).round() as usize
}

/// Generates a harmonic tone with a linear attack and release.
///
/// The output peaks at [`PEAK_LEVEL`] and starts and ends at silence.
pub fn additive_tone(frequency: f32, seconds: f32) -> Vec<f32> {
    let total = sample_count(seconds);
    let edge = ((TONE_EDGE_SECONDS * SAMPLE_RATE as f32) as usize).min(total / 2).max(1);
    let norm: f32 = TONE_HARMONICS.iter().sum();

    (0..total)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let wave: f32 = TONE_HARMONICS
                .iter()
                .enumerate()
                .map(|(h, amp)| amp * (TAU * frequency * (h + 1) as f32 * t).sin())
                .sum();

            let from_end = total - 1 - i;
            let envelope = (i.min(from_end) as f32 / edge as f32).min(1.0);
            wave / norm * envelope * PEAK_LEVEL
        })
        .collect()
}

/// Writes mono samples as a 16-bit WAV file.
fn write_wav(path: &Path, samples: &[f32]) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create output WAV file: {}", path.display()))?;

    for &sample in samples {
        // Convert f32 (-1.0 to 1.0) to i16
        let value = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(value)?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_tone_length_and_edges() {
        let samples = additive_tone(440.0, 0.5);
        assert_eq!(samples.len(), 22050);
        assert_eq!(samples[0], 0.0);
        assert_eq!(*samples.last().unwrap(), 0.0);
    }

    #[test]
    fn test_additive_tone_level() {
        let samples = additive_tone(277.18, 0.25);
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= PEAK_LEVEL + 1e-4, "peak {}", peak);
        assert!(peak > 0.1, "tone is nearly silent: {}", peak);
    }

    #[test]
    fn test_additive_tone_empty() {
        assert!(additive_tone(440.0, 0.0).is_empty());
        assert!(additive_tone(440.0, -1.0).is_empty());
    }

    #[test]
    fn test_render_samples_writes_bank() {
        let dir = tempfile::tempdir().unwrap();
        let written = render_samples(dir.path(), None, 0.1).unwrap();

        assert_eq!(written.len(), 12);
        for (path, note) in written.iter().zip(NOTE_BANK.iter()) {
            assert_eq!(path, &dir.path().join(note.sample));

            let reader = hound::WavReader::open(path).unwrap();
            let spec = reader.spec();
            assert_eq!(spec.channels, 1);
            assert_eq!(spec.sample_rate, SAMPLE_RATE);
            assert_eq!(spec.bits_per_sample, 16);
            assert_eq!(reader.len(), 4410);
        }
    }

    #[test]
    fn test_additive_tone_bounded_length() {
        assert!(additive_tone(440.0, f32::INFINITY).is_empty());
        assert!(additive_tone(440.0, f32::NAN).is_empty());
        let capped = additive_tone(440.0, 1e30);
        assert_eq!(capped.len(), sample_count(MAX_SAMPLE_SECONDS));
    }

    #[test]
    fn test_render_samples_rejects_bad_lengths() {
        let dir = tempfile::tempdir().unwrap();
        for seconds in [f32::INFINITY, f32::NAN, 1e30, 0.0, -2.0, MAX_SAMPLE_SECONDS + 1.0] {
            let err = render_samples(dir.path(), None, seconds).unwrap_err();
            assert!(err.to_string().contains("Sample length"), "{}", err);
        }
        // Nothing was written
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_render_samples_missing_soundfont() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.sf2");
        let err = render_samples(dir.path(), Some(&missing), 0.1).unwrap_err();
        assert!(err.to_string().contains("Failed to open SoundFont"));
    }
}
