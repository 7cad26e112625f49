//! Quiz engine.
//!
//! A [`QuizSession`] moves between three states:
//!
//! - **Idle**: no question and no verdict. The initial state, re-entered on
//!   every scale change.
//! - **Asked**: a question is pending an answer.
//! - **Answered**: the question has been graded. Further answers are ignored
//!   until the next question is asked.
//!
//! The engine never touches audio. [`QuizSession::ask`] and
//! [`QuizSession::replay`] return a [`Cue`] that the caller hands to a
//! [`SoundPlayer`](crate::audio::SoundPlayer).

use crate::swara::{scale, Note, ScaleKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform note indices for [`QuizSession::ask`].
pub trait NotePicker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`NotePicker`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomPicker<R = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    /// Creates a picker seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible picker.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomPicker<R> {
    /// Wraps an existing generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NotePicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Request to play a note's sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    /// The note to be heard.
    pub note: &'static Note,
}

impl Cue {
    /// Audio identifier of the note's sample.
    pub fn sample(&self) -> &'static str {
        self.note.sample
    }
}

/// Outcome of grading the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The chosen note matched.
    Correct,
    /// Wrong answer; carries the note that was actually played.
    Incorrect {
        expected: &'static Note,
    },
}

impl Verdict {
    /// Whether the answer was right.
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }

    /// Text shown on the result line.
    pub fn message(&self) -> String {
        match self {
            Verdict::Correct => "Correct!".to_string(),
            Verdict::Incorrect { expected } => {
                format!("Wrong! Answer: {} ({})", expected.label, expected.pitch)
            }
        }
    }
}

/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No question yet, or the scale just changed.
    Idle,
    /// A question is waiting for an answer.
    Asked,
    /// The question has been graded.
    Answered,
}

/// One quiz session: the active scale, the pending question, and its verdict.
#[derive(Debug, Clone)]
pub struct QuizSession {
    scale: ScaleKey,
    question: Option<&'static Note>,
    result: Option<Verdict>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(ScaleKey::default())
    }
}

impl QuizSession {
    /// Creates an idle session on the given scale.
    pub fn new(scale: ScaleKey) -> Self {
        Self {
            scale,
            question: None,
            result: None,
        }
    }

    /// The active scale.
    pub fn scale(&self) -> ScaleKey {
        self.scale
    }

    /// The note currently being asked, if any.
    pub fn question(&self) -> Option<&'static Note> {
        self.question
    }

    /// The verdict for the current question, if it has been graded.
    pub fn result(&self) -> Option<Verdict> {
        self.result
    }

    /// Which of the three states the session is in.
    pub fn state(&self) -> QuizState {
        match (self.question, self.result) {
            (None, _) => QuizState::Idle,
            (Some(_), None) => QuizState::Asked,
            (Some(_), Some(_)) => QuizState::Answered,
        }
    }

    /// The answer choices for the active scale.
    pub fn choices(&self) -> Vec<&'static Note> {
        scale(self.scale)
    }

    /// Switches scale and drops any question or verdict.
    pub fn select_scale(&mut self, key: ScaleKey) {
        tracing::debug!("Scale selected: {:?}", key);
        self.scale = key;
        self.question = None;
        self.result = None;
    }

    /// Draws a new question from the active scale.
    ///
    /// Valid in every state. The same note may come up twice in a row.
    pub fn ask(&mut self, picker: &mut dyn NotePicker) -> Cue {
        let notes = self.choices();
        let index = picker.pick(notes.len());
        debug_assert!(index < notes.len(), "picker returned {index}");
        let note = notes[index % notes.len()];

        self.question = Some(note);
        self.result = None;
        tracing::debug!("Asked {} ({})", note.label, note.pitch);

        Cue { note }
    }

    /// Returns a cue for the current question again, or `None` when idle.
    pub fn replay(&self) -> Option<Cue> {
        self.question.map(|note| Cue { note })
    }

    /// Grades `candidate` against the current question.
    ///
    /// Only applies in the Asked state; returns `None` and leaves the session
    /// untouched otherwise.
    pub fn grade(&mut self, candidate: &Note) -> Option<Verdict> {
        let expected = self.question?;
        if self.result.is_some() {
            return None;
        }

        let verdict = if candidate.pitch == expected.pitch {
            Verdict::Correct
        } else {
            Verdict::Incorrect { expected }
        };
        tracing::debug!(
            "Graded {} against {}: {:?}",
            candidate.pitch,
            expected.pitch,
            verdict
        );

        self.result = Some(verdict);
        Some(verdict)
    }
}
