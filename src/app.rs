//! Application state and event handling.
//!
//! The [`App`] owns one [`QuizSession`] together with the note picker and
//! sound player it needs, and translates user actions into engine calls.
//! Cues returned by the engine are forwarded to the player here.

use crate::audio::SoundPlayer;
use crate::quiz::{Cue, NotePicker, QuizSession, QuizState, Verdict};
use crate::swara::{Note, ScaleKey};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Keys that answer by button position, in button order.
pub const ANSWER_KEYS: [char; 12] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='];

/// Returns the answer position bound to `key`, if any.
pub fn answer_index_for_key(key: char) -> Option<usize> {
    ANSWER_KEYS.iter().position(|&k| k == key)
}

/// Clickable element of the quiz card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The "Quiz Me" button.
    Ask,
    /// The "Replay" button.
    Replay,
    /// The scale selector line.
    Scale,
    /// An answer button, by position in the active scale.
    Answer(usize),
}

/// Layout regions for mouse hit testing.
/// Stores the screen coordinates of each clickable element.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegions {
    pub ask_button: Rect,
    pub replay_button: Rect,
    pub scale_line: Rect,
    /// Answer buttons in scale order. Empty while no question is shown.
    pub answers: Vec<Rect>,
}

impl LayoutRegions {
    /// Determines which element contains the given screen coordinates.
    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        if contains(self.ask_button, x, y) {
            Some(Hit::Ask)
        } else if contains(self.replay_button, x, y) {
            Some(Hit::Replay)
        } else if contains(self.scale_line, x, y) {
            Some(Hit::Scale)
        } else {
            self.answers
                .iter()
                .position(|&rect| contains(rect, x, y))
                .map(Hit::Answer)
        }
    }
}

/// Checks if a point is within a rectangle.
fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Main application state.
pub struct App {
    /// The quiz being played.
    pub session: QuizSession,
    /// Source of questions.
    picker: Box<dyn NotePicker>,
    /// Output for cues.
    player: Box<dyn SoundPlayer>,
    /// Highlighted answer button.
    pub cursor: usize,
    /// Layout regions from the last render.
    pub layout: LayoutRegions,
    /// Transient status message and when it was set.
    pub status_message: Option<(String, Instant)>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
}

impl App {
    /// Creates the application around an explicitly constructed session.
    pub fn new(
        session: QuizSession,
        picker: Box<dyn NotePicker>,
        player: Box<dyn SoundPlayer>,
    ) -> Self {
        Self {
            session,
            picker,
            player,
            cursor: 0,
            layout: LayoutRegions::default(),
            status_message: None,
            show_help: false,
        }
    }

    /// Answer choices for the active scale.
    pub fn choices(&self) -> Vec<&'static Note> {
        self.session.choices()
    }

    /// Sends a cue to the player.
    fn play(&mut self, cue: Cue) {
        tracing::debug!("Playing {}", cue.sample());
        self.player.play(cue.sample());
    }

    /// Asks a new question and plays it.
    pub fn ask(&mut self) {
        let cue = self.session.ask(self.picker.as_mut());
        self.play(cue);
    }

    /// Replays the current question. Does nothing when idle.
    pub fn replay(&mut self) {
        match self.session.replay() {
            Some(cue) => self.play(cue),
            None => self.set_status("Press Quiz Me first"),
        }
    }

    /// Switches to `key`, dropping the current question.
    pub fn select_scale(&mut self, key: ScaleKey) {
        self.session.select_scale(key);
        self.cursor = 0;
        self.set_status(format!("Scale: {}", key.title()));
    }

    /// Switches to the next scale.
    pub fn cycle_scale(&mut self) {
        self.select_scale(self.session.scale().next());
    }

    /// Grades the answer at `index` in the active scale.
    ///
    /// Out-of-range positions and answers while no question is pending are
    /// ignored, mirroring disabled buttons.
    pub fn answer(&mut self, index: usize) -> Option<Verdict> {
        if self.session.state() != QuizState::Asked {
            return None;
        }
        let candidate = *self.choices().get(index)?;
        self.cursor = index;
        let verdict = self.session.grade(candidate)?;
        tracing::info!("Answered {}: {}", candidate.label, verdict.message());
        Some(verdict)
    }

    /// Grades the highlighted answer.
    pub fn answer_at_cursor(&mut self) -> Option<Verdict> {
        self.answer(self.cursor)
    }

    /// Moves the answer cursor within the grid.
    ///
    /// `dx` moves across columns, `dy` across rows. Moves that would leave
    /// the grid are ignored.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let len = self.choices().len() as i32;
        let columns = self.session.scale().grid_columns() as i32;
        let current = self.cursor as i32;
        let column = current % columns;

        let target = if dx != 0 {
            let new_column = column + dx;
            if new_column < 0 || new_column >= columns {
                return;
            }
            current + dx
        } else {
            current + dy * columns
        };

        if (0..len).contains(&target) {
            self.cursor = target as usize;
        }
    }

    /// Handles a left click at screen coordinates.
    pub fn handle_click(&mut self, x: u16, y: u16) {
        match self.layout.hit(x, y) {
            Some(Hit::Ask) => self.ask(),
            Some(Hit::Replay) => self.replay(),
            Some(Hit::Scale) => self.cycle_scale(),
            Some(Hit::Answer(index)) => {
                self.answer(index);
            }
            None => {}
        }
    }

    /// Updates the layout regions based on current terminal size.
    /// Called by the UI module during rendering.
    pub fn update_layout(&mut self, layout: LayoutRegions) {
        self.layout = layout;
    }

    /// Sets a status message to display temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clears expired status messages.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Player that records every sample it is asked to play.
    #[derive(Clone, Default)]
    struct RecordingPlayer {
        played: Rc<RefCell<Vec<String>>>,
    }

    impl SoundPlayer for RecordingPlayer {
        fn play(&mut self, sample: &str) {
            self.played.borrow_mut().push(sample.to_string());
        }
    }

    /// Picker that always returns the same index.
    struct FixedPicker(usize);

    impl NotePicker for FixedPicker {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn app_with(scale: ScaleKey, pick: usize) -> (App, Rc<RefCell<Vec<String>>>) {
        let player = RecordingPlayer::default();
        let played = Rc::clone(&player.played);
        let app = App::new(
            QuizSession::new(scale),
            Box::new(FixedPicker(pick)),
            Box::new(player),
        );
        (app, played)
    }

    #[test]
    fn test_ask_plays_cue() {
        let (mut app, played) = app_with(ScaleKey::Major, 4);
        app.ask();
        assert_eq!(app.session.question().map(|n| n.label), Some("Pa"));
        assert_eq!(*played.borrow(), vec!["Gsharp.wav".to_string()]);
    }

    #[test]
    fn test_replay_idle_plays_nothing() {
        let (mut app, played) = app_with(ScaleKey::Major, 0);
        app.replay();
        assert!(played.borrow().is_empty());
        assert_eq!(app.session.state(), QuizState::Idle);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_replay_after_answer() {
        let (mut app, played) = app_with(ScaleKey::Chromatic, 11);
        app.ask();
        app.answer(0);
        app.replay();
        assert_eq!(
            *played.borrow(),
            vec!["Bsharp.wav".to_string(), "Bsharp.wav".to_string()]
        );
        assert_eq!(app.session.state(), QuizState::Answered);
    }

    #[test]
    fn test_answer_requires_question() {
        let (mut app, _) = app_with(ScaleKey::Major, 0);
        assert_eq!(app.answer(0), None);
        assert_eq!(app.session.state(), QuizState::Idle);
    }

    #[test]
    fn test_answer_locks_after_first_choice() {
        let (mut app, _) = app_with(ScaleKey::Major, 2);
        app.ask();
        assert_eq!(app.answer(2), Some(Verdict::Correct));
        assert_eq!(app.answer(3), None);
        assert_eq!(app.session.result(), Some(Verdict::Correct));
    }

    #[test]
    fn test_answer_out_of_range_ignored() {
        let (mut app, _) = app_with(ScaleKey::Major, 0);
        app.ask();
        assert_eq!(app.answer(7), None);
        assert_eq!(app.session.state(), QuizState::Asked);
    }

    #[test]
    fn test_cursor_answer() {
        let (mut app, _) = app_with(ScaleKey::Chromatic, 4);
        app.ask();
        app.move_cursor(1, 0);
        app.move_cursor(0, 1);
        assert_eq!(app.cursor, 4);
        assert_eq!(app.answer_at_cursor(), Some(Verdict::Correct));
    }

    #[test]
    fn test_cursor_stays_in_grid() {
        let (mut app, _) = app_with(ScaleKey::Major, 0);
        app.move_cursor(-1, 0);
        assert_eq!(app.cursor, 0);
        app.move_cursor(0, -1);
        assert_eq!(app.cursor, 0);

        // Major is two columns wide; Ni sits alone on the last row
        app.move_cursor(0, 3);
        assert_eq!(app.cursor, 6);
        app.move_cursor(1, 0);
        assert_eq!(app.cursor, 6);
        app.move_cursor(0, 1);
        assert_eq!(app.cursor, 6);

        app.move_cursor(-1, 0);
        assert_eq!(app.cursor, 6);
        app.move_cursor(0, -1);
        assert_eq!(app.cursor, 4);
        app.move_cursor(1, 0);
        assert_eq!(app.cursor, 5);
    }

    #[test]
    fn test_cycle_scale_resets() {
        let (mut app, _) = app_with(ScaleKey::Major, 1);
        app.ask();
        app.answer(0);
        app.cursor = 3;

        app.cycle_scale();
        assert_eq!(app.session.scale(), ScaleKey::Chromatic);
        assert_eq!(app.session.state(), QuizState::Idle);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_answer_keys() {
        assert_eq!(answer_index_for_key('1'), Some(0));
        assert_eq!(answer_index_for_key('0'), Some(9));
        assert_eq!(answer_index_for_key('='), Some(11));
        assert_eq!(answer_index_for_key('x'), None);
    }

    #[test]
    fn test_click_dispatch() {
        let (mut app, played) = app_with(ScaleKey::Major, 3);
        app.update_layout(LayoutRegions {
            ask_button: Rect::new(2, 4, 12, 1),
            replay_button: Rect::new(16, 4, 10, 1),
            scale_line: Rect::new(2, 2, 40, 1),
            answers: (0..7).map(|i| Rect::new(2 + (i % 2) * 14, 8 + (i / 2) * 3, 12, 3)).collect(),
        });

        // Empty space does nothing
        app.handle_click(0, 0);
        assert_eq!(app.session.state(), QuizState::Idle);

        app.handle_click(5, 4);
        assert_eq!(app.session.state(), QuizState::Asked);

        app.handle_click(20, 4);
        assert_eq!(played.borrow().len(), 2);

        // Answer 3 is second column, second row
        app.handle_click(17, 12);
        assert_eq!(app.session.result(), Some(Verdict::Correct));

        app.handle_click(10, 2);
        assert_eq!(app.session.scale(), ScaleKey::Chromatic);
        assert_eq!(app.session.state(), QuizState::Idle);
    }

    #[test]
    fn test_status_expiry() {
        let (mut app, _) = app_with(ScaleKey::Major, 0);
        app.set_status("hello");
        app.clear_expired_status();
        assert!(app.status_message.is_some());

        app.status_message = Some((
            "old".to_string(),
            Instant::now() - Duration::from_secs(10),
        ));
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }
}
