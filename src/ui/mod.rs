//! Terminal user interface components.
//!
//! This module draws the quiz card centered on screen, a status line at the
//! bottom, and the help overlay.

mod card;
mod help;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub use card::{card_height, render_card};
pub use help::render_help;

/// Preferred width of the quiz card.
const CARD_WIDTH: u16 = 56;

/// Renders the complete UI and updates the app's layout regions.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    let columns = app.session.scale().grid_columns();
    let card = centered_fixed(
        CARD_WIDTH,
        card_height(app.choices().len(), columns),
        main_chunks[0],
    );

    let layout = render_card(frame, card, app);
    app.update_layout(layout);

    if let Some((message, _)) = &app.status_message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(Color::Rgb(102, 174, 227)),
            )),
            main_chunks[1],
        );
    }

    if app.show_help {
        render_help(frame);
    }
}

/// Centers a rectangle of fixed size within `area`, shrinking it to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Helper function to center a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentPlayer;
    use crate::quiz::{NotePicker, QuizSession};
    use crate::swara::ScaleKey;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    struct FirstPicker;

    impl NotePicker for FirstPicker {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_fixed(56, 20, area);
        assert_eq!(rect, Rect::new(22, 10, 56, 20));

        let small = centered_fixed(56, 20, Rect::new(0, 0, 30, 10));
        assert_eq!(small, Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn test_render_idle_then_answered() {
        let mut app = App::new(
            QuizSession::new(ScaleKey::Chromatic),
            Box::new(FirstPicker),
            Box::new(SilentPlayer),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();

        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Swara Quiz"));
        assert!(!text.contains("Which swara"));
        assert!(app.layout.answers.is_empty());

        app.ask();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Which swara is this note?"));
        assert!(text.contains("Teevra Ma"));
        assert_eq!(app.layout.answers.len(), 12);

        app.answer(1);
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Wrong! Answer: Sa (C#)"));
    }

    #[test]
    fn test_answer_regions_match_clicks() {
        let mut app = App::new(
            QuizSession::new(ScaleKey::Major),
            Box::new(FirstPicker),
            Box::new(SilentPlayer),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();
        app.ask();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let sa = app.layout.answers[0];
        app.handle_click(sa.x + 1, sa.y + 1);
        assert!(app.session.result().is_some_and(|v| v.is_correct()));
    }
}
