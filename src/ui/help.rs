//! Help overlay rendering.
//!
//! Displays keyboard shortcuts and mouse controls in a modal overlay.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;

/// Key binding entry for the help display.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
}

const QUIZ_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "n / Space",
        description: "Quiz me (play a random note)",
    },
    KeyBinding {
        key: "r",
        description: "Replay the current note",
    },
    KeyBinding {
        key: "s / Tab",
        description: "Switch scale (clears the question)",
    },
];

const ANSWER_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "Arrows / hjkl",
        description: "Move between answers",
    },
    KeyBinding {
        key: "Enter",
        description: "Choose highlighted answer",
    },
    KeyBinding {
        key: "1-9 0 - =",
        description: "Choose answer by position",
    },
];

const GENERAL_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "?",
        description: "Toggle this help",
    },
    KeyBinding {
        key: "q / Esc",
        description: "Quit",
    },
    KeyBinding {
        key: "Ctrl+C",
        description: "Force quit",
    },
];

const MOUSE_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "Click button",
        description: "Quiz Me / Replay / answer",
    },
    KeyBinding {
        key: "Click scale",
        description: "Switch scale",
    },
];

/// Renders the help overlay.
pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let sections: [(&'static str, &[KeyBinding]); 4] = [
        ("Quiz", QUIZ_BINDINGS),
        ("Answers", ANSWER_BINDINGS),
        ("General", GENERAL_BINDINGS),
        ("Mouse", MOUSE_BINDINGS),
    ];

    for (title, bindings) in sections {
        lines.push(Line::from(Span::styled(title, section_style)));
        for binding in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("{:15}", binding.key), key_style),
                Span::styled(binding.description, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Close: ?/Esc/Click",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(footer, chunks[1]);
}
