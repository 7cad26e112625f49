//! The quiz card.
//!
//! Renders the scale selector, the two control buttons, the answer grid,
//! and the result line, and reports where each clickable element landed.

use crate::app::{App, LayoutRegions, ANSWER_KEYS};
use crate::quiz::{QuizState, Verdict};
use crate::swara::Note;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

/// Height of one answer button, borders included.
const ANSWER_HEIGHT: u16 = 4;

/// Width of each control button.
const CONTROL_WIDTH: u16 = 14;

/// Gap between the control buttons.
const CONTROL_GAP: u16 = 4;

const TITLE_COLOR: Color = Color::Rgb(229, 242, 255);
const LABEL_COLOR: Color = Color::Rgb(203, 213, 245);
const PITCH_COLOR: Color = Color::Rgb(91, 173, 206);
const BORDER_COLOR: Color = Color::Rgb(148, 191, 233);
const CORRECT_COLOR: Color = Color::Rgb(74, 222, 128);
const WRONG_COLOR: Color = Color::Rgb(249, 115, 115);

/// Number of rows the answer grid needs for `count` notes.
fn grid_rows(count: usize, columns: usize) -> u16 {
    count.div_ceil(columns) as u16
}

/// Height of the card for the given scale size, borders included.
pub fn card_height(count: usize, columns: usize) -> u16 {
    // Borders, scale, gap, controls, gap, prompt, grid, gap, result, keys
    2 + 1 + 1 + 1 + 1 + 1 + grid_rows(count, columns) * ANSWER_HEIGHT + 1 + 1 + 1
}

/// Renders the card into `area` and returns the clickable regions.
pub fn render_card(frame: &mut Frame, area: Rect, app: &App) -> LayoutRegions {
    let session = &app.session;
    let notes = app.choices();
    let columns = session.scale().grid_columns();

    let block = Block::default()
        .title(Span::styled(
            " Swara Quiz ",
            Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Scale
            Constraint::Length(1), // Gap
            Constraint::Length(1), // Controls
            Constraint::Length(1), // Gap
            Constraint::Length(1), // Prompt
            Constraint::Length(grid_rows(notes.len(), columns) * ANSWER_HEIGHT),
            Constraint::Length(1), // Gap
            Constraint::Length(1), // Result
            Constraint::Min(0),    // Keys
        ])
        .split(inner);

    let mut regions = LayoutRegions {
        scale_line: chunks[0],
        ..LayoutRegions::default()
    };

    render_scale_line(frame, chunks[0], app);

    let (ask_button, replay_button) = control_rects(chunks[2]);
    render_control(frame, ask_button, "Quiz Me", true);
    render_control(
        frame,
        replay_button,
        "Replay",
        session.state() != QuizState::Idle,
    );
    regions.ask_button = ask_button;
    regions.replay_button = replay_button;

    if session.question().is_some() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Which swara is this note?",
                Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[4],
        );
        regions.answers = render_answers(frame, chunks[5], app, &notes, columns);
    }

    if let Some(verdict) = session.result() {
        let color = if verdict.is_correct() {
            CORRECT_COLOR
        } else {
            WRONG_COLOR
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                verdict.message(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[7],
        );
    }

    frame.render_widget(
        Paragraph::new(key_hints()).alignment(Alignment::Center),
        chunks[8],
    );

    regions
}

/// Renders the scale selector as a cycling dropdown.
fn render_scale_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("Scale: ", Style::default().fg(LABEL_COLOR)),
        Span::styled("< ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.session.scale().title(),
            Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Splits the controls row into two centered button rects.
fn control_rects(area: Rect) -> (Rect, Rect) {
    let total = CONTROL_WIDTH * 2 + CONTROL_GAP;
    let start = area.x + area.width.saturating_sub(total) / 2;
    let ask = Rect::new(start, area.y, CONTROL_WIDTH.min(area.width), area.height);
    let replay = Rect::new(
        start + CONTROL_WIDTH + CONTROL_GAP,
        area.y,
        CONTROL_WIDTH.min(area.width.saturating_sub(CONTROL_WIDTH + CONTROL_GAP)),
        area.height,
    );
    (ask, replay)
}

/// Renders a one-line control button.
fn render_control(frame: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Rgb(96, 165, 250))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Rgb(30, 41, 59))
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {} ", label), style)).alignment(Alignment::Center),
        area,
    );
}

/// Renders the answer grid and returns each button's rect in scale order.
fn render_answers(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    notes: &[&'static Note],
    columns: usize,
) -> Vec<Rect> {
    let result = app.session.result();
    let answered = result.is_some();
    let question = app.session.question();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(ANSWER_HEIGHT);
            grid_rows(notes.len(), columns) as usize
        ])
        .split(area);

    let mut rects = Vec::with_capacity(notes.len());

    for (row_index, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row);

        for (column, cell) in cells.iter().enumerate() {
            let index = row_index * columns + column;
            let Some(note) = notes.get(index) else {
                break;
            };

            let is_correct_answer = result == Some(Verdict::Correct)
                && question.map(|q| q.pitch) == Some(note.pitch);
            let is_cursor = !answered && app.cursor == index;

            let border_style = if is_correct_answer {
                Style::default().fg(CORRECT_COLOR).add_modifier(Modifier::BOLD)
            } else if is_cursor {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if answered {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(BORDER_COLOR)
            };

            let (label_style, pitch_style) = if is_correct_answer {
                (
                    Style::default()
                        .fg(Color::Black)
                        .bg(CORRECT_COLOR)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Black).bg(CORRECT_COLOR),
                )
            } else if answered {
                (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                (
                    Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
                    Style::default().fg(PITCH_COLOR),
                )
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(Span::styled(
                    ANSWER_KEYS[index].to_string(),
                    Style::default().fg(Color::DarkGray),
                ));

            let text = vec![
                Line::from(Span::styled(note.label, label_style)),
                Line::from(Span::styled(note.pitch, pitch_style)),
            ];

            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(block),
                *cell,
            );
            rects.push(*cell);
        }
    }

    rects
}

/// Compact key reference shown at the bottom of the card.
fn key_hints() -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow);
    let desc_style = Style::default().fg(Color::DarkGray);

    Line::from(vec![
        Span::styled("[n]", key_style),
        Span::styled("Quiz ", desc_style),
        Span::styled("[r]", key_style),
        Span::styled("Replay ", desc_style),
        Span::styled("[s]", key_style),
        Span::styled("Scale ", desc_style),
        Span::styled("[?]", key_style),
        Span::styled("Help ", desc_style),
        Span::styled("[q]", key_style),
        Span::styled("Quit", desc_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rows() {
        assert_eq!(grid_rows(7, 2), 4);
        assert_eq!(grid_rows(12, 3), 4);
        assert_eq!(grid_rows(6, 3), 2);
    }

    #[test]
    fn test_control_rects_do_not_overlap() {
        let (ask, replay) = control_rects(Rect::new(0, 5, 60, 1));
        assert!(ask.x + ask.width <= replay.x);
        assert_eq!(ask.y, 5);
        assert_eq!(replay.width, CONTROL_WIDTH);
    }
}
