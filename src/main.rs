//! swaratui - A terminal ear-training quiz for Hindustani swaras.
//!
//! Press "Quiz Me" to hear a random note from the chosen scale, then pick
//! the swara you heard. Notes are played from WAV samples in a directory
//! (`audio/` by default); `swaratui render-samples` creates them.
//!
//! # Usage
//!
//! ```bash
//! cargo run                                  # Quiz on the major scale
//! cargo run -- --scale chromatic             # All twelve notes
//! cargo run -- render-samples --out audio    # Write the note samples
//! ```
//!
//! Press `?` for help with keyboard shortcuts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use swaratui::audio::{render_samples, RodioPlayer, SilentPlayer, SoundPlayer};
use swaratui::config::Settings;
use swaratui::quiz::{QuizSession, RandomPicker};
use swaratui::swara::ScaleKey;
use swaratui::{ui, App};

/// Command-line options for the application.
#[derive(Debug, Parser)]
#[command(name = "swaratui", version, about = "Terminal ear-training quiz for swaras")]
struct Cli {
    /// Settings file (defaults to ./swaratui.json if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the note samples.
    #[arg(long)]
    samples: Option<PathBuf>,

    /// Scale to start with.
    #[arg(long, value_enum)]
    scale: Option<ScaleKey>,

    /// Seed for question selection, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Do not open an audio device.
    #[arg(short, long)]
    mute: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a WAV sample for every note.
    RenderSamples {
        /// Output directory (defaults to the configured samples directory).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Render through this SoundFont instead of a synthesized tone.
        #[arg(long)]
        soundfont: Option<PathBuf>,

        /// Length of each sample in seconds, up to 30.
        #[arg(long, default_value_t = 1.5)]
        seconds: f32,
    },
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (optional, for debugging)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let mut settings = Settings::discover(cli.config.as_deref(), &cwd)?;
    settings.apply_overrides(cli.samples, cli.scale, cli.seed);

    if let Some(Command::RenderSamples {
        out,
        soundfont,
        seconds,
    }) = cli.command
    {
        let out = out.unwrap_or_else(|| settings.samples_dir.clone());
        let written = render_samples(&out, soundfont.as_deref(), seconds)
            .context("Failed to render samples")?;
        println!("Wrote {} samples to {}", written.len(), out.display());
        return Ok(());
    }

    let player: Box<dyn SoundPlayer> = if cli.mute {
        Box::new(SilentPlayer)
    } else {
        match RodioPlayer::new(
            settings.samples_dir.clone(),
            settings.volume,
            settings.fallback_tone,
        ) {
            Ok(player) => Box::new(player),
            Err(e) => {
                tracing::warn!("Audio unavailable, continuing muted: {}", e);
                Box::new(SilentPlayer)
            }
        }
    };

    let picker = match settings.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_entropy(),
    };

    let session = QuizSession::new(settings.default_scale);
    let mut app = App::new(session, Box::new(picker), player);

    if !settings.samples_dir.is_dir() {
        app.set_status(format!(
            "No samples in {} (try `swaratui render-samples`)",
            settings.samples_dir.display()
        ));
    }

    let mut terminal = setup_terminal().context("Failed to setup terminal")?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    // Handle any errors from the main loop
    result
}

/// Sets up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.clear_expired_status();

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if app.show_help {
                    if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                        app.show_help = false;
                    }
                    continue;
                }

                if handle_key(app, key.code, key.modifiers) {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }

    Ok(())
}

/// Handles mouse events.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if app.show_help {
            // Click anywhere to close help
            app.show_help = false;
        } else {
            app.handle_click(mouse.column, mouse.row);
        }
    }
}

/// Handles a key press event.
///
/// # Returns
///
/// `true` if the application should quit
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') | KeyCode::Esc => return true,

        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('n') | KeyCode::Char(' ') => app.ask(),
        KeyCode::Char('r') => app.replay(),
        KeyCode::Char('s') | KeyCode::Tab => app.cycle_scale(),

        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
        KeyCode::Enter => {
            app.answer_at_cursor();
        }

        KeyCode::Char(c) => {
            if let Some(index) = swaratui::app::answer_index_for_key(c) {
                app.answer(index);
            }
        }
        _ => {}
    }

    false
}
