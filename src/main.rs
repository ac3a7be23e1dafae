//! VidTUI - terminal video picker with external mpv playback
//!
//! One screen: a three-entry source picker, play/pause controls, a
//! status line and a light/dark theme toggle. Video frames render in
//! the mpv window the app spawns; the terminal shows the controls.
//!
//! # Usage
//!
//! ```bash
//! vidtui
//! vidtui --light
//! vidtui --mpv /usr/local/bin/mpv
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;

use vidtui::app::{App, PLACEHOLDER_LABEL};
use vidtui::cli::Cli;
use vidtui::models::{PlaybackStatus, PlayerCommand, CATALOG};
use vidtui::player::{MpvPlayer, PlayerError};
use vidtui::ui::Theme;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Live playback surface: the process handle plus its status channel
type PlayerSlot = (MpvPlayer, UnboundedReceiver<PlaybackStatus>);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run_tui(cli).await
}

// =============================================================================
// Terminal lifecycle
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interactive screen
async fn run_tui(cli: Cli) -> Result<()> {
    // Probe before touching the terminal, so a missing player surfaces
    // as a plain error message instead of a dead alternate screen
    if !MpvPlayer::is_available(&cli.mpv).await {
        return Err(PlayerError::NotFound(cli.mpv).into());
    }

    let mut terminal = init_terminal()?;

    let mut app = if cli.light {
        App::with_light_theme()
    } else {
        App::new()
    };

    let result = run_event_loop(&mut terminal, &mut app, &cli.mpv).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

// =============================================================================
// Event loop
// =============================================================================

/// Main event loop - renders, folds player events, reconciles the mount
/// state with the live process, drains controls, polls the keyboard.
/// All `App` mutation happens here, on one task.
async fn run_event_loop(terminal: &mut Tui, app: &mut App, mpv_binary: &str) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let mut player: Option<PlayerSlot> = None;

    while app.running {
        terminal.draw(|frame| render_ui(frame, app))?;

        // Reconcile first: the process exists iff a source is selected,
        // bound to exactly that uri. Dropping the old handle kills mpv
        // and discards its buffered snapshots along with the receiver,
        // so an outgoing surface never feeds a fresh mount.
        let wanted = app.mount.uri();
        if wanted != player.as_ref().map(|(handle, _)| handle.uri()) {
            let wanted = wanted.map(str::to_string);
            player = None;
            if let Some(uri) = wanted {
                player = Some(MpvPlayer::spawn(&uri, mpv_binary).await?);
            }
        }

        // Fold status events from the current surface into view state
        if let Some((_, status_rx)) = player.as_mut() {
            drain_status(app, status_rx);
        }

        // Drain queued controls in press order. Failures are logged and
        // dropped; the surface keeps its last reported status.
        while let Some(command) = app.next_command() {
            if let Some((handle, _)) = player.as_ref() {
                let sent = match command {
                    PlayerCommand::Play => handle.play().await,
                    PlayerCommand::Pause => handle.pause().await,
                };
                if let Err(err) = sent {
                    log::warn!("player command failed: {err}");
                }
            }
        }

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

/// Fold buffered status snapshots into view state
///
/// Must run only once the surface matches the mount; snapshots buffered
/// by a replaced player are dropped with its receiver instead.
fn drain_status(app: &mut App, status_rx: &mut UnboundedReceiver<PlaybackStatus>) {
    while let Ok(status) = status_rx.try_recv() {
        app.apply_status(status);
    }
}

// =============================================================================
// UI Rendering
// =============================================================================

/// Main render function: background, centered card, card contents
fn render_ui(frame: &mut Frame, app: &App) {
    let theme = Theme::of(app.dark);
    let area = frame.area();

    // Clear with the container background
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let card_area = centered_card(area);

    // The theme indicator sits in the card's top-right corner
    let toggle_glyph = if app.dark { "☾ dark" } else { "☀ light" };
    let card = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .style(Style::default().bg(theme.surface))
        .title_top(Line::from(Span::styled(" VidTUI ", theme.title())))
        .title_top(
            Line::from(vec![
                Span::styled("t:", theme.keybind()),
                Span::styled(format!("{} ", toggle_glyph), theme.dimmed()),
            ])
            .right_aligned(),
        );

    let inner = card.inner(card_area);
    frame.render_widget(card, card_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CATALOG.len() as u16 + 3), // Picker (placeholder + entries)
            Constraint::Length(4),                        // Playback pane
            Constraint::Length(1),                        // Buttons
            Constraint::Length(1),                        // Status line
            Constraint::Min(0),                           // Spacer
            Constraint::Length(1),                        // Footer
        ])
        .split(inner);

    render_picker(frame, chunks[0], app, theme);
    render_playback_pane(frame, chunks[1], app, theme);
    render_buttons(frame, chunks[2], app, theme);
    render_status_line(frame, chunks[3], app, theme);
    render_footer(frame, chunks[5], theme);
}

/// Center the card within the terminal, like a fixed-width dialog
fn centered_card(area: Rect) -> Rect {
    let width = 72.min(area.width.saturating_sub(2));
    let height = 15.min(area.height.saturating_sub(2));

    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Render the source picker
fn render_picker(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focused())
        .title(Span::styled(" SELECT A VIDEO ", theme.title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cursor = app.picker.cursor;
    let marker = |row: usize| if row == cursor { "▸ " } else { "  " };
    let marker_style = |row: usize| {
        if row == cursor {
            theme.keybind()
        } else {
            theme.dimmed()
        }
    };

    let mut items: Vec<ListItem> = Vec::with_capacity(CATALOG.len() + 1);

    // Row 0: the placeholder, committing it ejects the current video
    items.push(ListItem::new(Line::from(vec![
        Span::styled(marker(0), marker_style(0)),
        Span::styled(
            PLACEHOLDER_LABEL,
            if cursor == 0 {
                theme.list_item_selected()
            } else {
                theme.dimmed()
            },
        ),
    ])));

    for (i, source) in CATALOG.iter().enumerate() {
        let row = i + 1;
        let is_loaded = app.mount.uri() == Some(source.uri);
        let loaded_tag = if is_loaded { "  [loaded]" } else { "" };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(marker(row), marker_style(row)),
            Span::styled(
                source.label,
                if row == cursor {
                    theme.list_item_selected()
                } else {
                    theme.list_item()
                },
            ),
            Span::styled(loaded_tag, theme.button()),
        ])));
    }

    let list = List::new(items).style(theme.text());
    frame.render_widget(list, inner);
}

/// Render the playback pane: bound uri when mounted, hint otherwise
fn render_playback_pane(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = match app.mount.uri() {
        Some(uri) => vec![
            Line::from(Span::styled(format!("▶ {}", uri), theme.text())),
            Line::from(Span::styled(
                "video renders in the mpv window",
                theme.dimmed(),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled("No video selected", theme.dimmed())),
        ],
    };

    let pane = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(pane, inner);
}

/// Render the Play/Pause buttons row
fn render_buttons(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let button_style = if app.mount.is_mounted() {
        theme.button()
    } else {
        theme.dimmed()
    };

    let buttons = Line::from(vec![
        Span::styled("[ p ▶ Play ]", button_style),
        Span::raw("   "),
        Span::styled("[ s ⏸ Pause ]", button_style),
    ]);

    let para = Paragraph::new(buttons).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Render the status line
fn render_status_line(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Status: ", theme.dimmed()),
        Span::styled(app.status_text(), theme.status()),
    ]);

    let para = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Render the keybind footer
fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme) {
    let hints = [
        ("↑↓", "pick"),
        ("↵", "load"),
        ("p", "play"),
        ("s", "pause"),
        ("t", "theme"),
        ("ESC", "eject"),
        ("q", "quit"),
    ];

    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {} ", key), theme.keybind()));
        spans.push(Span::styled(format!("{} ", desc), theme.keybind_desc()));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn playing() -> PlaybackStatus {
        PlaybackStatus {
            playing: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_drain_applies_buffered_snapshots() {
        let mut app = App::new();
        app.select(Some(CATALOG[0].uri));

        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(playing()).unwrap();

        drain_status(&mut app, &mut rx);
        assert_eq!(app.status_text(), "Playing");
    }

    /// Snapshots buffered by an outgoing surface die with its receiver;
    /// the fresh mount stays on "Paused" until its own player reports.
    #[test]
    fn test_remount_discards_old_surface_snapshots() {
        let mut app = App::new();
        app.select(Some(CATALOG[0].uri));

        let (old_tx, old_rx) = mpsc::unbounded_channel();
        old_tx.send(playing()).unwrap();

        // Switching sources resets view state; the loop then replaces
        // the surface before draining anything
        app.select(Some(CATALOG[1].uri));
        drop(old_rx);

        let (_new_tx, mut new_rx) = mpsc::unbounded_channel::<PlaybackStatus>();
        drain_status(&mut app, &mut new_rx);
        assert_eq!(app.status_text(), "Paused");
        assert!(app.status.is_none());
    }

    /// Same for eject: nothing left to drain, status stays at the
    /// initial paused value.
    #[test]
    fn test_eject_discards_old_surface_snapshots() {
        let mut app = App::new();
        app.select(Some(CATALOG[0].uri));

        let (old_tx, old_rx) = mpsc::unbounded_channel();
        old_tx.send(playing()).unwrap();

        app.select(None);
        drop(old_rx);

        assert_eq!(app.status_text(), "Paused");
    }
}
