//! Screen state and core application logic
//!
//! Owns the view state (picker cursor, mount state, latest playback
//! status, theme flag) and wires key events to player commands. All
//! mutation happens on the event loop thread.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{PlaybackStatus, PlayerCommand, VideoSource, CATALOG};

// =============================================================================
// Mount State
// =============================================================================

/// Lifecycle of the playback surface
///
/// The player exists if and only if a source is selected. Selecting a
/// different source is an unmount plus remount: the status snapshot
/// resets and queued commands for the old surface are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mount {
    /// No source selected, no player
    #[default]
    Unmounted,
    /// Player bound to exactly this uri
    Mounted { uri: String },
}

impl Mount {
    /// The bound uri, if any
    pub fn uri(&self) -> Option<&str> {
        match self {
            Mount::Unmounted => None,
            Mount::Mounted { uri } => Some(uri),
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self, Mount::Mounted { .. })
    }
}

// =============================================================================
// Picker State
// =============================================================================

/// Label of the placeholder row through which the selection is cleared
pub const PLACEHOLDER_LABEL: &str = "Select a Video";

/// Cursor over the picker rows
///
/// Row 0 is the "Select a Video" placeholder, rows 1..=CATALOG.len()
/// are the catalog entries. Committing the placeholder ejects.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    /// Currently highlighted row
    pub cursor: usize,
}

impl PickerState {
    /// Total rows including the placeholder
    pub fn len() -> usize {
        CATALOG.len() + 1
    }

    /// Move highlight up
    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move highlight down
    pub fn down(&mut self) {
        if self.cursor + 1 < Self::len() {
            self.cursor += 1;
        }
    }

    /// The highlighted catalog entry; None on the placeholder row
    pub fn highlighted(&self) -> Option<&'static VideoSource> {
        self.cursor.checked_sub(1).map(|i| &CATALOG[i])
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state for the single playback screen
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Picker cursor over the catalog
    pub picker: PickerState,
    /// Playback surface lifecycle
    pub mount: Mount,
    /// Latest status snapshot, None until the player reports one
    pub status: Option<PlaybackStatus>,
    /// Theme flag, true = dark (the default)
    pub dark: bool,
    /// Control operations queued for the event loop to drain, in order
    pub pending: VecDeque<PlayerCommand>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            running: true,
            picker: PickerState::default(),
            mount: Mount::Unmounted,
            status: None,
            dark: true,
            pending: VecDeque::new(),
        }
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the light theme instead of the default dark
    pub fn with_light_theme() -> Self {
        Self {
            dark: false,
            ..Self::default()
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Set the selected source
    ///
    /// `None` unmounts. A uri different from the current one remounts,
    /// resetting the status snapshot and dropping queued commands.
    /// Re-selecting the already-bound uri is a no-op.
    pub fn select(&mut self, uri: Option<&str>) {
        match uri {
            None => {
                if self.mount.is_mounted() {
                    self.mount = Mount::Unmounted;
                    self.reset_surface();
                }
            }
            Some(uri) => {
                if self.mount.uri() == Some(uri) {
                    return;
                }
                self.mount = Mount::Mounted {
                    uri: uri.to_string(),
                };
                self.reset_surface();
            }
        }
    }

    /// Commit the highlighted picker row as the selection
    ///
    /// The placeholder row commits as `None` and unmounts.
    pub fn select_highlighted(&mut self) {
        self.select(self.picker.highlighted().map(|source| source.uri));
    }

    fn reset_surface(&mut self) {
        self.status = None;
        self.pending.clear();
    }

    // -------------------------------------------------------------------------
    // Playback Controls
    // -------------------------------------------------------------------------

    /// Queue a play command; no-op while unmounted
    pub fn play_pressed(&mut self) {
        if self.mount.is_mounted() {
            self.pending.push_back(PlayerCommand::Play);
        }
    }

    /// Queue a pause command; no-op while unmounted
    pub fn pause_pressed(&mut self) {
        if self.mount.is_mounted() {
            self.pending.push_back(PlayerCommand::Pause);
        }
    }

    /// Take the oldest queued command, if any
    pub fn next_command(&mut self) -> Option<PlayerCommand> {
        self.pending.pop_front()
    }

    /// Replace the status snapshot wholesale
    pub fn apply_status(&mut self, status: PlaybackStatus) {
        self.status = Some(status);
    }

    /// Status word for the UI; "Paused" until a status arrives
    pub fn status_text(&self) -> &'static str {
        match &self.status {
            Some(status) => status.word(),
            None => "Paused",
        }
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    /// Flip between the dark and light style sets
    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a key event, returns true if it was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Global quit shortcut (Ctrl+C or q)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.picker.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.picker.down();
                true
            }
            KeyCode::Enter => {
                self.select_highlighted();
                true
            }
            KeyCode::Esc => {
                self.select(None);
                true
            }
            KeyCode::Char('p') => {
                self.play_pressed();
                true
            }
            KeyCode::Char('s') => {
                self.pause_pressed();
                true
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn playing_status() -> PlaybackStatus {
        PlaybackStatus {
            playing: true,
            position: Duration::from_secs(3),
            duration: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_initial_state() {
        let app = App::new();
        assert!(app.running);
        assert!(app.dark);
        assert_eq!(app.mount, Mount::Unmounted);
        assert_eq!(app.status_text(), "Paused");
    }

    #[test]
    fn test_select_mounts_exact_uri() {
        let mut app = App::new();
        for source in CATALOG {
            app.select(Some(source.uri));
            assert_eq!(app.mount.uri(), Some(source.uri));
        }
    }

    #[test]
    fn test_select_none_unmounts() {
        let mut app = App::new();
        app.select(Some(CATALOG[0].uri));
        app.select(None);
        assert_eq!(app.mount, Mount::Unmounted);
    }

    #[test]
    fn test_remount_resets_status_and_queue() {
        let mut app = App::new();
        app.select(Some(CATALOG[0].uri));
        app.apply_status(playing_status());
        app.play_pressed();
        assert!(app.status.is_some());
        assert!(!app.pending.is_empty());

        app.select(Some(CATALOG[1].uri));
        assert_eq!(app.mount.uri(), Some(CATALOG[1].uri));
        assert!(app.status.is_none());
        assert!(app.pending.is_empty());
        assert_eq!(app.status_text(), "Paused");
    }

    #[test]
    fn test_reselecting_same_uri_keeps_status() {
        let mut app = App::new();
        app.select(Some(CATALOG[2].uri));
        app.apply_status(playing_status());
        app.select(Some(CATALOG[2].uri));
        assert_eq!(app.status_text(), "Playing");
    }

    #[test]
    fn test_play_pause_unmounted_is_noop() {
        let mut app = App::new();
        app.play_pressed();
        app.pause_pressed();
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_commands_drain_in_press_order() {
        let mut app = App::new();
        app.select(Some(CATALOG[0].uri));
        app.play_pressed();
        app.pause_pressed();
        app.play_pressed();
        assert_eq!(app.next_command(), Some(PlayerCommand::Play));
        assert_eq!(app.next_command(), Some(PlayerCommand::Pause));
        assert_eq!(app.next_command(), Some(PlayerCommand::Play));
        assert_eq!(app.next_command(), None);
    }

    #[test]
    fn test_status_replaced_wholesale() {
        let mut app = App::new();
        app.select(Some(CATALOG[0].uri));
        app.apply_status(playing_status());
        app.apply_status(PlaybackStatus::default());
        assert_eq!(app.status, Some(PlaybackStatus::default()));
        assert_eq!(app.status_text(), "Paused");
    }

    #[test]
    fn test_theme_double_toggle_restores() {
        let mut app = App::new();
        let before = app.dark;
        app.toggle_theme();
        assert_ne!(app.dark, before);
        app.toggle_theme();
        assert_eq!(app.dark, before);
    }

    #[test]
    fn test_picker_cursor_clamps_to_rows() {
        let mut app = App::new();
        app.picker.up();
        assert_eq!(app.picker.cursor, 0);
        for _ in 0..10 {
            app.picker.down();
        }
        // Last row is the final catalog entry, after the placeholder
        assert_eq!(app.picker.cursor, CATALOG.len());
    }

    #[test]
    fn test_picker_placeholder_row_maps_to_none() {
        let app = App::new();
        assert_eq!(app.picker.cursor, 0);
        assert!(app.picker.highlighted().is_none());
    }

    #[test]
    fn test_committing_placeholder_ejects() {
        let mut app = App::new();
        app.picker.down();
        app.select_highlighted();
        assert_eq!(app.mount.uri(), Some(CATALOG[0].uri));

        app.picker.up();
        app.select_highlighted();
        assert_eq!(app.mount, Mount::Unmounted);
    }

    #[test]
    fn test_key_bindings() {
        let mut app = App::new();
        assert!(app.handle_key(key(KeyCode::Down)));
        assert_eq!(app.picker.cursor, 1);
        assert!(app.handle_key(key(KeyCode::Enter)));
        assert_eq!(app.mount.uri(), Some(CATALOG[0].uri));
        assert!(app.handle_key(key(KeyCode::Char('p'))));
        assert_eq!(app.pending.front(), Some(&PlayerCommand::Play));
        assert!(app.handle_key(key(KeyCode::Char('s'))));
        assert_eq!(app.pending.back(), Some(&PlayerCommand::Pause));
        assert!(app.handle_key(key(KeyCode::Esc)));
        assert_eq!(app.mount, Mount::Unmounted);
        assert!(app.handle_key(key(KeyCode::Char('t'))));
        assert!(!app.dark);
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(!app.running);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(event));
        assert!(!app.running);
    }

    /// The end-to-end flow: select Oceans, play, status arrives, toggle theme.
    #[test]
    fn test_oceans_scenario() {
        let mut app = App::new();
        assert!(app.dark);
        assert_eq!(app.mount, Mount::Unmounted);

        // Select "Oceans,mp4" (last row, past the placeholder)
        app.picker.down();
        app.picker.down();
        app.picker.down();
        app.select_highlighted();
        assert_eq!(app.mount.uri(), Some("http://vjs.zencdn.net/v/oceans.mp4"));
        assert_eq!(app.status_text(), "Paused");

        // Press Play; eventually a playing status arrives
        app.play_pressed();
        assert_eq!(app.next_command(), Some(PlayerCommand::Play));
        app.apply_status(playing_status());
        assert_eq!(app.status_text(), "Playing");

        // Toggle theme; selection and status untouched
        app.toggle_theme();
        assert!(!app.dark);
        assert_eq!(app.mount.uri(), Some("http://vjs.zencdn.net/v/oceans.mp4"));
        assert_eq!(app.status_text(), "Playing");
    }
}
