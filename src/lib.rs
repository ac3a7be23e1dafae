//! VidTUI - terminal video picker with external mpv playback
//!
//! One screen: pick a video URI from a fixed list, play or pause it,
//! watch the status line, flip the light/dark theme. Decoding and
//! rendering belong to mpv; this crate only coordinates view state
//! and drives the player over its JSON IPC socket.
//!
//! # Modules
//!
//! - `models` - Video catalog and playback status types
//! - `player` - mpv process handle and IPC plumbing
//! - `ui` - TUI themes and rendering helpers
//! - `app` - Screen state and key handling
//! - `cli` - Startup flags

pub mod app;
pub mod cli;
pub mod models;
pub mod player;
pub mod ui;

// Re-export commonly used types
pub use app::{App, Mount};
pub use models::{PlaybackStatus, PlayerCommand, VideoSource};
pub use player::{MpvPlayer, PlayerError};
pub use ui::Theme;
