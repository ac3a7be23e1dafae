//! External player control
//!
//! The playback surface is an mpv process; this module owns spawning it,
//! talking to its JSON IPC socket and folding its property events into
//! status snapshots.

pub mod mpv;

pub use mpv::{MpvPlayer, PlayerError};
