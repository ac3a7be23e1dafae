//! Data structures for VidTUI
//!
//! The static video catalog and the playback status snapshot.

use std::fmt;
use std::time::Duration;

// =============================================================================
// Video Catalog
// =============================================================================

/// One pickable video entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSource {
    /// Human-readable label shown in the picker
    pub label: &'static str,
    /// Playback URI handed to the player
    pub uri: &'static str,
}

/// The fixed catalog: one progressive MP4, one HLS playlist, one MP4.
///
/// Constant for the process; the picker never shows anything else.
pub const CATALOG: &[VideoSource] = &[
    VideoSource {
        label: "Big buck bunny.mp4",
        uri: "http://d23dyxeqlo5psv.cloudfront.net/big_buck_bunny.mp4",
    },
    VideoSource {
        label: "Playlist.m3u8",
        uri: "https://bitdash-a.akamaihd.net/content/sintel/hls/playlist.m3u8",
    },
    VideoSource {
        label: "Oceans,mp4",
        uri: "http://vjs.zencdn.net/v/oceans.mp4",
    },
];

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

// =============================================================================
// Playback Status
// =============================================================================

/// Most recent playback state reported by the player
///
/// Replaced wholesale on every update; never merged field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackStatus {
    /// Whether playback is currently active
    pub playing: bool,
    /// Current position (not surfaced in the UI yet)
    pub position: Duration,
    /// Total duration, zero if unknown
    pub duration: Duration,
}

impl PlaybackStatus {
    /// The status word shown in the UI
    pub fn word(&self) -> &'static str {
        if self.playing {
            "Playing"
        } else {
            "Paused"
        }
    }

    /// Progress as 0.0-1.0, zero when duration is unknown
    pub fn progress(&self) -> f64 {
        let dur = self.duration.as_secs_f64();
        if dur > 0.0 {
            self.position.as_secs_f64() / dur
        } else {
            0.0
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

// =============================================================================
// Player Commands
// =============================================================================

/// Control operations the screen can queue for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
}
