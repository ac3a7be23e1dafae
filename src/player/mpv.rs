//! mpv playback handle over JSON IPC
//!
//! Spawns mpv bound to one uri with `--input-ipc-server`, subscribes to
//! the `pause`, `time-pos` and `duration` properties, and delivers
//! status snapshots over a channel. `play()`/`pause()` write through a
//! mutex-guarded socket half, so commands hit the wire in call order.
//!
//! Playback failures inside mpv (dead URL, decode errors) are not
//! surfaced here; the process just idles or exits and the surface stays
//! on its last reported status.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;
use tokio::process::{Child, Command};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::models::PlaybackStatus;

/// Distinguishes socket paths when one screen remounts repeatedly
static SOCKET_SEQ: AtomicU64 = AtomicU64::new(0);

/// Errors from player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("Timed out waiting for the player IPC socket at {0}")]
    ConnectTimeout(String),
    #[error("Player IPC write failed: {0}")]
    Ipc(std::io::Error),
}

// =============================================================================
// IPC wire format
// =============================================================================

/// One line received from the mpv IPC socket
///
/// Responses carry `error`/`request_id`, events carry `event` plus
/// property fields. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct IpcMessage {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

fn set_pause_command(paused: bool) -> String {
    json!({ "command": ["set_property", "pause", paused] }).to_string()
}

fn observe_command(id: u64, property: &str) -> String {
    json!({ "command": ["observe_property", id, property] }).to_string()
}

// =============================================================================
// Status folding
// =============================================================================

/// Folds property-change events into the running status snapshot
///
/// Starts paused at zero, matching the `--pause` spawn. Each relevant
/// event produces a complete new snapshot; everything else is ignored.
#[derive(Debug, Clone)]
struct StatusTracker {
    paused: bool,
    position: Duration,
    duration: Duration,
}

impl StatusTracker {
    fn new() -> Self {
        Self {
            paused: true,
            position: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    fn snapshot(&self) -> PlaybackStatus {
        PlaybackStatus {
            playing: !self.paused,
            position: self.position,
            duration: self.duration,
        }
    }

    /// Consume one IPC line; Some(snapshot) if it changed playback state
    fn fold(&mut self, line: &str) -> Option<PlaybackStatus> {
        let msg: IpcMessage = match serde_json::from_str(line) {
            Ok(msg) => msg,
            Err(err) => {
                log::debug!("unparseable ipc line: {err}");
                return None;
            }
        };

        match msg.event.as_deref() {
            Some("property-change") => match msg.name.as_deref() {
                Some("pause") => {
                    self.paused = msg.data.as_ref().and_then(|d| d.as_bool())?;
                    Some(self.snapshot())
                }
                Some("time-pos") => {
                    // null while nothing is loaded; keep the old position
                    let secs = msg.data.as_ref().and_then(|d| d.as_f64())?;
                    self.position = Duration::from_secs_f64(secs.max(0.0));
                    Some(self.snapshot())
                }
                Some("duration") => {
                    let secs = msg.data.as_ref().and_then(|d| d.as_f64())?;
                    self.duration = Duration::from_secs_f64(secs.max(0.0));
                    Some(self.snapshot())
                }
                _ => None,
            },
            // Playback stopped; report a paused snapshot
            Some("end-file") => {
                self.paused = true;
                Some(self.snapshot())
            }
            _ => None,
        }
    }
}

// =============================================================================
// Player handle
// =============================================================================

/// Live mpv process bound to exactly one uri
///
/// Dropping the handle kills the process and removes the socket file;
/// that is the whole unmount story.
#[derive(Debug)]
pub struct MpvPlayer {
    child: Child,
    writer: Mutex<OwnedWriteHalf>,
    socket_path: PathBuf,
    uri: String,
}

impl MpvPlayer {
    /// Spawn mpv for `uri` and connect to its IPC socket
    ///
    /// The player starts paused. Returns the handle plus the channel on
    /// which status snapshots arrive.
    pub async fn spawn(
        uri: &str,
        binary: &str,
    ) -> Result<(Self, UnboundedReceiver<PlaybackStatus>), PlayerError> {
        let socket_path = std::env::temp_dir().join(format!(
            "vidtui-mpv-{}-{}.sock",
            std::process::id(),
            SOCKET_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        let mut cmd = Command::new(binary);
        cmd.arg(format!("--input-ipc-server={}", socket_path.display()))
            .arg("--pause")
            .arg("--force-window=immediate")
            .arg("--no-terminal")
            .arg("--")
            .arg(uri);
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        cmd.kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlayerError::NotFound(binary.to_string())
            } else {
                PlayerError::StartFailed(e)
            }
        })?;

        let stream = connect_with_retry(&socket_path).await?;
        let (read_half, mut write_half) = stream.into_split();

        for (id, property) in [(1, "pause"), (2, "time-pos"), (3, "duration")] {
            write_line(&mut write_half, &observe_command(id, property))
                .await
                .map_err(PlayerError::Ipc)?;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(read_events(read_half, tx));

        Ok((
            Self {
                child,
                writer: Mutex::new(write_half),
                socket_path,
                uri: uri.to_string(),
            },
            rx,
        ))
    }

    /// The uri this surface is bound to
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Resume playback
    pub async fn play(&self) -> Result<(), PlayerError> {
        self.set_paused(false).await
    }

    /// Pause playback
    pub async fn pause(&self) -> Result<(), PlayerError> {
        self.set_paused(true).await
    }

    async fn set_paused(&self, paused: bool) -> Result<(), PlayerError> {
        // The FIFO mutex keeps wire order equal to call order
        let mut writer = self.writer.lock().await;
        write_line(&mut writer, &set_pause_command(paused))
            .await
            .map_err(PlayerError::Ipc)
    }

    /// Whether a player binary can be found on the system
    pub async fn is_available(binary: &str) -> bool {
        if binary.starts_with('/') {
            return Path::new(binary).exists();
        }
        Command::new("which")
            .arg(binary)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

async fn write_line(writer: &mut OwnedWriteHalf, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await
}

/// mpv creates the socket shortly after startup; poll until it accepts
async fn connect_with_retry(path: &Path) -> Result<UnixStream, PlayerError> {
    const ATTEMPTS: u32 = 40;
    const DELAY: Duration = Duration::from_millis(50);

    for _ in 0..ATTEMPTS {
        match UnixStream::connect(path).await {
            Ok(stream) => return Ok(stream),
            Err(_) => sleep(DELAY).await,
        }
    }
    Err(PlayerError::ConnectTimeout(path.display().to_string()))
}

/// Reader task: one snapshot per relevant event until the socket closes
async fn read_events(read_half: OwnedReadHalf, tx: UnboundedSender<PlaybackStatus>) {
    let mut lines = BufReader::new(read_half).lines();
    let mut tracker = StatusTracker::new();

    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(snapshot) = tracker.fold(&line) {
            if tx.send(snapshot).is_err() {
                // Receiver gone, the surface was unmounted
                break;
            }
        }
    }
}
