//! Startup flags
//!
//! The app itself is purely interactive; the flags only shape startup.

use clap::Parser;

/// Terminal video picker driving mpv playback
#[derive(Debug, Parser)]
#[command(name = "vidtui", version, about)]
pub struct Cli {
    /// Start with the light theme (default is dark)
    #[arg(long)]
    pub light: bool,

    /// Player binary to launch (name on PATH or absolute path)
    #[arg(long, default_value = "mpv")]
    pub mpv: String,
}
