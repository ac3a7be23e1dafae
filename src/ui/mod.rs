//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first, one screen.

pub mod theme;

pub use theme::Theme;
