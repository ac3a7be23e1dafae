//! Light and dark themes for VidTUI
//!
//! Two complete style sets selected by the theme flag. Each render pass
//! resolves the flag to one palette; nothing else depends on it.

use ratatui::style::{Color, Modifier, Style};

/// A complete set of presentational colors
///
/// Both palettes define every field, so flipping the flag swaps all
/// theme-dependent attributes at once.
#[derive(Debug, PartialEq, Eq)]
pub struct Theme {
    /// Screen background
    pub background: Color,
    /// Card/panel background
    pub surface: Color,
    /// Normal border
    pub border: Color,
    /// Focused border
    pub border_focused: Color,
    /// Body text
    pub text: Color,
    /// Muted/secondary text
    pub dim: Color,
    /// Buttons, selection highlight
    pub primary: Color,
    /// Keybind hints
    pub accent: Color,
}

/// Dark palette (the default): near-black container, dark grey card
pub const DARK: Theme = Theme {
    background: Color::Rgb(0x22, 0x22, 0x22),
    surface: Color::Rgb(0x33, 0x33, 0x33),
    border: Color::Rgb(0x55, 0x55, 0x55),
    border_focused: Color::Rgb(0xbb, 0x86, 0xfc),
    text: Color::Rgb(0xff, 0xff, 0xff),
    dim: Color::Rgb(0x9e, 0x9e, 0x9e),
    primary: Color::Rgb(0xbb, 0x86, 0xfc),
    accent: Color::Rgb(0xff, 0xd5, 0x4f),
};

/// Light palette: white container, off-white card
pub const LIGHT: Theme = Theme {
    background: Color::Rgb(0xff, 0xff, 0xff),
    surface: Color::Rgb(0xf9, 0xf9, 0xf9),
    border: Color::Rgb(0xcc, 0xcc, 0xcc),
    border_focused: Color::Rgb(0x62, 0x00, 0xee),
    text: Color::Rgb(0x1b, 0x1b, 0x1b),
    dim: Color::Rgb(0x75, 0x75, 0x75),
    primary: Color::Rgb(0x62, 0x00, 0xee),
    accent: Color::Rgb(0x9c, 0x27, 0xb0),
};

impl Theme {
    /// Resolve the theme flag to a palette
    pub fn of(dark: bool) -> &'static Theme {
        if dark {
            &DARK
        } else {
            &LIGHT
        }
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Normal border
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Focused border
    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for picker items (normal state)
    pub fn list_item(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for the highlighted picker item
    pub fn list_item_selected(&self) -> Style {
        Style::default()
            .fg(self.surface)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Status line style
    pub fn status(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Button-like emphasis (Play/Pause hints)
    pub fn button(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Keybinding hint style
    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Keybinding description style
    pub fn keybind_desc(&self) -> Style {
        Style::default().fg(self.dim)
    }
}

// =============================================================================
// Color Utilities
// =============================================================================

/// Relative luminance of a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, 1 (same) to 21 (black/white)
/// WCAG AA requires >= 4.5:1 for normal text, >= 3:1 for large text
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Whether a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Whether a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from a ratatui Color (Rgb variant only)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    #[test]
    fn test_all_theme_colors_are_rgb() {
        for theme in [&DARK, &LIGHT] {
            assert!(color_to_rgb(theme.background).is_some());
            assert!(color_to_rgb(theme.surface).is_some());
            assert!(color_to_rgb(theme.border).is_some());
            assert!(color_to_rgb(theme.border_focused).is_some());
            assert!(color_to_rgb(theme.text).is_some());
            assert!(color_to_rgb(theme.dim).is_some());
            assert!(color_to_rgb(theme.primary).is_some());
            assert!(color_to_rgb(theme.accent).is_some());
        }
    }

    #[test]
    fn test_palettes_match_screen_styles() {
        // Dark: #222 container, #333 card, white text
        assert_eq!(rgb(DARK.background), (0x22, 0x22, 0x22));
        assert_eq!(rgb(DARK.surface), (0x33, 0x33, 0x33));
        assert_eq!(rgb(DARK.text), (0xff, 0xff, 0xff));
        // Light: #fff container, #f9f9f9 card
        assert_eq!(rgb(LIGHT.background), (0xff, 0xff, 0xff));
        assert_eq!(rgb(LIGHT.surface), (0xf9, 0xf9, 0xf9));
    }

    #[test]
    fn test_flag_selects_palette() {
        assert_eq!(Theme::of(true), &DARK);
        assert_eq!(Theme::of(false), &LIGHT);
        // Double toggle lands back on the same set
        let flag = true;
        assert_eq!(Theme::of(!(!flag)), Theme::of(flag));
    }

    #[test]
    fn test_palettes_are_distinct() {
        assert_ne!(&DARK, &LIGHT);
        assert_ne!(DARK.background, LIGHT.background);
        assert_ne!(DARK.text, LIGHT.text);
    }

    #[test]
    fn test_text_contrast_both_themes() {
        for theme in [&DARK, &LIGHT] {
            let surface = rgb(theme.surface);
            let text = rgb(theme.text);
            let ratio = contrast_ratio(text, surface);
            assert!(
                meets_wcag_aa(text, surface),
                "Text on surface should meet WCAG AA (got {:.2}:1)",
                ratio
            );
        }
    }

    #[test]
    fn test_primary_contrast_both_themes() {
        for theme in [&DARK, &LIGHT] {
            let bg = rgb(theme.background);
            let primary = rgb(theme.primary);
            let ratio = contrast_ratio(primary, bg);
            assert!(
                meets_wcag_aa_large(primary, bg),
                "Primary on background should meet WCAG AA for large text (got {:.2}:1)",
                ratio
            );
        }
    }

    #[test]
    fn test_dim_contrast_both_themes() {
        for theme in [&DARK, &LIGHT] {
            let bg = rgb(theme.background);
            let dim = rgb(theme.dim);
            let ratio = contrast_ratio(dim, bg);
            assert!(
                meets_wcag_aa_large(dim, bg),
                "Dim text should stay readable (got {:.2}:1)",
                ratio
            );
        }
    }

    #[test]
    fn test_relative_luminance_black() {
        let lum = relative_luminance(0, 0, 0);
        assert!((lum - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_relative_luminance_white() {
        let lum = relative_luminance(255, 255, 255);
        assert!((lum - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((100, 100, 100), (100, 100, 100));
        assert!((ratio - 1.0).abs() < 0.001);
    }
}
