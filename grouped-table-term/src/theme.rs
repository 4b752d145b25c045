//! Colors used to paint the table.
//!
//! Theme colors are picked in OKLCH and converted to terminal RGB once, when
//! the theme is built.

use log::debug;
use palette::{IntoColor, Oklch, Srgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert an OKLCH color (lightness 0..1, chroma, hue in degrees).
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        let srgb: Srgb = Oklch::new(l, c, h).into_color();
        let (r, g, b) = srgb.into_format::<u8>().into_components();
        Self::new(r, g, b)
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub foreground: Rgb,
    /// Secondary text: empty message, inactive sort arrows, skeletons.
    pub muted: Rgb,
    pub border: Rgb,
    pub header: Rgb,
    /// Active sort arrow and checked boxes.
    pub accent: Rgb,
    /// Filter input background.
    pub surface: Rgb,
    /// Background of selected rows.
    pub selected: Rgb,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            background: Rgb::oklch(0.18, 0.0, 0.0),
            foreground: Rgb::oklch(0.92, 0.0, 0.0),
            muted: Rgb::oklch(0.6, 0.0, 0.0),
            border: Rgb::oklch(0.4, 0.0, 0.0),
            header: Rgb::oklch(0.97, 0.02, 250.0),
            accent: Rgb::oklch(0.72, 0.14, 250.0),
            surface: Rgb::oklch(0.26, 0.01, 250.0),
            selected: Rgb::oklch(0.3, 0.06, 250.0),
        }
    }

    /// Resolve a color token from a column's color callback or style.
    ///
    /// Accepts `#rrggbb`, the theme's own color names and a few common color
    /// names. Unknown tokens resolve to `None`.
    pub fn resolve(&self, token: &str) -> Option<Rgb> {
        if token.starts_with('#') {
            return Rgb::from_hex(token);
        }
        let color = match token.to_ascii_lowercase().as_str() {
            "background" => self.background,
            "foreground" => self.foreground,
            "muted" => self.muted,
            "border" => self.border,
            "header" => self.header,
            "accent" | "primary" => self.accent,
            "red" | "error" => Rgb::oklch(0.68, 0.19, 25.0),
            "orange" | "warning" => Rgb::oklch(0.76, 0.16, 60.0),
            "yellow" => Rgb::oklch(0.88, 0.16, 100.0),
            "green" | "success" => Rgb::oklch(0.74, 0.17, 145.0),
            "blue" | "info" => Rgb::oklch(0.68, 0.15, 250.0),
            "purple" => Rgb::oklch(0.66, 0.17, 305.0),
            "gray" | "grey" => self.muted,
            _ => {
                debug!("unknown color token '{token}'");
                return None;
            }
        };
        Some(color)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_tokens() {
        let theme = Theme::new();
        assert_eq!(theme.resolve("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(theme.resolve("#ff80"), None);
        assert_eq!(theme.resolve("#gg0000"), None);
    }

    #[test]
    fn test_named_tokens() {
        let theme = Theme::new();
        assert_eq!(theme.resolve("accent"), Some(theme.accent));
        assert_eq!(theme.resolve("Muted"), Some(theme.muted));
        assert!(theme.resolve("red").is_some());
        assert_eq!(theme.resolve("chartreuse-ish"), None);
    }

    #[test]
    fn test_oklch_extremes() {
        assert_eq!(Rgb::oklch(0.0, 0.0, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::oklch(1.0, 0.0, 0.0), Rgb::WHITE);
    }
}
