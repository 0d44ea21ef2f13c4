use serde::{Deserialize, Serialize};

/// Alpha used by the default stroke and fill
pub const DEFAULT_ALPHA: u8 = 155;

/// Default outline width in pixels
pub const DEFAULT_STROKE_WIDTH: f32 = 5.0;

/// 8-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const MIDNIGHT_BLUE: Color = Color::rgb(25, 25, 112);
    pub const ALICE_BLUE: Color = Color::rgb(240, 248, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::argb(0, 255, 255, 255);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha as a fraction in `[0, 1]`
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// `#rrggbb`, alpha excluded
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` or `#aarrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

/// How consecutive outline segments are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Bevel,
    #[default]
    Round,
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Bevel => "bevel",
            LineJoin::Round => "round",
        }
    }
}

/// Outline pen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f32,
    pub line_join: LineJoin,
    pub color: Color,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: DEFAULT_STROKE_WIDTH,
            line_join: LineJoin::Round,
            color: Color::MIDNIGHT_BLUE.with_alpha(DEFAULT_ALPHA),
        }
    }
}

/// Interior brush
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            color: Color::ALICE_BLUE.with_alpha(DEFAULT_ALPHA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let stroke = Stroke::default();
        assert_eq!(stroke.width, 5.0);
        assert_eq!(stroke.line_join, LineJoin::Round);
        assert_eq!(stroke.color, Color::argb(155, 25, 25, 112));

        let fill = Fill::default();
        assert_eq!(fill.color, Color::argb(155, 240, 248, 255));
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::MIDNIGHT_BLUE.to_hex(), "#191970");
        assert_eq!(Color::from_hex("#191970"), Some(Color::MIDNIGHT_BLUE));
        assert_eq!(
            Color::from_hex("9bf0f8ff"),
            Some(Color::argb(155, 240, 248, 255))
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zz0000"), None);
    }

    #[test]
    fn test_line_join_serde() {
        let join: LineJoin = serde_json::from_str("\"bevel\"").unwrap();
        assert_eq!(join, LineJoin::Bevel);
    }
}
