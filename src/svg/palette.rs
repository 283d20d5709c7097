//! Colors and graph themes

use std::fmt;
use std::str::FromStr;

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a new color with full opacity
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color with custom opacity
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex string ("#1E90FF", "1E90FF" or short "#FFF")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
                Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            _ => None,
        }
    }

    /// Convert to CSS hex string (with #)
    pub fn to_css_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Opacity as 0.0 - 1.0
    pub fn opacity(&self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Apply opacity (0.0 - 1.0) to this color
    pub fn with_opacity(&self, opacity: f32) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..*self
        }
    }

    /// Lighten the color by a percentage (0.0 - 1.0)
    pub fn lighten(&self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (f32::from(c) + (255.0 - f32::from(c)) * amount) as u8;
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
            a: self.a,
        }
    }

    /// Darken the color by a percentage (0.0 - 1.0)
    pub fn darken(&self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (f32::from(c) * (1.0 - amount)) as u8;
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
            a: self.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css_hex())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid hex color '{s}'"))
    }
}

/// Colors cycled through when nodes are colored by community
pub const COMMUNITY_PALETTE: [Color; 12] = [
    Color::rgb(0xE6, 0x19, 0x4B), // Red
    Color::rgb(0x3C, 0xB4, 0x4B), // Green
    Color::rgb(0xFF, 0xE1, 0x19), // Yellow
    Color::rgb(0x43, 0x63, 0xD8), // Blue
    Color::rgb(0xF5, 0x82, 0x31), // Orange
    Color::rgb(0x91, 0x1E, 0xB4), // Purple
    Color::rgb(0x42, 0xD4, 0xF4), // Cyan
    Color::rgb(0xF0, 0x32, 0xE6), // Magenta
    Color::rgb(0xBF, 0xEF, 0x45), // Lime
    Color::rgb(0xFA, 0xBE, 0xD4), // Pink
    Color::rgb(0x46, 0x99, 0x90), // Teal
    Color::rgb(0x9A, 0x63, 0x24), // Brown
];

/// Color for a community id (wraps around the palette)
#[must_use]
pub fn community_color(community: usize) -> Color {
    COMMUNITY_PALETTE[community % COMMUNITY_PALETTE.len()]
}

/// Background, text and edge colors for a rendered graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphTheme {
    /// Theme name (`dark` or `light`)
    pub name: &'static str,
    /// Canvas background
    pub background: Color,
    /// Title, labels and legend text
    pub text: Color,
    /// Edge strokes and arrowheads
    pub edge: Color,
    /// Relation label text
    pub edge_label: Color,
    /// Node outline
    pub node_stroke: Color,
    /// Legend panel fill
    pub panel: Color,
}

impl GraphTheme {
    /// Dark canvas: `#222222` background, white text, light grey edges
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(0x22, 0x22, 0x22),
            text: Color::WHITE,
            edge: Color::rgb(0xD3, 0xD3, 0xD3),
            edge_label: Color::rgb(0xBE, 0xBE, 0xBE),
            node_stroke: Color::rgb(0x11, 0x11, 0x11),
            panel: Color::rgba(0x33, 0x33, 0x33, 0xE6),
        }
    }

    /// Light canvas: white background, black text, dim grey edges
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::WHITE,
            text: Color::BLACK,
            edge: Color::rgb(0x69, 0x69, 0x69),
            edge_label: Color::rgb(0x50, 0x50, 0x50),
            node_stroke: Color::rgb(0x44, 0x44, 0x44),
            panel: Color::rgba(0xF5, 0xF5, 0xF5, 0xE6),
        }
    }

    /// Look a theme up by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

impl Default for GraphTheme {
    fn default() -> Self {
        Self::dark()
    }
}
