//! Text styles for graph labels

use super::palette::Color;
use std::fmt;

/// Font family options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// Sans-serif stack available on most systems
    #[default]
    SansSerif,
    /// Monospace stack
    Monospace,
}

impl FontFamily {
    /// Get the CSS font-family value
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::SansSerif => "DejaVu Sans, Helvetica, Arial, sans-serif",
            Self::Monospace => "DejaVu Sans Mono, Menlo, Consolas, monospace",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_css())
    }
}

/// Font weight options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    /// Regular (400)
    #[default]
    Regular,
    /// Bold (700)
    Bold,
}

impl FontWeight {
    /// Get the numeric weight value
    pub fn value(&self) -> u16 {
        match self {
            Self::Regular => 400,
            Self::Bold => 700,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAlign {
    /// Get the SVG text-anchor value
    pub fn as_svg_anchor(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_svg_anchor())
    }
}

/// A text style definition
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family
    pub family: FontFamily,
    /// Font size in pixels
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Text color
    pub color: Color,
    /// Text alignment
    pub align: TextAlign,
    /// Outline drawn behind glyphs to keep labels readable over edges
    pub halo: Option<(Color, f32)>,
}

impl TextStyle {
    /// Create a new text style
    pub fn new(size: f32, weight: FontWeight) -> Self {
        Self {
            family: FontFamily::default(),
            size,
            weight,
            color: Color::BLACK,
            align: TextAlign::default(),
            halo: None,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the alignment
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Draw a halo of `color` and `width` behind the glyphs
    pub fn with_halo(mut self, color: Color, width: f32) -> Self {
        self.halo = Some((color, width));
        self
    }

    /// Generate SVG style attributes
    pub fn to_svg_attrs(&self) -> String {
        let mut attrs = format!(
            "font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\"",
            self.family,
            self.size,
            self.weight,
            self.color.to_css_hex()
        );

        if self.color.a < 255 {
            attrs.push_str(&format!(" fill-opacity=\"{:.2}\"", self.color.opacity()));
        }

        if self.align != TextAlign::Start {
            attrs.push_str(&format!(" text-anchor=\"{}\"", self.align));
        }

        if let Some((color, width)) = self.halo {
            attrs.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\" paint-order=\"stroke\"",
                color.to_css_hex(),
                width
            ));
        }

        attrs
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(14.0, FontWeight::Regular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_weight_values() {
        assert_eq!(FontWeight::Regular.value(), 400);
        assert_eq!(FontWeight::Bold.to_string(), "700");
    }

    #[test]
    fn test_text_style_attrs() {
        let style = TextStyle::new(8.0, FontWeight::Bold)
            .with_color(Color::WHITE)
            .with_align(TextAlign::Middle);
        let attrs = style.to_svg_attrs();
        assert!(attrs.contains("font-size=\"8\""));
        assert!(attrs.contains("font-weight=\"700\""));
        assert!(attrs.contains("fill=\"#FFFFFF\""));
        assert!(attrs.contains("text-anchor=\"middle\""));
        assert!(!attrs.contains("stroke="));
    }

    #[test]
    fn test_text_style_start_align_omitted() {
        let attrs = TextStyle::default().to_svg_attrs();
        assert!(!attrs.contains("text-anchor"));
    }

    #[test]
    fn test_text_style_halo() {
        let attrs = TextStyle::default()
            .with_halo(Color::BLACK, 2.0)
            .to_svg_attrs();
        assert!(attrs.contains("stroke=\"#000000\""));
        assert!(attrs.contains("paint-order=\"stroke\""));
    }
}
