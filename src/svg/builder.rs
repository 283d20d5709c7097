//! SVG Builder
//!
//! Fluent API for assembling a graph drawing into one SVG document.

use super::palette::{Color, GraphTheme};
use super::shapes::{xml_escape, ArrowMarker, Circle, Line, Path, Rect, Text};

/// SVG element types
#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    Rect(Rect),
    Circle(Circle),
    Line(Line),
    Path(Path),
    Text(Text),
    Group { id: String, elements: Vec<SvgElement> },
}

impl SvgElement {
    /// Render to SVG string
    pub fn to_svg(&self) -> String {
        match self {
            Self::Rect(r) => r.to_svg(),
            Self::Circle(c) => c.to_svg(),
            Self::Line(l) => l.to_svg(),
            Self::Path(p) => p.to_svg(),
            Self::Text(t) => t.to_svg(),
            Self::Group { id, elements } => {
                let children: String = elements.iter().map(SvgElement::to_svg).collect();
                format!("<g id=\"{}\">{}</g>", xml_escape(id), children)
            }
        }
    }
}

/// SVG document builder
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    width: f32,
    height: f32,
    background: Color,
    elements: Vec<SvgElement>,
    markers: Vec<ArrowMarker>,
    title: Option<String>,
}

impl SvgBuilder {
    /// Create an 800x600 builder on the default theme background
    pub fn new() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background: GraphTheme::default().background,
            elements: Vec::new(),
            markers: Vec::new(),
            title: None,
        }
    }

    /// Set the canvas size
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background fill
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set the document title
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add an arrow marker definition
    pub fn marker(mut self, marker: ArrowMarker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Add an element directly
    pub fn element(mut self, element: SvgElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Add a group of elements
    pub fn group(mut self, id: &str, elements: Vec<SvgElement>) -> Self {
        self.elements.push(SvgElement::Group {
            id: id.to_string(),
            elements,
        });
        self
    }

    /// Number of top-level elements added so far
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Build the SVG document
    pub fn build(self) -> String {
        let mut svg = String::new();

        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">\n",
            w = self.width,
            h = self.height
        ));

        if let Some(title) = &self.title {
            svg.push_str(&format!("  <title>{}</title>\n", xml_escape(title)));
        }

        if !self.markers.is_empty() {
            svg.push_str("  <defs>\n");
            for marker in &self.markers {
                svg.push_str(&format!("    {}\n", marker.to_svg_def()));
            }
            svg.push_str("  </defs>\n");
        }

        svg.push_str(&format!(
            "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            self.background.to_css_hex()
        ));

        for element in &self.elements {
            svg.push_str(&format!("  {}\n", element.to_svg()));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self::new()
    }
}
