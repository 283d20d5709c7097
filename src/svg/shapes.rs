//! SVG Shape Primitives
//!
//! Circles for entities, lines and paths for relations, text for labels.

use super::palette::Color;
use super::typography::TextStyle;

/// Point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point `distance` along the direction towards `other`
    pub fn towards(&self, other: &Point, distance: f32) -> Point {
        let len = self.distance(other);
        if len <= f32::EPSILON {
            return *self;
        }
        Point::new(
            self.x + (other.x - self.x) / len * distance,
            self.y + (other.y - self.y) / len * distance,
        )
    }
}

/// Stroke or fill attributes, with opacity when the color is translucent
fn paint_attr(name: &str, color: &Color) -> String {
    if color.a < 255 {
        format!(
            " {name}=\"{}\" {name}-opacity=\"{:.2}\"",
            color.to_css_hex(),
            color.opacity()
        )
    } else {
        format!(" {name}=\"{}\"", color.to_css_hex())
    }
}

/// A rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub position: Point,
    pub width: f32,
    pub height: f32,
    /// Corner radius (0 for sharp corners)
    pub corner_radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Point::new(x, y),
            width,
            height,
            corner_radius: 0.0,
            fill: None,
            stroke: None,
            stroke_width: 1.0,
        }
    }

    /// Set corner radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set fill color
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set stroke
    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    /// Get center point
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        let mut attrs = format!(
            "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            self.position.x, self.position.y, self.width, self.height
        );

        if self.corner_radius > 0.0 {
            attrs.push_str(&format!(" rx=\"{}\"", self.corner_radius));
        }

        match &self.fill {
            Some(fill) => attrs.push_str(&paint_attr("fill", fill)),
            None => attrs.push_str(" fill=\"none\""),
        }

        if let Some(stroke) = &self.stroke {
            attrs.push_str(&paint_attr("stroke", stroke));
            attrs.push_str(&format!(" stroke-width=\"{}\"", self.stroke_width));
        }

        format!("<rect {attrs}/>")
    }
}

/// A circle, optionally carrying a hover tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    /// Tooltip emitted as a `<title>` child
    pub title: Option<String>,
}

impl Circle {
    /// Create a new circle
    pub fn new(cx: f32, cy: f32, r: f32) -> Self {
        Self {
            center: Point::new(cx, cy),
            radius: r,
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            title: None,
        }
    }

    /// Set fill color
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set stroke
    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    /// Set the hover tooltip
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Check if a point is inside the circle
    pub fn contains(&self, point: &Point) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        let mut attrs = format!(
            "cx=\"{}\" cy=\"{}\" r=\"{}\"",
            self.center.x, self.center.y, self.radius
        );

        match &self.fill {
            Some(fill) => attrs.push_str(&paint_attr("fill", fill)),
            None => attrs.push_str(" fill=\"none\""),
        }

        if let Some(stroke) = &self.stroke {
            attrs.push_str(&paint_attr("stroke", stroke));
            attrs.push_str(&format!(" stroke-width=\"{}\"", self.stroke_width));
        }

        match &self.title {
            Some(title) => format!("<circle {attrs}><title>{}</title></circle>", xml_escape(title)),
            None => format!("<circle {attrs}/>"),
        }
    }
}

/// A line segment
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub stroke: Color,
    pub stroke_width: f32,
    /// Dash array (for dashed lines)
    pub dash_array: Option<String>,
    /// Id of the marker drawn at the end
    pub marker_end: Option<String>,
}

impl Line {
    /// Create a new line
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
            stroke: Color::BLACK,
            stroke_width: 1.0,
            dash_array: None,
            marker_end: None,
        }
    }

    /// Line between two points
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Set stroke color
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.stroke = color;
        self
    }

    /// Set stroke width
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set dash pattern
    pub fn with_dash(mut self, pattern: &str) -> Self {
        self.dash_array = Some(pattern.to_string());
        self
    }

    /// End the line with the marker `id`
    pub fn with_marker_end(mut self, id: &str) -> Self {
        self.marker_end = Some(id.to_string());
        self
    }

    /// Get the length of the line
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        let mut attrs = format!(
            "x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
            self.start.x, self.start.y, self.end.x, self.end.y
        );
        attrs.push_str(&paint_attr("stroke", &self.stroke));
        attrs.push_str(&format!(" stroke-width=\"{}\"", self.stroke_width));

        if let Some(dash) = &self.dash_array {
            attrs.push_str(&format!(" stroke-dasharray=\"{dash}\""));
        }
        if let Some(marker) = &self.marker_end {
            attrs.push_str(&format!(" marker-end=\"url(#{marker})\""));
        }

        format!("<line {attrs}/>")
    }
}

/// SVG path commands
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    /// Move to (x, y)
    MoveTo(f32, f32),
    /// Line to (x, y)
    LineTo(f32, f32),
    /// Quadratic curve to (x, y) with control point (cx, cy)
    QuadraticTo { cx: f32, cy: f32, x: f32, y: f32 },
    /// Cubic curve to (x, y) with control points
    CubicTo {
        cx1: f32,
        cy1: f32,
        cx2: f32,
        cy2: f32,
        x: f32,
        y: f32,
    },
    /// Close path
    Close,
}

impl PathCommand {
    /// Convert to SVG path data string
    pub fn to_svg(&self) -> String {
        match self {
            Self::MoveTo(x, y) => format!("M {x} {y}"),
            Self::LineTo(x, y) => format!("L {x} {y}"),
            Self::QuadraticTo { cx, cy, x, y } => format!("Q {cx} {cy} {x} {y}"),
            Self::CubicTo {
                cx1,
                cy1,
                cx2,
                cy2,
                x,
                y,
            } => format!("C {cx1} {cy1} {cx2} {cy2} {x} {y}"),
            Self::Close => "Z".to_string(),
        }
    }
}

/// A path shape
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    /// Id of the marker drawn at the end
    pub marker_end: Option<String>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            marker_end: None,
        }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    /// Quadratic curve to a point
    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::QuadraticTo { cx, cy, x, y });
        self
    }

    /// Cubic curve to a point
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            cx1,
            cy1,
            cx2,
            cy2,
            x,
            y,
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Set fill color
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set stroke
    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }

    /// End the path with the marker `id`
    pub fn with_marker_end(mut self, id: &str) -> Self {
        self.marker_end = Some(id.to_string());
        self
    }

    /// Get the path data string
    pub fn to_path_data(&self) -> String {
        self.commands
            .iter()
            .map(PathCommand::to_svg)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        let mut attrs = format!("d=\"{}\"", self.to_path_data());

        match &self.fill {
            Some(fill) => attrs.push_str(&paint_attr("fill", fill)),
            None => attrs.push_str(" fill=\"none\""),
        }

        if let Some(stroke) = &self.stroke {
            attrs.push_str(&paint_attr("stroke", stroke));
            attrs.push_str(&format!(" stroke-width=\"{}\"", self.stroke_width));
        }
        if let Some(marker) = &self.marker_end {
            attrs.push_str(&format!(" marker-end=\"url(#{marker})\""));
        }

        format!("<path {attrs}/>")
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

/// A text element
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Point,
    pub content: String,
    pub style: TextStyle,
}

impl Text {
    /// Create a new text element
    pub fn new(x: f32, y: f32, content: &str) -> Self {
        Self {
            position: Point::new(x, y),
            content: content.to_string(),
            style: TextStyle::default(),
        }
    }

    /// Set the text style
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Render to SVG element
    pub fn to_svg(&self) -> String {
        format!(
            "<text x=\"{}\" y=\"{}\" {}>{}</text>",
            self.position.x,
            self.position.y,
            self.style.to_svg_attrs(),
            xml_escape(&self.content)
        )
    }
}

/// Escape XML special characters
///
/// Characters outside the XML 1.0 `Char` production are dropped.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Arrow marker for edge endings
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowMarker {
    /// Marker ID
    pub id: String,
    /// Arrow color
    pub color: Color,
    /// Arrow size in stroke-width units
    pub size: f32,
}

impl ArrowMarker {
    /// Create a new arrow marker
    pub fn new(id: &str, color: Color) -> Self {
        Self {
            id: id.to_string(),
            color,
            size: 6.0,
        }
    }

    /// Set the arrow size
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Render to SVG marker definition
    ///
    /// The tip sits exactly on the line end, so edges should stop at the
    /// target node's boundary.
    pub fn to_svg_def(&self) -> String {
        format!(
            r#"<marker id="{}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="{}" markerHeight="{}" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z"{}/></marker>"#,
            self.id,
            self.size,
            self.size,
            paint_attr("fill", &self.color)
        )
    }
}
