//! SVG Generation Module
//!
//! Primitives for drawing a knowledge graph:
//! - Colors, community palette and dark/light themes
//! - Text styles
//! - Shape primitives and arrow markers
//! - Document builder
//! - PNG rasterization

pub mod builder;
pub mod palette;
pub mod raster;
pub mod shapes;
pub mod typography;

pub use builder::{SvgBuilder, SvgElement};
pub use palette::{community_color, Color, GraphTheme, COMMUNITY_PALETTE};
pub use raster::svg_to_png;
pub use shapes::{ArrowMarker, Circle, Line, Path, PathCommand, Point, Rect, Text};
pub use typography::{FontFamily, FontWeight, TextAlign, TextStyle};
