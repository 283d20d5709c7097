//! Graph scene
//!
//! Turns a laid-out knowledge graph into an SVG document: edges with
//! arrowheads, node circles with hover text, labels and a legend.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::debug;

use super::styling::{style_nodes, EdgeWidth, NodeStyle, StyleConfig};
use crate::graph::KnowledgeGraph;
use crate::graph_layout::rescale_positions;
use crate::svg::{
    community_color, ArrowMarker, Circle, Color, FontWeight, GraphTheme, Line, Path, Point, Rect,
    SvgBuilder, SvgElement, Text, TextAlign, TextStyle,
};

/// Style size to pixel radius
pub const NODE_RADIUS_SCALE: f32 = 1.6;
/// Relative edge width to pixel stroke
pub const EDGE_STROKE_SCALE: f32 = 1.5;
/// Gap between parallel edges at their midpoint
const BOW_SPACING: f32 = 28.0;
/// Height of a self-loop above its node
const LOOP_SIZE: f32 = 22.0;
/// Space reserved for the title
const TITLE_BAND: f32 = 56.0;
const PADDING: f32 = 16.0;
const LABEL_FONT_SIZE: f32 = 11.0;
const EDGE_LABEL_FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 22.0;
const LEGEND_FONT_SIZE: f32 = 12.0;
const LEGEND_ROW: f32 = 20.0;
/// Legend rows before the remainder is summarized
const MAX_LEGEND_ENTRIES: usize = 12;
const ARROW_ID: &str = "arrow";

/// Rendering failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("graph is empty")]
    EmptyGraph,
}

/// Everything that shapes the final picture
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    pub title: String,
    pub theme: GraphTheme,
    pub style: StyleConfig,
    pub edge_width: EdgeWidth,
    /// Draw relation names along edges
    pub edge_labels: bool,
    /// Draw node ids next to nodes
    pub node_labels: bool,
    /// Draw the type (or community) legend
    pub legend: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1900,
            height: 1500,
            title: "Knowledge Graph".to_string(),
            theme: GraphTheme::default(),
            style: StyleConfig::default(),
            edge_width: EdgeWidth::Normal,
            edge_labels: false,
            node_labels: true,
            legend: true,
        }
    }
}

/// SVG renderer for knowledge graphs
pub struct GraphScene;

impl GraphScene {
    /// Draw the graph as an SVG document.
    ///
    /// Node positions may be in any coordinate system; they are fitted into
    /// the canvas below the title band.
    pub fn draw(graph: &KnowledgeGraph, settings: &RenderSettings) -> Result<String, RenderError> {
        if graph.is_empty() {
            return Err(RenderError::EmptyGraph);
        }

        let styles = style_nodes(graph, &settings.style);
        let radii: HashMap<&str, f32> = styles
            .iter()
            .map(|(id, style)| (id.as_str(), style.size as f32 * NODE_RADIUS_SCALE))
            .collect();
        let max_radius = radii.values().copied().fold(0.0_f32, f32::max);

        let width = settings.width as f32;
        let height = settings.height as f32;
        let margin = max_radius + PADDING;
        let top = TITLE_BAND + max_radius;
        let mut placed = graph.clone();
        rescale_positions(
            &mut placed,
            margin,
            top,
            (width - 2.0 * margin).max(1.0),
            (height - top - margin).max(1.0),
        );

        let centers: HashMap<&str, Point> = placed
            .nodes()
            .map(|n| (n.id.as_str(), Point::new(n.position.x, n.position.y)))
            .collect();

        let theme = &settings.theme;
        let stroke = settings.edge_width.value() * EDGE_STROKE_SCALE;
        let (edges, edge_labels) = Self::edge_elements(&placed, &centers, &radii, settings, stroke);

        let mut builder = SvgBuilder::new()
            .size(width, height)
            .background(theme.background)
            .title(&settings.title)
            .marker(ArrowMarker::new(ARROW_ID, theme.edge).with_size(8.0))
            .group("edges", edges);
        if settings.edge_labels {
            builder = builder.group("edge-labels", edge_labels);
        }

        let (nodes, labels) = Self::node_elements(&placed, &styles, &centers, &radii, settings);
        builder = builder.group("nodes", nodes);
        if settings.node_labels {
            builder = builder.group("labels", labels);
        }

        let title_style = TextStyle::new(TITLE_FONT_SIZE, FontWeight::Regular)
            .with_color(theme.text)
            .with_align(TextAlign::Middle);
        builder = builder.element(SvgElement::Text(
            Text::new(width / 2.0, TITLE_BAND * 0.65, &settings.title).with_style(title_style),
        ));

        if settings.legend {
            let legend = Self::legend_elements(graph, &settings.style, theme);
            if !legend.is_empty() {
                builder = builder.group("legend", legend);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            elements = builder.element_count(),
            "Drew graph scene"
        );
        Ok(builder.build())
    }

    fn edge_elements(
        graph: &KnowledgeGraph,
        centers: &HashMap<&str, Point>,
        radii: &HashMap<&str, f32>,
        settings: &RenderSettings,
        stroke: f32,
    ) -> (Vec<SvgElement>, Vec<SvgElement>) {
        let theme = &settings.theme;

        // Edges sharing an unordered endpoint pair are bowed apart
        let mut bundles: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        for edge in graph.edges() {
            *bundles.entry(pair_key(&edge.from, &edge.to)).or_insert(0) += 1;
        }
        let mut seen: BTreeMap<(&str, &str), usize> = BTreeMap::new();

        let label_style = TextStyle::new(EDGE_LABEL_FONT_SIZE, FontWeight::Regular)
            .with_color(theme.edge_label)
            .with_align(TextAlign::Middle)
            .with_halo(theme.background, 2.0);

        let mut shapes = Vec::new();
        let mut labels = Vec::new();
        for edge in graph.edges() {
            let (Some(&from), Some(&to)) = (centers.get(edge.from.as_str()), centers.get(edge.to.as_str()))
            else {
                continue;
            };
            let r_from = radii.get(edge.from.as_str()).copied().unwrap_or(0.0);
            let r_to = radii.get(edge.to.as_str()).copied().unwrap_or(0.0);

            let key = pair_key(&edge.from, &edge.to);
            let index = seen.entry(key).or_insert(0);
            let position = *index;
            *index += 1;

            let (shape, anchor) = if edge.is_self_loop() {
                self_loop(from, r_from, position, theme.edge, stroke)
            } else {
                let count = bundles.get(&key).copied().unwrap_or(1);
                let offset = (position as f32 - (count as f32 - 1.0) / 2.0) * BOW_SPACING;
                // Normal taken from the canonical direction so a→b and b→a
                // bow to opposite sides
                let (a, b) = if edge.from.as_str() <= edge.to.as_str() {
                    (from, to)
                } else {
                    (to, from)
                };
                connector(from, to, r_from, r_to, normal(a, b), offset, theme.edge, stroke)
            };
            shapes.push(shape);

            if let Some(relation) = &edge.label {
                labels.push(SvgElement::Text(
                    Text::new(anchor.x, anchor.y, relation).with_style(label_style.clone()),
                ));
            }
        }
        (shapes, labels)
    }

    fn node_elements(
        graph: &KnowledgeGraph,
        styles: &BTreeMap<String, NodeStyle>,
        centers: &HashMap<&str, Point>,
        radii: &HashMap<&str, f32>,
        settings: &RenderSettings,
    ) -> (Vec<SvgElement>, Vec<SvgElement>) {
        let theme = &settings.theme;
        let label_style = TextStyle::new(LABEL_FONT_SIZE, FontWeight::Bold)
            .with_color(theme.text)
            .with_align(TextAlign::Middle)
            .with_halo(theme.background, 2.5);

        // Important nodes are drawn last so they sit on top
        let mut order: Vec<_> = graph.nodes().collect();
        order.sort_by(|a, b| {
            a.importance
                .total_cmp(&b.importance)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut circles = Vec::with_capacity(order.len());
        let mut labels = Vec::with_capacity(order.len());
        for node in order {
            let (Some(style), Some(&center)) = (styles.get(&node.id), centers.get(node.id.as_str()))
            else {
                continue;
            };
            let radius = radii.get(node.id.as_str()).copied().unwrap_or(0.0);
            circles.push(SvgElement::Circle(
                Circle::new(center.x, center.y, radius)
                    .with_fill(style.color)
                    .with_stroke(theme.node_stroke, 1.0)
                    .with_title(&style.title),
            ));
            labels.push(SvgElement::Text(
                Text::new(
                    center.x,
                    center.y + radius + LABEL_FONT_SIZE + 2.0,
                    node.display_label(),
                )
                .with_style(label_style.clone()),
            ));
        }
        (circles, labels)
    }

    fn legend_elements(
        graph: &KnowledgeGraph,
        style: &StyleConfig,
        theme: &GraphTheme,
    ) -> Vec<SvgElement> {
        let entries = legend_entries(graph, style);
        if entries.is_empty() {
            return Vec::new();
        }

        let shown = entries.len().min(MAX_LEGEND_ENTRIES);
        let hidden = entries.len() - shown;
        let rows = shown + usize::from(hidden > 0);
        let longest = entries
            .iter()
            .take(shown)
            .map(|(name, _, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        let panel_width = 48.0 + longest as f32 * LEGEND_FONT_SIZE * 0.6;
        let panel_height = rows as f32 * LEGEND_ROW + 12.0;

        let x = PADDING;
        let y = TITLE_BAND;
        let text_style = TextStyle::new(LEGEND_FONT_SIZE, FontWeight::Regular).with_color(theme.text);

        let mut elements = vec![SvgElement::Rect(
            Rect::new(x, y, panel_width, panel_height)
                .with_radius(6.0)
                .with_fill(theme.panel),
        )];
        for (row, (name, color, count)) in entries.iter().take(shown).enumerate() {
            let cy = y + 16.0 + row as f32 * LEGEND_ROW;
            elements.push(SvgElement::Circle(
                Circle::new(x + 16.0, cy, 6.0)
                    .with_fill(*color)
                    .with_title(&format!("{name}: {count}")),
            ));
            elements.push(SvgElement::Text(
                Text::new(x + 30.0, cy + 4.0, &format!("{name} ({count})"))
                    .with_style(text_style.clone()),
            ));
        }
        if hidden > 0 {
            let cy = y + 16.0 + shown as f32 * LEGEND_ROW;
            elements.push(SvgElement::Text(
                Text::new(x + 30.0, cy + 4.0, &format!("+{hidden} more"))
                    .with_style(text_style),
            ));
        }
        elements
    }
}

/// Legend rows as (name, color, node count), most frequent first
pub fn legend_entries(graph: &KnowledgeGraph, style: &StyleConfig) -> Vec<(String, Color, usize)> {
    let mut counts: BTreeMap<String, (Color, usize)> = BTreeMap::new();
    for node in graph.nodes() {
        let (name, color) = match node.community {
            Some(community) if style.color_by_community => {
                (format!("Community {community}"), community_color(community))
            }
            _ => (
                node.data.entity_type.clone(),
                style.type_color(&node.data.entity_type),
            ),
        };
        counts.entry(name).or_insert((color, 0)).1 += 1;
    }

    let mut entries: Vec<_> = counts
        .into_iter()
        .map(|(name, (color, count))| (name, color, count))
        .collect();
    entries.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    entries
}

fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Unit normal of the segment a→b
fn normal(a: Point, b: Point) -> Point {
    let len = a.distance(&b);
    if len <= f32::EPSILON {
        return Point::new(0.0, -1.0);
    }
    Point::new(-(b.y - a.y) / len, (b.x - a.x) / len)
}

/// Edge between two distinct nodes; returns the shape and its label anchor
#[allow(clippy::too_many_arguments)]
fn connector(
    from: Point,
    to: Point,
    r_from: f32,
    r_to: f32,
    normal: Point,
    offset: f32,
    color: Color,
    stroke: f32,
) -> (SvgElement, Point) {
    let mid = from.midpoint(&to);
    if offset.abs() <= f32::EPSILON {
        let start = from.towards(&to, r_from);
        let end = to.towards(&from, r_to);
        let line = Line::between(start, end)
            .with_stroke(color)
            .with_stroke_width(stroke)
            .with_marker_end(ARROW_ID);
        return (SvgElement::Line(line), mid);
    }

    // Control point placed so the curve's apex sits `offset` from the chord
    let control = Point::new(mid.x + normal.x * offset * 2.0, mid.y + normal.y * offset * 2.0);
    let start = from.towards(&control, r_from);
    let end = to.towards(&control, r_to);
    let path = Path::new()
        .move_to(start.x, start.y)
        .quad_to(control.x, control.y, end.x, end.y)
        .with_stroke(color, stroke)
        .with_marker_end(ARROW_ID);
    let apex = Point::new(
        0.25 * start.x + 0.5 * control.x + 0.25 * end.x,
        0.25 * start.y + 0.5 * control.y + 0.25 * end.y,
    );
    (SvgElement::Path(path), apex)
}

/// Loop above a node; repeated loops grow outward
fn self_loop(
    center: Point,
    radius: f32,
    index: usize,
    color: Color,
    stroke: f32,
) -> (SvgElement, Point) {
    let size = LOOP_SIZE * (1.0 + index as f32 * 0.6);
    let dx = radius * 0.5;
    let dy = radius * 0.866;
    let start = Point::new(center.x + dx, center.y - dy);
    let end = Point::new(center.x - dx, center.y - dy);
    let lift = center.y - radius - size * 1.6;
    let path = Path::new()
        .move_to(start.x, start.y)
        .cubic_to(
            center.x + dx + size,
            lift,
            center.x - dx - size,
            lift,
            end.x,
            end.y,
        )
        .with_stroke(color, stroke)
        .with_marker_end(ARROW_ID);
    let apex = Point::new(center.x, center.y - radius - size * 1.2 - 4.0);
    (SvgElement::Path(path), apex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Entity, Node, Position};

    fn graph(edges: &[(&str, &str, &str)]) -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        for (i, id) in ["ada", "babbage", "london"].iter().enumerate() {
            let entity_type = if *id == "london" { "city" } else { "person" };
            let mut node = Node::new(*id, Entity::new(entity_type));
            node.position = Position::new(i as f32, (i % 2) as f32);
            graph.add_node(node);
        }
        for (from, to, relation) in edges {
            graph.add_edge(Edge::new(*from, *to, ()).with_label(*relation));
        }
        graph
    }

    #[test]
    fn test_empty_graph_is_an_error() {
        let err = GraphScene::draw(&KnowledgeGraph::new(), &RenderSettings::default()).unwrap_err();
        assert_eq!(err, RenderError::EmptyGraph);
        assert_eq!(err.to_string(), "graph is empty");
    }

    #[test]
    fn test_draw_basic_scene() {
        let g = graph(&[("ada", "babbage", "worked_with"), ("ada", "london", "lived_in")]);
        let svg = GraphScene::draw(&g, &RenderSettings::default()).unwrap();

        assert!(svg.contains("width=\"1900\" height=\"1500\""));
        assert!(svg.contains("fill=\"#222222\""));
        assert!(svg.contains("<title>Knowledge Graph</title>"));
        assert!(svg.contains("<marker id=\"arrow\""));
        assert_eq!(svg.matches("<line ").count(), 2);
        assert!(svg.contains("<title>ID: ada\nType: person</title>"));
        assert!(svg.contains(">london</text>"));
        // Relation labels are off by default
        assert!(!svg.contains("worked_with"));
        assert!(svg.contains("<g id=\"legend\">"));
    }

    #[test]
    fn test_edge_labels_and_parallel_edges() {
        let g = graph(&[
            ("ada", "babbage", "worked_with"),
            ("ada", "babbage", "corresponded_with"),
            ("babbage", "ada", "admired"),
        ]);
        let settings = RenderSettings {
            edge_labels: true,
            ..Default::default()
        };
        let svg = GraphScene::draw(&g, &settings).unwrap();
        assert!(svg.contains(">worked_with</text>"));
        assert!(svg.contains(">admired</text>"));
        // Three edges in one bundle: one straight, two bowed
        assert_eq!(svg.matches("<line ").count(), 1);
        assert_eq!(svg.matches(" Q ").count(), 2);
    }

    #[test]
    fn test_self_loop_drawn_as_curve() {
        let g = graph(&[("ada", "ada", "reflects_on")]);
        let svg = GraphScene::draw(&g, &RenderSettings::default()).unwrap();
        assert_eq!(svg.matches(" C ").count(), 1);
        assert!(!svg.contains("<line "));
    }

    #[test]
    fn test_light_theme_and_thin_edges() {
        let g = graph(&[("ada", "babbage", "knows")]);
        let settings = RenderSettings {
            theme: GraphTheme::light(),
            edge_width: EdgeWidth::Thin,
            legend: false,
            node_labels: false,
            title: "Tom & Jerry".into(),
            ..Default::default()
        };
        let svg = GraphScene::draw(&g, &settings).unwrap();
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>"));
        assert!(svg.contains("stroke=\"#696969\" stroke-width=\"0.75\""));
        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(!svg.contains("<g id=\"legend\">"));
        assert!(!svg.contains("<g id=\"labels\">"));
    }

    #[test]
    fn test_nodes_stay_on_canvas() {
        let mut g = graph(&[("ada", "babbage", "knows")]);
        g.get_node_mut("london").unwrap().position = Position::new(-500.0, 9000.0);
        let settings = RenderSettings {
            width: 400,
            height: 300,
            ..Default::default()
        };
        let svg = GraphScene::draw(&g, &settings).unwrap();
        for chunk in svg.split("<circle cx=\"").skip(1) {
            let cx: f32 = chunk.split('"').next().unwrap().parse().unwrap();
            assert!((0.0..=400.0).contains(&cx), "cx={cx}");
        }
    }

    #[test]
    fn test_legend_entries_by_type_and_community() {
        let mut g = graph(&[]);
        let entries = legend_entries(&g, &StyleConfig::default());
        assert_eq!(entries[0].0, "person");
        assert_eq!(entries[0].2, 2);
        assert_eq!(entries[1].0, "city");

        for node in g.nodes_mut() {
            node.community = Some(0);
        }
        let style = StyleConfig {
            color_by_community: true,
            ..Default::default()
        };
        let entries = legend_entries(&g, &style);
        assert_eq!(entries, vec![("Community 0".to_string(), community_color(0), 3)]);
    }

    #[test]
    fn test_normal_is_perpendicular() {
        let n = normal(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(n, Point::new(0.0, 1.0));
        assert_eq!(normal(Point::new(1.0, 1.0), Point::new(1.0, 1.0)), Point::new(0.0, -1.0));
    }
}
