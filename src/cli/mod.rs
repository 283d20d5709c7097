//! CLI command logic - extracted for testability
//!
//! Argument types shared by the binary, flag-over-config merging and the
//! plain-text formatting of reports. Printing lives in main.rs.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::KgvizConfig;
use crate::graph::CentralityMetric;
use crate::pipeline::{GraphSummary, PipelineReport};
use crate::render::EdgeWidth;

// ============================================================================
// Arguments
// ============================================================================

/// Flags of the `render` command; each one overrides the config file
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Input JSON file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// PNG file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the SVG source to this file
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Layout algorithm (spring, circular, kamada_kawai, random, shell, spectral)
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Keep only the N highest-degree nodes (0 = all)
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Size nodes by this metric (degree, betweenness, closeness, eigenvector, pagerank, connection_count)
    #[arg(long)]
    pub size_metric: Option<CentralityMetric>,

    /// Color nodes by detected community
    #[arg(long)]
    pub color_by_community: bool,

    /// Edge stroke (normal, thin)
    #[arg(long)]
    pub edge_width: Option<EdgeWidth>,

    /// Draw relation names on edges
    #[arg(long)]
    pub edge_labels: bool,

    /// Color theme (dark, light)
    #[arg(long)]
    pub theme: Option<String>,

    /// Title drawn above the graph
    #[arg(long)]
    pub title: Option<String>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Layout seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep only these entity types (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,
}

/// Output format of the `stats` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StatsFormat {
    #[default]
    Text,
    Json,
}

// ============================================================================
// Flag Merging
// ============================================================================

/// Apply command-line flags on top of file configuration
pub fn apply_render_args(config: &mut KgvizConfig, args: &RenderArgs) {
    if let Some(input) = &args.input {
        config.input.path = input.clone();
    }
    if let Some(output) = &args.output {
        config.output.png = output.clone();
    }
    if let Some(svg) = &args.svg {
        config.output.svg = Some(svg.clone());
    }
    if let Some(layout) = &args.layout {
        config.layout.algorithm = layout.clone();
    }
    if let Some(max_nodes) = args.max_nodes {
        config.input.max_nodes = max_nodes;
    }
    if let Some(metric) = args.size_metric {
        config.style.size_metric = Some(metric);
    }
    if args.color_by_community {
        config.style.color_by_community = true;
    }
    if let Some(edge_width) = args.edge_width {
        config.style.edge_width = edge_width;
    }
    if args.edge_labels {
        config.style.edge_labels = true;
    }
    if let Some(theme) = &args.theme {
        config.style.theme = theme.clone();
    }
    if let Some(title) = &args.title {
        config.output.title = title.clone();
    }
    if let Some(width) = args.width {
        config.output.width = width;
    }
    if let Some(height) = args.height {
        config.output.height = height;
    }
    if let Some(seed) = args.seed {
        config.layout.seed = seed;
    }
    if !args.types.is_empty() {
        config.input.types = args
            .types
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
    }
}

// ============================================================================
// Report Formatting
// ============================================================================

/// Plain-text summary of a render run
pub fn format_report(report: &PipelineReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Input:      {}", report.input.display());
    let _ = writeln!(
        out,
        "Rows:       {} loaded, {} after cleaning",
        report.records_loaded, report.rows_after_cleaning
    );
    let _ = writeln!(
        out,
        "Graph:      {} nodes, {} edges",
        report.total_nodes, report.total_edges
    );
    if report.displayed_nodes < report.total_nodes {
        let _ = writeln!(
            out,
            "Displayed:  {} nodes, {} edges",
            report.displayed_nodes, report.displayed_edges
        );
    }
    if let Some(communities) = report.communities {
        let _ = writeln!(out, "Communities: {communities}");
    }
    let _ = writeln!(out, "Layout:     {}", report.layout);
    out
}

/// Plain-text summary of `stats`
pub fn format_summary(summary: &GraphSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Nodes: {}  Edges: {}  Self-loops: {}",
        summary.nodes, summary.edges, summary.self_loops
    );
    let _ = writeln!(
        out,
        "Density: {:.4}  Weakly connected: {}",
        summary.density,
        if summary.weakly_connected { "yes" } else { "no" }
    );
    if let Some(communities) = summary.communities {
        let _ = writeln!(out, "Communities: {communities}");
    }

    let _ = writeln!(out, "\nEntity types:");
    for (entity_type, count) in sorted_counts(&summary.types) {
        let _ = writeln!(out, "  {entity_type:<24} {count}");
    }

    let _ = writeln!(out, "\nRelations:");
    for (relation, count) in sorted_counts(&summary.relations) {
        let _ = writeln!(out, "  {relation:<24} {count}");
    }

    for (metric, ranked) in &summary.top_nodes {
        let label = metric
            .parse::<CentralityMetric>()
            .map(|m| m.label().to_string())
            .unwrap_or_else(|_| metric.clone());
        let _ = writeln!(out, "\nTop by {label}:");
        for (rank, node) in ranked.iter().enumerate() {
            let _ = writeln!(out, "  {:>2}. {:<24} {:.4}", rank + 1, node.id, node.value);
        }
    }
    out
}

fn sorted_counts(counts: &std::collections::BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut rows: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RankedNode;
    use std::collections::BTreeMap;

    #[test]
    fn test_apply_render_args_defaults_keep_config() {
        let mut config = KgvizConfig::default();
        apply_render_args(&mut config, &RenderArgs::default());
        assert_eq!(config, KgvizConfig::default());
    }

    #[test]
    fn test_apply_render_args_overrides() {
        let mut config = KgvizConfig::default();
        let args = RenderArgs {
            input: Some(PathBuf::from("data.json")),
            output: Some(PathBuf::from("out.png")),
            svg: Some(PathBuf::from("out.svg")),
            layout: Some("circular".into()),
            max_nodes: Some(25),
            size_metric: Some(CentralityMetric::PageRank),
            color_by_community: true,
            edge_width: Some(EdgeWidth::Thin),
            edge_labels: true,
            theme: Some("light".into()),
            title: Some("Mine".into()),
            width: Some(800),
            height: Some(600),
            seed: Some(9),
            types: vec![" Person ".into(), "".into(), "City".into()],
        };
        apply_render_args(&mut config, &args);

        assert_eq!(config.input.path, PathBuf::from("data.json"));
        assert_eq!(config.output.png, PathBuf::from("out.png"));
        assert_eq!(config.output.svg, Some(PathBuf::from("out.svg")));
        assert_eq!(config.layout.algorithm, "circular");
        assert_eq!(config.input.max_nodes, 25);
        assert_eq!(config.style.size_metric, Some(CentralityMetric::PageRank));
        assert!(config.style.color_by_community);
        assert_eq!(config.style.edge_width, EdgeWidth::Thin);
        assert!(config.style.edge_labels);
        assert_eq!(config.style.theme, "light");
        assert_eq!(config.output.title, "Mine");
        assert_eq!((config.output.width, config.output.height), (800, 600));
        assert_eq!(config.layout.seed, 9);
        assert_eq!(config.input.types, vec!["person", "city"]);
    }

    #[test]
    fn test_format_report_hides_unfiltered_display_line() {
        let report = PipelineReport {
            input: PathBuf::from("assets/sample_data.json"),
            records_loaded: 10,
            rows_after_cleaning: 9,
            total_nodes: 12,
            total_edges: 9,
            displayed_nodes: 12,
            displayed_edges: 9,
            communities: Some(3),
            layout: "spring".into(),
            png: PathBuf::from("knowledge_graph.png"),
            svg: None,
            validation_passed: true,
        };
        let text = format_report(&report);
        assert!(text.contains("10 loaded, 9 after cleaning"));
        assert!(text.contains("Communities: 3"));
        assert!(!text.contains("Displayed"));

        let limited = PipelineReport {
            displayed_nodes: 5,
            displayed_edges: 4,
            ..report
        };
        assert!(format_report(&limited).contains("Displayed:  5 nodes, 4 edges"));
    }

    #[test]
    fn test_format_summary() {
        let mut types = BTreeMap::new();
        types.insert("city".to_string(), 1);
        types.insert("person".to_string(), 3);
        let mut top_nodes = BTreeMap::new();
        top_nodes.insert(
            "degree".to_string(),
            vec![RankedNode {
                id: "marie curie".into(),
                value: 1.0,
            }],
        );
        let summary = GraphSummary {
            nodes: 4,
            edges: 3,
            self_loops: 0,
            density: 0.25,
            weakly_connected: true,
            communities: None,
            types,
            relations: BTreeMap::new(),
            top_nodes,
        };

        let text = format_summary(&summary);
        assert!(text.contains("Nodes: 4  Edges: 3"));
        assert!(text.contains("Weakly connected: yes"));
        assert!(text.find("person").unwrap() < text.find("city").unwrap());
        assert!(text.contains("Top by Degree Centrality:"));
        assert!(text.contains("1. marie curie"));
    }
}
