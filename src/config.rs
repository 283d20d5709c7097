use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{CentralityMetric, LayoutAlgorithm, LayoutConfig};
use crate::graph_analytics::DEFAULT_DAMPING;
use crate::render::{
    default_type_colors, EdgeWidth, RenderSettings, StyleConfig, DEFAULT_NODE_SIZE,
    DEFAULT_NODE_SIZE_MULTIPLIER,
};
use crate::svg::{Color, GraphTheme};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILENAME: &str = "kgviz.toml";

/// kgviz configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KgvizConfig {
    /// Configuration file version
    pub version: String,

    /// Where the triples come from and which part of the graph is kept
    pub input: InputConfig,

    /// Image files and canvas
    pub output: OutputConfig,

    /// Node and edge appearance
    pub style: StyleSettings,

    /// Node placement
    pub layout: LayoutSettings,

    /// Metrics and community detection
    pub analytics: AnalyticsConfig,
}

impl Default for KgvizConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            style: StyleSettings::default(),
            layout: LayoutSettings::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON file with relationship records or a nodes/edges document
    pub path: PathBuf,

    /// Keep only these entity types (empty = all)
    pub types: Vec<String>,

    /// Keep only the N highest-degree nodes (0 = no limit)
    pub max_nodes: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/sample_data.json"),
            types: vec![],
            max_nodes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// PNG file to write
    pub png: PathBuf,

    /// Also write the SVG source here
    pub svg: Option<PathBuf>,

    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Title drawn above the graph
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            png: PathBuf::from("knowledge_graph.png"),
            svg: None,
            width: 1900,
            height: 1500,
            title: "Knowledge Graph".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Color theme (dark, light)
    pub theme: String,

    /// Color for types without an entry
    pub default_node_color: String,

    /// Base node size
    pub default_node_size: f64,

    /// Metric value to size factor
    pub node_size_multiplier: f64,

    /// Metric that drives node size
    pub size_metric: Option<CentralityMetric>,

    /// Color nodes by detected community instead of type
    pub color_by_community: bool,

    /// Edge stroke preset (normal, thin)
    pub edge_width: EdgeWidth,

    /// Draw relation names along edges
    pub edge_labels: bool,

    /// Draw node ids
    pub node_labels: bool,

    /// Draw the type legend
    pub legend: bool,

    /// Lowercase entity type to hex color
    pub node_colors: BTreeMap<String, String>,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            default_node_color: "#B0C4DE".to_string(),
            default_node_size: DEFAULT_NODE_SIZE,
            node_size_multiplier: DEFAULT_NODE_SIZE_MULTIPLIER,
            size_metric: None,
            color_by_community: false,
            edge_width: EdgeWidth::Normal,
            edge_labels: false,
            node_labels: true,
            legend: true,
            node_colors: default_type_colors(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Algorithm (spring, circular, kamada_kawai, random, shell, spectral)
    pub algorithm: String,

    /// Iterations for iterative layouts
    pub iterations: usize,

    /// Seed for reproducible placement
    pub seed: u64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            algorithm: "spring".to_string(),
            iterations: 50,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Metrics stored on every node
    pub centrality_metrics: Vec<CentralityMetric>,

    /// Run Louvain community detection
    pub communities: bool,

    /// PageRank damping factor
    pub pagerank_damping: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            centrality_metrics: CentralityMetric::DEFAULTS.to_vec(),
            communities: true,
            pagerank_damping: DEFAULT_DAMPING,
        }
    }
}

impl KgvizConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `path` when given, else `kgviz.toml` in `dir` if present, else defaults
    pub fn load_or_default(path: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILENAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Using config from working directory");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Reject values no run could use
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.output.width == 0 || self.output.height == 0 {
            bail!(
                "canvas must be at least 1x1 pixels (got {}x{})",
                self.output.width,
                self.output.height
            );
        }
        if !(0.0..1.0).contains(&self.analytics.pagerank_damping) {
            bail!(
                "pagerank_damping must be in [0, 1) (got {})",
                self.analytics.pagerank_damping
            );
        }
        if !self.style.default_node_size.is_finite() || self.style.default_node_size <= 0.0 {
            bail!("default_node_size must be positive");
        }
        if !self.style.node_size_multiplier.is_finite() {
            bail!("node_size_multiplier must be finite");
        }
        self.theme()?;
        self.style_config()?;
        Ok(())
    }

    /// Resolve the configured theme
    pub fn theme(&self) -> anyhow::Result<GraphTheme> {
        GraphTheme::from_name(&self.style.theme)
            .with_context(|| format!("unknown theme '{}' (expected dark or light)", self.style.theme))
    }

    /// Node styling inputs with colors parsed
    pub fn style_config(&self) -> anyhow::Result<StyleConfig> {
        let mut type_colors = BTreeMap::new();
        for (entity_type, hex) in &self.style.node_colors {
            let color = Color::from_hex(hex)
                .with_context(|| format!("invalid color '{hex}' for type '{entity_type}'"))?;
            type_colors.insert(entity_type.to_lowercase(), color);
        }
        let default_color = Color::from_hex(&self.style.default_node_color).with_context(|| {
            format!("invalid default_node_color '{}'", self.style.default_node_color)
        })?;

        Ok(StyleConfig {
            type_colors,
            default_color,
            default_size: self.style.default_node_size,
            size_multiplier: self.style.node_size_multiplier,
            size_metric: self.style.size_metric,
            color_by_community: self.style.color_by_community,
        })
    }

    /// Layout parameters sized to the output canvas
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            algorithm: LayoutAlgorithm::from_name(&self.layout.algorithm),
            width: self.output.width as f32,
            height: self.output.height as f32,
            iterations: self.layout.iterations,
            seed: self.layout.seed,
        }
    }

    /// Everything the scene needs to draw
    pub fn render_settings(&self) -> anyhow::Result<RenderSettings> {
        Ok(RenderSettings {
            width: self.output.width,
            height: self.output.height,
            title: self.output.title.clone(),
            theme: self.theme()?,
            style: self.style_config()?,
            edge_width: self.style.edge_width,
            edge_labels: self.style.edge_labels,
            node_labels: self.style.node_labels,
            legend: self.style.legend,
        })
    }

    /// Metrics to compute: the configured list plus the size metric
    pub fn metrics_to_compute(&self) -> Vec<CentralityMetric> {
        let mut metrics = self.analytics.centrality_metrics.clone();
        if let Some(metric) = self.style.size_metric {
            if !metrics.contains(&metric) {
                metrics.push(metric);
            }
        }
        metrics
    }
}
