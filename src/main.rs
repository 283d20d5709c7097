use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kgviz::cli::{apply_render_args, format_report, format_summary, RenderArgs, StatsFormat};
use kgviz::config::{KgvizConfig, DEFAULT_CONFIG_FILENAME};
use kgviz::pipeline::{self, KgvizPipeline};

#[derive(Parser)]
#[command(name = "kgviz")]
#[command(version, about = "Render knowledge graphs from JSON relationship triples", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file (defaults to ./kgviz.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the graph to PNG (the default command)
    Render(RenderArgs),

    /// Print graph statistics and top nodes per metric
    Stats {
        /// Input JSON file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = StatsFormat::Text)]
        format: StatsFormat,

        /// Nodes listed per metric
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Check that the input loads and yields a graph
    Validate {
        /// Input JSON file
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[arg(default_value = DEFAULT_CONFIG_FILENAME)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("kgviz v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Init { path, force }) => cmd_init(&path, force),
        Some(Commands::Render(args)) => cmd_render(cli.config.as_deref(), &args),
        None => cmd_render(cli.config.as_deref(), &RenderArgs::default()),
        Some(Commands::Stats { input, format, top }) => {
            cmd_stats(cli.config.as_deref(), input, format, top)
        }
        Some(Commands::Validate { input }) => cmd_validate(cli.config.as_deref(), input),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<KgvizConfig> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    KgvizConfig::load_or_default(path, &cwd)
}

fn cmd_render(config_path: Option<&Path>, args: &RenderArgs) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    apply_render_args(&mut config, args);

    let report = pipeline::run(&config)?;

    print!("{}", format_report(&report));
    if let Some(svg) = &report.svg {
        println!("{} SVG saved to {}", "✓".bright_green(), svg.display());
    }
    println!(
        "{} Graph saved to {}",
        "✓".bright_green(),
        report.png.display().to_string().cyan()
    );
    Ok(())
}

fn cmd_stats(
    config_path: Option<&Path>,
    input: Option<PathBuf>,
    format: StatsFormat,
    top: usize,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(input) = input {
        config.input.path = input;
    }

    let summary = pipeline::analyze(&config, top)?;
    match format {
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        StatsFormat::Text => {
            println!("{}", "Knowledge Graph Statistics".bright_cyan().bold());
            println!("{}", "=".repeat(50));
            print!("{}", format_summary(&summary));
        }
    }
    Ok(())
}

fn cmd_validate(config_path: Option<&Path>, input: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(input) = input {
        config.input.path = input;
    }

    let ctx = KgvizPipeline::validation().run(config)?;
    let records = ctx.dataset.as_ref().map_or(0, |d| d.records.len());

    println!(
        "{} {} is valid",
        "✓".bright_green(),
        ctx.config.input.path.display().to_string().cyan()
    );
    println!("  Records:        {records}");
    println!("  After cleaning: {}", ctx.triples.len());
    if ctx.triples.len() < records {
        println!(
            "  {} {} row(s) dropped as incomplete or duplicate",
            "!".bright_yellow(),
            records - ctx.triples.len()
        );
    }
    println!(
        "  Graph:          {} nodes, {} edges",
        ctx.total_nodes, ctx.total_edges
    );
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    KgvizConfig::default().save(path)?;
    println!(
        "{} Created configuration: {}",
        "✓".bright_green(),
        path.display().to_string().cyan()
    );
    Ok(())
}
