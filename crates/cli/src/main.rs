//! git-flowchart command-line tool.
//!
//! Renders the "wrong commit / file deleted" recovery flowchart with
//! Graphviz. Run with no arguments to write
//! `git_conflict_resolution_flowchart.png` to the working directory.

mod style;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use git_flowchart_core::config::RenderConfig;
use git_flowchart_core::errors::RenderError;
use git_flowchart_core::generate::{emit_dot, generate};
use git_flowchart_core::render::OutputFormat;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Render the git recovery flowchart to an image.
#[derive(Parser, Debug)]
#[command(name = "git-flowchart", version, about)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (png, svg, pdf, ...).
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Directory to write the image into.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Graphviz layout engine.
    #[arg(long)]
    engine: Option<String>,

    /// Path to the Graphviz `dot` executable.
    #[arg(long)]
    dot_binary: Option<String>,

    /// Do not keep the DOT source next to the image.
    #[arg(long)]
    no_source: bool,

    /// Print the DOT source to stdout instead of rendering.
    #[arg(
        long,
        conflicts_with_all = ["config", "format", "output_dir", "engine", "dot_binary", "no_source"]
    )]
    emit_dot: bool,

    /// Verbose logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the confirmation line.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style::error(&format!("Error: {:#}", e)));
            if let Some(RenderError::BinaryNotFound(binary)) = e.downcast_ref::<RenderError>() {
                eprintln!(
                    "  {}",
                    style::dim(&format!(
                        "'{}' is part of Graphviz (https://graphviz.org/download/)",
                        binary
                    ))
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.emit_dot {
        emit_dot(&mut out).context("failed to write DOT source")?;
        return out.flush().context("failed to flush stdout");
    }

    let config = resolve_config(&cli)?;
    debug!(?config, "resolved configuration");

    let image = generate(&config, &mut out).context("failed to render flowchart")?;
    debug!(path = %image.display(), "done");
    Ok(())
}

// ---------------------------------------------------------------------------
// Config helpers
// ---------------------------------------------------------------------------

/// Load the config file (if any) and apply flag overrides on top.
fn resolve_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load_from_file(path)
            .with_context(|| format!("failed to load configuration file {}", path.display()))?,
        None => RenderConfig::default(),
    };

    if let Some(format) = &cli.format {
        config.output.format = format.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(engine) = &cli.engine {
        config.graphviz.engine = engine.clone();
    }
    if let Some(binary) = &cli.dot_binary {
        config.graphviz.binary = binary.clone();
    }
    if cli.no_source {
        config.output.keep_source = false;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
