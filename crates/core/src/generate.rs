//! One-shot pipeline: build the flowchart, render it, report the result.

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::RenderConfig;
use crate::errors::RenderError;
use crate::flowchart::build_graph;
use crate::render::write_source;

/// Where [`generate`] will put the image for `config`.
pub fn output_path(config: &RenderConfig) -> PathBuf {
    config.output.image_path()
}

/// The line printed after a successful render.
pub fn confirmation_line(path: &std::path::Path) -> String {
    format!("✅ Flowchart generated: {}", path.display())
}

/// Build and render the flowchart, then write one confirmation line to `out`.
///
/// All or nothing: on error no source file is left behind and nothing is
/// written to `out`.
pub fn generate<W: Write>(config: &RenderConfig, out: &mut W) -> Result<PathBuf, RenderError> {
    let graph = build_graph();
    let image = output_path(config);

    info!(path = %image.display(), "rendering flowchart");
    config
        .graphviz
        .client()
        .render(&graph, &image, &config.output.format)?;

    if config.output.keep_source {
        if let Err(e) = write_source(&graph, &config.output.source_path()) {
            if let Err(rm) = std::fs::remove_file(&image) {
                warn!(path = %image.display(), error = %rm, "could not remove image");
            }
            return Err(e);
        }
    }

    writeln!(out, "{}", confirmation_line(&image)).map_err(|source| RenderError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    Ok(image)
}

/// Write the flowchart's DOT source to `out` without invoking Graphviz.
pub fn emit_dot<W: Write>(out: &mut W) -> std::io::Result<()> {
    build_graph().write_dot(out)
}
