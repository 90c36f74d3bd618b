//! Rendering through the external Graphviz toolchain.

pub mod format;
pub mod graphviz;

use std::path::Path;

pub use format::OutputFormat;
pub use graphviz::{write_source, GraphvizClient};

use crate::errors::RenderError;
use crate::graph::Graph;

/// Render `graph` to `output_path` with the default `dot` binary and engine.
pub fn render(graph: &Graph, output_path: &Path, format: &str) -> Result<(), RenderError> {
    let format: OutputFormat = format.parse()?;
    GraphvizClient::default().render(graph, output_path, &format)
}
