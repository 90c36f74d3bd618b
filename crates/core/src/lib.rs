//! git-flowchart core library.
//!
//! Builds the git recovery decision tree as a plain node/edge graph, turns it
//! into Graphviz DOT and renders it to an image with the external `dot` tool.

pub mod config;
pub mod errors;
pub mod flowchart;
pub mod generate;
pub mod graph;
pub mod render;

// Re-exports for convenience.
pub use config::RenderConfig;
pub use errors::{CoreError, RenderError};
pub use flowchart::build_graph;
pub use generate::generate;
pub use graph::Graph;
pub use render::render;
