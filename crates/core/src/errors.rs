//! Error types for the git-flowchart core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

/// Structural violations in a [`Graph`](crate::graph::Graph).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A node with this identifier is already present.
    #[error("duplicate node identifier '{0}'")]
    DuplicateNode(String),

    /// An edge endpoint does not name a node in the graph.
    #[error("edge {source_id} -> {target_id} references unknown node '{missing}'")]
    UnknownNode {
        source_id: String,
        target_id: String,
        missing: String,
    },
}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

/// Failures from the Graphviz toolchain or the filesystem while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The Graphviz executable was not found on `$PATH`.
    #[error("graphviz binary not found: {0}")]
    BinaryNotFound(String),

    /// The Graphviz executable exited with a non-zero status.
    #[error("graphviz command failed (exit {exit_code}): {stderr}")]
    CommandFailed { exit_code: i32, stderr: String },

    /// The requested output format is not one we hand to Graphviz.
    #[error("unsupported output format '{0}'")]
    UnsupportedFormat(String),

    /// Graphviz reported success but no file appeared at the output path.
    #[error("graphviz produced no output at '{}'", .0.display())]
    MissingOutput(PathBuf),

    /// The graph failed structural validation before rendering.
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),

    /// Talking to the Graphviz child process failed.
    #[error("graphviz process '{binary}' failed to {action}: {source}")]
    ProcessIo {
        binary: String,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Reading, writing or removing an output file failed.
    #[error("render I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = GraphError::DuplicateNode("Q".into());
        assert_eq!(err.to_string(), "duplicate node identifier 'Q'");

        let err = GraphError::UnknownNode {
            source_id: "Q".into(),
            target_id: "NOPE".into(),
            missing: "NOPE".into(),
        };
        assert_eq!(
            err.to_string(),
            "edge Q -> NOPE references unknown node 'NOPE'"
        );

        let err = RenderError::UnsupportedFormat("bogus".into());
        assert_eq!(err.to_string(), "unsupported output format 'bogus'");

        let err = RenderError::CommandFailed {
            exit_code: 2,
            stderr: "Format: \"xyz\" not recognized".into(),
        };
        assert!(err.to_string().contains("exit 2"));

        let err = RenderError::Io {
            path: PathBuf::from("/nonexistent/out.png"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/nonexistent/out.png"));
    }

    #[test]
    fn test_core_error_from_subsystem() {
        let render_err = RenderError::BinaryNotFound("dot".into());
        let core_err: CoreError = render_err.into();
        assert!(matches!(core_err, CoreError::Render(_)));

        let graph_err = GraphError::DuplicateNode("PUSH".into());
        let render_err: RenderError = graph_err.into();
        assert!(matches!(render_err, RenderError::InvalidGraph(_)));
    }
}
