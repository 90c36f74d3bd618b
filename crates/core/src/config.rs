//! TOML-based render configuration.
//!
//! Every field has a default, so running without a config file reproduces
//! the stock diagram: `./git_conflict_resolution_flowchart.png` via `dot`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::flowchart::FLOWCHART_NAME;
use crate::render::{GraphvizClient, OutputFormat};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Where and how the image is written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Graphviz executable settings.
    #[serde(default)]
    pub graphviz: GraphvizConfig,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the files are written to (default: working directory).
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File name without extension.
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Image format; also the file extension.
    #[serde(default)]
    pub format: OutputFormat,

    /// Also write the DOT source as `<directory>/<file_stem>`.
    #[serde(default = "default_true")]
    pub keep_source: bool,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_file_stem() -> String {
    FLOWCHART_NAME.into()
}
fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_stem: default_file_stem(),
            format: OutputFormat::default(),
            keep_source: true,
        }
    }
}

impl OutputConfig {
    /// Path of the rendered image.
    pub fn image_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.file_stem, self.format))
    }

    /// Path of the DOT source file.
    pub fn source_path(&self) -> PathBuf {
        self.directory.join(&self.file_stem)
    }
}

// ---------------------------------------------------------------------------
// Graphviz
// ---------------------------------------------------------------------------

/// Graphviz executable and layout engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphvizConfig {
    /// Executable name or path (default `dot`).
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Layout engine passed as `-K` (default `dot`).
    #[serde(default = "default_engine")]
    pub engine: String,
}

fn default_binary() -> String {
    "dot".into()
}
fn default_engine() -> String {
    "dot".into()
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            engine: default_engine(),
        }
    }
}

impl GraphvizConfig {
    pub fn client(&self) -> GraphvizClient {
        GraphvizClient::new(&self.binary, &self.engine)
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl RenderConfig {
    /// Load a [`RenderConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: RenderConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    /// Validate that all fields are sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let stem = &self.output.file_stem;
        if stem.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.file_stem".into(),
                detail: "file stem must not be empty".into(),
            });
        }
        if stem.contains('/') || stem.contains('\\') || stem == "." || stem == ".." {
            return Err(ConfigError::InvalidValue {
                field: "output.file_stem".into(),
                detail: format!("'{}' must be a bare file name; use output.directory", stem),
            });
        }
        if self.graphviz.binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "graphviz.binary".into(),
                detail: "binary must not be empty".into(),
            });
        }
        let engine = &self.graphviz.engine;
        if engine.is_empty() || !engine.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::InvalidValue {
                field: "graphviz.engine".into(),
                detail: format!("'{}' is not a layout engine name", engine),
            });
        }

        Ok(())
    }

    /// Convenience: load and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
