//! Output formats accepted for rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RenderError;

/// Graphviz `-T` formats we pass through.
const SUPPORTED: &[&str] = &[
    "png", "svg", "pdf", "jpg", "jpeg", "gif", "bmp", "tiff", "webp", "ps", "eps", "dot", "gv",
    "json", "plain",
];

/// A validated Graphviz output format, stored lowercase.
///
/// Doubles as the file extension of the rendered image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutputFormat(String);

impl OutputFormat {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self("png".into())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if SUPPORTED.contains(&lower.as_str()) {
            Ok(Self(lower))
        } else {
            Err(RenderError::UnsupportedFormat(s.to_owned()))
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.0
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
