//! Graphviz CLI client.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, instrument, warn};

use super::format::OutputFormat;
use crate::errors::RenderError;
use crate::graph::Graph;

/// Client for rendering graphs through the Graphviz command-line tools.
#[derive(Debug, Clone)]
pub struct GraphvizClient {
    binary: String,
    engine: String,
}

impl Default for GraphvizClient {
    fn default() -> Self {
        Self::new("dot", "dot")
    }
}

impl GraphvizClient {
    /// Create a client that runs `binary` with the `engine` layout (`-K`).
    pub fn new(binary: impl Into<String>, engine: impl Into<String>) -> Self {
        let client = Self {
            binary: binary.into(),
            engine: engine.into(),
        };
        debug!(binary = %client.binary, engine = %client.engine, "created GraphvizClient");
        client
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Report the Graphviz version string (`dot -V`, which prints to stderr).
    pub fn version(&self) -> Result<String, RenderError> {
        let output = Command::new(&self.binary)
            .arg("-V")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(command_failed(&output));
        }
        let text = if output.stderr.is_empty() {
            &output.stdout
        } else {
            &output.stderr
        };
        Ok(String::from_utf8_lossy(text).trim().to_string())
    }

    /// Lay out `graph` and write it to `output_path` in `format`.
    ///
    /// Any existing file at `output_path` is overwritten.
    #[instrument(skip(self, graph), fields(graph = graph.name(), engine = %self.engine))]
    pub fn render(
        &self,
        graph: &Graph,
        output_path: &Path,
        format: &OutputFormat,
    ) -> Result<(), RenderError> {
        graph.validate()?;
        let source = graph.to_dot();
        debug!(bytes = source.len(), "serialized graph to DOT");

        let out_str = output_path.to_string_lossy().to_string();
        let args = [
            format!("-K{}", self.engine),
            format!("-T{}", format),
            "-o".to_string(),
            out_str,
        ];
        debug!(cmd = ?format!("{} {}", self.binary, args.join(" ")), "running graphviz");

        // A leftover image must not pass the existence check below.
        remove_stale(output_path)?;

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A closed pipe means the child exited early; its status says why.
            match stdin.write_all(source.as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("graphviz closed stdin early");
                }
                Err(e) => return Err(self.process_error("write to stdin", e)),
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| self.process_error("wait for exit", e))?;
        if !output.status.success() {
            let err = command_failed(&output);
            warn!(error = %err, "graphviz command failed");
            return Err(err);
        }

        if !output_path.is_file() {
            return Err(RenderError::MissingOutput(output_path.to_path_buf()));
        }

        info!(path = %output_path.display(), format = %format, "rendered graph");
        Ok(())
    }

    fn spawn_error(&self, e: std::io::Error) -> RenderError {
        if e.kind() == ErrorKind::NotFound {
            RenderError::BinaryNotFound(self.binary.clone())
        } else {
            self.process_error("spawn", e)
        }
    }

    fn process_error(&self, action: &'static str, source: std::io::Error) -> RenderError {
        RenderError::ProcessIo {
            binary: self.binary.clone(),
            action,
            source,
        }
    }
}

fn remove_stale(path: &Path) -> Result<(), RenderError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed previous output");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RenderError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn command_failed(output: &std::process::Output) -> RenderError {
    RenderError::CommandFailed {
        exit_code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

/// Write the DOT source of `graph` to `path`, replacing any existing file.
pub fn write_source(graph: &Graph, path: &Path) -> Result<(), RenderError> {
    std::fs::write(path, graph.to_dot()).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "wrote DOT source");
    Ok(())
}
