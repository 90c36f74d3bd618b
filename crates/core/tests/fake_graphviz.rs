//! Pipeline tests against stand-in `dot` executables.
//!
//! Small shell scripts play the part of Graphviz so the success path and the
//! child-failure paths run on machines without Graphviz installed.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

use git_flowchart_core::config::RenderConfig;
use git_flowchart_core::errors::RenderError;
use git_flowchart_core::flowchart::build_graph;
use git_flowchart_core::generate::{confirmation_line, generate};

// ===========================================================================
// Helper functions
// ===========================================================================

/// Copies stdin to the `-o` target (the last argument) and records argv.
const WRITES_OUTPUT: &str = r#"#!/bin/sh
for last; do :; done
printf '%s\n' "$@" > "$last.args"
cat > "$last"
"#;

/// Succeeds without producing anything.
const WRITES_NOTHING: &str = "#!/bin/sh\ncat > /dev/null\nexit 0\n";

/// Fails the way a broken layout would.
const FAILS: &str = "#!/bin/sh\ncat > /dev/null\necho 'Error: layout exploded' >&2\nexit 3\n";

struct Scripts {
    _dir: TempDir,
    writes_output: PathBuf,
    writes_nothing: PathBuf,
    fails: PathBuf,
}

/// Every script is written once, before any test spawns a child, so no
/// forked process can hold a script open for writing when it is executed.
fn scripts() -> &'static Scripts {
    static SCRIPTS: OnceLock<Scripts> = OnceLock::new();
    SCRIPTS.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        let writes_output = install_script(dir.path(), "dot-ok", WRITES_OUTPUT);
        let writes_nothing = install_script(dir.path(), "dot-silent", WRITES_NOTHING);
        let fails = install_script(dir.path(), "dot-fail", FAILS);
        Scripts {
            _dir: dir,
            writes_output,
            writes_nothing,
            fails,
        }
    })
}

fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn config_with(binary: &Path, out_dir: &Path) -> RenderConfig {
    let mut config = RenderConfig::default();
    config.output.directory = out_dir.to_path_buf();
    config.graphviz.binary = binary.to_string_lossy().to_string();
    config
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn test_success_writes_image_source_and_one_line() {
    let tmp = TempDir::new().unwrap();
    let config = config_with(&scripts().writes_output, tmp.path());

    let mut stdout = Vec::new();
    let image = generate(&config, &mut stdout).expect("render failed");

    assert_eq!(image, tmp.path().join("git_conflict_resolution_flowchart.png"));
    let written = std::fs::read_to_string(&image).unwrap();
    assert!(!written.is_empty());
    assert_eq!(written, build_graph().to_dot());
    assert_eq!(
        std::fs::read_to_string(config.output.source_path()).unwrap(),
        build_graph().to_dot()
    );

    let printed = String::from_utf8(stdout).unwrap();
    assert_eq!(printed.lines().count(), 1);
    assert_eq!(printed, format!("{}\n", confirmation_line(&image)));
}

#[test]
fn test_graphviz_arguments() {
    let tmp = TempDir::new().unwrap();
    let mut config = config_with(&scripts().writes_output, tmp.path());
    config.output.format = "svg".parse().unwrap();
    config.graphviz.engine = "neato".into();

    let image = generate(&config, &mut Vec::new()).unwrap();

    let args_file = format!("{}.args", image.display());
    let args = std::fs::read_to_string(args_file).unwrap();
    let args: Vec<&str> = args.lines().collect();
    let image_str = image.to_string_lossy();
    assert_eq!(args, vec!["-Kneato", "-Tsvg", "-o", &*image_str]);
}

#[test]
fn test_success_overwrites_previous_image() {
    let tmp = TempDir::new().unwrap();
    let config = config_with(&scripts().writes_output, tmp.path());
    let image = config.output.image_path();
    std::fs::write(&image, "previous render").unwrap();

    generate(&config, &mut Vec::new()).unwrap();
    assert_eq!(std::fs::read_to_string(&image).unwrap(), build_graph().to_dot());
}

#[test]
fn test_exit_zero_without_output_is_missing_output() {
    let tmp = TempDir::new().unwrap();
    let config = config_with(&scripts().writes_nothing, tmp.path());
    let image = config.output.image_path();
    std::fs::write(&image, "stale image from an earlier run").unwrap();

    let mut stdout = Vec::new();
    let err = generate(&config, &mut stdout).unwrap_err();

    assert!(matches!(err, RenderError::MissingOutput(ref p) if p == &image));
    assert!(stdout.is_empty());
    assert!(!image.exists());
    assert!(!config.output.source_path().exists());
}

#[test]
fn test_nonzero_exit_is_command_failed() {
    let tmp = TempDir::new().unwrap();
    let config = config_with(&scripts().fails, tmp.path());

    let mut stdout = Vec::new();
    let err = generate(&config, &mut stdout).unwrap_err();

    match err {
        RenderError::CommandFailed { exit_code, stderr } => {
            assert_eq!(exit_code, 3);
            assert_eq!(stderr, "Error: layout exploded");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert!(stdout.is_empty());
    assert!(!config.output.image_path().exists());
    assert!(!config.output.source_path().exists());
}

#[test]
fn test_unwritable_source_rolls_back_image() {
    let tmp = TempDir::new().unwrap();
    let config = config_with(&scripts().writes_output, tmp.path());
    // A directory squatting on the source path makes the write fail.
    std::fs::create_dir(config.output.source_path()).unwrap();

    let mut stdout = Vec::new();
    let err = generate(&config, &mut stdout).unwrap_err();

    assert!(matches!(err, RenderError::Io { ref path, .. } if path == &config.output.source_path()));
    assert!(stdout.is_empty());
    assert!(!config.output.image_path().exists());
}

#[test]
fn test_keep_source_off() {
    let tmp = TempDir::new().unwrap();
    let mut config = config_with(&scripts().writes_output, tmp.path());
    config.output.keep_source = false;

    generate(&config, &mut Vec::new()).unwrap();
    assert!(config.output.image_path().is_file());
    assert!(!config.output.source_path().exists());
}
