use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::diagnostics::CompileError;

pub const CONFIG_FILE: &str = "cpplite.toml";

/// What the CLI prints for a successfully processed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// Indented abstract syntax tree
    #[default]
    Tree,
    /// Re-rendered C++Lite source
    Source,
    /// AST as JSON
    Json,
    /// Token stream only, no parsing
    Tokens,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub emit: Emit,
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { emit: Emit::default(), indent: default_indent() }
    }
}

fn default_indent() -> usize {
    2
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Render errors as labelled source reports.
    #[serde(default)]
    pub rich: bool,
}

/// Walk from start_dir up to .git or FS root, looking for cpplite.toml.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        // Stop if .git exists (file OR dir)
        if dir.join(".git").exists() {
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, CompileError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CompileError::config(format!("{}: could not read file: {e}", path.display()), path.to_path_buf())
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        CompileError::config(format!("{}: invalid config: {e}", path.display()), path.to_path_buf())
    })?;
    if config.output.indent == 0 {
        return Err(CompileError::config(
            format!("{}: output.indent must be at least 1", path.display()),
            path.to_path_buf(),
        ));
    }
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

/// Config for a source file: explicit path if given, otherwise the nearest
/// `cpplite.toml` above the source, otherwise defaults.
pub fn resolve_config(explicit: Option<&Path>, source_path: &Path) -> Result<Config, CompileError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let start = match source_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match find_config(&start) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}
