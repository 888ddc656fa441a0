//! Configuration for ets-parse.
//!
//! Layers, later ones win:
//! 1. Built-in defaults
//! 2. Global: ~/.config/ets-parse/config.toml (or $XDG_CONFIG_HOME)
//! 3. Per-project: .ets-parse/config.toml
//! 4. An explicit `--config <file>`
//!
//! Command-line flags are applied on top by the caller.
//!
//! Example config.toml:
//! ```toml
//! [parse]
//! strict = true
//!
//! [output]
//! emit = "js"
//! pretty = false
//! ```

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What the output file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Emit {
    /// IR as JSON.
    #[default]
    Ir,
    /// Regenerated JavaScript.
    Js,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ParseConfig {
    /// Fail on the first syntax error.
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub emit: Option<Emit>,
    /// Indent JSON output.
    pub pretty: Option<bool>,
}

/// Root configuration structure.
///
/// Fields are optional so a layer only overrides what it sets.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EtsParseConfig {
    pub parse: ParseConfig,
    pub output: OutputConfig,
}

impl EtsParseConfig {
    /// Load configuration for a project rooted at `root`, plus an optional
    /// explicit file.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Self {
        let mut layers: Vec<PathBuf> = Vec::new();
        if let Some(global) = Self::global_config_path() {
            layers.push(global);
        }
        layers.push(root.join(".ets-parse").join("config.toml"));

        let mut config = Self::from_layers(&layers);
        if let Some(path) = explicit {
            if path.exists() {
                if let Some(file) = Self::load_file(path) {
                    config = config.merge(file);
                }
            } else {
                tracing::warn!(path = %path.display(), "config file not found; skipping");
            }
        }
        config
    }

    /// Merge the files in order, skipping any that are missing or invalid.
    fn from_layers(paths: &[PathBuf]) -> Self {
        paths
            .iter()
            .filter(|path| path.exists())
            .filter_map(|path| Self::load_file(path))
            .fold(Self::default(), Self::merge)
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("ets-parse").join("config.toml"))
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "unreadable config file; skipping");
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "invalid config file; skipping");
                None
            }
        }
    }

    /// Values set in `other` take precedence.
    fn merge(self, other: Self) -> Self {
        Self {
            parse: ParseConfig {
                strict: other.parse.strict.or(self.parse.strict),
            },
            output: OutputConfig {
                emit: other.output.emit.or(self.output.emit),
                pretty: other.output.pretty.or(self.output.pretty),
            },
        }
    }

    pub fn strict(&self) -> bool {
        self.parse.strict.unwrap_or(false)
    }

    pub fn emit(&self) -> Emit {
        self.output.emit.unwrap_or_default()
    }

    pub fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(true)
    }
}
