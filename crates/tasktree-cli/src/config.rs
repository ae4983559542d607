//! Configuration file management for tasktree.
//!
//! Provides a TOML-based config file at `~/.config/tasktree/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tasktree_core::OrphanPolicy;

use crate::convert_cmd::OutputFormat;

pub const ENV_SHOW_TIMESTAMPS: &str = "TASKTREE_SHOW_TIMESTAMPS";
pub const ENV_ORPHANS: &str = "TASKTREE_ORPHANS";
pub const ENV_FORMAT: &str = "TASKTREE_FORMAT";

const DEFAULT_TITLE: &str = "Tasks";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub render: RenderSection,
    pub output: OutputSection,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    /// Append creation times to Markdown checklist items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_timestamps: Option<bool>,
    /// `drop` or `promote` tasks whose parent is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphans: Option<OrphanPolicy>,
    /// Markdown document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl ConfigFile {
    /// The file written by `tasktree init`: every setting at its default.
    pub fn with_defaults() -> Self {
        Self {
            render: RenderSection {
                show_timestamps: Some(false),
                orphans: Some(OrphanPolicy::default()),
                title: Some(DEFAULT_TITLE.to_owned()),
            },
            output: OutputSection {
                format: Some(OutputFormat::default()),
            },
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the tasktree config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/tasktree` or `~/.config/tasktree`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("tasktree");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tasktree")
}

/// Return the path to the tasktree config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`. A missing file is `Ok(None)`.
pub fn load_config_from(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved settings
// -----------------------------------------------------------------------

/// Values given on the command line. `None` defers to the rest of the chain.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub show_timestamps: Option<bool>,
    pub orphans: Option<OrphanPolicy>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved settings, ready for use.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub show_timestamps: bool,
    pub orphans: OrphanPolicy,
    pub format: OutputFormat,
    pub title: String,
}

impl Settings {
    /// Resolve settings using the chain: CLI flag > env var > config file > default.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let file = load_config_from(&config_path())?.unwrap_or_default();

        let show_timestamps = match cli.show_timestamps {
            Some(v) => v,
            None => match env_value(ENV_SHOW_TIMESTAMPS) {
                Some(raw) => parse_bool(&raw)
                    .with_context(|| format!("{ENV_SHOW_TIMESTAMPS} env var is not a boolean"))?,
                None => file.render.show_timestamps.unwrap_or(false),
            },
        };

        let orphans = match cli.orphans {
            Some(v) => v,
            None => match env_value(ENV_ORPHANS) {
                Some(raw) => raw
                    .parse::<OrphanPolicy>()
                    .with_context(|| format!("invalid {ENV_ORPHANS} env var"))?,
                None => file.render.orphans.unwrap_or_default(),
            },
        };

        let format = match cli.format {
            Some(v) => v,
            None => match env_value(ENV_FORMAT) {
                Some(raw) => raw
                    .parse::<OutputFormat>()
                    .with_context(|| format!("invalid {ENV_FORMAT} env var"))?,
                None => file.output.format.unwrap_or_default(),
            },
        };

        let title = file
            .render
            .title
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

        Ok(Self {
            show_timestamps,
            orphans,
            format,
            title,
        })
    }
}

/// Read a non-empty env var.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        other => anyhow::bail!("expected true or false, got {other:?}"),
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
