//! Configuration file support
//!
//! Loads suite configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.lowvolrc.json` in the working directory
//! 3. `lowvol.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LowVolConfig {
    /// Fixture file to run (relative paths resolve against the config file)
    #[serde(default)]
    pub fixtures: Option<PathBuf>,

    /// Run the shipped fixtures (default: true)
    #[serde(default)]
    pub include_builtin: Option<bool>,

    /// Treat unparsable clicks/threshold as failures (default: false)
    #[serde(default)]
    pub strict_numbers: Option<bool>,

    /// Exit with an error when any assertion fails (default: false)
    #[serde(default)]
    pub deny_failures: Option<bool>,
}

/// Configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub fixtures: Option<PathBuf>,
    pub include_builtin: bool,
    pub strict_numbers: bool,
    pub deny_failures: bool,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl LowVolConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if self.include_builtin == Some(false) && self.fixtures.is_none() {
            anyhow::bail!("include_builtin is false but no fixtures file is configured");
        }

        if let Some(ref path) = self.fixtures {
            if path.as_os_str().is_empty() {
                anyhow::bail!("fixtures must not be an empty path");
            }
        }

        Ok(())
    }

    /// Resolve config into its final form
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        Ok(ResolvedConfig {
            fixtures: self.fixtures.clone(),
            include_builtin: self.include_builtin.unwrap_or(true),
            strict_numbers: self.strict_numbers.unwrap_or(false),
            deny_failures: self.deny_failures.unwrap_or(false),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Self {
        Self {
            fixtures: None,
            include_builtin: true,
            strict_numbers: false,
            deny_failures: false,
            config_path: None,
        }
    }
}

/// Discover and load a config file from a directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(LowVolConfig, PathBuf)>> {
    for name in [".lowvolrc.json", "lowvol.config.json"] {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<LowVolConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: LowVolConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve configuration
///
/// Uses the explicit path when given, otherwise searches `dir`. Relative
/// fixture paths are made relative to the config file's directory.
pub fn load_and_resolve(dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let found = match explicit {
        Some(path) => Some((load_config_file(path)?, path.to_path_buf())),
        None => discover_config(dir)?,
    };

    let Some((config, config_path)) = found else {
        return Ok(ResolvedConfig::defaults());
    };

    let mut resolved = config
        .resolve()
        .with_context(|| format!("invalid config in: {}", config_path.display()))?;

    if let Some(fixtures) = resolved.fixtures.take() {
        let base = config_path.parent().unwrap_or(dir);
        resolved.fixtures = Some(if fixtures.is_relative() {
            base.join(fixtures)
        } else {
            fixtures
        });
    }
    resolved.config_path = Some(config_path);

    Ok(resolved)
}
