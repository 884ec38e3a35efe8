//! Wrapper configuration loaded from TOML files and wrapper flags.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stitch_core::probe::DEFAULT_TEMPLATE;

use crate::flags::LeadingFlags;
use crate::{CliError, Result};

/// Configuration for one wrapper run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// Only instrument the crate with this name. `None` instruments any
    /// crate containing a target.
    pub package: Option<String>,

    /// Exact names of the functions to probe.
    pub probes: Vec<String>,

    /// Statement template injected at the top of matched bodies. `{fn}`
    /// expands to the matched function's name.
    pub statement: String,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            package: None,
            probes: Vec::new(),
            statement: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl StitchConfig {
    /// Load configuration from file, falling back to defaults. Without an
    /// explicit path, the user's config directory is consulted first and
    /// `stitch.toml` in the working directory second, so project-local
    /// settings override user-global ones. Missing files are not errors.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let mut config = Self::default();
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("stitch").join("config.toml");
            if let Ok(user_config) = Self::load_from_file(&user_config) {
                config = config.merge(user_config);
            }
        }
        if let Ok(local) = Self::load_from_file(Path::new("stitch.toml")) {
            config = config.merge(local);
        }
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read config file {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::Config(format!("failed to create config directory: {}", e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| CliError::Config(format!("failed to write config file: {}", e)))
    }

    /// Merge this configuration with another, with the other taking
    /// precedence for any field it sets.
    pub fn merge(self, other: Self) -> Self {
        Self {
            package: other.package.or(self.package),
            probes: if other.probes.is_empty() {
                self.probes
            } else {
                other.probes
            },
            statement: if other.statement == DEFAULT_TEMPLATE {
                self.statement
            } else {
                other.statement
            },
        }
    }

    /// Applies wrapper flags on top of file configuration; flags win.
    pub fn apply_flags(mut self, flags: &LeadingFlags) -> Self {
        if let Some(package) = &flags.package {
            self.package = Some(package.clone());
        }
        if !flags.probes.is_empty() {
            self.probes = flags.probes.clone();
        }
        if let Some(statement) = &flags.statement {
            self.statement = statement.clone();
        }
        self
    }
}
