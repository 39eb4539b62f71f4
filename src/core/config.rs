use crate::core::error::{ConfigError, RewriteError, RewriteResult, ResultExt};
use crate::rewrite::discover::DEFAULT_FILE_SUFFIX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default entities directory, relative to the base directory
pub const DEFAULT_ENTITIES_DIR: &str = "libs/infrastructure/src/persistence/entities";

/// Optional configuration for entity-imports
/// Searched in order: entity-imports.toml, .entity-imports.toml, .config/entity-imports.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewriteConfig {
  /// Entities directory, relative to the base directory
  #[serde(default = "default_entities_dir")]
  pub entities_dir: PathBuf,

  /// File name suffix selecting entity sources (default: ".entity.ts")
  #[serde(default = "default_file_suffix")]
  pub file_suffix: String,

  /// Extra or overriding entries for the mapping table
  #[serde(default)]
  pub mappings: BTreeMap<String, String>,
}

fn default_entities_dir() -> PathBuf {
  PathBuf::from(DEFAULT_ENTITIES_DIR)
}

fn default_file_suffix() -> String {
  DEFAULT_FILE_SUFFIX.to_string()
}

impl Default for RewriteConfig {
  fn default() -> Self {
    Self {
      entities_dir: default_entities_dir(),
      file_suffix: default_file_suffix(),
      mappings: BTreeMap::new(),
    }
  }
}

impl RewriteConfig {
  /// Find config file in standard locations
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("entity-imports.toml"),
      path.join(".entity-imports.toml"),
      path.join(".config").join("entity-imports.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config from the base directory, falling back to defaults when no
  /// config file exists
  pub fn load_or_default(path: &Path) -> RewriteResult<Self> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load_from(&config_path),
      None => Ok(Self::default()),
    }
  }

  /// Load and validate a specific config file
  pub fn load_from(config_path: &Path) -> RewriteResult<Self> {
    let content = fs::read_to_string(config_path).map_err(|e| RewriteError::io(config_path, e))?;
    let config: RewriteConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate()?;
    Ok(config)
  }

  /// Validate field values. Mapping entries are validated when the table is built.
  pub fn validate(&self) -> RewriteResult<()> {
    if self.file_suffix.is_empty() {
      return Err(invalid_field("file_suffix", "must not be empty"));
    }
    if self.file_suffix.contains(['/', '\\']) {
      return Err(invalid_field("file_suffix", "must be a file name suffix, not a path"));
    }
    if self.entities_dir.as_os_str().is_empty() {
      return Err(invalid_field("entities_dir", "must not be empty"));
    }
    Ok(())
  }
}

fn invalid_field(field: &str, reason: &str) -> RewriteError {
  ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  }
  .into()
}
