//! Run context - build once in main.rs, pass by reference to commands
//!
//! Holds the base directory, the resolved configuration and the frozen
//! mapping table. Nothing in here changes after `build` returns.

use crate::core::config::RewriteConfig;
use crate::core::error::RewriteResult;
use crate::rewrite::mapping::EntityMapping;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RewriteContext {
  /// Repository root the tool operates on
  pub root: PathBuf,

  /// Configuration (defaults when no config file exists)
  pub config: RewriteConfig,

  /// Built-in mapping table with config overrides applied
  pub mapping: EntityMapping,
}

impl RewriteContext {
  /// Build the context for a base directory.
  ///
  /// Loads the optional config file and freezes the mapping table.
  pub fn build(root: &Path) -> RewriteResult<Self> {
    let config = RewriteConfig::load_or_default(root)?;
    Self::with_config(root, config)
  }

  /// Build from an already-loaded configuration
  pub fn with_config(root: &Path, config: RewriteConfig) -> RewriteResult<Self> {
    let mapping = EntityMapping::with_overrides(config.mappings.clone())?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
      mapping,
    })
  }

  pub fn base_dir(&self) -> &Path {
    &self.root
  }

  /// Entities directory resolved against the base directory
  pub fn entities_dir(&self) -> PathBuf {
    self.root.join(&self.config.entities_dir)
  }
}
