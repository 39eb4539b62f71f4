//! Rewrite a single entity file in place

use crate::core::error::{RewriteError, RewriteResult};
use crate::rewrite::mapping::EntityMapping;
use crate::rewrite::pattern::{ImportPattern, ReplacedImport, UnmappedImport};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether rewritten content is written back to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
  Apply,
  DryRun,
}

/// Outcome of rewriting one file
#[derive(Debug, Clone, Serialize)]
pub struct FileRewrite {
  pub path: PathBuf,
  /// Content changed (and, in apply mode, was written)
  pub updated: bool,
  pub replaced: Vec<ReplacedImport>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub unmapped: Vec<UnmappedImport>,
}

/// Applies the mapping table to entity files
pub struct Rewriter<'a> {
  pattern: ImportPattern,
  mapping: &'a EntityMapping,
  mode: WriteMode,
}

impl<'a> Rewriter<'a> {
  pub fn new(mapping: &'a EntityMapping, mode: WriteMode) -> RewriteResult<Self> {
    Ok(Self {
      pattern: ImportPattern::new()?,
      mapping,
      mode,
    })
  }

  pub fn mode(&self) -> WriteMode {
    self.mode
  }

  /// Read `path`, substitute mapped imports, and write it back only if the
  /// text changed. Read and write failures come back as `RewriteError::Io`.
  pub fn rewrite_file(&self, path: &Path) -> RewriteResult<FileRewrite> {
    let original = fs::read_to_string(path).map_err(|e| RewriteError::io(path, e))?;
    let result = self.pattern.rewrite(&original, self.mapping);
    let updated = result.content != original;

    if updated && self.mode == WriteMode::Apply {
      fs::write(path, result.content.as_bytes()).map_err(|e| RewriteError::io(path, e))?;
    }

    Ok(FileRewrite {
      path: path.to_path_buf(),
      updated,
      replaced: result.replaced,
      unmapped: result.unmapped,
    })
  }
}
