//! Recursive discovery of entity source files

use crate::core::error::{ConfigError, RewriteError, RewriteResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default file suffix for entity sources
pub const DEFAULT_FILE_SUFFIX: &str = ".entity.ts";

/// Lazy walk over every `*<suffix>` file under a root directory.
///
/// Paths come out in a stable order, each exactly once. Symlinked directories
/// are not descended into, so links back into the tree cannot repeat a file.
/// The iterator is single-use; call [`discover_entity_files`] again to restart.
pub struct EntityFiles {
  walk: walkdir::IntoIter,
  suffix: String,
}

impl Iterator for EntityFiles {
  type Item = RewriteResult<PathBuf>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let entry = match self.walk.next()? {
        Ok(entry) => entry,
        Err(err) => return Some(Err(RewriteError::from(err))),
      };

      if !entry.file_name().to_string_lossy().ends_with(&self.suffix) {
        continue;
      }

      // Directories named like `foo.entity.ts/` are skipped; symlinks count
      // only when they point at a file
      let file_type = entry.file_type();
      if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
        return Some(Ok(entry.into_path()));
      }
    }
  }
}

/// Start discovering entity files under `root`.
///
/// Fails up front if `root` is missing or not a directory; nothing is walked
/// in that case.
pub fn discover_entity_files(root: &Path, suffix: &str) -> RewriteResult<EntityFiles> {
  if !root.is_dir() {
    return Err(
      ConfigError::EntitiesDirNotFound {
        path: root.to_path_buf(),
      }
      .into(),
    );
  }

  let walk = WalkDir::new(root)
    .follow_links(false)
    .sort_by_file_name()
    .into_iter();

  Ok(EntityFiles {
    walk,
    suffix: suffix.to_string(),
  })
}
