//! Utility functions for cross-platform path display

use std::path::{Path, PathBuf};

/// Path of `path` relative to `base`, or `path` unchanged when no relative
/// form exists (e.g. absolute path against a relative base)
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
  pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Convert a path to display format (always forward slashes)
pub fn path_to_slash(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Forward-slash display of `path` relative to `base`
pub fn display_relative(path: &Path, base: &Path) -> String {
  path_to_slash(&relative_to(path, base))
}
