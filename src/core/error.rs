//! Error types for entity-imports with contextual messages and exit codes
//!
//! Fatal errors (bad configuration, unreadable base directory) surface through
//! `main` with a help line. Per-file errors are carried in `RewriteError::Io`
//! and contained by the run loop.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Exit codes for entity-imports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing directories)
  User = 1,
  /// System error (I/O, patterns)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for entity-imports
#[derive(Debug)]
pub enum RewriteError {
  /// Configuration errors
  Config(ConfigError),

  /// I/O or encoding error tied to a specific path
  Io { path: PathBuf, source: io::Error },

  /// Invalid regex pattern
  Pattern(String),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RewriteError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RewriteError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RewriteError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Wrap an I/O error with the path it happened on
  pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    RewriteError::Io {
      path: path.into(),
      source,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RewriteError::Message { message, context, help } => RewriteError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RewriteError::Config(_) => ExitCode::User,
      RewriteError::Io { .. } => ExitCode::System,
      RewriteError::Pattern(_) => ExitCode::System,
      RewriteError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RewriteError::Config(e) => e.help_message(),
      RewriteError::Io { source, .. } => match source.kind() {
        io::ErrorKind::PermissionDenied => Some("Check the file permissions and try again.".to_string()),
        io::ErrorKind::InvalidData => Some("Entity files must be valid UTF-8 text.".to_string()),
        _ => None,
      },
      RewriteError::Message { help, .. } => help.clone(),
      RewriteError::Pattern(_) => None,
    }
  }
}

impl fmt::Display for RewriteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RewriteError::Config(e) => write!(f, "{}", e),
      RewriteError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
      RewriteError::Pattern(msg) => write!(f, "Invalid pattern: {}", msg),
      RewriteError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RewriteError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RewriteError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<ConfigError> for RewriteError {
  fn from(err: ConfigError) -> Self {
    RewriteError::Config(err)
  }
}

impl From<io::Error> for RewriteError {
  fn from(err: io::Error) -> Self {
    RewriteError::message(format!("I/O error: {}", err))
  }
}

impl From<String> for RewriteError {
  fn from(msg: String) -> Self {
    RewriteError::message(msg)
  }
}

impl From<&str> for RewriteError {
  fn from(msg: &str) -> Self {
    RewriteError::message(msg)
  }
}

impl From<regex::Error> for RewriteError {
  fn from(err: regex::Error) -> Self {
    RewriteError::Pattern(err.to_string())
  }
}

impl From<walkdir::Error> for RewriteError {
  fn from(err: walkdir::Error) -> Self {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let message = err.to_string();
    match err.into_io_error() {
      Some(source) => RewriteError::io(path, source),
      None => RewriteError::message(message),
    }
  }
}

impl From<toml_edit::de::Error> for RewriteError {
  fn from(err: toml_edit::de::Error) -> Self {
    RewriteError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for RewriteError {
  fn from(err: serde_json::Error) -> Self {
    RewriteError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// The entities directory does not exist
  EntitiesDirNotFound { path: PathBuf },

  /// A mapping entry failed validation
  InvalidMapping { key: String, reason: String },

  /// A config field has an unusable value
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::EntitiesDirNotFound { .. } => Some(
        "Run from the repository root, or pass --base-dir / --entities-dir to point at the entities directory."
          .to_string(),
      ),
      ConfigError::InvalidMapping { .. } => Some(
        "Mapping keys look like 'user.entity' and values like '@libs/infrastructure/entities/auth/user.entity'."
          .to_string(),
      ),
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::EntitiesDirNotFound { path } => {
        write!(f, "Directory does not exist: {}", path.display())
      }
      ConfigError::InvalidMapping { key, reason } => {
        write!(f, "Invalid mapping for '{}': {}", key, reason)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}': {}", field, reason)
      }
    }
  }
}

/// Result type alias for entity-imports
pub type RewriteResult<T> = Result<T, RewriteError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RewriteResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RewriteError>,
{
  fn with_context<F>(self, f: F) -> RewriteResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RewriteError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
