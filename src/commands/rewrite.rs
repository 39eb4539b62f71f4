//! Rewrite command implementation

use crate::core::context::RewriteContext;
use crate::core::error::{ConfigError, RewriteError, RewriteResult};
use crate::rewrite::{FileRewrite, Rewriter, WriteMode, discover_entity_files};
use crate::utils::display_relative;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Options for a rewrite run
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
  /// Entities directory override, relative to the base directory
  pub entities_dir: Option<PathBuf>,
  pub dry_run: bool,
  pub json: bool,
  /// Exit non-zero when any file failed
  pub strict: bool,
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
  pub path: String,
  pub error: String,
}

/// Summary of a full rewrite pass
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub entities_dir: String,
  pub dry_run: bool,
  /// Entity files examined, including ones that failed
  pub total_files: usize,
  pub updated_files: usize,
  pub failed_files: usize,
  /// Per-file details for files that changed or had unmapped imports
  pub files: Vec<FileRewrite>,
  pub failures: Vec<FileFailure>,
}

impl RunReport {
  fn new(entities_dir: String, mode: WriteMode) -> Self {
    Self {
      entities_dir,
      dry_run: mode == WriteMode::DryRun,
      total_files: 0,
      updated_files: 0,
      failed_files: 0,
      files: Vec::new(),
      failures: Vec::new(),
    }
  }

  /// One-line summary printed at the end of a run
  pub fn summary_line(&self) -> String {
    format!("Processed {} files, {} updated.", self.total_files, self.updated_files)
  }
}

/// Run the rewrite command
pub fn run_rewrite(ctx: &RewriteContext, opts: RewriteOptions) -> RewriteResult<()> {
  let mode = if opts.dry_run { WriteMode::DryRun } else { WriteMode::Apply };
  let entities_dir = match &opts.entities_dir {
    Some(dir) => ctx.base_dir().join(dir),
    None => ctx.entities_dir(),
  };

  let report = match rewrite_entities(ctx, &entities_dir, mode, !opts.json) {
    Ok(report) => report,
    // A missing entities directory ends the run without touching anything
    Err(RewriteError::Config(err @ ConfigError::EntitiesDirNotFound { .. })) => {
      eprintln!("{}", err);
      if opts.json {
        let empty = RunReport::new(display_relative(&entities_dir, ctx.base_dir()), mode);
        println!("{}", serde_json::to_string_pretty(&empty)?);
      }
      return Ok(());
    }
    Err(err) => return Err(err),
  };

  if opts.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!();
    println!("{}", report.summary_line());
    print_unmapped(&report);
  }

  if opts.strict && report.failed_files > 0 {
    return Err(RewriteError::with_help(
      format!("{} file(s) could not be processed", report.failed_files),
      "Fix the errors above and re-run; already rewritten files are left as they are.",
    ));
  }

  Ok(())
}

/// Discover every entity file under `entities_dir` and rewrite it.
///
/// Per-file failures are logged to stderr and counted; they never stop the
/// pass. Only a missing entities directory is returned as an error, before
/// any file is touched. With `echo`, each updated file is printed as it is
/// processed.
pub fn rewrite_entities(
  ctx: &RewriteContext,
  entities_dir: &Path,
  mode: WriteMode,
  echo: bool,
) -> RewriteResult<RunReport> {
  let files = discover_entity_files(entities_dir, &ctx.config.file_suffix)?;
  let rewriter = Rewriter::new(&ctx.mapping, mode)?;
  let base = ctx.base_dir();

  let mut report = RunReport::new(display_relative(entities_dir, base), mode);

  for entry in files {
    let path = match entry {
      Ok(path) => path,
      Err(err) => {
        eprintln!("Error reading entities directory: {}", err);
        continue;
      }
    };

    report.total_files += 1;
    let shown = display_relative(&path, base);

    match rewriter.rewrite_file(&path) {
      Ok(outcome) => {
        if outcome.updated {
          report.updated_files += 1;
          if echo {
            match rewriter.mode() {
              WriteMode::Apply => println!("Updated: {}", shown),
              WriteMode::DryRun => println!("Would update: {}", shown),
            }
          }
        }
        if outcome.updated || !outcome.unmapped.is_empty() {
          report.files.push(FileRewrite {
            path: PathBuf::from(&shown),
            ..outcome
          });
        }
      }
      Err(err) => {
        let error = match err {
          RewriteError::Io { source, .. } => source.to_string(),
          other => other.to_string(),
        };
        eprintln!("Error processing {}: {}", shown, error);
        report.failed_files += 1;
        report.failures.push(FileFailure { path: shown, error });
      }
    }
  }

  Ok(report)
}

fn print_unmapped(report: &RunReport) {
  let unmapped: Vec<_> = report
    .files
    .iter()
    .flat_map(|f| f.unmapped.iter().map(move |u| (f, u)))
    .collect();

  if unmapped.is_empty() {
    return;
  }

  println!();
  println!("⚠️  {} relative import(s) without a mapping were left unchanged:", unmapped.len());
  for (file, import) in unmapped {
    println!("   {}:{} → {}", file.path.display(), import.line, import.key);
  }
}
