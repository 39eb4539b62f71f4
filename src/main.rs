mod commands;
mod core;
mod rewrite;
mod utils;

use clap::{Args, Parser, Subcommand};
use commands::RewriteOptions;
use crate::core::context::RewriteContext;
use crate::core::error::{RewriteError, print_error};
use std::path::PathBuf;

/// Rewrite relative entity imports to aliased module paths
#[derive(Parser)]
#[command(name = "entity-imports")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Repository root to operate on (default: current directory)
  #[arg(long, global = true, value_name = "DIR")]
  base_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,

  #[command(flatten)]
  rewrite: RewriteArgs,
}

#[derive(Subcommand)]
enum Commands {
  /// Rewrite `from './<name>.entity'` imports to aliased paths (default)
  Rewrite(RewriteArgs),

  /// List the entity mapping table
  Mappings {
    /// Output mappings in JSON format
    #[arg(long)]
    json: bool,
  },
}

#[derive(Args)]
struct RewriteArgs {
  /// Entities directory, relative to the base directory
  /// (default: libs/infrastructure/src/persistence/entities)
  #[arg(long, value_name = "DIR")]
  entities_dir: Option<PathBuf>,
  /// Show what would change without writing any file
  #[arg(long)]
  dry_run: bool,
  /// Output the run report in JSON format
  #[arg(long)]
  json: bool,
  /// Exit with an error if any file could not be processed
  #[arg(long)]
  strict: bool,
}

impl From<RewriteArgs> for RewriteOptions {
  fn from(args: RewriteArgs) -> Self {
    Self {
      entities_dir: args.entities_dir,
      dry_run: args.dry_run,
      json: args.json,
      strict: args.strict,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let base_dir = match cli.base_dir {
    Some(dir) => dir,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  // Config and mapping table are loaded once and shared by every command
  let ctx = match RewriteContext::build(&base_dir) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Some(Commands::Rewrite(args)) => commands::run_rewrite(&ctx, args.into()),
    Some(Commands::Mappings { json }) => commands::run_mappings(&ctx, json),
    None => commands::run_rewrite(&ctx, cli.rewrite.into()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RewriteError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
