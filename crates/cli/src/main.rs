//! hookdoc CLI - document the actions and filters of WordPress-style PHP code

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hookdoc_core::{HookType, OutputFormat};
use std::path::PathBuf;

mod commands;
mod logging;

use commands::{cmd_config_init, cmd_config_show, cmd_parse, load_config, project_root};
use logging::init_logging;

#[derive(Parser)]
#[command(name = "hookdoc")]
#[command(about = "Document the actions and filters fired by WordPress-style PHP code")]
#[command(after_help = "\
QUICK START:
  hookdoc parse src/                         # Table of every hook
  hookdoc parse src/ --format markdown       # Markdown reference
  hookdoc parse . --prefix my_plugin_ --type filters --format json

CONFIG LOCATIONS:
  Project: hookdoc.toml
  User:    ~/.config/hookdoc/config.toml")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

/// Arguments for `hookdoc parse`
#[derive(Args, Debug)]
pub struct ParseArgs {
  /// PHP files or directories to scan
  #[arg(required = true)]
  pub sources: Vec<PathBuf>,
  /// Output format (default, markdown, json)
  #[arg(short, long)]
  pub format: Option<OutputFormat>,
  /// Only output actions or filters
  #[arg(long = "type", value_name = "TYPE")]
  pub hook_type: Option<HookType>,
  /// Only document hooks whose tag starts with this prefix (repeatable)
  #[arg(long)]
  pub prefix: Vec<String>,
  /// Exclude paths matching this gitignore-style glob (repeatable)
  #[arg(long)]
  pub exclude: Vec<String>,
  /// Base directory for source links
  #[arg(long, value_name = "DIR")]
  pub relative: Option<PathBuf>,
  /// Write to a file instead of stdout
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,
  /// Config file to use instead of hookdoc.toml / user config
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,
  /// Skip files that fail to parse instead of aborting
  #[arg(long)]
  pub keep_going: bool,
  /// Parse files one at a time
  #[arg(long)]
  pub sequential: bool,
}

/// Subcommands for `hookdoc config`
#[derive(Subcommand)]
pub enum ConfigCommand {
  /// Show the effective configuration
  Show,
  /// Create hookdoc.toml in the current directory
  Init {
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
  },
}

#[derive(Subcommand)]
enum Commands {
  /// Extract hooks from PHP sources
  Parse(ParseArgs),
  /// Manage configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Config first so [log] level applies from the start
  let config = match &cli.command {
    Commands::Parse(args) => load_config(args.config.as_deref(), &project_root(&args.sources))?,
    Commands::Config { .. } => load_config(None, &std::env::current_dir()?)?,
  };
  init_logging(&config.log.level);

  match cli.command {
    Commands::Parse(args) => cmd_parse(args, config),
    Commands::Config { command } => match command {
      ConfigCommand::Show => cmd_config_show(&config),
      ConfigCommand::Init { force } => cmd_config_init(force),
    },
  }
}
