//! `hookdoc config` commands

use anyhow::{Context, Result, bail};
use hookdoc_core::Config;
use std::path::Path;

/// Load the explicit config file if one was given, else project/user/default layering
pub fn load_config(explicit: Option<&Path>, project: &Path) -> Result<Config> {
  match explicit {
    Some(path) => Ok(Config::load_from(path)?),
    None => Ok(Config::load_for_project(project)?),
  }
}

/// Show the effective configuration for the current directory
pub fn cmd_config_show(config: &Config) -> Result<()> {
  let cwd = std::env::current_dir()?;
  let project_config = Config::project_config_path(&cwd);

  if project_config.exists() {
    println!("# Using project config: {}", project_config.display());
  } else if let Some(user_path) = Config::user_config_path()
    && user_path.exists()
  {
    println!("# Using user config: {}", user_path.display());
  } else {
    println!("# Using default configuration (no config file found)");
  }
  println!();

  let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
  println!("{}", toml_str);

  Ok(())
}

/// Write a commented `hookdoc.toml` into the current directory
pub fn cmd_config_init(force: bool) -> Result<()> {
  let cwd = std::env::current_dir()?;
  let path = write_template(&cwd, force)?;
  println!("Created project config: {}", path.display());
  println!("Edit the file to customize settings.");
  Ok(())
}

fn write_template(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
  let config_path = Config::project_config_path(dir);
  if config_path.exists() && !force {
    bail!(
      "Config file already exists: {} (use --force to overwrite)",
      config_path.display()
    );
  }

  std::fs::write(&config_path, Config::generate_template())
    .with_context(|| format!("Failed to write {}", config_path.display()))?;
  Ok(config_path)
}
