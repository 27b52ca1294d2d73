//! Configuration system for hookdoc with per-project overrides.
//!
//! Config priority: project (`hookdoc.toml` in the scanned root) > user (~/.config/hookdoc/config.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// File name of the project-level config
pub const PROJECT_CONFIG_FILE: &str = "hookdoc.toml";

// ============================================================================
// Scan Configuration
// ============================================================================

/// What to do when a single file fails to parse or resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
  /// Stop the whole run at the first failing file
  #[default]
  Abort,
  /// Log the failure, drop that file's hooks and continue with the next file
  Skip,
}

impl std::str::FromStr for ErrorPolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "abort" => Ok(ErrorPolicy::Abort),
      "skip" => Ok(ErrorPolicy::Skip),
      _ => Err(format!("Invalid error policy: {}", s)),
    }
  }
}

/// Source discovery and extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
  /// Only document hooks whose resolved tag starts with one of these prefixes.
  /// Empty accepts every hook.
  pub prefixes: Vec<String>,

  /// Glob patterns (gitignore syntax) of paths to leave out
  pub exclude: Vec<String>,

  /// File extensions treated as PHP sources (default: ["php"])
  pub extensions: Vec<String>,

  /// Skip files ignored by .gitignore and friends (default: true)
  pub respect_gitignore: bool,

  /// Parse files on the rayon thread pool (default: true)
  /// Output order is identical to a sequential run.
  pub parallel: bool,

  /// Failure handling: "abort" or "skip" (default: abort)
  pub on_error: ErrorPolicy,
}

impl Default for ScanConfig {
  fn default() -> Self {
    Self {
      prefixes: Vec::new(),
      exclude: Vec::new(),
      extensions: vec!["php".to_string()],
      respect_gitignore: true,
      parallel: true,
      on_error: ErrorPolicy::Abort,
    }
  }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// Console table: File | Tag | Summary
  #[default]
  Default,
  /// Markdown reference document
  Markdown,
  /// JSON array of hook records
  Json,
}

impl std::str::FromStr for OutputFormat {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "default" | "table" => Ok(OutputFormat::Default),
      "markdown" | "md" => Ok(OutputFormat::Markdown),
      "json" => Ok(OutputFormat::Json),
      _ => Err(format!("Invalid output format: {}", s)),
    }
  }
}

/// Restrict output to one hook family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookType {
  Actions,
  Filters,
}

impl std::str::FromStr for HookType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "actions" | "action" => Ok(HookType::Actions),
      "filters" | "filter" => Ok(HookType::Filters),
      _ => Err(format!("Invalid hook type: {}", s)),
    }
  }
}

/// Rendering settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
  /// Renderer to use (default, markdown, json)
  pub format: OutputFormat,

  /// Only render actions or filters (default: both)
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub hook_type: Option<HookType>,

  /// Base directory for source links in markdown output.
  /// Links are written relative to this directory.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub relative: Option<PathBuf>,
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// Log level: "off", "error", "warn", "info", "debug", "trace"
  /// Default: "warn"
  pub level: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: "warn".to_string(),
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

/// Complete hookdoc configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
  /// Discovery and extraction settings
  #[serde(default)]
  pub scan: ScanConfig,

  /// Rendering settings
  #[serde(default)]
  pub output: OutputConfig,

  /// Logging settings
  #[serde(default)]
  pub log: LogConfig,
}

impl Config {
  /// Load config for a project, with fallback to user config.
  ///
  /// Only a missing file falls through to the next layer; a config file that exists but
  /// cannot be read or parsed is an error.
  pub fn load_for_project(project_path: &Path) -> Result<Self, ConfigError> {
    let project_config = Self::project_config_path(project_path);
    if project_config.exists() {
      return Self::load_from(&project_config);
    }

    if let Some(user_config_path) = Self::user_config_path()
      && user_config_path.exists()
    {
      return Self::load_from(&user_config_path);
    }

    Ok(Self::default())
  }

  /// Load a single config file. A missing or invalid file is an error.
  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("HOOKDOC_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("hookdoc").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("hookdoc").join("config.toml"))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(PROJECT_CONFIG_FILE)
  }

  /// Generate a default config file as a string
  pub fn generate_template() -> String {
    r#"# hookdoc configuration
# Place in hookdoc.toml (project root) or ~/.config/hookdoc/config.toml (user)

# ============================================================================
# Scanning
# ============================================================================

[scan]
# Only document hooks whose tag starts with one of these prefixes (empty = all)
prefixes = []

# Paths to leave out (gitignore syntax)
exclude = ["vendor/", "node_modules/", "tests/"]

# Extensions treated as PHP sources
extensions = ["php"]

# Honor .gitignore files while walking the source tree
respect_gitignore = true

# Parse files in parallel (output order is unaffected)
parallel = true

# What to do when a file cannot be processed: "abort" or "skip"
on_error = "abort"

# ============================================================================
# Output
# ============================================================================

[output]
# Renderer: "default" (console table), "markdown" or "json"
format = "default"

# Only render one hook family: "actions" or "filters"
# type = "filters"

# Base directory for source links in markdown output
# relative = "."

# ============================================================================
# Logging
# ============================================================================

[log]
# Log level: "off", "error", "warn", "info", "debug", "trace"
level = "warn"
"#
    .to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use tempfile::TempDir;

  #[test]
  fn test_scan_defaults() {
    let config = Config::default();
    assert!(config.scan.prefixes.is_empty());
    assert_eq!(config.scan.extensions, vec!["php".to_string()]);
    assert!(config.scan.respect_gitignore);
    assert!(config.scan.parallel);
    assert_eq!(config.scan.on_error, ErrorPolicy::Abort);
    assert_eq!(config.output.format, OutputFormat::Default);
    assert_eq!(config.output.hook_type, None);
    assert_eq!(config.log.level, "warn");
  }

  #[test]
  fn test_load_project_config() {
    let temp = TempDir::new().unwrap();

    let config_content = r#"
[scan]
prefixes = ["my_plugin_", "my_theme_"]
on_error = "skip"

[output]
format = "markdown"
type = "filters"
"#;
    std::fs::write(temp.path().join(PROJECT_CONFIG_FILE), config_content).unwrap();

    let config = Config::load_for_project(temp.path()).unwrap();
    assert_eq!(config.scan.prefixes, vec!["my_plugin_".to_string(), "my_theme_".to_string()]);
    assert_eq!(config.scan.on_error, ErrorPolicy::Skip);
    // Unspecified fields keep their defaults
    assert_eq!(config.scan.extensions, vec!["php".to_string()]);
    assert_eq!(config.output.format, OutputFormat::Markdown);
    assert_eq!(config.output.hook_type, Some(HookType::Filters));
  }

  #[test]
  fn test_broken_project_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(PROJECT_CONFIG_FILE), "[scan]\nprefixes = \"acme_\"\n").unwrap();

    let err = Config::load_for_project(temp.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "err: {:?}", err);
  }

  #[test]
  fn test_load_from_reports_invalid_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "[scan\nprefixes = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "err: {:?}", err);
  }

  #[test]
  fn test_load_from_reports_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Config::load_from(&temp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "err: {:?}", err);
  }

  #[test]
  fn test_generate_template_parses() {
    let template = Config::generate_template();
    assert!(template.contains("[scan]"));
    assert!(template.contains("[output]"));
    assert!(template.contains("[log]"));

    let config: Config = toml::from_str(&template).unwrap();
    assert_eq!(config.scan.exclude.len(), 3);
    assert_eq!(config.output.format, OutputFormat::Default);
  }

  #[test]
  fn test_toml_roundtrip() {
    let config = Config {
      scan: ScanConfig {
        prefixes: vec!["acme_".to_string()],
        parallel: false,
        ..Default::default()
      },
      output: OutputConfig {
        format: OutputFormat::Json,
        hook_type: Some(HookType::Actions),
        relative: Some(PathBuf::from("docs")),
      },
      ..Default::default()
    };

    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
  }

  #[test]
  fn test_parse_enums_from_str() {
    assert_eq!("markdown".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert_eq!("action".parse::<HookType>(), Ok(HookType::Actions));
    assert_eq!("skip".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Skip));
    assert!("xml".parse::<OutputFormat>().is_err());
  }
}
