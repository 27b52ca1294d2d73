//! Shared types for hookdoc
//!
//! - [`Config`]: layered TOML configuration (project > user > defaults)
//! - [`SourceFile`]: an immutable PHP source file handle shared by every hook found in it

pub mod config;
mod error;
mod source;

pub use config::{Config, ErrorPolicy, HookType, LogConfig, OutputConfig, OutputFormat, ScanConfig};
pub use error::ConfigError;
pub use source::SourceFile;
