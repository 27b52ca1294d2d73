//! CLI command implementations

mod config;
mod parse;

pub use config::{cmd_config_init, cmd_config_show, load_config};
pub use parse::{cmd_parse, project_root};
