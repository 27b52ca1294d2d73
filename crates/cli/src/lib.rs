//! hookdoc CLI library - source discovery and renderers shared by the commands

pub mod discover;
pub mod format;

pub use discover::discover_sources;
pub use format::{RenderOptions, render};
