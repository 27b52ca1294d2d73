//! Hook extraction for WordPress-style PHP code
//!
//! Finds `do_action` / `apply_filters` style calls, resolves their tag names, attaches the
//! governing doc comment and binds documented parameters to call arguments.
//!
//! # Example
//! ```ignore
//! use extract::{Documentor, PrefixFilter};
//! use hookdoc_core::{ErrorPolicy, SourceFile};
//!
//! let mut documentor = Documentor::new(PrefixFilter::default())?;
//! documentor.parse_files(vec![SourceFile::read("plugin.php")?], ErrorPolicy::Abort)?;
//! for hook in documentor.hooks().filters() {
//!   println!("{} {}", hook.tag, hook.summary());
//! }
//! ```

mod attach;
mod changelog;
mod documentor;
mod error;
mod hook;
mod params;
mod prefix;
mod scanner;
mod tag;

pub use attach::find_doc_comment;
pub use changelog::changelog;
pub use documentor::{Documentor, HookCollection, RunReport};
pub use error::ExtractError;
pub use hook::{Argument, ChangelogEntry, Hook, HookFunction, HookKind};
pub use params::bind_params;
pub use prefix::PrefixFilter;
pub use scanner::{HookCall, find_hook_calls, scan_file};
pub use tag::{UnsupportedExpression, resolve_tag};
