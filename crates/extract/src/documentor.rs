//! The hook aggregator
//!
//! [`Documentor`] owns the [`HookCollection`] for a run. Files are scanned into file-local
//! lists and only merged once a file has been fully processed, in the order the files were
//! given, so sequential and parallel runs produce the same collection.

use std::sync::Arc;

use hookdoc_core::{ErrorPolicy, SourceFile};
use parser::{ParseError, PhpParser};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::scanner::scan_file;
use crate::{ExtractError, Hook, PrefixFilter};

/// Append-only, ordered list of hooks
#[derive(Debug, Clone, Default)]
pub struct HookCollection {
  hooks: Vec<Hook>,
}

impl HookCollection {
  pub fn iter(&self) -> std::slice::Iter<'_, Hook> {
    self.hooks.iter()
  }

  pub fn actions(&self) -> impl Iterator<Item = &Hook> {
    self.hooks.iter().filter(|h| h.is_action())
  }

  pub fn filters(&self) -> impl Iterator<Item = &Hook> {
    self.hooks.iter().filter(|h| h.is_filter())
  }

  pub fn as_slice(&self) -> &[Hook] {
    &self.hooks
  }

  pub fn len(&self) -> usize {
    self.hooks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.hooks.is_empty()
  }

  fn append(&mut self, hooks: Vec<Hook>) {
    self.hooks.extend(hooks);
  }
}

impl<'a> IntoIterator for &'a HookCollection {
  type Item = &'a Hook;
  type IntoIter = std::slice::Iter<'a, Hook>;

  fn into_iter(self) -> Self::IntoIter {
    self.hooks.iter()
  }
}

/// Outcome of a multi-file run
#[derive(Debug, Default)]
pub struct RunReport {
  /// Files whose hooks made it into the collection
  pub files: usize,
  /// Hooks added by this run
  pub hooks: usize,
  /// Files skipped under [`ErrorPolicy::Skip`]
  pub failures: Vec<ExtractError>,
}

/// Scans PHP files for hooks and collects them
pub struct Documentor {
  hooks: HookCollection,
  filter: PrefixFilter,
  parser: PhpParser,
}

impl Documentor {
  pub fn new(filter: PrefixFilter) -> Result<Self, ParseError> {
    Ok(Self {
      hooks: HookCollection::default(),
      filter,
      parser: PhpParser::new()?,
    })
  }

  pub fn hooks(&self) -> &HookCollection {
    &self.hooks
  }

  pub fn into_hooks(self) -> HookCollection {
    self.hooks
  }

  pub fn filter(&self) -> &PrefixFilter {
    &self.filter
  }

  /// Scan a single file. On error nothing from the file is added.
  pub fn parse(&mut self, file: SourceFile) -> Result<usize, ExtractError> {
    let hooks = scan_file(&mut self.parser, Arc::new(file), &self.filter)?;
    let count = hooks.len();
    self.hooks.append(hooks);
    Ok(count)
  }

  /// Scan files one after another
  pub fn parse_files(&mut self, files: Vec<SourceFile>, policy: ErrorPolicy) -> Result<RunReport, ExtractError> {
    let mut report = RunReport::default();
    for file in files {
      let result = scan_file(&mut self.parser, Arc::new(file), &self.filter);
      self.merge(&mut report, result, policy)?;
    }

    info!(files = report.files, hooks = report.hooks, skipped = report.failures.len(), "Extraction finished");
    Ok(report)
  }

  /// Scan files on the rayon pool with one parser per worker.
  ///
  /// Results are merged in input order, so the collection matches [`Documentor::parse_files`].
  /// Under [`ErrorPolicy::Abort`] files after the failing one may still have been parsed, but
  /// their hooks are discarded.
  pub fn parse_files_parallel(
    &mut self,
    files: Vec<SourceFile>,
    policy: ErrorPolicy,
  ) -> Result<RunReport, ExtractError> {
    let filter = &self.filter;
    let results: Vec<Result<Vec<Hook>, ExtractError>> = files
      .into_par_iter()
      .map_init(PhpParser::new, |parser, file| match parser {
        Ok(parser) => scan_file(parser, Arc::new(file), filter),
        Err(source) => Err(ExtractError::Syntax {
          path: file.path().to_path_buf(),
          source: source.clone(),
        }),
      })
      .collect();

    let mut report = RunReport::default();
    for result in results {
      self.merge(&mut report, result, policy)?;
    }

    info!(files = report.files, hooks = report.hooks, skipped = report.failures.len(), "Extraction finished");
    Ok(report)
  }

  fn merge(
    &mut self,
    report: &mut RunReport,
    result: Result<Vec<Hook>, ExtractError>,
    policy: ErrorPolicy,
  ) -> Result<(), ExtractError> {
    match result {
      Ok(hooks) => {
        report.files += 1;
        report.hooks += hooks.len();
        self.hooks.append(hooks);
        Ok(())
      }
      Err(e) => match policy {
        ErrorPolicy::Abort => {
          debug!(file = %e.path().display(), "Aborting run");
          Err(e)
        }
        ErrorPolicy::Skip => {
          warn!(error = %e, "Skipping file");
          report.failures.push(e);
          Ok(())
        }
      },
    }
  }
}
