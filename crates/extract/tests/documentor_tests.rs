//! End-to-end extraction tests
//!
//! Tests: hook discovery, tag resolution, doc comment attachment, @ignore handling,
//! param binding, changelogs, prefix filtering, error policies, parallel runs.

mod common;

use extract::{Documentor, ExtractError, HookKind, PrefixFilter};
use hookdoc_core::ErrorPolicy;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const PLUGIN: &str = r#"<?php
namespace Acme\Shop;

use Acme\Models\Order;

class Checkout {
  /**
   * Runs the checkout.
   */
  public function run( $order ) {
    /**
     * Fires before an order is saved.
     *
     * Runs inside the checkout transaction.
     *
     * @since 1.0.0
     * @since 1.4.0 Added the `$context` parameter.
     *
     * @param Order  $order   Order being saved.
     * @param string $context Checkout context.
     */
    do_action( 'acme_before_save', $order, $context );

    do_action( 'acme_undocumented' );

    /**
     * Filters the order total.
     *
     * @param float $total Total.
     */
    $total = apply_filters( 'acme_order_total', $total, $order->items );

    /**
     * Internal.
     *
     * @ignore
     */
    do_action( 'acme_internal' );

    if ( (bool) apply_filters( "acme_{$this->type}_enabled", true ) ) {
      return;
    }
  }
}
"#;

/// Test a realistic plugin file end to end
#[test]
fn test_plugin_file() {
  let mut documentor = common::documentor();
  let count = documentor.parse(common::file("src/Checkout.php", PLUGIN)).unwrap();
  assert_eq!(count, 4);

  assert_eq!(
    common::tags(&documentor),
    vec![
      "acme_before_save",
      "acme_undocumented",
      "acme_order_total",
      "acme_{$this->type}_enabled"
    ]
  );

  let hooks = documentor.hooks().as_slice();

  let save = &hooks[0];
  assert_eq!(save.kind(), HookKind::Action);
  assert_eq!(save.summary(), "Fires before an order is saved.");
  assert_eq!(save.description(), "Runs inside the checkout transaction.");
  assert_eq!(save.arguments[0].ty(), Some("\\Acme\\Models\\Order"));
  assert_eq!(save.arguments[1].description(), Some("Checkout context."));
  let changelog: Vec<(&str, &str)> = save
    .changelog
    .as_ref()
    .unwrap()
    .iter()
    .map(|e| (e.version.as_str(), e.description.as_str()))
    .collect();
  assert_eq!(
    changelog,
    vec![("1.0.0", ""), ("1.4.0", "Added the `$context` parameter.")]
  );

  // The method's doc comment must not leak onto hooks inside it
  assert_eq!(hooks[1].doc_block, None);
  assert_eq!(hooks[1].changelog, None);

  let total = &hooks[2];
  assert_eq!(total.kind(), HookKind::Filter);
  assert_eq!(total.arguments[0].ty(), Some("float"));
  assert_eq!(total.arguments[1].expression, "$order->items");
  assert_eq!(total.arguments[1].param, None);
  assert!(total.changelog.as_ref().is_some_and(|c| c.is_empty()));

  assert_eq!(documentor.hooks().actions().count(), 2);
  assert_eq!(documentor.hooks().filters().count(), 2);
}

/// Test that a documented assignment attaches and a function comment does not
#[test]
fn test_doc_attachment_boundaries() {
  let source = r#"<?php
/**
 * Helper.
 */
function helper() {
  /** Filters t. */
  $x = apply_filters( 't', $v );
  do_action( 'bare' );
}
"#;
  let mut documentor = common::documentor();
  documentor.parse(common::file("helper.php", source)).unwrap();

  let hooks = documentor.hooks().as_slice();
  assert_eq!(hooks[0].doc_comment.as_deref(), Some("/** Filters t. */"));
  assert_eq!(hooks[1].doc_comment, None);
}

/// Test prefix filtering
#[test]
fn test_prefix_filter() {
  let source = "<?php\ndo_action( 'foo_bar' );\ndo_action( 'baz_bar' );\n";

  let mut documentor = Documentor::new(PrefixFilter::new(["foo_"])).unwrap();
  documentor.parse(common::file("a.php", source)).unwrap();
  assert_eq!(common::tags(&documentor), vec!["foo_bar"]);

  let mut documentor = common::documentor();
  documentor.parse(common::file("a.php", source)).unwrap();
  assert_eq!(common::tags(&documentor), vec!["foo_bar", "baz_bar"]);
}

/// Test that duplicate tags are all kept
#[test]
fn test_duplicate_tags_allowed() {
  let source = "<?php\ndo_action( 'same' );\ndo_action( 'same' );\n";
  let mut documentor = common::documentor();
  documentor.parse(common::file("a.php", source)).unwrap();
  assert_eq!(documentor.hooks().len(), 2);
}

/// Test that a failing file contributes nothing and the error names the shape
#[test]
fn test_unsupported_tag_expression() {
  let source = "<?php\ndo_action( 'first' );\ndo_action( $this->hook_name() );\n";
  let mut documentor = common::documentor();
  let err = documentor.parse(common::file("bad.php", source)).unwrap_err();

  match &err {
    ExtractError::UnsupportedTagExpression { kind, printed, line, .. } => {
      assert_eq!(*kind, "method_call");
      assert_eq!(printed, "$this->hook_name()");
      assert_eq!(*line, 3);
    }
    other => panic!("unexpected error {:?}", other),
  }
  assert!(err.to_string().contains("bad.php#3"));
  assert!(documentor.hooks().is_empty());
}

fn mixed_files() -> Vec<hookdoc_core::SourceFile> {
  vec![
    common::file("one.php", "<?php do_action( 'one_a' ); apply_filters( 'one_b', 1 );"),
    common::file("two.php", "<?php do_action();"),
    common::file("three.php", "<?php do_action( 'three' ); do_action( 'three_' . $x );"),
    common::file("four.php", "<?php function ( {"),
    common::file("five.php", "<?php apply_filters( 'five', $v );"),
  ]
}

/// Test abort policy keeps hooks of earlier files only
#[test]
fn test_abort_policy() {
  let mut documentor = common::documentor();
  let err = documentor.parse_files(mixed_files(), ErrorPolicy::Abort).unwrap_err();

  assert!(matches!(err, ExtractError::MissingTagArgument { .. }));
  assert_eq!(err.path(), std::path::Path::new("two.php"));
  assert_eq!(common::tags(&documentor), vec!["one_a", "one_b"]);
}

/// Test skip policy records failures and keeps going
#[test]
fn test_skip_policy() {
  let mut documentor = common::documentor();
  let report = documentor.parse_files(mixed_files(), ErrorPolicy::Skip).unwrap();

  assert_eq!(report.files, 3);
  assert_eq!(report.hooks, 5);
  assert_eq!(report.failures.len(), 2);
  assert!(matches!(report.failures[1], ExtractError::Syntax { .. }));
  assert_eq!(
    common::tags(&documentor),
    vec!["one_a", "one_b", "three", "three_{$x}", "five"]
  );
}

/// Test that parallel runs produce the sequential collection
#[test]
fn test_parallel_matches_sequential() {
  let files: Vec<_> = (0..32)
    .map(|i| {
      common::file(
        &format!("file_{}.php", i),
        &format!("<?php\n/** Hook {i}. */\ndo_action( 'hook_{i}_a', $x );\napply_filters( 'hook_{i}_b', $y );\n"),
      )
    })
    .collect();

  let mut sequential = common::documentor();
  sequential.parse_files(files.clone(), ErrorPolicy::Abort).unwrap();

  let mut parallel = common::documentor();
  let report = parallel.parse_files_parallel(files, ErrorPolicy::Abort).unwrap();

  assert_eq!(report.files, 32);
  assert_eq!(common::tags(&parallel), common::tags(&sequential));
  let summaries: Vec<&str> = parallel.hooks().iter().map(|h| h.summary()).collect();
  assert_eq!(summaries[2], "Hook 1.");
}

/// Test parallel runs honour the skip policy in file order
#[test]
fn test_parallel_skip_policy() {
  let mut documentor = common::documentor();
  let report = documentor.parse_files_parallel(mixed_files(), ErrorPolicy::Skip).unwrap();

  assert_eq!(report.failures.len(), 2);
  assert_eq!(report.failures[0].path(), std::path::Path::new("two.php"));
  assert_eq!(
    common::tags(&documentor),
    vec!["one_a", "one_b", "three", "three_{$x}", "five"]
  );
}

/// Test reading real files from disk
#[test]
fn test_files_from_disk() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("plugin.php");
  std::fs::write(&path, PLUGIN).unwrap();

  let file = hookdoc_core::SourceFile::read(&path).unwrap();
  let mut documentor = common::documentor();
  documentor.parse(file).unwrap();

  let hook = &documentor.hooks().as_slice()[0];
  assert_eq!(hook.file.path(), path.as_path());
  assert_eq!(hook.start_line(), 22);
}
