//! Per-file hook scanning
//!
//! Each qualifying call runs through the same pipeline: resolve the tag, apply the prefix
//! filter, look up the doc comment, parse it, drop `@ignore`d hooks, bind params and build the
//! changelog. The first failure aborts the file and no hooks from it are returned.

use std::sync::Arc;

use hookdoc_core::SourceFile;
use parser::{DocBlock, NodeId, NodeKind, PhpParser, SyntaxTree, print_expr};
use tracing::debug;

use crate::attach::find_doc_comment;
use crate::changelog::changelog;
use crate::params::bind_params;
use crate::tag::resolve_tag;
use crate::{Argument, ExtractError, Hook, HookFunction, PrefixFilter};

/// A call to one of the hook functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookCall {
  pub id: NodeId,
  pub function: HookFunction,
}

/// Hook calls in source order.
///
/// Only calls through a plain function name qualify; `$callback( 'x' )` does not, whatever
/// the variable holds.
pub fn find_hook_calls(tree: &SyntaxTree) -> Vec<HookCall> {
  tree
    .iter()
    .filter_map(|(id, node)| {
      let NodeKind::Call { callee, .. } = &node.kind else {
        return None;
      };
      let NodeKind::Name { segments, .. } = tree.kind(*callee) else {
        return None;
      };
      match segments.as_slice() {
        [name] => HookFunction::from_name(name).map(|function| HookCall { id, function }),
        _ => None,
      }
    })
    .collect()
}

/// Parse one file and build its hooks
pub fn scan_file(
  parser: &mut PhpParser,
  file: Arc<SourceFile>,
  filter: &PrefixFilter,
) -> Result<Vec<Hook>, ExtractError> {
  let tree = parser.parse(file.contents()).map_err(|source| ExtractError::Syntax {
    path: file.path().to_path_buf(),
    source,
  })?;

  let mut hooks = Vec::new();
  for call in find_hook_calls(&tree) {
    if let Some(hook) = build_hook(&tree, &file, call, filter)? {
      hooks.push(hook);
    }
  }

  debug!(file = %file.path().display(), hooks = hooks.len(), "Scanned file");
  Ok(hooks)
}

/// `Ok(None)` for hooks dropped by the prefix filter or an `@ignore` tag
fn build_hook(
  tree: &SyntaxTree,
  file: &Arc<SourceFile>,
  call: HookCall,
  filter: &PrefixFilter,
) -> Result<Option<Hook>, ExtractError> {
  let node = tree.node(call.id);
  let line = node.span.start_line;
  let NodeKind::Call { args, .. } = &node.kind else {
    return Ok(None);
  };

  let Some((tag_arg, payload)) = args.split_first() else {
    return Err(ExtractError::MissingTagArgument {
      path: file.path().to_path_buf(),
      line,
    });
  };

  let tag = resolve_tag(tree, tag_arg.value).map_err(|e| ExtractError::UnsupportedTagExpression {
    path: file.path().to_path_buf(),
    line,
    kind: e.kind,
    printed: e.printed,
  })?;

  if !filter.accepts(&tag) {
    debug!(tag = %tag, line, "Skipping hook without a configured prefix");
    return Ok(None);
  }

  let comment = find_doc_comment(tree, call.id);
  let doc_block = comment
    .map(|c| DocBlock::parse(&c.text, tree.namespace_context(call.id)))
    .transpose()
    .map_err(|source| ExtractError::DocBlock {
      path: file.path().to_path_buf(),
      line,
      source,
    })?;

  if doc_block.as_ref().is_some_and(|d| d.has_tag("ignore")) {
    debug!(tag = %tag, line, "Skipping @ignore hook");
    return Ok(None);
  }

  let mut arguments: Vec<Argument> = payload
    .iter()
    .map(|arg| Argument {
      expression: print_expr(tree, arg.value),
      variable: match tree.kind(arg.value) {
        NodeKind::Variable(name) => Some(name.clone()),
        _ => None,
      },
      param: None,
    })
    .collect();

  let changelog = doc_block.as_ref().map(|doc| {
    bind_params(&mut arguments, doc);
    changelog(doc)
  });

  Ok(Some(Hook {
    file: Arc::clone(file),
    function: call.function,
    tag,
    arguments,
    doc_comment: comment.map(|c| c.text.clone()),
    doc_block,
    changelog,
    span: node.span,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn scan(source: &str) -> Result<Vec<Hook>, ExtractError> {
    let mut parser = PhpParser::new().unwrap();
    let file = Arc::new(SourceFile::new("plugin.php", source));
    scan_file(&mut parser, file, &PrefixFilter::default())
  }

  #[test]
  fn test_find_all_hook_functions() {
    let source = r#"<?php
apply_filters( 'a', 1 );
apply_filters_ref_array( 'b', array( 1 ) );
apply_filters_deprecated( 'c', array( 1 ), '1.0' );
do_action( 'd' );
do_action_ref_array( 'e', array() );
do_action_deprecated( 'f', array(), '1.0' );
\do_action( 'g' );
$do_action( 'h' );
Acme\do_action( 'i' );
add_action( 'j', 'cb' );
"#;
    let tree = PhpParser::new().unwrap().parse(source).unwrap();
    let functions: Vec<&str> = find_hook_calls(&tree).iter().map(|c| c.function.name()).collect();
    assert_eq!(
      functions,
      vec![
        "apply_filters",
        "apply_filters_ref_array",
        "apply_filters_deprecated",
        "do_action",
        "do_action_ref_array",
        "do_action_deprecated",
        "do_action",
      ]
    );
  }

  #[test]
  fn test_plain_hook() {
    let hooks = scan("<?php\ndo_action( 'my_action', $a, $b );\n").unwrap();
    assert_eq!(hooks.len(), 1);

    let hook = &hooks[0];
    assert_eq!(hook.tag, "my_action");
    assert!(hook.is_action());
    assert_eq!(hook.doc_comment, None);
    assert_eq!(hook.changelog, None);
    assert_eq!(hook.start_line(), 2);
    let names: Vec<Option<&str>> = hook.arguments.iter().map(Argument::name).collect();
    assert_eq!(names, vec![Some("a"), Some("b")]);
  }

  #[test]
  fn test_documented_hook() {
    let source = r#"<?php
/**
 * Filters the title.
 *
 * @since 1.0.0
 * @since 1.2.0 Added `$post`.
 *
 * @param string  $title Title.
 * @param WP_Post $post  Post.
 */
$title = apply_filters( 'the_title', $title, $post, $args['x'] );
"#;
    let hooks = scan(source).unwrap();
    let hook = &hooks[0];

    assert!(hook.is_filter());
    assert_eq!(hook.summary(), "Filters the title.");
    assert_eq!(hook.arguments[0].ty(), Some("string"));
    assert_eq!(hook.arguments[1].ty(), Some("\\WP_Post"));
    assert_eq!(hook.arguments[2].expression, "$args['x']");
    assert_eq!(hook.arguments[2].param, None);

    let versions: Vec<&str> = hook
      .changelog
      .as_ref()
      .unwrap()
      .iter()
      .map(|e| e.version.as_str())
      .collect();
    assert_eq!(versions, vec!["1.0.0", "1.2.0"]);
  }

  #[test]
  fn test_first_failure_aborts_file() {
    let source = "<?php\ndo_action( 'fine' );\ndo_action();\ndo_action( 'never' );\n";
    match scan(source) {
      Err(ExtractError::MissingTagArgument { line, .. }) => assert_eq!(line, 3),
      other => panic!("expected missing tag argument, got {:?}", other),
    }
  }

  #[test]
  fn test_malformed_doc_block_fails_file() {
    let source = "<?php\n/**\n * Broken.\n *\n * @ nope\n */\ndo_action( 'x' );\n";
    assert!(matches!(scan(source), Err(ExtractError::DocBlock { line: 7, .. })));
  }

  #[test]
  fn test_prefix_filter_runs_before_doc_block() {
    // The malformed doc block is never parsed because the tag is filtered out first
    let source = "<?php\n/**\n * @ nope\n */\ndo_action( 'other_x' );\ndo_action( 'acme_y' );\n";
    let mut parser = PhpParser::new().unwrap();
    let file = Arc::new(SourceFile::new("plugin.php", source));
    let hooks = scan_file(&mut parser, file, &PrefixFilter::new(["acme_"])).unwrap();

    let tags: Vec<&str> = hooks.iter().map(|h| h.tag.as_str()).collect();
    assert_eq!(tags, vec!["acme_y"]);
  }
}
