use anyhow::{Context, Result};
use extract::{Hook, HookKind};
use serde::Serialize;

#[derive(Serialize)]
struct HookRecord<'a> {
  kind: HookKind,
  deprecated: bool,
  #[serde(flatten)]
  hook: &'a Hook,
}

pub(super) fn render(hooks: &[&Hook]) -> Result<String> {
  let records: Vec<HookRecord<'_>> = hooks
    .iter()
    .map(|hook| HookRecord {
      kind: hook.kind(),
      deprecated: hook.function.is_deprecated(),
      hook,
    })
    .collect();
  let mut json = serde_json::to_string_pretty(&records).context("Failed to serialize hooks")?;
  json.push('\n');
  Ok(json)
}

#[cfg(test)]
mod tests {
  use super::*;
  use extract::{Documentor, PrefixFilter};
  use hookdoc_core::SourceFile;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_json_records() {
    let source = "<?php\n/**\n * Fires.\n *\n * @param int $id Post ID.\n */\ndo_action( 'save', $id, $post->ID );\n";
    let mut documentor = Documentor::new(PrefixFilter::default()).unwrap();
    documentor.parse(SourceFile::new("save.php", source)).unwrap();
    let hooks: Vec<&Hook> = documentor.hooks().iter().collect();

    let value: serde_json::Value = serde_json::from_str(&render(&hooks).unwrap()).unwrap();
    let record = &value[0];
    assert_eq!(record["kind"], "action");
    assert_eq!(record["deprecated"], false);
    assert_eq!(record["file"], "save.php");
    assert_eq!(record["function"], "do_action");
    assert_eq!(record["tag"], "save");
    assert_eq!(record["arguments"][0]["param"]["type"], "int");
    assert_eq!(record["arguments"][1]["expression"], "$post->ID");
    assert_eq!(record["arguments"][1]["param"], serde_json::Value::Null);
    assert_eq!(record["doc_block"]["summary"], "Fires.");
  }

  #[test]
  fn test_deprecated_flag() {
    let source = "<?php\ndo_action_deprecated( 'old_boot', array( $id ), '3.0.0', 'boot' );\n";
    let mut documentor = Documentor::new(PrefixFilter::default()).unwrap();
    documentor.parse(SourceFile::new("boot.php", source)).unwrap();
    let hooks: Vec<&Hook> = documentor.hooks().iter().collect();

    let value: serde_json::Value = serde_json::from_str(&render(&hooks).unwrap()).unwrap();
    assert_eq!(value[0]["deprecated"], true);
    assert_eq!(value[0]["function"], "do_action_deprecated");
  }
}
