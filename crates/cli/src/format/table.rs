//! Bordered console table

use extract::Hook;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 3] = ["File", "Tag", "Summary"];

pub(super) fn render(hooks: &[&Hook]) -> String {
  let rows: Vec<[String; 3]> = hooks
    .iter()
    .map(|hook| {
      [
        hook.file.path().display().to_string(),
        hook.tag.clone(),
        single_line(hook.summary()),
      ]
    })
    .collect();

  let mut widths = HEADERS.map(UnicodeWidthStr::width);
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.width());
    }
  }

  let border = border(&widths);
  let mut out = String::new();
  out.push_str(&border);
  out.push_str(&line(&HEADERS.map(str::to_string), &widths));
  out.push_str(&border);
  for row in &rows {
    out.push_str(&line(row, &widths));
  }
  out.push_str(&border);
  out
}

fn border(widths: &[usize; 3]) -> String {
  let mut out = String::from("+");
  for width in widths {
    out.push_str(&"-".repeat(width + 2));
    out.push('+');
  }
  out.push('\n');
  out
}

fn line(cells: &[String; 3], widths: &[usize; 3]) -> String {
  let mut out = String::from("|");
  for (cell, width) in cells.iter().zip(widths) {
    out.push(' ');
    out.push_str(cell);
    out.push_str(&" ".repeat(width - cell.width()));
    out.push_str(" |");
  }
  out.push('\n');
  out
}

fn single_line(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;
  use extract::{Documentor, PrefixFilter};
  use hookdoc_core::SourceFile;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_table_layout() {
    let source = "<?php\n/**\n * Fires on café\n * opening.\n */\ndo_action( 'open' );\napply_filters( 'price', 1 );\n";
    let mut documentor = Documentor::new(PrefixFilter::default()).unwrap();
    documentor.parse(SourceFile::new("a.php", source)).unwrap();
    let hooks: Vec<&Hook> = documentor.hooks().iter().collect();

    let rendered = render(&hooks);
    let lines: Vec<&str> = rendered.lines().collect();
    let border = format!("+{}+{}+{}+", "-".repeat(7), "-".repeat(7), "-".repeat(24));
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], border);
    assert_eq!(lines[1], format!("| File  | Tag   | Summary{} |", " ".repeat(15)));
    assert_eq!(lines[2], border);
    assert_eq!(lines[3], "| a.php | open  | Fires on café opening. |");
    assert_eq!(lines[4], format!("| a.php | price | {} |", " ".repeat(22)));
    assert_eq!(lines[5], border);
  }
}
