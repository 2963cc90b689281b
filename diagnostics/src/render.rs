//! Human-readable rendering of [`Diagnostic`]s in the familiar
//! `error[CODE]` style with caret underlines.
//!
//! Rendering is best-effort: a [`SourceProvider`] may not have the text for a
//! file (diagnostics produced from an externally supplied tree, for example),
//! in which case the location header degrades to `file:?:?` and labels are
//! listed without carets.

use crate::Diagnostic;
use crate::FileId;
use crate::Label;
use crate::Severity;
use std::collections::BTreeSet;
use std::fmt::Write;

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_BOLD_RED: &str = "\u{1b}[1;31m";
const ANSI_BOLD_YELLOW: &str = "\u{1b}[1;33m";
const ANSI_BOLD_BLUE: &str = "\u{1b}[1;34m";
const ANSI_BOLD_CYAN: &str = "\u{1b}[1;36m";

/// Provides access to source text for rendering diagnostics.
pub trait SourceProvider {
  fn file_name(&self, file: FileId) -> Option<&str>;
  fn file_text(&self, file: FileId) -> Option<&str>;
}

/// Options to control diagnostic rendering.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
  pub color: bool,
  pub tab_width: usize,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      color: false,
      tab_width: 2,
    }
  }
}

/// Render a diagnostic into a human-readable string with caret highlighting.
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  render_diagnostic_with_options(provider, diagnostic, RenderOptions::default())
}

/// Render a diagnostic with explicit options.
pub fn render_diagnostic_with_options(
  provider: &dyn SourceProvider,
  diagnostic: &Diagnostic,
  options: RenderOptions,
) -> String {
  let mut output = String::new();

  write_severity(&mut output, diagnostic.severity, options.color);
  writeln!(output, "[{}]: {}", diagnostic.code, diagnostic.message).unwrap();

  let mut labels = Vec::with_capacity(diagnostic.labels.len() + 1);
  labels.push(Label {
    span: diagnostic.primary,
    message: diagnostic.message.clone(),
    is_primary: true,
  });
  labels.extend(diagnostic.labels.iter().cloned());
  labels.sort_by(|a, b| {
    b.is_primary
      .cmp(&a.is_primary)
      .then_with(|| a.span.cmp(&b.span))
      .then_with(|| a.message.cmp(&b.message))
  });

  // Consecutive labels for the same file render as one source block.
  let mut groups: Vec<(FileId, Vec<Label>)> = Vec::new();
  for label in labels {
    match groups.last_mut() {
      Some((file, group)) if *file == label.span.file => group.push(label),
      _ => groups.push((label.span.file, vec![label])),
    }
  }
  for (file, group) in &groups {
    render_file_group(provider, &mut output, *file, group, &options);
  }

  for note in &diagnostic.notes {
    writeln!(output, "= note: {}", note).unwrap();
  }

  output
}

fn render_file_group(
  provider: &dyn SourceProvider,
  output: &mut String,
  file: FileId,
  labels: &[Label],
  options: &RenderOptions,
) {
  let name = provider.file_name(file).unwrap_or("<unknown file>");
  let Some(text) = provider.file_text(file) else {
    writeln!(output, " --> {}:?:?", name).unwrap();
    writeln!(output, "  | (source unavailable)").unwrap();
    for label in labels {
      if !label.message.is_empty() {
        writeln!(output, "  = label: {}", label.message).unwrap();
      }
    }
    return;
  };

  let index = LineIndex::new(text);
  let first = clamp_to_char_boundary(text, labels[0].span.range.start as usize);
  let (line, col) = index.line_and_column(first);
  writeln!(output, " --> {}:{}:{}", name, line, col).unwrap();
  writeln!(output, "  |").unwrap();

  let mut lines_to_render: BTreeSet<usize> = BTreeSet::new();
  for label in labels {
    let (start, end) = clamp_range(text, label);
    let last = index.line_at(end.saturating_sub(1).max(start));
    for line_idx in index.line_at(start)..=last {
      lines_to_render.insert(line_idx);
    }
  }

  let max_line_no = lines_to_render.iter().max().copied().unwrap_or(0) + 1;
  let gutter = max_line_no.to_string().len().max(1);

  let mut prev: Option<usize> = None;
  for &line_idx in &lines_to_render {
    if let Some(prev) = prev {
      if line_idx > prev + 1 {
        writeln!(
          output,
          "{:>gutter$} | ... ({} lines elided)",
          "",
          line_idx - prev - 1
        )
        .unwrap();
      }
    }
    render_line(output, text, &index, line_idx, labels, gutter, options);
    prev = Some(line_idx);
  }
}

fn render_line(
  output: &mut String,
  text: &str,
  index: &LineIndex,
  line_idx: usize,
  labels: &[Label],
  gutter: usize,
  options: &RenderOptions,
) {
  let (line_start, line_end) = index.line_bounds(line_idx);
  let line_text = &text[line_start..line_end];
  writeln!(
    output,
    "{:>gutter$} | {}",
    line_idx + 1,
    expand_tabs(line_text, options.tab_width)
  )
  .unwrap();

  for label in labels {
    let (start, end) = clamp_range(text, label);
    let first_line = index.line_at(start);
    let last_line = index.line_at(end.saturating_sub(1).max(start));
    if line_idx < first_line || line_idx > last_line {
      continue;
    }
    let local_start = start.max(line_start) - line_start;
    let local_end = end.min(line_end).max(start.max(line_start)) - line_start;
    let start_col = display_column(line_text, local_start, options.tab_width);
    let end_col = display_column(line_text, local_end, options.tab_width);
    let marker = if label.is_primary { '^' } else { '-' };
    let run: String = std::iter::repeat(marker)
      .take((end_col - start_col).max(1))
      .collect();

    write!(output, "{:>gutter$} | {}", "", " ".repeat(start_col)).unwrap();
    if options.color {
      output.push_str(marker_color(label));
      output.push_str(&run);
      output.push_str(ANSI_RESET);
    } else {
      output.push_str(&run);
    }
    if line_idx == first_line && !label.message.is_empty() {
      output.push(' ');
      output.push_str(&label.message);
    }
    output.push('\n');
  }
}

fn marker_color(label: &Label) -> &'static str {
  if label.is_primary {
    ANSI_BOLD_RED
  } else {
    ANSI_BOLD_BLUE
  }
}

fn write_severity(output: &mut String, severity: Severity, color: bool) {
  if !color {
    write!(output, "{severity}").unwrap();
    return;
  }
  let code = match severity {
    Severity::Error => ANSI_BOLD_RED,
    Severity::Warning => ANSI_BOLD_YELLOW,
    Severity::Note => ANSI_BOLD_BLUE,
    Severity::Help => ANSI_BOLD_CYAN,
  };
  output.push_str(code);
  write!(output, "{severity}").unwrap();
  output.push_str(ANSI_RESET);
}

fn expand_tabs(line: &str, tab_width: usize) -> String {
  let tab_width = tab_width.max(1);
  let mut expanded = String::with_capacity(line.len());
  for ch in line.chars() {
    if ch == '\t' {
      expanded.push_str(&" ".repeat(tab_width));
    } else {
      expanded.push(ch);
    }
  }
  expanded
}

fn clamp_range(text: &str, label: &Label) -> (usize, usize) {
  let start = clamp_to_char_boundary(text, label.span.range.start as usize);
  let end = clamp_to_char_boundary(text, label.span.range.end as usize).max(start);
  (start, end)
}

fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
  let mut offset = offset.min(text.len());
  while offset > 0 && !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

/// Display column (0-based) of a byte offset within one line, with tabs
/// expanded.
fn display_column(line_text: &str, offset_in_line: usize, tab_width: usize) -> usize {
  let tab_width = tab_width.max(1);
  let target = offset_in_line.min(line_text.len());
  line_text[..target]
    .chars()
    .map(|ch| if ch == '\t' { tab_width } else { 1 })
    .sum()
}

struct LineIndex {
  starts: Vec<usize>,
  len: usize,
}

impl LineIndex {
  fn new(text: &str) -> Self {
    let mut starts = vec![0];
    for (idx, byte) in text.bytes().enumerate() {
      if byte == b'\n' {
        starts.push(idx + 1);
      }
    }
    Self {
      starts,
      len: text.len(),
    }
  }

  /// 0-based line index containing the byte offset.
  fn line_at(&self, offset: usize) -> usize {
    let clamped = offset.min(self.len);
    match self.starts.binary_search(&clamped) {
      Ok(idx) => idx,
      Err(idx) => idx - 1,
    }
  }

  /// Byte bounds of a line, excluding the trailing newline.
  fn line_bounds(&self, line_idx: usize) -> (usize, usize) {
    let start = *self.starts.get(line_idx).unwrap_or(&self.len);
    let end = if line_idx + 1 < self.starts.len() {
      self.starts[line_idx + 1].saturating_sub(1)
    } else {
      self.len
    };
    (start, end.max(start))
  }

  fn line_and_column(&self, offset: usize) -> (usize, usize) {
    let line_idx = self.line_at(offset);
    let (line_start, _) = self.line_bounds(line_idx);
    (line_idx + 1, offset - line_start + 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Diagnostic;
  use crate::Span;
  use crate::TextRange;

  struct TestSource {
    name: &'static str,
    text: &'static str,
  }

  impl SourceProvider for TestSource {
    fn file_name(&self, _file: FileId) -> Option<&str> {
      Some(self.name)
    }

    fn file_text(&self, _file: FileId) -> Option<&str> {
      Some(self.text)
    }
  }

  struct NoSource;

  impl SourceProvider for NoSource {
    fn file_name(&self, _file: FileId) -> Option<&str> {
      Some("virtual.js")
    }

    fn file_text(&self, _file: FileId) -> Option<&str> {
      None
    }
  }

  fn span(start: u32, end: u32) -> Span {
    Span::new(FileId(0), TextRange::new(start, end))
  }

  #[test]
  fn renders_single_line_span() {
    let source = TestSource {
      name: "test.js",
      text: "let x = 1;",
    };
    let diagnostic = Diagnostic::error("TEST0001", "unused variable", span(4, 5));
    let rendered = render_diagnostic(&source, &diagnostic);
    let expected = "error[TEST0001]: unused variable\n \
                    --> test.js:1:5\n  \
                    |\n\
                    1 | let x = 1;\n  \
                    |     ^ unused variable\n";
    assert_eq!(rendered, expected);
  }

  #[test]
  fn renders_multi_line_span() {
    let source = TestSource {
      name: "main.js",
      text: "function test() {\n  return 1;\n}\n",
    };
    let diagnostic = Diagnostic::error("TEST0002", "broken function", span(0, 31));
    let rendered = render_diagnostic(&source, &diagnostic);
    assert!(rendered.contains(" --> main.js:1:1"));
    assert!(rendered.contains("1 | function test() {"));
    assert!(rendered.contains("2 |   return 1;"));
    assert!(rendered.contains("3 | }"));
    // The label message appears once, on the first underlined line.
    assert_eq!(rendered.matches("broken function").count(), 2);
  }

  #[test]
  fn elides_lines_between_distant_labels() {
    let source = TestSource {
      name: "gap.js",
      text: "a;\nb;\nc;\nd;\ne;\n",
    };
    let diagnostic = Diagnostic::error("TEST0003", "first", span(0, 1))
      .with_label(Label::secondary(span(12, 13), "last"));
    let rendered = render_diagnostic(&source, &diagnostic);
    assert!(rendered.contains("(3 lines elided)"));
    assert!(rendered.contains("1 | a;"));
    assert!(rendered.contains("5 | e;"));
  }

  #[test]
  fn secondary_labels_use_dashes() {
    let source = TestSource {
      name: "two.js",
      text: "abcdef",
    };
    let diagnostic = Diagnostic::error("TEST0004", "here", span(2, 3))
      .with_label(Label::secondary(span(4, 5), "there"));
    let rendered = render_diagnostic(&source, &diagnostic);
    assert!(rendered.contains("^ here"));
    assert!(rendered.contains("- there"));
  }

  #[test]
  fn missing_source_degrades_gracefully() {
    let diagnostic = Diagnostic::error("TEST0005", "no text", span(10, 20));
    let rendered = render_diagnostic(&NoSource, &diagnostic);
    assert!(rendered.contains(" --> virtual.js:?:?"));
    assert!(rendered.contains("(source unavailable)"));
    assert!(rendered.contains("= label: no text"));
  }

  #[test]
  fn expands_tabs_in_source_and_carets() {
    let source = TestSource {
      name: "tabs.js",
      text: "\tx = 1;",
    };
    let diagnostic = Diagnostic::error("TEST0006", "write", span(1, 2));
    let rendered = render_diagnostic(&source, &diagnostic);
    // Tab expands to two spaces, so the caret sits at display column 3.
    assert!(rendered.contains("1 |   x = 1;"));
    assert!(rendered.contains("  |   ^ write"));
  }
}
