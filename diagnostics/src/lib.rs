//! Shared diagnostics model and rendering utilities.
//!
//! The data structures here are intentionally small and deterministic so they
//! can be reused by any analysis stage without pulling in heavy dependencies.
//! Producers build [`Diagnostic`] values with stable codes; consumers either
//! inspect them structurally or render them with [`render::render_diagnostic`].
//!
//! ```
//! use diagnostics::render::{render_diagnostic, SourceProvider};
//! use diagnostics::{Diagnostic, FileId, Span, TextRange};
//!
//! struct OneFile(&'static str, &'static str);
//!
//! impl SourceProvider for OneFile {
//!   fn file_name(&self, _file: FileId) -> Option<&str> {
//!     Some(self.0)
//!   }
//!
//!   fn file_text(&self, _file: FileId) -> Option<&str> {
//!     Some(self.1)
//!   }
//! }
//!
//! let provider = OneFile("example.js", "mod = 0;");
//! let diag = Diagnostic::error("LINT0001", "'mod' is read-only.", Span {
//!   file: FileId(0),
//!   range: TextRange::new(0, 7),
//! });
//! let rendered = render_diagnostic(&provider, &diag);
//! assert!(rendered.contains("error[LINT0001]"));
//! assert!(rendered.contains("--> example.js:1:1"));
//! ```

pub mod render;

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A stable identifier for a file in a program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A half-open byte range in a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TextRange {
  pub start: u32,
  pub end: u32,
}

impl TextRange {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  pub fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }
}

/// A byte range within a specific file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Span {
  pub file: FileId,
  pub range: TextRange,
}

impl Span {
  pub const fn new(file: FileId, range: TextRange) -> Self {
    Self { file, range }
  }
}

/// Diagnostic severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
  Error,
  Warning,
  Note,
  Help,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
      Severity::Help => "help",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A labelled span attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
  pub span: Span,
  pub message: String,
  pub is_primary: bool,
}

impl Label {
  pub fn primary(span: Span, message: impl Into<String>) -> Self {
    Self {
      span,
      message: message.into(),
      is_primary: true,
    }
  }

  pub fn secondary(span: Span, message: impl Into<String>) -> Self {
    Self {
      span,
      message: message.into(),
      is_primary: false,
    }
  }
}

/// A user-facing diagnostic with optional labels and notes.
///
/// Codes are `&'static str` by design: every producer enumerates its codes
/// statically, which keeps them greppable and avoids allocation on the
/// reporting path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub primary: Span,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    primary: Span,
  ) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      primary,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Error, code, message, primary)
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Warning, code, message, primary)
  }

  pub fn with_label(mut self, label: Label) -> Self {
    self.labels.push(label);
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }
}

/// Sorts diagnostics into the stable presentation order: file, then span,
/// then code, then message.
///
/// Producers that accumulate out of source order call this once before
/// returning so repeated runs over the same input are byte-identical.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
  diagnostics.sort_by(|a, b| {
    a.primary
      .cmp(&b.primary)
      .then_with(|| a.code.cmp(b.code))
      .then_with(|| a.message.cmp(&b.message))
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sorts_by_file_then_span_then_code() {
    let span = |file, start, end| Span::new(FileId(file), TextRange::new(start, end));
    let mut diagnostics = vec![
      Diagnostic::error("B0002", "late", span(0, 9, 10)),
      Diagnostic::error("B0001", "other file", span(1, 0, 1)),
      Diagnostic::error("B0001", "early", span(0, 2, 4)),
      Diagnostic::error("A0001", "same span, lower code", span(0, 9, 10)),
    ];
    sort_diagnostics(&mut diagnostics);
    let order: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(order, vec![
      "early",
      "same span, lower code",
      "late",
      "other file"
    ]);
  }

  #[test]
  fn builder_accumulates_labels_and_notes() {
    let primary = Span::new(FileId(0), TextRange::new(4, 5));
    let diagnostic = Diagnostic::warning("W0001", "suspicious", primary)
      .with_label(Label::secondary(
        Span::new(FileId(0), TextRange::new(0, 1)),
        "declared here",
      ))
      .with_note("only the first write counts");
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.labels.len(), 1);
    assert!(!diagnostic.labels[0].is_primary);
    assert_eq!(diagnostic.notes.len(), 1);
  }

  #[test]
  fn empty_range_reports_as_empty() {
    assert!(TextRange::new(3, 3).is_empty());
    assert_eq!(TextRange::new(3, 3).len(), 0);
    assert!(!TextRange::new(3, 5).is_empty());
    assert_eq!(TextRange::new(3, 5).len(), 2);
  }
}
