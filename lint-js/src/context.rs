use ast_js::tree::NodeId;
use ast_js::tree::Tree;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Span;
use diagnostics::TextRange;

/// The reporting sink handed to every rule.
///
/// Rules hand over a node and message; placement, ordering, and formatting
/// are not their concern.
pub struct LintContext {
  file: FileId,
  diagnostics: Vec<Diagnostic>,
}

impl LintContext {
  pub fn new(file: FileId) -> LintContext {
    LintContext {
      file,
      diagnostics: Vec::new(),
    }
  }

  pub fn file(&self) -> FileId {
    self.file
  }

  pub fn span_of(&self, tree: &Tree, node: NodeId) -> Span {
    let loc = tree.loc(node);
    Span::new(self.file, TextRange::new(loc.start(), loc.end()))
  }

  /// Records an error diagnostic at the node's span.
  pub fn report(&mut self, tree: &Tree, node: NodeId, code: &'static str, message: String) {
    let span = self.span_of(tree, node);
    self.diagnostics.push(Diagnostic::error(code, message, span));
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  pub fn into_diagnostics(self) -> Vec<Diagnostic> {
    self.diagnostics
  }
}
