use clap::Parser;
use diagnostics::render::render_diagnostic_with_options;
use diagnostics::render::RenderOptions;
use diagnostics::render::SourceProvider;
use diagnostics::FileId;
use lint_js::lint;
use scope_js::bind;
use scope_js::TopLevelMode;
use scope_js::DEFAULT_GLOBALS;
use std::fs;
use std::io::stdin;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

/// Reads an ESTree JSON document (as produced by espree, acorn, or any
/// compatible parser) from stdin and prints lint diagnostics.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
  /// Top-level mode of the program: module or global.
  #[arg(long, default_value = "module")]
  mode: String,

  /// Name reported for the linted file.
  #[arg(long, default_value = "<stdin>")]
  file_name: String,

  /// Path to the original source text; enables caret rendering.
  #[arg(long)]
  source: Option<PathBuf>,

  /// Disable ANSI colors.
  #[arg(long)]
  no_color: bool,
}

struct CliSource {
  name: String,
  text: Option<String>,
}

impl SourceProvider for CliSource {
  fn file_name(&self, _file: FileId) -> Option<&str> {
    Some(&self.name)
  }

  fn file_text(&self, _file: FileId) -> Option<&str> {
    self.text.as_deref()
  }
}

fn main() -> ExitCode {
  let args = Cli::parse();
  let mode: TopLevelMode = args
    .mode
    .parse()
    .expect("--mode must be `module` or `global`");

  let mut input = String::new();
  stdin()
    .read_to_string(&mut input)
    .expect("read from stdin");
  let document: serde_json::Value = match serde_json::from_str(&input) {
    Ok(document) => document,
    Err(err) => {
      eprintln!("error: stdin is not valid JSON: {}", err);
      return ExitCode::from(2);
    }
  };
  let tree = match ast_js::estree::from_json(&document) {
    Ok(tree) => tree,
    Err(err) => {
      eprintln!("error[{}]: {}", err.typ.code(), err.typ.message());
      return ExitCode::from(2);
    }
  };

  let sem = bind(&tree, mode, DEFAULT_GLOBALS);
  let diagnostics = lint(&tree, &sem, FileId(0));

  let provider = CliSource {
    name: args.file_name,
    text: args
      .source
      .map(|path| fs::read_to_string(&path).expect("read source file")),
  };
  let options = RenderOptions {
    color: !args.no_color,
    ..RenderOptions::default()
  };
  for diagnostic in &diagnostics {
    print!("{}", render_diagnostic_with_options(&provider, diagnostic, options));
  }

  if diagnostics.is_empty() {
    ExitCode::SUCCESS
  } else {
    ExitCode::from(1)
  }
}
