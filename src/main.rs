//! Interactive REPL driver for `lark`.
//!
//! Collects lines until the submission parses cleanly, evaluates it against
//! a session-owned variable store, and chains successful submissions so
//! variables persist across entries.

use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lark::{Compilation, SyntaxTree, VariableStore};

struct Session {
    show_parse_tree: bool,
    show_lowered_tree: bool,
    previous: Option<Arc<Compilation>>,
    store: VariableStore,
}

fn main() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session {
        show_parse_tree: false,
        show_lowered_tree: false,
        previous: None,
        store: VariableStore::new(),
    };

    let mut submission = String::new();

    loop {
        let prompt = if submission.is_empty() { "» " } else { "· " };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                submission.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error),
        };

        if submission.is_empty() && line.starts_with('#') {
            if !evaluate_meta_command(&line, &mut session) {
                break;
            }
            continue;
        }

        if submission.is_empty() && line.is_empty() {
            continue;
        }

        let force_submit = line.is_empty();
        if !submission.is_empty() {
            submission.push('\n');
        }
        submission.push_str(&line);

        if !SyntaxTree::is_complete_submission(&submission) && !force_submit {
            continue;
        }

        let _ = editor.add_history_entry(submission.as_str());
        evaluate_submission(&submission, &mut session);
        submission.clear();
    }

    Ok(())
}

/// Handles a `#` meta command. Returns `false` to quit the session.
fn evaluate_meta_command(line: &str, session: &mut Session) -> bool {
    match line.trim() {
        "#st" => {
            session.show_parse_tree = !session.show_parse_tree;
            let state = if session.show_parse_tree {
                "Showing parse tree."
            } else {
                "Not showing parse tree."
            };
            println!("{state}");
        }
        "#bt" => {
            session.show_lowered_tree = !session.show_lowered_tree;
            let state = if session.show_lowered_tree {
                "Showing lowered tree."
            } else {
                "Not showing lowered tree."
            };
            println!("{state}");
        }
        "#cls" => print!("\x1b[2J\x1b[H"),
        "#rst" => session.previous = None,
        "#q" => return false,
        other => println!("Unknown meta command: {other}"),
    }
    true
}

fn evaluate_submission(text: &str, session: &mut Session) {
    let syntax_tree = SyntaxTree::parse(text);

    let compilation = match &session.previous {
        Some(previous) => previous.continue_with(syntax_tree),
        None => Compilation::new(syntax_tree),
    };

    if session.show_parse_tree {
        print!("{}", compilation.syntax_tree().root().to_tree_string());
    }

    if session.show_lowered_tree {
        let mut rendered = String::new();
        if compilation.write_lowered_tree(&mut rendered).is_ok() {
            print!("{rendered}");
        }
    }

    let result = match compilation.evaluate(&mut session.store) {
        Ok(result) => result,
        Err(fault) => {
            eprintln!("runtime error: {fault}");
            return;
        }
    };

    if result.diagnostics.is_empty() {
        if let Some(value) = result.value {
            println!("{value}");
        }
        session.previous = Some(Arc::new(compilation));
        return;
    }

    let source = compilation.syntax_tree().source();
    for diagnostic in &result.diagnostics {
        let (line, column) = source.line_column(diagnostic.span().start);
        eprintln!("({line}, {column}): {diagnostic}");
    }
}
