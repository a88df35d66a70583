//! Syntax stage: tokens, lexer, syntax tree, and parser.

pub mod ast;
pub mod facts;

mod lexer;
mod parser;
mod token;

use crate::diagnostics::Diagnostic;
use crate::text::SourceText;

pub use ast::CompilationUnitSyntax;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// An immutable parsed submission: source, root node, and diagnostics.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: SourceText,
    root: CompilationUnitSyntax,
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    /// Parses one submission into a syntax tree.
    pub fn parse(text: &str) -> Self {
        let source = SourceText::from(text);
        let parser = Parser::new(&source);
        let (root, diagnostics) = parser.parse_compilation_unit();
        Self {
            source,
            root,
            diagnostics: diagnostics.into_vec(),
        }
    }

    /// Lexes `text` into the tokens before end-of-file, with diagnostics.
    ///
    /// Whitespace and bad tokens are included; tooling that colorizes or
    /// inspects raw input wants them.
    pub fn parse_tokens(text: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let source = SourceText::from(text);
        let mut lexer = Lexer::new(&source);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfFile {
                break;
            }
            tokens.push(token);
        }

        (tokens, lexer.into_diagnostics().into_vec())
    }

    /// Returns `true` when `text` parses without diagnostics.
    ///
    /// Interactive editors use this to decide whether to keep accepting
    /// lines or submit now. Empty text counts as complete.
    pub fn is_complete_submission(text: &str) -> bool {
        if text.is_empty() {
            return true;
        }
        Self::parse(text).diagnostics.is_empty()
    }

    /// Returns the source text.
    pub fn source(&self) -> &SourceText {
        &self.source
    }

    /// Returns the root compilation unit.
    pub fn root(&self) -> &CompilationUnitSyntax {
        &self.root
    }

    /// Returns the lexical and syntactic diagnostics in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
