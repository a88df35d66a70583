//! Hand-rolled scanner producing one token per call.

use crate::diagnostics::DiagnosticBag;
use crate::symbols::TypeSymbol;
use crate::syntax::facts;
use crate::syntax::token::{Token, TokenKind};
use crate::text::{SourceText, TextSpan};
use crate::value::Value;

/// Scanner over a [`SourceText`].
///
/// Every call to [`Lexer::next_token`] either consumes at least one
/// character or returns the end-of-file token, so repeated calls always
/// terminate. Lexical problems are reported into the diagnostic bag; a
/// token is still produced.
pub struct Lexer<'a> {
    text: &'a SourceText,
    position: usize,
    diagnostics: DiagnosticBag,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer at the start of `text`.
    pub fn new(text: &'a SourceText) -> Self {
        Self {
            text,
            position: 0,
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Consumes the lexer into its accumulated diagnostics.
    pub fn into_diagnostics(self) -> DiagnosticBag {
        self.diagnostics
    }

    /// Scans the next token and advances past it.
    ///
    /// At end of input this returns the end-of-file token and keeps doing
    /// so on every further call.
    pub fn next_token(&mut self) -> Token {
        let start = self.position;

        let kind = match self.current() {
            None => TokenKind::EndOfFile,
            Some('+') => self.single(TokenKind::Plus),
            Some('-') => self.single(TokenKind::Minus),
            Some('*') => self.single(TokenKind::Star),
            Some('/') => self.single(TokenKind::Slash),
            Some('(') => self.single(TokenKind::OpenParenthesis),
            Some(')') => self.single(TokenKind::CloseParenthesis),
            Some('{') => self.single(TokenKind::OpenBrace),
            Some('}') => self.single(TokenKind::CloseBrace),
            Some('~') => self.single(TokenKind::Tilde),
            Some('^') => self.single(TokenKind::Hat),
            Some('!') => self.compound('=', TokenKind::BangEquals, TokenKind::Bang),
            Some('&') => self.compound('&', TokenKind::AmpersandAmpersand, TokenKind::Ampersand),
            Some('|') => self.compound('|', TokenKind::PipePipe, TokenKind::Pipe),
            Some('=') => self.compound('=', TokenKind::EqualsEquals, TokenKind::Equals),
            Some('<') => self.compound('=', TokenKind::LessOrEquals, TokenKind::Less),
            Some('>') => self.compound('=', TokenKind::GreaterOrEquals, TokenKind::Greater),
            Some('"') => return self.read_string(start),
            Some(c) if c.is_ascii_digit() => return self.read_number(start),
            Some(c) if c.is_alphabetic() => self.read_identifier_or_keyword(start),
            Some(c) if c.is_whitespace() => self.read_whitespace(),
            Some(c) => {
                self.diagnostics.report_bad_character(start, c);
                self.position += 1;
                TokenKind::Bad
            }
        };

        self.finish(kind, start)
    }

    fn finish(&self, kind: TokenKind, start: usize) -> Token {
        let text = match facts::fixed_text(kind) {
            Some(text) => text.to_string(),
            None => self.text.text(TextSpan::from_bounds(start, self.position)),
        };
        Token::new(kind, start, text, None)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.position += 1;
        kind
    }

    fn compound(&mut self, second: char, matched: TokenKind, fallback: TokenKind) -> TokenKind {
        if self.lookahead() == Some(second) {
            self.position += 2;
            matched
        } else {
            self.position += 1;
            fallback
        }
    }

    fn read_number(&mut self, start: usize) -> Token {
        while matches!(self.current(), Some(c) if c.is_ascii_digit()) {
            self.position += 1;
        }

        let span = TextSpan::from_bounds(start, self.position);
        let text = self.text.text(span);
        let value = match text.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                self.diagnostics
                    .report_invalid_number(span, &text, TypeSymbol::Int);
                0
            }
        };

        Token::new(TokenKind::Number, start, text, Some(Value::Integer(value)))
    }

    fn read_identifier_or_keyword(&mut self, start: usize) -> TokenKind {
        while matches!(self.current(), Some(c) if c.is_alphabetic()) {
            self.position += 1;
        }

        let text = self.text.text(TextSpan::from_bounds(start, self.position));
        facts::keyword_kind(&text)
    }

    fn read_whitespace(&mut self) -> TokenKind {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.position += 1;
        }
        TokenKind::Whitespace
    }

    fn read_string(&mut self, start: usize) -> Token {
        // Skip the opening quote.
        self.position += 1;

        let mut value = String::new();
        loop {
            match self.current() {
                None | Some('\r') | Some('\n') => {
                    self.diagnostics
                        .report_unterminated_string(TextSpan::new(start, 1));
                    break;
                }
                Some('\\') if self.lookahead() == Some('"') => {
                    value.push('"');
                    self.position += 2;
                }
                Some('"') => {
                    self.position += 1;
                    break;
                }
                Some(c) => {
                    value.push(c);
                    self.position += 1;
                }
            }
        }

        let text = self.text.text(TextSpan::from_bounds(start, self.position));
        Token::new(TokenKind::String, start, text, Some(Value::String(value)))
    }

    fn current(&self) -> Option<char> {
        self.text.char_at(self.position)
    }

    fn lookahead(&self) -> Option<char> {
        self.text.char_at(self.position + 1)
    }
}
