//! Diagnostic payloads and the ordered accumulator used by every stage.

use std::fmt;

use crate::symbols::TypeSymbol;
use crate::syntax::TokenKind;
use crate::text::TextSpan;

/// One reported problem: a source span and a rendered, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    span: TextSpan,
    message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(span: TextSpan, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Returns the source span the diagnostic points at.
    pub const fn span(&self) -> TextSpan {
        self.span
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered diagnostic accumulator with one constructor per catalogue entry.
///
/// The exact message wording is part of the observable contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of reported diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Iterates diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Appends every diagnostic from `other`, preserving order.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(other);
    }

    /// Consumes the bag into its ordered diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Reports a character no token production recognizes.
    pub fn report_bad_character(&mut self, position: usize, character: char) {
        let span = TextSpan::new(position, 1);
        self.report(span, format!("Bad character '{character}'."));
    }

    /// Reports a digit run that does not fit the target numeric type.
    pub fn report_invalid_number(&mut self, span: TextSpan, text: &str, ty: TypeSymbol) {
        self.report(span, format!("The number {text} isn't a valid {ty}."));
    }

    /// Reports a string literal left open at end of input or line break.
    pub fn report_unterminated_string(&mut self, span: TextSpan) {
        self.report(span, "Unterminated string literal.".to_string());
    }

    /// Reports a token mismatch discovered by the parser.
    pub fn report_unexpected_token(&mut self, span: TextSpan, actual: TokenKind, expected: TokenKind) {
        self.report(
            span,
            format!("Unexpected token <{actual}>, expected token <{expected}>."),
        );
    }

    /// Reports a name that resolves to no declared variable.
    pub fn report_undefined_name(&mut self, span: TextSpan, name: &str) {
        self.report(span, format!("Variable '{name}' doesn't exist."));
    }

    /// Reports a redeclaration within one scope.
    pub fn report_variable_already_declared(&mut self, span: TextSpan, name: &str) {
        self.report(span, format!("Variable '{name}' is already declared."));
    }

    /// Reports an assignment to a read-only variable.
    pub fn report_cannot_assign(&mut self, span: TextSpan, name: &str) {
        self.report(
            span,
            format!("Variable '{name}' is read-only and cannot be assigned to."),
        );
    }

    /// Reports a type that cannot be used where another is required.
    pub fn report_cannot_convert(&mut self, span: TextSpan, from: TypeSymbol, to: TypeSymbol) {
        self.report(
            span,
            format!("Type conversion failed from '{from}' to '{to}'."),
        );
    }

    /// Reports a unary operator applied to an unsupported operand type.
    pub fn report_undefined_unary_operator(
        &mut self,
        span: TextSpan,
        operator: &str,
        operand: TypeSymbol,
    ) {
        self.report(
            span,
            format!("Unary operator '{operator}' not defined for type '{operand}'."),
        );
    }

    /// Reports a binary operator applied to unsupported operand types.
    pub fn report_undefined_binary_operator(
        &mut self,
        span: TextSpan,
        operator: &str,
        left: TypeSymbol,
        right: TypeSymbol,
    ) {
        self.report(
            span,
            format!("Binary operator '{operator}' not defined for types '{left}' and '{right}'."),
        );
    }

    fn report(&mut self, span: TextSpan, message: String) {
        self.diagnostics.push(Diagnostic::new(span, message));
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}
