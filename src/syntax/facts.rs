//! Fact tables over token kinds: spellings, keywords, and precedences.

use crate::syntax::token::TokenKind;

/// Returns the canonical spelling of a fixed-spelling kind.
pub const fn fixed_text(kind: TokenKind) -> Option<&'static str> {
    let text = match kind {
        TokenKind::Plus => "+",
        TokenKind::Minus => "-",
        TokenKind::Star => "*",
        TokenKind::Slash => "/",
        TokenKind::OpenParenthesis => "(",
        TokenKind::CloseParenthesis => ")",
        TokenKind::OpenBrace => "{",
        TokenKind::CloseBrace => "}",
        TokenKind::Bang => "!",
        TokenKind::Tilde => "~",
        TokenKind::Hat => "^",
        TokenKind::Ampersand => "&",
        TokenKind::AmpersandAmpersand => "&&",
        TokenKind::Pipe => "|",
        TokenKind::PipePipe => "||",
        TokenKind::Equals => "=",
        TokenKind::EqualsEquals => "==",
        TokenKind::BangEquals => "!=",
        TokenKind::Less => "<",
        TokenKind::LessOrEquals => "<=",
        TokenKind::Greater => ">",
        TokenKind::GreaterOrEquals => ">=",
        TokenKind::TrueKeyword => "true",
        TokenKind::FalseKeyword => "false",
        TokenKind::VarKeyword => "var",
        TokenKind::LetKeyword => "let",
        TokenKind::IfKeyword => "if",
        TokenKind::ElseKeyword => "else",
        TokenKind::WhileKeyword => "while",
        TokenKind::ForKeyword => "for",
        TokenKind::ToKeyword => "to",
        _ => return None,
    };
    Some(text)
}

/// Resolves a letter run against the keyword table.
///
/// Unmatched text is an identifier.
pub fn keyword_kind(text: &str) -> TokenKind {
    match text {
        "true" => TokenKind::TrueKeyword,
        "false" => TokenKind::FalseKeyword,
        "var" => TokenKind::VarKeyword,
        "let" => TokenKind::LetKeyword,
        "if" => TokenKind::IfKeyword,
        "else" => TokenKind::ElseKeyword,
        "while" => TokenKind::WhileKeyword,
        "for" => TokenKind::ForKeyword,
        "to" => TokenKind::ToKeyword,
        _ => TokenKind::Identifier,
    }
}

/// Returns `true` for keyword kinds.
pub fn is_keyword(kind: TokenKind) -> bool {
    matches!(fixed_text(kind), Some(text) if keyword_kind(text) == kind)
}

/// Returns the prefix-operator precedence of a kind, or `0` when the kind
/// is not a unary operator.
pub const fn unary_operator_precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Plus | TokenKind::Minus | TokenKind::Bang | TokenKind::Tilde => 6,
        _ => 0,
    }
}

/// Returns the infix-operator precedence of a kind, or `0` when the kind
/// is not a binary operator.
///
/// Returning `0` for non-operators is what terminates precedence climbing.
pub const fn binary_operator_precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Star | TokenKind::Slash => 5,
        TokenKind::Plus | TokenKind::Minus => 4,
        TokenKind::EqualsEquals
        | TokenKind::BangEquals
        | TokenKind::Less
        | TokenKind::LessOrEquals
        | TokenKind::Greater
        | TokenKind::GreaterOrEquals => 3,
        TokenKind::Ampersand | TokenKind::AmpersandAmpersand => 2,
        TokenKind::Pipe | TokenKind::PipePipe | TokenKind::Hat => 1,
        _ => 0,
    }
}

/// Iterates every kind usable as a unary operator.
pub fn unary_operator_kinds() -> impl Iterator<Item = TokenKind> {
    TokenKind::ALL
        .into_iter()
        .filter(|kind| unary_operator_precedence(*kind) > 0)
}

/// Iterates every kind usable as a binary operator.
pub fn binary_operator_kinds() -> impl Iterator<Item = TokenKind> {
    TokenKind::ALL
        .into_iter()
        .filter(|kind| binary_operator_precedence(*kind) > 0)
}
