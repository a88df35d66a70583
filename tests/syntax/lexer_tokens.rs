//! Tests for individual token scanning behavior.

use lark::syntax::{SyntaxTree, TokenKind};
use lark::text::SourceText;
use lark::Value;

fn single_token(text: &str) -> lark::syntax::Token {
    let (mut tokens, diagnostics) = SyntaxTree::parse_tokens(text);
    assert!(diagnostics.is_empty(), "lexing {text:?} reported {diagnostics:?}");
    assert_eq!(tokens.len(), 1, "lexing {text:?} produced {tokens:?}");
    tokens.remove(0)
}

#[test]
fn number_token_carries_its_integer_value() {
    let token = single_token("1234");
    assert_eq!(token.kind, TokenKind::Number);
    assert_eq!(token.text, "1234");
    assert_eq!(token.value, Some(Value::Integer(1234)));
}

#[test]
fn number_overflow_reports_invalid_number_and_still_lexes() {
    let (tokens, diagnostics) = SyntaxTree::parse_tokens("99999999999");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, Some(Value::Integer(0)));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message(),
        "The number 99999999999 isn't a valid int."
    );
    assert_eq!(diagnostics[0].span().start, 0);
    assert_eq!(diagnostics[0].span().length, 11);
}

#[test]
fn identifier_is_a_maximal_letter_run() {
    let token = single_token("abc");
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.text, "abc");
    assert_eq!(token.value, None);
}

#[test]
fn string_value_excludes_the_quotes() {
    let token = single_token("\"hello\"");
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text, "\"hello\"");
    assert_eq!(token.value, Some(Value::String("hello".to_string())));
}

#[test]
fn escaped_quote_does_not_terminate_the_string() {
    let token = single_token(r#""say \"hi\"""#);
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.value, Some(Value::String("say \"hi\"".to_string())));
}

#[test]
fn unterminated_string_reports_and_stops_at_end_of_input() {
    let (tokens, diagnostics) = SyntaxTree::parse_tokens("\"text");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, Some(Value::String("text".to_string())));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "Unterminated string literal.");
    assert_eq!(diagnostics[0].span().start, 0);
    assert_eq!(diagnostics[0].span().length, 1);
}

#[test]
fn unterminated_string_stops_at_a_line_break() {
    let (tokens, diagnostics) = SyntaxTree::parse_tokens("\"text\n1");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "Unterminated string literal.");

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::String, TokenKind::Whitespace, TokenKind::Number]
    );
}

#[test]
fn whitespace_collapses_into_one_token() {
    let (tokens, diagnostics) = SyntaxTree::parse_tokens("1 \t\n  2");
    assert!(diagnostics.is_empty());

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Number, TokenKind::Whitespace, TokenKind::Number]
    );
    assert_eq!(tokens[1].text, " \t\n  ");
}

#[test]
fn bad_character_reports_and_skips_one_character() {
    let (tokens, diagnostics) = SyntaxTree::parse_tokens("1$2");
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Number, TokenKind::Bad, TokenKind::Number]
    );

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "Bad character '$'.");
    assert_eq!(diagnostics[0].span().start, 1);
}

#[test]
fn adjacent_bad_characters_each_report_once() {
    let (_, diagnostics) = SyntaxTree::parse_tokens("$$");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].message(), "Bad character '$'.");
    assert_eq!(diagnostics[1].message(), "Bad character '$'.");
}

#[test]
fn end_of_input_token_is_idempotent() {
    let source = SourceText::from("+");
    let mut lexer = lark::syntax::Lexer::new(&source);

    assert_eq!(lexer.next_token().kind, TokenKind::Plus);
    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EndOfFile);
        assert_eq!(token.position, 1);
        assert!(token.text.is_empty());
    }
}

#[test]
fn token_spans_cover_their_source_text() {
    let text = "var abc = 12";
    let (tokens, _) = SyntaxTree::parse_tokens(text);
    let source = SourceText::from(text);

    for token in &tokens {
        assert_eq!(source.text(token.span()), token.text);
    }
}
