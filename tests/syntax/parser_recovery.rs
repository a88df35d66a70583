//! Tests for parser termination and recovery on malformed input.

use lark::syntax::ast::{ExpressionSyntax, StatementSyntax};
use lark::syntax::SyntaxTree;

fn messages(tree: &SyntaxTree) -> Vec<String> {
    tree.diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.message().to_string())
        .collect()
}

#[test]
fn malformed_block_terminates_with_diagnostics_and_a_tree() {
    let tree = SyntaxTree::parse("{\n)");

    assert_eq!(
        messages(&tree),
        vec![
            "Unexpected token <CloseParenthesisToken>, expected token <IdentifierToken>."
                .to_string(),
            "Unexpected token <EndOfFileToken>, expected token <CloseBraceToken>.".to_string(),
        ]
    );

    let StatementSyntax::Block(block) = &tree.root().statement else {
        panic!("expected a block statement, got {:?}", tree.root().statement);
    };
    assert_eq!(block.statements.len(), 1);
    assert!(block.close_brace_token.is_synthesized());
}

#[test]
fn stray_close_parenthesis_in_block_reports_once() {
    let tree = SyntaxTree::parse("{ ) }");

    assert_eq!(
        messages(&tree),
        vec!["Unexpected token <CloseParenthesisToken>, expected token <IdentifierToken>."
            .to_string()]
    );
}

#[test]
fn missing_operand_synthesizes_a_name_expression() {
    let tree = SyntaxTree::parse("1 +");

    assert_eq!(
        messages(&tree),
        vec!["Unexpected token <EndOfFileToken>, expected token <IdentifierToken>.".to_string()]
    );

    let StatementSyntax::Expression(statement) = &tree.root().statement else {
        panic!("expected an expression statement");
    };
    let ExpressionSyntax::Binary(binary) = &statement.expression else {
        panic!("expected a binary expression");
    };
    let ExpressionSyntax::Name(name) = binary.right.as_ref() else {
        panic!("expected a synthesized name operand");
    };
    assert!(name.identifier_token.is_synthesized());
    assert!(name.identifier_token.span().is_empty());
}

#[test]
fn missing_close_parenthesis_is_reported_without_consuming() {
    let tree = SyntaxTree::parse("(1 + 2");

    assert_eq!(
        messages(&tree),
        vec![
            "Unexpected token <EndOfFileToken>, expected token <CloseParenthesisToken>."
                .to_string()
        ]
    );
}

#[test]
fn declaration_missing_pieces_reports_each_expected_token() {
    let tree = SyntaxTree::parse("var = 1");

    assert_eq!(
        messages(&tree),
        vec!["Unexpected token <EqualsToken>, expected token <IdentifierToken>.".to_string()]
    );
}

#[test]
fn empty_input_parses_to_a_synthesized_expression_statement() {
    let tree = SyntaxTree::parse("");

    assert_eq!(
        messages(&tree),
        vec!["Unexpected token <EndOfFileToken>, expected token <IdentifierToken>.".to_string()]
    );
    assert!(matches!(
        tree.root().statement,
        StatementSyntax::Expression(_)
    ));
}

#[test]
fn deeply_malformed_input_still_terminates() {
    let tree = SyntaxTree::parse("{ { ) ) } to to var while { ");
    assert!(!tree.diagnostics().is_empty());
}

#[test]
fn node_spans_derive_from_first_and_last_child() {
    let text = "{ var abc = 1 }";
    let tree = SyntaxTree::parse(text);
    assert!(tree.diagnostics().is_empty());

    let root_span = tree.root().statement.span();
    assert_eq!(root_span.start, 0);
    assert_eq!(root_span.end(), text.len());

    let StatementSyntax::Block(block) = &tree.root().statement else {
        panic!("expected a block statement");
    };
    let declaration_span = block.statements[0].span();
    assert_eq!(declaration_span.start, 2);
    assert_eq!(declaration_span.end(), text.len() - 2);
}
