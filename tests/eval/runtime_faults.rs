//! Tests for the typed runtime fault contract.

use lark::{Compilation, EvalError, SyntaxTree, VariableStore};

fn evaluate(text: &str) -> Result<Option<lark::Value>, EvalError> {
    let compilation = Compilation::new(SyntaxTree::parse(text));
    let result = compilation.evaluate(&mut VariableStore::new())?;
    assert!(
        result.diagnostics.is_empty(),
        "fixture {text:?} reported {:?}",
        result.diagnostics
    );
    Ok(result.value)
}

#[test]
fn division_by_zero_is_a_fault_not_a_diagnostic() {
    assert_eq!(evaluate("1 / 0"), Err(EvalError::DivisionByZero));
    assert_eq!(
        evaluate("{ var d = 0 10 / d }"),
        Err(EvalError::DivisionByZero)
    );
}

#[test]
fn addition_overflow_is_a_fault() {
    assert_eq!(
        evaluate("2147483647 + 1"),
        Err(EvalError::IntegerOverflow)
    );
}

#[test]
fn subtraction_and_negation_overflow_are_faults() {
    assert_eq!(
        evaluate("(0 - 2147483647) - 2"),
        Err(EvalError::IntegerOverflow)
    );
    assert_eq!(
        evaluate("-(0 - 2147483647 - 1)"),
        Err(EvalError::IntegerOverflow)
    );
}

#[test]
fn multiplication_overflow_is_a_fault() {
    assert_eq!(
        evaluate("65536 * 65536"),
        Err(EvalError::IntegerOverflow)
    );
}

#[test]
fn minimum_value_division_by_minus_one_is_a_fault() {
    assert_eq!(
        evaluate("(0 - 2147483647 - 1) / (0 - 1)"),
        Err(EvalError::IntegerOverflow)
    );
}

#[test]
fn a_fault_mid_loop_aborts_the_evaluation() {
    let result = evaluate("{ var n = 1 while n > 0 { n = n * 2 } n }");
    assert_eq!(result, Err(EvalError::IntegerOverflow));
}

#[test]
fn faults_render_as_messages() {
    assert_eq!(EvalError::DivisionByZero.to_string(), "Division by zero.");
    assert_eq!(EvalError::IntegerOverflow.to_string(), "Integer overflow.");
}
