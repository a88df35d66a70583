//! Label-indexed execution of a flattened bound statement sequence.

use std::collections::HashMap;

use crate::binding::{
    BoundBinaryOperatorKind, BoundExpression, BoundStatement, BoundUnaryOperatorKind,
};
use crate::eval::error::EvalError;
use crate::eval::store::VariableStore;
use crate::symbols::{Label, VariableSymbol};
use crate::value::Value;

/// Executes one flattened statement sequence against a caller-owned store.
///
/// Shapes the lowerer never emits (nested blocks, structured control flow,
/// error expressions, unresolvable labels) are pipeline defects here and
/// abort with a panic rather than being reported or swallowed.
pub struct Evaluator<'a> {
    statements: &'a [BoundStatement],
    store: &'a mut VariableStore,
    last_value: Option<Value>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over a flattened sequence.
    pub fn new(statements: &'a [BoundStatement], store: &'a mut VariableStore) -> Self {
        Self {
            statements,
            store,
            last_value: None,
        }
    }

    /// Runs the sequence to completion.
    ///
    /// Returns the value of the last evaluated expression or declaration,
    /// or `None` when nothing produced a value.
    pub fn evaluate(mut self) -> Result<Option<Value>, EvalError> {
        let label_targets = self.build_label_targets();
        let statements = self.statements;

        let mut index = 0;
        while index < statements.len() {
            match &statements[index] {
                BoundStatement::Expression(expression) => {
                    self.last_value = Some(self.evaluate_expression(expression)?);
                    index += 1;
                }
                BoundStatement::VariableDeclaration {
                    variable,
                    initializer,
                } => {
                    let value = self.evaluate_expression(initializer)?;
                    self.store.set(variable.id(), value.clone());
                    self.last_value = Some(value);
                    index += 1;
                }
                BoundStatement::Label(_) => {
                    index += 1;
                }
                BoundStatement::Goto(label) => {
                    index = resolve_label(&label_targets, *label);
                }
                BoundStatement::ConditionalGoto {
                    label,
                    condition,
                    jump_if,
                } => {
                    let value = as_boolean(self.evaluate_expression(condition)?);
                    if value == *jump_if {
                        index = resolve_label(&label_targets, *label);
                    } else {
                        index += 1;
                    }
                }
                statement @ (BoundStatement::Block(_)
                | BoundStatement::If { .. }
                | BoundStatement::While { .. }
                | BoundStatement::For { .. }) => {
                    panic!("evaluator received an unlowered statement: {statement:?}")
                }
            }
        }

        Ok(self.last_value)
    }

    /// Maps each label to the index just past its label statement, so jump
    /// targets never re-execute the label itself.
    fn build_label_targets(&self) -> HashMap<Label, usize> {
        let mut targets = HashMap::new();
        for (index, statement) in self.statements.iter().enumerate() {
            if let BoundStatement::Label(label) = statement {
                let previous = targets.insert(*label, index + 1);
                assert!(
                    previous.is_none(),
                    "label {label} bound more than once in a flattened program"
                );
            }
        }
        targets
    }

    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    fn evaluate_expression(&mut self, expression: &BoundExpression) -> Result<Value, EvalError> {
        match expression {
            BoundExpression::Error => {
                panic!("evaluator received an error expression; binding diagnostics were ignored")
            }
            BoundExpression::Literal(value) => Ok(value.clone()),
            BoundExpression::Variable(variable) => Ok(self.read_variable(variable)),
            BoundExpression::Assignment {
                variable,
                expression,
            } => {
                let value = self.evaluate_expression(expression)?;
                self.store.set(variable.id(), value.clone());
                Ok(value)
            }
            BoundExpression::Unary { op, operand } => {
                let operand = self.evaluate_expression(operand)?;
                evaluate_unary(op.kind, operand)
            }
            BoundExpression::Binary { left, op, right } => {
                let left = self.evaluate_expression(left)?;
                let right = self.evaluate_expression(right)?;
                evaluate_binary(op.kind, left, right)
            }
        }
    }

    fn read_variable(&self, variable: &VariableSymbol) -> Value {
        self.store
            .get(variable.id())
            .cloned()
            .unwrap_or_else(|| {
                panic!(
                    "variable '{}' read before its declaration was evaluated",
                    variable.name()
                )
            })
    }
}

fn resolve_label(targets: &HashMap<Label, usize>, label: Label) -> usize {
    *targets
        .get(&label)
        .unwrap_or_else(|| panic!("goto target {label} has no label in the flattened program"))
}

fn evaluate_unary(kind: BoundUnaryOperatorKind, operand: Value) -> Result<Value, EvalError> {
    let result = match kind {
        BoundUnaryOperatorKind::Identity => Value::Integer(as_integer(operand)),
        BoundUnaryOperatorKind::Negation => Value::Integer(
            as_integer(operand)
                .checked_neg()
                .ok_or(EvalError::IntegerOverflow)?,
        ),
        BoundUnaryOperatorKind::LogicalNegation => Value::Boolean(!as_boolean(operand)),
        BoundUnaryOperatorKind::BitwiseNegation => Value::Integer(!as_integer(operand)),
    };
    Ok(result)
}

fn evaluate_binary(
    kind: BoundBinaryOperatorKind,
    left: Value,
    right: Value,
) -> Result<Value, EvalError> {
    let result = match kind {
        BoundBinaryOperatorKind::Addition => {
            integer_op(left, right, |a, b| a.checked_add(b).ok_or(EvalError::IntegerOverflow))?
        }
        BoundBinaryOperatorKind::Subtraction => {
            integer_op(left, right, |a, b| a.checked_sub(b).ok_or(EvalError::IntegerOverflow))?
        }
        BoundBinaryOperatorKind::Multiplication => {
            integer_op(left, right, |a, b| a.checked_mul(b).ok_or(EvalError::IntegerOverflow))?
        }
        BoundBinaryOperatorKind::Division => integer_op(left, right, |a, b| {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            a.checked_div(b).ok_or(EvalError::IntegerOverflow)
        })?,
        BoundBinaryOperatorKind::Less => comparison_op(left, right, |a, b| a < b),
        BoundBinaryOperatorKind::LessOrEquals => comparison_op(left, right, |a, b| a <= b),
        BoundBinaryOperatorKind::Greater => comparison_op(left, right, |a, b| a > b),
        BoundBinaryOperatorKind::GreaterOrEquals => comparison_op(left, right, |a, b| a >= b),
        BoundBinaryOperatorKind::LogicalAnd => {
            Value::Boolean(as_boolean(left) && as_boolean(right))
        }
        BoundBinaryOperatorKind::LogicalOr => Value::Boolean(as_boolean(left) || as_boolean(right)),
        BoundBinaryOperatorKind::Equals => Value::Boolean(left == right),
        BoundBinaryOperatorKind::NotEquals => Value::Boolean(left != right),
        // The bitwise operators dispatch again on the runtime value kind.
        BoundBinaryOperatorKind::BitwiseAnd => bitwise_op(left, right, |a, b| a & b, |a, b| a & b),
        BoundBinaryOperatorKind::BitwiseOr => bitwise_op(left, right, |a, b| a | b, |a, b| a | b),
        BoundBinaryOperatorKind::BitwiseXor => bitwise_op(left, right, |a, b| a ^ b, |a, b| a ^ b),
    };
    Ok(result)
}

fn integer_op(
    left: Value,
    right: Value,
    op: impl FnOnce(i32, i32) -> Result<i32, EvalError>,
) -> Result<Value, EvalError> {
    op(as_integer(left), as_integer(right)).map(Value::Integer)
}

fn comparison_op(left: Value, right: Value, op: impl FnOnce(i32, i32) -> bool) -> Value {
    Value::Boolean(op(as_integer(left), as_integer(right)))
}

fn bitwise_op(
    left: Value,
    right: Value,
    int_op: impl FnOnce(i32, i32) -> i32,
    bool_op: impl FnOnce(bool, bool) -> bool,
) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Value::Integer(int_op(a, b)),
        (Value::Boolean(a), Value::Boolean(b)) => Value::Boolean(bool_op(a, b)),
        (left, right) => panic!(
            "bitwise operator applied to {} and {}; the binder let a bad pair through",
            left.type_of(),
            right.type_of()
        ),
    }
}

fn as_integer(value: Value) -> i32 {
    match value {
        Value::Integer(value) => value,
        other => panic!("expected an integer operand, found {}", other.type_of()),
    }
}

fn as_boolean(value: Value) -> bool {
    match value {
        Value::Boolean(value) => value,
        other => panic!("expected a boolean operand, found {}", other.type_of()),
    }
}
