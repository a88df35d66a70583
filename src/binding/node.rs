//! Typed bound tree: the type-checked mirror of the syntax tree.

use std::fmt;

use crate::binding::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::symbols::{Label, TypeSymbol, VariableSymbol};
use crate::syntax::facts;
use crate::value::Value;

/// Bound expression family. Every variant carries enough to derive its type.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    /// Sentinel for an expression that already reported a diagnostic.
    Error,
    /// A literal value.
    Literal(Value),
    /// A resolved variable read.
    Variable(VariableSymbol),
    /// An assignment to a resolved variable.
    Assignment {
        /// Assigned variable.
        variable: VariableSymbol,
        /// Value expression.
        expression: Box<BoundExpression>,
    },
    /// A resolved unary operation.
    Unary {
        /// Resolved operator.
        op: &'static BoundUnaryOperator,
        /// Operand.
        operand: Box<BoundExpression>,
    },
    /// A resolved binary operation.
    Binary {
        /// Left operand.
        left: Box<BoundExpression>,
        /// Resolved operator.
        op: &'static BoundBinaryOperator,
        /// Right operand.
        right: Box<BoundExpression>,
    },
}

impl BoundExpression {
    /// Returns the resolved type of the expression.
    pub fn ty(&self) -> TypeSymbol {
        match self {
            Self::Error => TypeSymbol::Error,
            Self::Literal(value) => value.type_of(),
            Self::Variable(variable) => variable.ty(),
            Self::Assignment { expression, .. } => expression.ty(),
            Self::Unary { op, .. } => op.result_type,
            Self::Binary { op, .. } => op.result_type,
        }
    }
}

/// Bound statement family.
///
/// `Label`, `Goto`, and `ConditionalGoto` only appear after lowering; the
/// binder never produces them.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    /// A sequence of statements with its own scope (until flattening).
    Block(Vec<BoundStatement>),
    /// A bare expression evaluated for its value.
    Expression(BoundExpression),
    /// A variable declaration with initializer.
    VariableDeclaration {
        /// Declared variable.
        variable: VariableSymbol,
        /// Initializer expression.
        initializer: BoundExpression,
    },
    /// An `if` with optional else branch.
    If {
        /// Boolean condition.
        condition: BoundExpression,
        /// Then branch.
        then_statement: Box<BoundStatement>,
        /// Optional else branch.
        else_statement: Option<Box<BoundStatement>>,
    },
    /// A `while` loop.
    While {
        /// Boolean condition.
        condition: BoundExpression,
        /// Loop body.
        body: Box<BoundStatement>,
    },
    /// A bounded `for` loop.
    For {
        /// Induction variable.
        variable: VariableSymbol,
        /// Inclusive lower bound.
        lower_bound: BoundExpression,
        /// Exclusive upper bound.
        upper_bound: BoundExpression,
        /// Loop body.
        body: Box<BoundStatement>,
    },
    /// A jump target; a no-op when executed.
    Label(Label),
    /// An unconditional jump.
    Goto(Label),
    /// A jump taken when the condition matches the polarity.
    ConditionalGoto {
        /// Jump target.
        label: Label,
        /// Boolean condition.
        condition: BoundExpression,
        /// Jump when the condition evaluates to this value.
        jump_if: bool,
    },
}

// ---------------------------------------------------------------------------
// Rendering (used by the REPL's lowered-tree toggle)
// ---------------------------------------------------------------------------

impl fmt::Display for BoundExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("?"),
            Self::Literal(Value::String(text)) => write!(f, "{text:?}"),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Variable(variable) => f.write_str(variable.name()),
            Self::Assignment {
                variable,
                expression,
            } => write!(f, "{} = {expression}", variable.name()),
            Self::Unary { op, operand } => {
                let text = facts::fixed_text(op.token_kind).unwrap_or("?");
                write!(f, "{text}{operand}")
            }
            Self::Binary { left, op, right } => {
                let text = facts::fixed_text(op.token_kind).unwrap_or("?");
                write!(f, "({left} {text} {right})")
            }
        }
    }
}

/// Writes one flattened statement per line, labels flush left.
pub fn write_flattened(statements: &[BoundStatement], out: &mut impl fmt::Write) -> fmt::Result {
    for statement in statements {
        match statement {
            BoundStatement::Label(label) => writeln!(out, "{label}:")?,
            BoundStatement::Goto(label) => writeln!(out, "    goto {label}")?,
            BoundStatement::ConditionalGoto {
                label,
                condition,
                jump_if,
            } => {
                let keyword = if *jump_if { "gotoIfTrue" } else { "gotoIfFalse" };
                writeln!(out, "    {keyword} {condition} {label}")?;
            }
            BoundStatement::Expression(expression) => writeln!(out, "    {expression}")?,
            BoundStatement::VariableDeclaration {
                variable,
                initializer,
            } => {
                let keyword = if variable.is_read_only() { "let" } else { "var" };
                writeln!(out, "    {keyword} {} = {initializer}", variable.name())?;
            }
            BoundStatement::Block(_)
            | BoundStatement::If { .. }
            | BoundStatement::While { .. }
            | BoundStatement::For { .. } => {
                // Flattened programs contain none of these.
                writeln!(out, "    <unlowered statement>")?;
            }
        }
    }
    Ok(())
}
