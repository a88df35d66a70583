//! Control-flow lowering: desugars structured statements into labels and
//! jumps, then flattens nested blocks into one linear sequence.

use crate::binding::{BoundBinaryOperator, BoundExpression, BoundStatement};
use crate::symbols::{Label, TypeSymbol, VariableId, VariableSymbol};
use crate::syntax::TokenKind;
use crate::value::Value;

/// One lowering pass over a bound statement tree.
///
/// Label numbers and temporary-variable numbers come from counters private
/// to the pass, so concurrent or repeated passes never share state.
pub struct Lowerer {
    label_count: u32,
    temp_count: u32,
}

impl Lowerer {
    /// Lowers a bound statement into a flattened label/jump sequence.
    pub fn lower(statement: BoundStatement) -> Vec<BoundStatement> {
        let mut lowerer = Lowerer {
            label_count: 0,
            temp_count: 0,
        };
        let rewritten = lowerer.rewrite_statement(statement);
        flatten(rewritten)
    }

    fn generate_label(&mut self) -> Label {
        let label = Label::new(self.label_count);
        self.label_count += 1;
        label
    }

    fn generate_upper_bound_variable(&mut self) -> VariableSymbol {
        let id = VariableId::generated(self.temp_count);
        self.temp_count += 1;
        VariableSymbol::generated(id, "upperBound", true, TypeSymbol::Int)
    }

    fn rewrite_statement(&mut self, statement: BoundStatement) -> BoundStatement {
        match statement {
            BoundStatement::Block(statements) => BoundStatement::Block(
                statements
                    .into_iter()
                    .map(|statement| self.rewrite_statement(statement))
                    .collect(),
            ),
            BoundStatement::If {
                condition,
                then_statement,
                else_statement,
            } => self.rewrite_if(condition, *then_statement, else_statement),
            BoundStatement::While { condition, body } => self.rewrite_while(condition, *body),
            BoundStatement::For {
                variable,
                lower_bound,
                upper_bound,
                body,
            } => self.rewrite_for(variable, lower_bound, upper_bound, *body),
            other => other,
        }
    }

    /// `if c then` becomes:
    ///
    /// ```text
    /// gotoIfFalse c end
    /// then
    /// end:
    /// ```
    ///
    /// `if c then else e` becomes:
    ///
    /// ```text
    /// gotoIfFalse c else
    /// then
    /// goto end
    /// else:
    /// e
    /// end:
    /// ```
    fn rewrite_if(
        &mut self,
        condition: BoundExpression,
        then_statement: BoundStatement,
        else_statement: Option<Box<BoundStatement>>,
    ) -> BoundStatement {
        let result = match else_statement {
            None => {
                let end_label = self.generate_label();
                BoundStatement::Block(vec![
                    goto_if_false(end_label, condition),
                    then_statement,
                    BoundStatement::Label(end_label),
                ])
            }
            Some(else_statement) => {
                let else_label = self.generate_label();
                let end_label = self.generate_label();
                BoundStatement::Block(vec![
                    goto_if_false(else_label, condition),
                    then_statement,
                    BoundStatement::Goto(end_label),
                    BoundStatement::Label(else_label),
                    *else_statement,
                    BoundStatement::Label(end_label),
                ])
            }
        };

        self.rewrite_statement(result)
    }

    /// `while c body` becomes:
    ///
    /// ```text
    /// check:
    /// gotoIfFalse c end
    /// body
    /// goto check
    /// end:
    /// ```
    fn rewrite_while(&mut self, condition: BoundExpression, body: BoundStatement) -> BoundStatement {
        let check_label = self.generate_label();
        let end_label = self.generate_label();

        let result = BoundStatement::Block(vec![
            BoundStatement::Label(check_label),
            goto_if_false(end_label, condition),
            body,
            BoundStatement::Goto(check_label),
            BoundStatement::Label(end_label),
        ]);

        self.rewrite_statement(result)
    }

    /// `for v = lower to upper body` becomes:
    ///
    /// ```text
    /// {
    ///     let <>_upperBound = upper
    ///     let v = lower
    ///     while v < <>_upperBound {
    ///         body
    ///         v = v + 1
    ///     }
    /// }
    /// ```
    ///
    /// The hidden declaration fixes the bound even when `body` mutates
    /// variables the original bound expression reads. The generated `while`
    /// is rewritten in turn, so nested control flow composes.
    fn rewrite_for(
        &mut self,
        variable: VariableSymbol,
        lower_bound: BoundExpression,
        upper_bound: BoundExpression,
        body: BoundStatement,
    ) -> BoundStatement {
        let upper_bound_variable = self.generate_upper_bound_variable();

        let upper_bound_declaration = BoundStatement::VariableDeclaration {
            variable: upper_bound_variable.clone(),
            initializer: upper_bound,
        };
        let variable_declaration = BoundStatement::VariableDeclaration {
            variable: variable.clone(),
            initializer: lower_bound,
        };

        let condition = BoundExpression::Binary {
            left: Box::new(BoundExpression::Variable(variable.clone())),
            op: required_binary_operator(TokenKind::Less, TypeSymbol::Int, TypeSymbol::Int),
            right: Box::new(BoundExpression::Variable(upper_bound_variable)),
        };

        let increment = BoundExpression::Assignment {
            variable: variable.clone(),
            expression: Box::new(BoundExpression::Binary {
                left: Box::new(BoundExpression::Variable(variable)),
                op: required_binary_operator(TokenKind::Plus, TypeSymbol::Int, TypeSymbol::Int),
                right: Box::new(BoundExpression::Literal(Value::Integer(1))),
            }),
        };

        let while_body = BoundStatement::Block(vec![body, BoundStatement::Expression(increment)]);
        let while_statement = BoundStatement::While {
            condition,
            body: Box::new(while_body),
        };

        let result = BoundStatement::Block(vec![
            upper_bound_declaration,
            variable_declaration,
            while_statement,
        ]);

        self.rewrite_statement(result)
    }
}

fn goto_if_false(label: Label, condition: BoundExpression) -> BoundStatement {
    BoundStatement::ConditionalGoto {
        label,
        condition,
        jump_if: false,
    }
}

fn required_binary_operator(
    kind: TokenKind,
    left: TypeSymbol,
    right: TypeSymbol,
) -> &'static BoundBinaryOperator {
    BoundBinaryOperator::bind(kind, left, right)
        .expect("operator table is missing an entry the lowerer relies on")
}

/// Depth-first, order-preserving inlining of nested blocks into one
/// top-level sequence.
fn flatten(statement: BoundStatement) -> Vec<BoundStatement> {
    let mut statements = Vec::new();
    let mut stack = vec![statement];

    while let Some(current) = stack.pop() {
        match current {
            BoundStatement::Block(children) => {
                for child in children.into_iter().rev() {
                    stack.push(child);
                }
            }
            other => statements.push(other),
        }
    }

    statements
}
