//! Scope and type resolution: syntax tree in, bound tree plus diagnostics out.

use std::mem;
use std::sync::Arc;

use crate::binding::node::{BoundExpression, BoundStatement};
use crate::binding::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::binding::scope::BoundScope;
use crate::diagnostics::{Diagnostic, DiagnosticBag};
use crate::symbols::{TypeSymbol, VariableId, VariableSymbol};
use crate::syntax::ast::{
    AssignmentExpressionSyntax, BinaryExpressionSyntax, BlockStatementSyntax,
    CompilationUnitSyntax, ExpressionSyntax, ForStatementSyntax, IfStatementSyntax,
    LiteralExpressionSyntax, NameExpressionSyntax, StatementSyntax, UnaryExpressionSyntax,
    VariableDeclarationSyntax, WhileStatementSyntax,
};
use crate::syntax::{Token, TokenKind};
use crate::value::Value;

/// Per-submission binding snapshot.
///
/// Carries the previous submission's snapshot (forming the session chain),
/// the diagnostics accumulated across the chain, the variables declared at
/// top level, the bound top-level statement, and the next free storage
/// identifier for chained binding.
#[derive(Debug)]
pub struct BoundGlobalScope {
    previous: Option<Arc<BoundGlobalScope>>,
    diagnostics: Vec<Diagnostic>,
    variables: Vec<VariableSymbol>,
    statement: BoundStatement,
    next_variable_id: u32,
}

impl BoundGlobalScope {
    /// Returns the previous submission's snapshot, if chained.
    pub fn previous(&self) -> Option<&Arc<BoundGlobalScope>> {
        self.previous.as_ref()
    }

    /// Returns the accumulated diagnostics, previous submissions first.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the variables declared at the top level of this submission.
    pub fn variables(&self) -> &[VariableSymbol] {
        &self.variables
    }

    /// Returns the bound top-level statement.
    pub fn statement(&self) -> &BoundStatement {
        &self.statement
    }

    /// Returns the first storage identifier not yet taken by the chain.
    pub fn next_variable_id(&self) -> u32 {
        self.next_variable_id
    }
}

/// Binds one submission against an optional previous global scope.
///
/// Pure with respect to its inputs: the syntax tree is never mutated and
/// the same inputs always produce the same snapshot.
pub fn bind_global_scope(
    previous: Option<Arc<BoundGlobalScope>>,
    unit: &CompilationUnitSyntax,
) -> BoundGlobalScope {
    let parent = create_parent_scopes(previous.as_deref());
    let next_variable_id = previous.as_ref().map_or(0, |scope| scope.next_variable_id);

    let mut binder = Binder::new(parent, next_variable_id);
    let statement = binder.bind_top_level_statement(&unit.statement);
    let variables = binder.scope.declared_variables();

    let mut diagnostics = Vec::new();
    if let Some(previous) = &previous {
        diagnostics.extend(previous.diagnostics.iter().cloned());
    }
    diagnostics.extend(binder.diagnostics);

    BoundGlobalScope {
        previous,
        diagnostics,
        variables,
        statement,
        next_variable_id: binder.next_variable_id,
    }
}

/// Replays the chain's declared variables, oldest submission first, as
/// nested scopes. Later submissions see and may shadow earlier names.
fn create_parent_scopes(previous: Option<&BoundGlobalScope>) -> Option<Box<BoundScope>> {
    let mut chain = Vec::new();
    let mut current = previous;
    while let Some(scope) = current {
        chain.push(scope);
        current = scope.previous.as_deref();
    }

    let mut parent: Option<Box<BoundScope>> = None;
    for global in chain.into_iter().rev() {
        let mut scope = BoundScope::new(parent);
        for variable in &global.variables {
            scope.try_declare(variable.clone());
        }
        parent = Some(Box::new(scope));
    }

    parent
}

struct Binder {
    diagnostics: DiagnosticBag,
    scope: BoundScope,
    next_variable_id: u32,
}

impl Binder {
    fn new(parent: Option<Box<BoundScope>>, next_variable_id: u32) -> Self {
        Self {
            diagnostics: DiagnosticBag::new(),
            scope: BoundScope::new(parent),
            next_variable_id,
        }
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    /// Binds the submission's outermost statement.
    ///
    /// An outermost block is the submission body: it binds in the
    /// submission scope itself, so its declarations are the ones later
    /// submissions see. Nested blocks keep their own scopes.
    fn bind_top_level_statement(&mut self, syntax: &StatementSyntax) -> BoundStatement {
        match syntax {
            StatementSyntax::Block(node) => BoundStatement::Block(
                node.statements
                    .iter()
                    .map(|statement| self.bind_statement(statement))
                    .collect(),
            ),
            other => self.bind_statement(other),
        }
    }

    fn bind_statement(&mut self, syntax: &StatementSyntax) -> BoundStatement {
        match syntax {
            StatementSyntax::Block(node) => self.bind_block_statement(node),
            StatementSyntax::Expression(node) => {
                BoundStatement::Expression(self.bind_expression(&node.expression))
            }
            StatementSyntax::VariableDeclaration(node) => self.bind_variable_declaration(node),
            StatementSyntax::If(node) => self.bind_if_statement(node),
            StatementSyntax::While(node) => self.bind_while_statement(node),
            StatementSyntax::For(node) => self.bind_for_statement(node),
        }
    }

    fn bind_block_statement(&mut self, node: &BlockStatementSyntax) -> BoundStatement {
        self.push_scope();
        let statements = node
            .statements
            .iter()
            .map(|statement| self.bind_statement(statement))
            .collect();
        self.pop_scope();

        BoundStatement::Block(statements)
    }

    fn bind_variable_declaration(&mut self, node: &VariableDeclarationSyntax) -> BoundStatement {
        let read_only = node.keyword_token.kind == TokenKind::LetKeyword;
        let initializer = self.bind_expression(&node.initializer);
        let variable = self.declare_variable(&node.identifier_token, read_only, initializer.ty());

        BoundStatement::VariableDeclaration {
            variable,
            initializer,
        }
    }

    fn bind_if_statement(&mut self, node: &IfStatementSyntax) -> BoundStatement {
        let condition = self.bind_expression_of_type(&node.condition, TypeSymbol::Bool);
        let then_statement = Box::new(self.bind_statement(&node.then_statement));
        let else_statement = node
            .else_clause
            .as_ref()
            .map(|clause| Box::new(self.bind_statement(&clause.else_statement)));

        BoundStatement::If {
            condition,
            then_statement,
            else_statement,
        }
    }

    fn bind_while_statement(&mut self, node: &WhileStatementSyntax) -> BoundStatement {
        let condition = self.bind_expression_of_type(&node.condition, TypeSymbol::Bool);
        let body = Box::new(self.bind_statement(&node.body));

        BoundStatement::While { condition, body }
    }

    fn bind_for_statement(&mut self, node: &ForStatementSyntax) -> BoundStatement {
        let lower_bound = self.bind_expression_of_type(&node.lower_bound, TypeSymbol::Int);
        let upper_bound = self.bind_expression_of_type(&node.upper_bound, TypeSymbol::Int);

        // The induction variable lives in a scope covering only the loop,
        // and is read-only: the desugared increment bypasses the check.
        self.push_scope();
        let variable = self.declare_variable(&node.identifier_token, true, TypeSymbol::Int);
        let body = Box::new(self.bind_statement(&node.body));
        self.pop_scope();

        BoundStatement::For {
            variable,
            lower_bound,
            upper_bound,
            body,
        }
    }

    // -----------------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------------

    fn bind_expression_of_type(
        &mut self,
        syntax: &ExpressionSyntax,
        expected: TypeSymbol,
    ) -> BoundExpression {
        let expression = self.bind_expression(syntax);
        let actual = expression.ty();

        if actual != expected && actual != TypeSymbol::Error {
            self.diagnostics
                .report_cannot_convert(syntax.span(), actual, expected);
        }

        expression
    }

    fn bind_expression(&mut self, syntax: &ExpressionSyntax) -> BoundExpression {
        match syntax {
            ExpressionSyntax::Literal(node) => self.bind_literal_expression(node),
            ExpressionSyntax::Name(node) => self.bind_name_expression(node),
            ExpressionSyntax::Unary(node) => self.bind_unary_expression(node),
            ExpressionSyntax::Binary(node) => self.bind_binary_expression(node),
            ExpressionSyntax::Parenthesized(node) => self.bind_expression(&node.expression),
            ExpressionSyntax::Assignment(node) => self.bind_assignment_expression(node),
        }
    }

    fn bind_literal_expression(&mut self, node: &LiteralExpressionSyntax) -> BoundExpression {
        let value = node
            .literal_token
            .value
            .clone()
            .unwrap_or(Value::Integer(0));
        BoundExpression::Literal(value)
    }

    fn bind_name_expression(&mut self, node: &NameExpressionSyntax) -> BoundExpression {
        let token = &node.identifier_token;
        if token.is_synthesized() {
            // The parser inserted this token and already reported it.
            return BoundExpression::Error;
        }

        match self.scope.lookup(&token.text) {
            Some(variable) => BoundExpression::Variable(variable.clone()),
            None => {
                self.diagnostics
                    .report_undefined_name(token.span(), &token.text);
                BoundExpression::Error
            }
        }
    }

    fn bind_unary_expression(&mut self, node: &UnaryExpressionSyntax) -> BoundExpression {
        let operand = self.bind_expression(&node.operand);
        if operand.ty() == TypeSymbol::Error {
            return BoundExpression::Error;
        }

        match BoundUnaryOperator::bind(node.operator_token.kind, operand.ty()) {
            Some(op) => BoundExpression::Unary {
                op,
                operand: Box::new(operand),
            },
            None => {
                self.diagnostics.report_undefined_unary_operator(
                    node.operator_token.span(),
                    &node.operator_token.text,
                    operand.ty(),
                );
                BoundExpression::Error
            }
        }
    }

    fn bind_binary_expression(&mut self, node: &BinaryExpressionSyntax) -> BoundExpression {
        let left = self.bind_expression(&node.left);
        let right = self.bind_expression(&node.right);
        if left.ty() == TypeSymbol::Error || right.ty() == TypeSymbol::Error {
            return BoundExpression::Error;
        }

        match BoundBinaryOperator::bind(node.operator_token.kind, left.ty(), right.ty()) {
            Some(op) => BoundExpression::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            None => {
                self.diagnostics.report_undefined_binary_operator(
                    node.operator_token.span(),
                    &node.operator_token.text,
                    left.ty(),
                    right.ty(),
                );
                BoundExpression::Error
            }
        }
    }

    fn bind_assignment_expression(&mut self, node: &AssignmentExpressionSyntax) -> BoundExpression {
        let name = &node.identifier_token.text;
        let expression = self.bind_expression(&node.expression);

        let Some(variable) = self.scope.lookup(name).cloned() else {
            self.diagnostics
                .report_undefined_name(node.identifier_token.span(), name);
            return expression;
        };

        if variable.is_read_only() {
            self.diagnostics
                .report_cannot_assign(node.equals_token.span(), name);
            return expression;
        }

        let actual = expression.ty();
        if actual != variable.ty() && actual != TypeSymbol::Error {
            self.diagnostics
                .report_cannot_convert(node.expression.span(), actual, variable.ty());
            return expression;
        }

        BoundExpression::Assignment {
            variable,
            expression: Box::new(expression),
        }
    }

    // -----------------------------------------------------------------------
    // Scope handling
    // -----------------------------------------------------------------------

    fn push_scope(&mut self) {
        let current = mem::take(&mut self.scope);
        self.scope = BoundScope::new(Some(Box::new(current)));
    }

    fn pop_scope(&mut self) {
        let parent = self
            .scope
            .take_parent()
            .expect("pop_scope called without a matching push_scope");
        self.scope = *parent;
    }

    /// Creates a symbol with a fresh storage identifier and declares it in
    /// the current scope, reporting a same-scope redeclaration.
    fn declare_variable(
        &mut self,
        identifier_token: &Token,
        read_only: bool,
        ty: TypeSymbol,
    ) -> VariableSymbol {
        let id = VariableId::new(self.next_variable_id);
        self.next_variable_id += 1;

        let variable = VariableSymbol::new(id, identifier_token.text.clone(), read_only, ty);
        if !self.scope.try_declare(variable.clone()) {
            self.diagnostics
                .report_variable_already_declared(identifier_token.span(), &identifier_token.text);
        }

        variable
    }
}
