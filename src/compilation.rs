//! Per-submission pipeline orchestration and session chaining.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::binding::{bind_global_scope, write_flattened, BoundGlobalScope, BoundStatement};
use crate::diagnostics::Diagnostic;
use crate::eval::{EvalError, Evaluator, VariableStore};
use crate::lowering::Lowerer;
use crate::syntax::SyntaxTree;
use crate::value::Value;

/// The outcome of evaluating one submission.
///
/// A value is present only when the accumulated diagnostic set is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Diagnostics in report order, whole chain included.
    pub diagnostics: Vec<Diagnostic>,
    /// The resulting value, when there were no diagnostics.
    pub value: Option<Value>,
}

/// One compiled submission, optionally chained to a previous one.
///
/// Chaining makes earlier submissions' top-level variables visible and
/// assignable; nothing from prior submissions is re-validated.
#[derive(Debug)]
pub struct Compilation {
    syntax_tree: SyntaxTree,
    previous: Option<Arc<Compilation>>,
    global_scope: OnceLock<Arc<BoundGlobalScope>>,
}

impl Compilation {
    /// Creates a standalone compilation.
    pub fn new(syntax_tree: SyntaxTree) -> Self {
        Self {
            syntax_tree,
            previous: None,
            global_scope: OnceLock::new(),
        }
    }

    /// Creates a compilation chained to this one.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree) -> Self {
        Self {
            syntax_tree,
            previous: Some(Arc::clone(self)),
            global_scope: OnceLock::new(),
        }
    }

    /// Returns the parsed submission.
    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }

    /// Returns the previous compilation in the chain, if any.
    pub fn previous(&self) -> Option<&Arc<Compilation>> {
        self.previous.as_ref()
    }

    /// Returns the binding snapshot, computing it on first use.
    ///
    /// Computation is pure; concurrent first calls race benignly and the
    /// first published result wins for every caller.
    pub fn global_scope(&self) -> &Arc<BoundGlobalScope> {
        self.global_scope.get_or_init(|| {
            let previous = self
                .previous
                .as_ref()
                .map(|previous| Arc::clone(previous.global_scope()));
            Arc::new(bind_global_scope(previous, self.syntax_tree.root()))
        })
    }

    /// Evaluates the submission against a caller-owned variable store.
    ///
    /// When any diagnostic exists (lexical, syntactic, or binding, from
    /// this submission or earlier in the chain) no code runs and the
    /// result carries the diagnostics. A clean submission runs to
    /// completion or to a runtime fault.
    pub fn evaluate(&self, store: &mut VariableStore) -> Result<EvaluationResult, EvalError> {
        let global_scope = self.global_scope();

        let mut diagnostics: Vec<Diagnostic> = self.syntax_tree.diagnostics().to_vec();
        diagnostics.extend(global_scope.diagnostics().iter().cloned());

        if !diagnostics.is_empty() {
            return Ok(EvaluationResult {
                diagnostics,
                value: None,
            });
        }

        let statements = self.lowered_statements();
        let value = Evaluator::new(&statements, store).evaluate()?;
        Ok(EvaluationResult {
            diagnostics,
            value,
        })
    }

    /// Renders the flattened lowered program, for interactive inspection.
    pub fn write_lowered_tree(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let statements = self.lowered_statements();
        write_flattened(&statements, out)
    }

    fn lowered_statements(&self) -> Vec<BoundStatement> {
        Lowerer::lower(self.global_scope().statement().clone())
    }
}
