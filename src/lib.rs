//! # lark
//!
//! A small imperative scripting language: integer, boolean, and string
//! values; `var`/`let` declarations; assignment; the usual arithmetic,
//! relational, logical, and bitwise operators; block scoping; `if`/`else`;
//! `while`; and bounded `for` loops.
//!
//! Source text moves through five stages:
//!
//! 1. **Lexer**: scans the text model into tokens
//! 2. **Parser**: precedence-climbing recursive descent, resilient to
//!    malformed input
//! 3. **Binder**: scope-chain name resolution and type checking
//! 4. **Lowerer**: desugars control flow into labels and jumps
//! 5. **Evaluator**: executes the flattened program with an explicit
//!    instruction pointer
//!
//! Every stage reports problems as ordered [`Diagnostic`] values instead of
//! failing; a submission produces a value only when the whole chain is
//! diagnostic-free.
//!
//! ```
//! use lark::{Compilation, SyntaxTree, VariableStore};
//!
//! let tree = SyntaxTree::parse("{ var a = 0 (a = 10) * a }");
//! let compilation = Compilation::new(tree);
//! let mut store = VariableStore::new();
//! let result = compilation.evaluate(&mut store).unwrap();
//! assert!(result.diagnostics.is_empty());
//! assert_eq!(result.value, Some(lark::Value::Integer(100)));
//! ```

pub mod binding;
pub mod compilation;
pub mod diagnostics;
pub mod eval;
pub mod lowering;
pub mod symbols;
pub mod syntax;
pub mod text;
pub mod value;

pub use compilation::{Compilation, EvaluationResult};
pub use diagnostics::Diagnostic;
pub use eval::{EvalError, VariableStore};
pub use syntax::SyntaxTree;
pub use text::{SourceText, TextSpan};
pub use value::Value;
