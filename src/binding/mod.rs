//! Binding stage: scopes, operator resolution, and the typed bound tree.

mod binder;
mod node;
mod operators;
mod scope;

pub use binder::{bind_global_scope, BoundGlobalScope};
pub use node::{write_flattened, BoundExpression, BoundStatement};
pub use operators::{
    BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind,
};
pub use scope::BoundScope;
