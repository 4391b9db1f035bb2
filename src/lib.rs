//! Expression trees for a symbolic maths engine.
//!
//! Expressions are represented as trees of [Node]s. Trees can be walked and rewritten with the
//! structural operations on [Node], compiled against a [Context] into a [CompiledNode], and then
//! evaluated against any number of [Scope]s.

pub mod error;
pub mod node;
pub mod number;
pub mod value;
pub mod context;

#[cfg(test)]
mod tests;

pub use crate::{
    number::Number,
    value::{Value, Matrix},
    context::{Context, Scope, EvaluationSettings},
    node::{
        Node, NodeKind, NodeVariant, Argument, Invocation,
        constant::ConstantNode,
        symbol::SymbolNode,
        range::RangeNode,
        compiled::CompiledNode,
    },
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
