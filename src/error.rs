//! The two error families raised by node trees.
//!
//! [NodeError]s describe a malformed tree, such as constructing a node with the wrong arguments
//! or a rewrite callback which doesn't produce a node. They indicate a bug in whatever built the
//! tree. [MathsError]s come out of evaluation, and usually indicate a problem with the expression
//! the user entered.

use thiserror::Error;

use crate::node::NodeKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The wrong number of arguments was given to a node constructor.
    #[error("{kind} expects {expected} arguments, but got {got}")]
    Arity { kind: NodeKind, expected: &'static str, got: usize },

    /// An argument given to a node constructor was the wrong sort of thing, e.g. a raw number in a
    /// slot which requires a node.
    #[error("{kind} argument {position} must be {expected}")]
    Type { kind: NodeKind, position: usize, expected: &'static str },

    /// A node constructor was invoked as a plain function rather than to create an instance.
    #[error("{kind} must be constructed as an instance")]
    Protocol { kind: NodeKind },

    /// A `map` or `transform` callback returned something other than a node.
    #[error("Callback function must return a Node")]
    CallbackNotNode,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathsError {
    #[error("Undefined symbol {0}")]
    UndefinedSymbol(String),

    #[error("Unknown function {0}")]
    UnknownFunction(String),

    #[error("expected a number, but got {0}")]
    ExpectedNumber(String),

    #[error("function {name} expects {expected} arguments, but got {got}")]
    WrongArgumentCount { name: String, expected: &'static str, got: usize },

    /// Names the range as it was written, or just `range` when the range function is called
    /// directly.
    #[error("{0} has a step of zero")]
    ZeroStep(String),

    #[error("range would produce more than {limit} values")]
    RangeTooLarge { limit: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is too large to represent")]
    Overflow,
}
