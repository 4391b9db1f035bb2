use core::fmt;

use crate::{Number, error::NodeError, value::Value};

use super::{Argument, NodeKind};

/// A node holding a literal value. Constants have no children.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ConstantNode {
    value: Value,
}

impl ConstantNode {
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into() }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Builds a constant from a single scalar value argument.
    pub(crate) fn from_arguments(arguments: Vec<Argument>) -> Result<Self, NodeError> {
        if arguments.len() != 1 {
            return Err(NodeError::Arity { kind: NodeKind::Constant, expected: "1", got: arguments.len() });
        }

        match arguments.into_iter().next() {
            Some(Argument::Value(value)) if value.is_scalar() => Ok(Self { value }),
            _ => Err(NodeError::Type {
                kind: NodeKind::Constant,
                position: 0,
                expected: "a number, boolean or string value",
            }),
        }
    }

    pub fn to_tex(&self) -> String {
        match &self.value {
            Value::Number(n) => number_to_tex(n),
            Value::Text(s) => format!("\\mathtt{{\"{}\"}}", s),
            other => other.to_string(),
        }
    }
}

fn number_to_tex(number: &Number) -> String {
    match number.simplify() {
        Number::Rational(numer, denom) if denom != 1 => {
            let sign = if numer < 0 { "-" } else { "" };
            format!("{}\\frac{{{}}}{{{}}}", sign, numer.abs(), denom)
        }
        other => other.to_string(),
    }
}

impl fmt::Display for ConstantNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
