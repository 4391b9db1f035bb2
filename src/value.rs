//! Runtime values, held by constant nodes and produced by evaluating compiled nodes.

use core::fmt;

use crate::{Number, error::MathsError};

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Value {
    Number(Number),
    Boolean(bool),
    Text(String),
    Matrix(Matrix),
}

impl Value {
    /// Returns the number held by this value, or an error naming what was found instead.
    pub fn to_number(&self) -> Result<Number, MathsError> {
        match self {
            Value::Number(n) => n.check(),
            other => Err(MathsError::ExpectedNumber(other.to_string())),
        }
    }

    /// Returns true if this value may be held directly by a constant node.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Matrix(_))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(i.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Matrix(m) => write!(f, "{}", m),
        }
    }
}

/// A dense one-dimensional matrix. This is the container which ranges are evaluated into.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Matrix {
    data: Vec<Value>,
}

impl Matrix {
    pub fn from_numbers(numbers: impl IntoIterator<Item = Number>) -> Self {
        Self { data: numbers.into_iter().map(Value::Number).collect() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.data.iter()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
