use crate::{Node, Value};

macro_rules! rat {
    ($n:literal)             => { crate::Number::Rational($n, 1)  };
    ($n:literal, $d:literal) => { crate::Number::Rational($n, $d) };
}

macro_rules! dec {
    ($l:literal) => {
        crate::Number::Decimal(
            <rust_decimal::Decimal as core::str::FromStr>::from_str(stringify!($l)).unwrap()
        )
    };
}

macro_rules! constant {
    ($n:literal) => { crate::Node::constant(rat!($n)) };
}

macro_rules! symbol {
    ($name:ident) => { crate::Node::symbol(stringify!($name)) };
}

macro_rules! range {
    ($s:expr, $e:expr $(,)?)           => { crate::Node::range($s.clone(), $e.clone(), None) };
    ($s:expr, $e:expr, $st:expr $(,)?) => { crate::Node::range($s.clone(), $e.clone(), Some($st.clone())) };
}

macro_rules! matrix {
    ($($n:expr),* $(,)?) => { crate::Value::Matrix(crate::Matrix::from_numbers(vec![ $($n),* ])) };
}

/// Returns true if `node` is a constant holding the whole number `n`.
pub fn is_constant_valued(node: &Node, n: i64) -> bool {
    node.as_constant().map_or(false, |c| c.value() == &Value::from(n))
}

/// The range `0:2:10`, along with its start, end and step nodes.
pub struct SampleRange {
    pub start: Node,
    pub end: Node,
    pub step: Node,
    pub range: Node,
}

pub fn sample_range() -> SampleRange {
    let start = constant!(0);
    let end = constant!(10);
    let step = constant!(2);
    let range = range!(start, end, step);
    SampleRange { start, end, step, range }
}
