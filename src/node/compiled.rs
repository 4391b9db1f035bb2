//! Compiled node trees, which are immutable and opaque but evaluate quickly.
//!
//! Compilation transforms each node into a closure which calls the closures of its children. The
//! top-level closure is held as a trait object in a [Box] by the [CompiledNode] instance, and is
//! invoked with a [Scope] by [eval](CompiledNode::eval).
//!
//! Everything which can be decided without knowing variable values is decided at compile time:
//! functions are looked up in the [Context] and the context's
//! [EvaluationSettings](crate::EvaluationSettings) are captured. A missing function is therefore a
//! compile error rather than an evaluation error. No evaluation happens while compiling, and each
//! call to `eval` evaluates the whole tree again from scratch, so one compiled node can be
//! evaluated against any number of scopes.

use crate::{context::{Context, Scope}, error::MathsError, value::Value};

use super::{Node, NodeVariant};

/// A compiled node. See the [module-level documentation](crate::node::compiled) for more
/// information.
pub struct CompiledNode {
    /// The top-level closure which can be called to evaluate this expression.
    func: Box<dyn Fn(&Scope) -> Result<Value, MathsError>>,
}

impl CompiledNode {
    /// Create a new compiled node wrapping the given function.
    pub fn new(func: impl Fn(&Scope) -> Result<Value, MathsError> + 'static) -> Self {
        Self { func: Box::new(func) }
    }

    /// Compiles a node tree against the given context.
    pub fn from_node(node: &Node, context: &Context) -> Result<Self, MathsError> {
        log::trace!("compiling {} {}", node.kind(), node);

        Ok(match node.variant() {
            NodeVariant::Constant(constant) => {
                let value = match constant.value() {
                    Value::Number(n) if context.settings().use_floats => Value::Number(n.check()?.to_float_form()),
                    other => other.clone(),
                };
                Self::new(move |_| Ok(value.clone()))
            }

            NodeVariant::Symbol(symbol) => {
                let name = symbol.name().to_string();
                let fallback = context.constant(&name).cloned();
                Self::new(move |scope| {
                    scope.get(&name)
                        .or(fallback.as_ref())
                        .cloned()
                        .ok_or_else(|| MathsError::UndefinedSymbol(name.clone()))
                })
            }

            NodeVariant::Range(range) => {
                let range_fn = context.function("range")?;
                let settings = context.settings().clone();
                let start = Self::from_node(range.start(), context)?;
                let end = Self::from_node(range.end(), context)?;
                let step = range.step().map(|s| Self::from_node(s, context)).transpose()?;
                let text = node.to_string();

                Self::new(move |scope| {
                    let mut arguments = vec![
                        Value::Number(start.eval(scope)?.to_number()?),
                        Value::Number(end.eval(scope)?.to_number()?),
                    ];
                    if let Some(step) = &step {
                        arguments.push(Value::Number(step.eval(scope)?.to_number()?));
                    }

                    range_fn(&arguments, &settings).map_err(|e| match e {
                        // Report the range as it was written
                        MathsError::ZeroStep(_) => MathsError::ZeroStep(text.clone()),
                        e => e,
                    })
                })
            }
        })
    }

    /// Evaluates this compiled node, looking up variables in the given scope.
    pub fn eval(&self, scope: &Scope) -> Result<Value, MathsError> {
        (self.func)(scope)
    }
}
