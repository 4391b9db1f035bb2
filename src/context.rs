//! The runtime which compiled nodes are evaluated against.
//!
//! A [Context] is consulted once, at compile time: it resolves the functions a node tree needs and
//! supplies the [EvaluationSettings] which the compiled closures capture. A [Scope] is supplied on
//! every evaluation, and maps variable names to values.

use std::{collections::HashMap, fmt, rc::Rc};

use num_traits::{One, Zero};
use rust_decimal::Decimal;

use crate::{Number, error::MathsError, value::{Matrix, Value}};

/// A function which can be called by compiled nodes.
pub type Function = Rc<dyn Fn(&[Value], &EvaluationSettings) -> Result<Value, MathsError>>;

/// Settings which change how an expression is evaluated.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct EvaluationSettings {
    /// If true, constants evaluate to decimals rather than exact rational numbers.
    pub use_floats: bool,

    /// The largest number of values which a single range may produce.
    pub max_range_length: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self { use_floats: false, max_range_length: 1_000_000 }
    }
}

/// A registry of named functions and constants, plus the settings used for evaluation.
#[derive(Clone)]
pub struct Context {
    functions: HashMap<String, Function>,
    constants: HashMap<String, Value>,
    settings: EvaluationSettings,
}

impl Context {
    /// Creates a context with nothing registered. Most callers want [Context::standard] instead.
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
            constants: HashMap::new(),
            settings: EvaluationSettings::default(),
        }
    }

    /// Creates a context with the built-in functions and constants registered.
    pub fn standard() -> Self {
        let mut context = Self::empty();
        context.register_function("range", range);
        context.register_constant("pi", Number::Decimal(Decimal::PI));
        context.register_constant("e", Number::Decimal(Decimal::E));
        context.register_constant("true", true);
        context.register_constant("false", false);
        context
    }

    /// Replaces this context's settings, returning the context to allow method chaining.
    pub fn with_settings(mut self, settings: EvaluationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    pub fn register_function(
        &mut self,
        name: &str,
        function: impl Fn(&[Value], &EvaluationSettings) -> Result<Value, MathsError> + 'static,
    ) {
        log::debug!("registering function {}", name);
        self.functions.insert(name.into(), Rc::new(function));
    }

    pub fn register_constant(&mut self, name: &str, value: impl Into<Value>) {
        self.constants.insert(name.into(), value.into());
    }

    /// Looks up a function by name.
    pub fn function(&self, name: &str) -> Result<Function, MathsError> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| MathsError::UnknownFunction(name.into()))
    }

    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// Calls a registered function directly, outside of any compiled node.
    pub fn call(&self, name: &str, arguments: &[Value]) -> Result<Value, MathsError> {
        (self.function(name)?)(arguments, &self.settings)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut functions = self.functions.keys().collect::<Vec<_>>();
        functions.sort();

        f.debug_struct("Context")
            .field("functions", &functions)
            .field("constants", &self.constants)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Variable values available while evaluating a compiled node.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Scope {
    variables: HashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, returning the scope to allow method chaining.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

/// The built-in `range` function: `range(start, end)` or `range(start, end, step)`.
///
/// The sequence includes `end` if it is reached exactly.
fn range(arguments: &[Value], settings: &EvaluationSettings) -> Result<Value, MathsError> {
    let (start, end, step) = match arguments {
        [start, end] => (start.to_number()?, end.to_number()?, Number::one()),
        [start, end, step] => (start.to_number()?, end.to_number()?, step.to_number()?),
        _ => return Err(MathsError::WrongArgumentCount {
            name: "range".into(),
            expected: "2 or 3",
            got: arguments.len(),
        }),
    };

    generate_range(start, end, step, settings).map(Value::Matrix)
}

/// Builds the inclusive sequence `start, start + step, start + 2*step, ...`, stopping before any
/// value which passes `end`.
pub fn generate_range(start: Number, end: Number, step: Number, settings: &EvaluationSettings) -> Result<Matrix, MathsError> {
    let (start, end, step) = (start.check()?, end.check()?, step.check()?);
    if step.is_zero() {
        return Err(MathsError::ZeroStep("range".into()));
    }

    let ascending = step.is_positive();
    let mut values = Vec::new();
    let mut index = 0i64;
    loop {
        // Multiplying rather than accumulating keeps decimal steps from drifting
        let value = start.checked_add(step.checked_mul(Number::from(index))?)?;
        let past_end = if ascending { value > end } else { value < end };
        if past_end {
            break;
        }

        if values.len() >= settings.max_range_length {
            return Err(MathsError::RangeTooLarge { limit: settings.max_range_length });
        }
        values.push(value);
        if value == end {
            break;
        }
        index += 1;
    }

    log::debug!("generated range {}:{}:{} with {} values", start, step, end, values.len());
    Ok(Matrix::from_numbers(values))
}
