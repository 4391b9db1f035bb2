use core::fmt;

use crate::{error::NodeError, value::Value};

use super::{Argument, NodeKind};

/// A node naming a variable or constant. Symbols are resolved when a compiled node is evaluated,
/// first against the scope and then against the context's constants.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SymbolNode {
    name: String,
}

/// Symbol names which have a dedicated LaTeX command.
const TEX_SYMBOLS: &[(&str, &str)] = &[
    ("alpha", "\\alpha"), ("beta", "\\beta"), ("gamma", "\\gamma"), ("delta", "\\delta"),
    ("epsilon", "\\epsilon"), ("zeta", "\\zeta"), ("eta", "\\eta"), ("theta", "\\theta"),
    ("iota", "\\iota"), ("kappa", "\\kappa"), ("lambda", "\\lambda"), ("mu", "\\mu"),
    ("nu", "\\nu"), ("xi", "\\xi"), ("pi", "\\pi"), ("rho", "\\rho"), ("sigma", "\\sigma"),
    ("tau", "\\tau"), ("upsilon", "\\upsilon"), ("phi", "\\phi"), ("chi", "\\chi"),
    ("psi", "\\psi"), ("omega", "\\omega"),
    ("Gamma", "\\Gamma"), ("Delta", "\\Delta"), ("Theta", "\\Theta"), ("Lambda", "\\Lambda"),
    ("Xi", "\\Xi"), ("Pi", "\\Pi"), ("Sigma", "\\Sigma"), ("Upsilon", "\\Upsilon"),
    ("Phi", "\\Phi"), ("Psi", "\\Psi"), ("Omega", "\\Omega"),
    ("Infinity", "\\infty"),
];

impl SymbolNode {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds a symbol from a single string argument giving its name.
    pub(crate) fn from_arguments(arguments: Vec<Argument>) -> Result<Self, NodeError> {
        if arguments.len() != 1 {
            return Err(NodeError::Arity { kind: NodeKind::Symbol, expected: "1", got: arguments.len() });
        }

        match arguments.into_iter().next() {
            Some(Argument::Value(Value::Text(name))) if !name.is_empty() => Ok(Self { name }),
            _ => Err(NodeError::Type {
                kind: NodeKind::Symbol,
                position: 0,
                expected: "a non-empty string",
            }),
        }
    }

    pub fn to_tex(&self) -> String {
        TEX_SYMBOLS.iter()
            .find(|(name, _)| *name == self.name)
            .map(|(_, tex)| tex.to_string())
            .unwrap_or_else(|| self.name.clone())
    }
}

impl fmt::Display for SymbolNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
