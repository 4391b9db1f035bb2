//! The range node, written `start:end` or `start:step:end`.
//!
//! A range has three slots, declared in the order `start`, `end`, `step`. The step is optional; a
//! range without one counts up in ones, but the missing step is kept as `None` rather than being
//! filled in with a constant node, so that the range renders exactly as it was written.
//!
//! When evaluated, a range produces a one-dimensional [Matrix](crate::Matrix) holding every value
//! from `start` to `end` inclusive, advancing by `step`.

use core::fmt;

use crate::error::NodeError;

use super::{Argument, Node, NodeKind};

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct RangeNode {
    start: Node,
    end: Node,
    step: Option<Node>,
}

impl RangeNode {
    pub fn new(start: Node, end: Node, step: Option<Node>) -> Self {
        Self { start, end, step }
    }

    /// Builds a range from two (`start, end`) or three (`start, end, step`) node arguments.
    pub(crate) fn from_arguments(arguments: Vec<Argument>) -> Result<Self, NodeError> {
        let got = arguments.len();
        if !(2..=3).contains(&got) {
            return Err(NodeError::Arity { kind: NodeKind::Range, expected: "2 or 3", got });
        }

        let nodes = arguments.into_iter()
            .enumerate()
            .map(|(position, arg)| arg.into_node().ok_or(NodeError::Type {
                kind: NodeKind::Range,
                position,
                expected: "a node",
            }))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_nodes(nodes).ok_or(NodeError::Arity { kind: NodeKind::Range, expected: "2 or 3", got })
    }

    /// Builds a range from two or three nodes, in the order `start, end, step`.
    fn from_nodes(nodes: Vec<Node>) -> Option<Self> {
        match <[Node; 3]>::try_from(nodes) {
            Ok([start, end, step]) => Some(Self::new(start, end, Some(step))),
            Err(nodes) => match <[Node; 2]>::try_from(nodes) {
                Ok([start, end]) => Some(Self::new(start, end, None)),
                Err(_) => None,
            },
        }
    }

    pub fn start(&self) -> &Node {
        &self.start
    }

    pub fn end(&self) -> &Node {
        &self.end
    }

    pub fn step(&self) -> Option<&Node> {
        self.step.as_ref()
    }

    pub fn has_step(&self) -> bool {
        self.step.is_some()
    }

    pub(crate) fn children(&self) -> Vec<(&'static str, &Node)> {
        let mut children = vec![("start", &self.start), ("end", &self.end)];
        if let Some(step) = &self.step {
            children.push(("step", step));
        }
        children
    }

    /// Builds a new range whose occupied slots are filled by `f(path, child)`, called in the same
    /// order as [RangeNode::children].
    pub(crate) fn try_map_children<E>(&self, mut f: impl FnMut(&'static str, &Node) -> Result<Node, E>) -> Result<Self, E> {
        let start = f("start", &self.start)?;
        let end = f("end", &self.end)?;
        let step = self.step.as_ref().map(|step| f("step", step)).transpose()?;
        Ok(Self::new(start, end, step))
    }

    pub fn to_tex(&self) -> String {
        match &self.step {
            Some(step) => format!("{}:{}:{}", self.start.to_tex(), step.to_tex(), self.end.to_tex()),
            None => format!("{}:{}", self.start.to_tex(), self.end.to_tex()),
        }
    }
}

impl fmt::Display for RangeNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.step {
            Some(step) => write!(f, "{}:{}:{}", self.start, step, self.end),
            None => write!(f, "{}:{}", self.start, self.end),
        }
    }
}
