//! Node trees representing mathematical expressions.
//!
//! A [Node] is a cheap, reference-counted handle to an immutable node body. Cloning the handle
//! aliases the same node, exactly like passing around a reference; [Node::ptr_eq] tells you
//! whether two handles are the same node, while `==` compares structure.
//!
//! Every kind of node declares a fixed, ordered list of named child slots, some of which may be
//! empty. All of the structural operations here work purely in terms of those slots:
//!
//!   - [for_each](Node::for_each) visits the immediate children.
//!   - [map](Node::map) rebuilds the node from replacement children.
//!   - [transform](Node::transform) rewrites a whole tree, top-down.
//!   - [filter](Node::filter) and [traverse](Node::traverse) walk a whole tree.
//!   - [shallow_clone](Node::shallow_clone) copies one node, sharing its children.
//!
//! None of these modify an existing node. Rewrites always produce new nodes, which may share
//! unchanged subtrees with the original.
//!
//! Node trees can be [compiled](compiled) into closures for fast repeated evaluation, and
//! rendered as plain text (with [Display](core::fmt::Display)) or as LaTeX (with
//! [to_tex](Node::to_tex)).

pub mod constant;
pub mod symbol;
pub mod range;
pub mod compiled;

use core::fmt;
use std::rc::Rc;

use crate::{context::Context, error::{MathsError, NodeError}, value::Value};

use self::{compiled::CompiledNode, constant::ConstantNode, range::RangeNode, symbol::SymbolNode};

/// The kind of a node. Each kind corresponds to one [NodeVariant].
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum NodeKind {
    Constant,
    Symbol,
    Range,
}

impl NodeKind {
    /// The conventional type name of nodes of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "ConstantNode",
            Self::Symbol => "SymbolNode",
            Self::Range => "RangeNode",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The body of a node, holding the data specific to its kind.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum NodeVariant {
    Constant(ConstantNode),
    Symbol(SymbolNode),
    Range(RangeNode),
}

/// How a node constructor was invoked through [Node::construct].
///
/// Dynamic front-ends (for example a scripting bridge) can call a constructor either to create a
/// new instance, or as a plain function. Only the former is valid.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Invocation {
    Instantiate,
    Call,
}

/// An untyped argument, as passed to [Node::construct] or returned from a rewrite callback.
///
/// Only the `Node` variant is accepted in child slots. The others exist so that front-ends can
/// hand over whatever they were given, and have it rejected with a proper error.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Argument {
    Node(Node),
    Value(Value),
    List(Vec<Argument>),
    Empty,
}

impl Argument {
    /// Returns the node held by this argument, if it is one.
    pub fn into_node(self) -> Option<Node> {
        match self {
            Argument::Node(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Node> for Argument {
    fn from(node: Node) -> Self {
        Argument::Node(node)
    }
}

impl From<&Node> for Argument {
    fn from(node: &Node) -> Self {
        Argument::Node(node.clone())
    }
}

impl From<Option<Node>> for Argument {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Argument::Empty, Argument::Node)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Value(value)
    }
}

impl From<Vec<Argument>> for Argument {
    fn from(items: Vec<Argument>) -> Self {
        Argument::List(items)
    }
}

impl From<()> for Argument {
    fn from(_: ()) -> Self {
        Argument::Empty
    }
}

/// A handle to a node in an expression tree. See the [module-level documentation](crate::node)
/// for more information.
#[derive(Clone)]
pub struct Node {
    inner: Rc<NodeVariant>,
}

impl Node {
    pub fn new(variant: NodeVariant) -> Self {
        Self { inner: Rc::new(variant) }
    }

    /// Creates a new constant node.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::new(NodeVariant::Constant(ConstantNode::new(value)))
    }

    /// Creates a new symbol node.
    pub fn symbol(name: &str) -> Self {
        Self::new(NodeVariant::Symbol(SymbolNode::new(name)))
    }

    /// Creates a new range node. A range without a step counts up in ones.
    pub fn range(start: Node, end: Node, step: Option<Node>) -> Self {
        Self::new(NodeVariant::Range(RangeNode::new(start, end, step)))
    }

    /// Constructs a node of the given kind from untyped arguments, validating them against the
    /// kind's slots.
    ///
    /// This is the entry point for front-ends which only know what they were given at runtime.
    /// Code which knows its arguments statically should prefer the typed constructors, such as
    /// [Node::range], which cannot fail.
    pub fn construct(kind: NodeKind, invocation: Invocation, arguments: Vec<Argument>) -> Result<Node, NodeError> {
        if invocation != Invocation::Instantiate {
            return Err(NodeError::Protocol { kind });
        }

        let variant = match kind {
            NodeKind::Constant => NodeVariant::Constant(ConstantNode::from_arguments(arguments)?),
            NodeKind::Symbol => NodeVariant::Symbol(SymbolNode::from_arguments(arguments)?),
            NodeKind::Range => NodeVariant::Range(RangeNode::from_arguments(arguments)?),
        };
        Ok(Self::new(variant))
    }

    pub fn variant(&self) -> &NodeVariant {
        &self.inner
    }

    pub fn kind(&self) -> NodeKind {
        match self.variant() {
            NodeVariant::Constant(_) => NodeKind::Constant,
            NodeVariant::Symbol(_) => NodeKind::Symbol,
            NodeVariant::Range(_) => NodeKind::Range,
        }
    }

    pub fn as_constant(&self) -> Option<&ConstantNode> {
        if let NodeVariant::Constant(c) = self.variant() { Some(c) } else { None }
    }

    pub fn as_symbol(&self) -> Option<&SymbolNode> {
        if let NodeVariant::Symbol(s) = self.variant() { Some(s) } else { None }
    }

    pub fn as_range(&self) -> Option<&RangeNode> {
        if let NodeVariant::Range(r) = self.variant() { Some(r) } else { None }
    }

    pub fn is_constant(&self) -> bool {
        self.kind() == NodeKind::Constant
    }

    pub fn is_symbol(&self) -> bool {
        self.kind() == NodeKind::Symbol
    }

    pub fn is_range(&self) -> bool {
        self.kind() == NodeKind::Range
    }

    /// Returns true if both handles refer to the very same node.
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// The occupied child slots of this node, in declaration order, paired with the slot names.
    pub fn children(&self) -> Vec<(&'static str, &Node)> {
        match self.variant() {
            NodeVariant::Constant(_) | NodeVariant::Symbol(_) => vec![],
            NodeVariant::Range(r) => r.children(),
        }
    }

    /// Calls `visitor` once for each immediate child, as `visitor(child, path, parent)`, where
    /// `path` is the name of the child's slot and `parent` is this node. Empty slots are skipped.
    pub fn for_each(&self, mut visitor: impl FnMut(&Node, &str, &Node)) {
        for (path, child) in self.children() {
            visitor(child, path, self);
        }
    }

    /// Creates a new node of the same kind, where each immediate child is replaced by the result of
    /// `callback(child, path, parent)`.
    ///
    /// The callback must return a node. Returning anything else (including nothing at all) fails
    /// with [NodeError::CallbackNotNode]. Empty slots are never passed to the callback, and stay
    /// empty in the result.
    pub fn map<F, R>(&self, mut callback: F) -> Result<Node, NodeError>
    where
        F: FnMut(&Node, &str, &Node) -> R,
        R: Into<Argument>,
    {
        self.try_map(|child, path, parent| {
            Into::<Argument>::into(callback(child, path, parent))
                .into_node()
                .ok_or(NodeError::CallbackNotNode)
        })
    }

    fn try_map(&self, mut callback: impl FnMut(&Node, &str, &Node) -> Result<Node, NodeError>) -> Result<Node, NodeError> {
        let variant = match self.variant() {
            NodeVariant::Constant(c) => NodeVariant::Constant(c.clone()),
            NodeVariant::Symbol(s) => NodeVariant::Symbol(s.clone()),
            NodeVariant::Range(r) => NodeVariant::Range(r.try_map_children(|path, child| callback(child, path, self))?),
        };
        Ok(Self::new(variant))
    }

    /// Rewrites this tree by calling `callback` on each node, starting from the root.
    ///
    /// If the callback returns a different node, that node replaces the one passed in and its
    /// children are not visited. If it returns the same node, the children are transformed
    /// recursively and the node is rebuilt from the results. This means a replacement of an
    /// ancestor always wins over a replacement of one of its descendants.
    pub fn transform<F, R>(&self, mut callback: F) -> Result<Node, NodeError>
    where
        F: FnMut(&Node) -> R,
        R: Into<Argument>,
    {
        self.transform_with(&mut callback)
    }

    fn transform_with<F, R>(&self, callback: &mut F) -> Result<Node, NodeError>
    where
        F: FnMut(&Node) -> R,
        R: Into<Argument>,
    {
        let replacement = Into::<Argument>::into(callback(self))
            .into_node()
            .ok_or(NodeError::CallbackNotNode)?;
        if !Node::ptr_eq(&replacement, self) {
            log::trace!("transform replaced {} with {}", self, replacement);
            return Ok(replacement);
        }

        self.try_map(|child, _, _| child.transform_with(&mut *callback))
    }

    /// Returns every node in this tree, including this one, for which `predicate` holds. Nodes are
    /// returned in pre-order: each node before its children, children in slot order.
    pub fn filter(&self, mut predicate: impl FnMut(&Node) -> bool) -> Vec<Node> {
        let mut matches = vec![];
        self.traverse(|node, _, _| {
            if predicate(node) {
                matches.push(node.clone());
            }
        });
        matches
    }

    /// Calls `callback(node, path, parent)` for every node in this tree in pre-order, starting with
    /// this node. This node is passed with an empty path and no parent.
    pub fn traverse(&self, mut callback: impl FnMut(&Node, &str, Option<&Node>)) {
        self.traverse_with("", None, &mut callback);
    }

    fn traverse_with<F>(&self, path: &str, parent: Option<&Node>, callback: &mut F)
    where
        F: FnMut(&Node, &str, Option<&Node>),
    {
        callback(self, path, parent);
        for (child_path, child) in self.children() {
            child.traverse_with(child_path, Some(self), callback);
        }
    }

    /// Creates a new node of the same kind with the same children. The children themselves are not
    /// copied - they are shared between this node and the clone.
    pub fn shallow_clone(&self) -> Node {
        Self::new((*self.inner).clone())
    }

    /// Compiles this tree into a closure which can be evaluated repeatedly. See
    /// [compiled](crate::node::compiled) for details.
    pub fn compile(&self, context: &Context) -> Result<CompiledNode, MathsError> {
        CompiledNode::from_node(self, context)
    }

    /// Renders this node as LaTeX.
    pub fn to_tex(&self) -> String {
        match self.variant() {
            NodeVariant::Constant(c) => c.to_tex(),
            NodeVariant::Symbol(s) => s.to_tex(),
            NodeVariant::Range(r) => r.to_tex(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Node::ptr_eq(self, other) || self.inner == other.inner
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.variant() {
            NodeVariant::Constant(c) => fmt::Display::fmt(c, f),
            NodeVariant::Symbol(s) => fmt::Display::fmt(s, f),
            NodeVariant::Range(r) => fmt::Display::fmt(r, f),
        }
    }
}
