//! Contains the `Node` data model for the parsed tree.
//!
//! Nodes live in an arena (`Vec<Node>`) owned by the `Document` and
//! address each other through `NodeId` indices. Each container's
//! children form a singly linked ordered chain reachable via
//! `first_child` followed by `next_sibling` links; "no next sibling"
//! is an explicit `None`, never a dangling placeholder node. The
//! whole arena is dropped as one unit with the `Document`.

/// An index into a `Document`'s node arena.
///
/// Ids are only minted by the document that owns the arena; using an
/// id against a different document is a logic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One JSON value, kind and payload in a single tagged union.
///
/// Scalar variants carry their payload directly, so the payload can
/// never disagree with the kind. Container variants carry nothing;
/// their contents hang off the owning `Node`'s child chain.
#[derive(Debug, PartialEq, Clone)]
pub enum NodeValue {
    /// The top-level container: parent of the document's members.
    /// Exactly one node, the document root, has this value.
    Root,
    /// A JSON object; members hang off the child chain.
    Object,
    /// A JSON array; elements hang off the child chain.
    Array,
    /// A JSON string.
    String(String),
    /// A whole number.
    Integer(i64),
    /// A number with a fractional part.
    Float(f64),
    /// A boolean.
    Boolean(bool),
    /// Reserved kind tag. No code path produces or consumes it; the
    /// `null` literal is not part of the supported dialect.
    Null,
}

impl NodeValue {
    /// True for values that can own children (`Root`, `Object`, `Array`).
    pub fn is_container(&self) -> bool {
        matches!(self, NodeValue::Root | NodeValue::Object | NodeValue::Array)
    }
}

/// One JSON value in the parsed tree: an object, an array, or a scalar.
#[derive(Debug, PartialEq, Clone)]
pub struct Node {
    /// The member key when this node sits inside an object; `None`
    /// for array elements and the document root.
    pub name: Option<String>,
    /// The value of this node.
    pub value: NodeValue,
    /// The first member/element inside this node. Only ever set on
    /// container values.
    pub first_child: Option<NodeId>,
    /// The next member/element at the same nesting level; `None` for
    /// the last element of a container.
    pub next_sibling: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(name: Option<String>, value: NodeValue) -> Self {
        Node {
            name,
            value,
            first_child: None,
            next_sibling: None,
        }
    }

    pub(crate) fn root() -> Self {
        Node::new(None, NodeValue::Root)
    }

    /// The member key, if this node is an object member.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The string payload, if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            NodeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this node is a whole number.
    pub fn as_i64(&self) -> Option<i64> {
        match self.value {
            NodeValue::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// The float payload, if this node is a fractional number.
    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            NodeValue::Float(n) => Some(n),
            _ => None,
        }
    }

    /// The boolean payload, if this node is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            NodeValue::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// True when this node can own children.
    pub fn is_container(&self) -> bool {
        self.value.is_container()
    }
}
