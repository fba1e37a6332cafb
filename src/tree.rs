//! Labeled tree representation of a JSON document.
//!
//! Every element of a document becomes a [`Node`] identified by a scalar
//! [`Key`]: object fields are keyed by their name, and scalar values are
//! represented as synthetic "value children" keyed by the value itself. This
//! lets the differ treat a changed value as a change in the set of child keys.

use indexmap::IndexMap;
use std::fmt;

/// Label of the synthetic node that represents a whole document.
pub const ROOT_KEY: &str = "root";

/// Scalar identity of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Null,
    Bool(bool),
    /// Canonical decimal text of the number, as serde_json prints it.
    Number(String),
    String(String),
    /// Position of a list element (indexed list mode only).
    Index(usize),
}

impl Key {
    /// Builds a key from a JSON scalar. Returns `None` for arrays and objects.
    pub fn from_scalar(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Key::Null),
            serde_json::Value::Bool(b) => Some(Key::Bool(*b)),
            serde_json::Value::Number(n) => Some(Key::Number(n.to_string())),
            serde_json::Value::String(s) => Some(Key::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// Converts the key back into a JSON value for machine-readable output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Key::Null => serde_json::Value::Null,
            Key::Bool(b) => serde_json::Value::Bool(*b),
            Key::Number(n) => serde_json::from_str(n)
                .unwrap_or_else(|_| serde_json::Value::String(n.clone())),
            Key::String(s) => serde_json::Value::String(s.clone()),
            Key::Index(i) => serde_json::Value::from(*i),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => f.write_str("null"),
            Key::Bool(b) => write!(f, "{}", b),
            Key::Number(n) => f.write_str(n),
            Key::String(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Key::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// How a subtree differs between two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ChangeKind {
    #[default]
    Unchanged,
    Inserted,
    Deleted,
    Updated,
}

impl ChangeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChangeKind::Unchanged => "Unchanged",
            ChangeKind::Inserted => "Inserted",
            ChangeKind::Deleted => "Deleted",
            ChangeKind::Updated => "Updated",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One element of a document tree.
///
/// Children are unique by key and kept in insertion order so that reports
/// follow the order of the source document. The order carries no meaning for
/// the diff itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub key: Key,
    pub children: IndexMap<Key, Node>,
    pub change_kind: ChangeKind,
    /// True for the synthetic child holding a scalar value.
    pub value: bool,
    /// Value this node replaced, set when an update is detected.
    pub previous: Option<Key>,
}

impl Node {
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            children: IndexMap::new(),
            change_kind: ChangeKind::Unchanged,
            value: false,
            previous: None,
        }
    }

    /// Creates the synthetic root node of a document tree.
    pub fn root() -> Self {
        Self::new(ROOT_KEY)
    }

    /// Creates a value child carrying a scalar as its key.
    pub fn value_leaf(key: Key) -> Self {
        Self {
            value: true,
            ..Self::new(key)
        }
    }

    /// Returns true when the key is the string "root", ignoring case.
    pub fn is_root(&self) -> bool {
        matches!(&self.key, Key::String(s) if s.eq_ignore_ascii_case(ROOT_KEY))
    }

    /// Attaches a child, replacing any existing child with the same key.
    pub fn add_child(&mut self, child: Node) {
        self.children.insert(child.key.clone(), child);
    }

    pub fn child(&self, key: &Key) -> Option<&Node> {
        self.children.get(key)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Sets `kind` on this node and every node below it.
    pub fn mark(&mut self, kind: ChangeKind) {
        self.change_kind = kind;
        for child in self.children.values_mut() {
            child.mark(kind);
        }
    }

    /// Returns true if this node or any descendant is not `Unchanged`.
    pub fn has_changes(&self) -> bool {
        self.change_kind != ChangeKind::Unchanged
            || self.children.values().any(|c| c.has_changes())
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.values().map(|c| c.size()).sum::<usize>()
    }

    /// Depth-first pre-order walk, calling `visit` with each node and its
    /// depth relative to `self` (which is depth 0).
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Node, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<'a, F>(&'a self, depth: usize, visit: &mut F)
    where
        F: FnMut(&'a Node, usize),
    {
        visit(self, depth);
        for child in self.children.values() {
            child.walk_at(depth + 1, visit);
        }
    }
}
