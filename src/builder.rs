//! Conversion of parsed JSON values into labeled trees.
//!
//! # Examples
//!
//! ```
//! use jtdiff::{build_tree, BuildOptions, Key};
//! use serde_json::json;
//!
//! let tree = build_tree(&json!({"name": "Alice"}), &BuildOptions::default());
//! let name = tree.child(&Key::from("name")).unwrap();
//! assert!(name.child(&Key::from("Alice")).is_some());
//! ```

use crate::tree::{Key, Node};
use serde_json::Value;

/// How list elements are placed in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Merge the entries of object elements into the list node itself.
    ///
    /// Positions are lost, a key shared by two elements keeps the last value,
    /// and scalar elements are not attached.
    #[default]
    Flatten,
    /// Give every element its own child keyed by its position.
    Indexed,
}

/// Options for tree construction.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub list_mode: ListMode,
}

/// Builds a tree rooted at a synthetic `"root"` node from a JSON value.
///
/// A top-level object contributes one child per entry. Any other top-level
/// value is expanded into the root the way it would be under a key.
pub fn build_tree(value: &Value, options: &BuildOptions) -> Node {
    let mut root = Node::root();
    expand(&mut root, value, options);
    root
}

/// Fills `node` with the children that represent `value`.
fn expand(node: &mut Node, value: &Value, options: &BuildOptions) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map {
                let mut child = Node::new(key.as_str());
                expand(&mut child, entry, options);
                node.add_child(child);
            }
        }
        Value::Array(items) => expand_list(node, items, options),
        scalar => {
            if let Some(key) = Key::from_scalar(scalar) {
                node.add_child(Node::value_leaf(key));
            }
        }
    }
}

fn expand_list(node: &mut Node, items: &[Value], options: &BuildOptions) {
    match options.list_mode {
        ListMode::Flatten => {
            for item in items {
                match item {
                    Value::Object(_) => expand(node, item, options),
                    Value::Array(nested) => expand_list(node, nested, options),
                    _ => {}
                }
            }
        }
        ListMode::Indexed => {
            for (index, item) in items.iter().enumerate() {
                let mut child = Node::new(Key::Index(index));
                expand(&mut child, item, options);
                node.add_child(child);
            }
        }
    }
}
