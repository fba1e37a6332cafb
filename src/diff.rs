//! Set-based merge of two document trees.
//!
//! The differ walks both trees level by level and compares the key sets of
//! each pair of matching nodes. Keys found only in the old tree are marked
//! deleted, keys found only in the new tree are spliced into the old tree and
//! marked inserted, and keys found in both are merged recursively. The old
//! tree is consumed and returned as the annotated result.
//!
//! # Examples
//!
//! ```
//! use jtdiff::{build_tree, diff, render_report, BuildOptions, DiffConfig};
//! use serde_json::json;
//!
//! let options = BuildOptions::default();
//! let old = build_tree(&json!({"val": 42}), &options);
//! let new = build_tree(&json!({"val": 43}), &options);
//!
//! let merged = diff(Some(old), Some(&new), &DiffConfig::default()).unwrap();
//! let report = render_report(&merged);
//! assert!(report.contains("42 - (Deleted)"));
//! assert!(report.contains("43 - (Inserted)"));
//! ```

use crate::builder::{build_tree, BuildOptions};
use crate::error::DiffError;
use crate::tree::{ChangeKind, Key, Node};
use tracing::{debug, trace};

/// Configuration for the diff algorithm.
#[derive(Debug, Clone, Default)]
pub struct DiffConfig {
    /// Report a changed scalar as one `Updated` value child instead of a
    /// deleted old value plus an inserted new value.
    pub detect_updates: bool,
}

/// Counts of classified nodes in a merged tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl DiffStats {
    /// Tallies every node below the root of `tree`.
    pub fn collect(tree: &Node) -> Self {
        let mut stats = Self::default();
        tree.walk(&mut |node, depth| {
            if depth == 0 {
                return;
            }
            match node.change_kind {
                ChangeKind::Inserted => stats.inserted += 1,
                ChangeKind::Deleted => stats.deleted += 1,
                ChangeKind::Updated => stats.updated += 1,
                ChangeKind::Unchanged => stats.unchanged += 1,
            }
        });
        stats
    }

    /// Returns the number of nodes that are not `Unchanged`.
    pub fn total_changes(&self) -> usize {
        self.inserted + self.deleted + self.updated
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Diffs two trees, failing when either one is missing.
///
/// On success the old tree is returned with every node classified and the
/// subtrees found only in `new` spliced in.
///
/// # Errors
///
/// Returns [`DiffError::MissingTree`] if `old` or `new` is `None`.
pub fn diff(old: Option<Node>, new: Option<&Node>, config: &DiffConfig) -> Result<Node, DiffError> {
    let old = old.ok_or_else(|| DiffError::missing_tree("old"))?;
    let new = new.ok_or_else(|| DiffError::missing_tree("new"))?;
    Ok(merge(old, new, config))
}

/// Merges `new` into `old` and returns the annotated tree.
pub fn merge(mut old: Node, new: &Node, config: &DiffConfig) -> Node {
    debug!(
        old_nodes = old.size(),
        new_nodes = new.size(),
        detect_updates = config.detect_updates,
        "merging trees"
    );
    merge_into(&mut old, new, config);
    old
}

/// Builds both trees from parsed values and merges them.
pub fn compute_diff(
    old: &serde_json::Value,
    new: &serde_json::Value,
    options: &BuildOptions,
    config: &DiffConfig,
) -> Node {
    let new_tree = build_tree(new, options);
    merge(build_tree(old, options), &new_tree, config)
}

fn merge_into(old: &mut Node, new: &Node, config: &DiffConfig) {
    if config.detect_updates && replace_updated_value(old, new) {
        return;
    }

    let only_in_old: Vec<Key> = old
        .children
        .keys()
        .filter(|key| !new.children.contains_key(*key))
        .cloned()
        .collect();
    let only_in_new: Vec<Key> = new
        .children
        .keys()
        .filter(|key| !old.children.contains_key(*key))
        .cloned()
        .collect();
    let in_both: Vec<Key> = old
        .children
        .keys()
        .filter(|key| new.children.contains_key(*key))
        .cloned()
        .collect();

    trace!(
        key = %old.key,
        deleted = only_in_old.len(),
        inserted = only_in_new.len(),
        common = in_both.len(),
        "merging level"
    );

    if !only_in_old.is_empty() {
        for key in &only_in_old {
            if let Some(child) = old.children.get_mut(key) {
                child.mark(ChangeKind::Deleted);
            }
        }
        // Everything below this node is deleted.
        if !old.is_root() && only_in_new.is_empty() && in_both.is_empty() {
            return;
        }
    }

    if !only_in_new.is_empty() {
        for key in only_in_new {
            if let Some(child) = new.children.get(&key) {
                let mut spliced = child.clone();
                spliced.mark(ChangeKind::Inserted);
                old.children.insert(key, spliced);
            }
        }
        if !old.is_root() && in_both.is_empty() {
            return;
        }
    }

    for key in &in_both {
        if let (Some(old_child), Some(new_child)) =
            (old.children.get_mut(key), new.children.get(key))
        {
            merge_into(old_child, new_child, config);
        }
    }
}

/// Swaps a single changed value child for its new value, marked `Updated`.
///
/// Returns false, leaving `old` untouched, unless both nodes hold exactly one
/// value child and the two values differ.
fn replace_updated_value(old: &mut Node, new: &Node) -> bool {
    if old.children.len() != 1 || new.children.len() != 1 {
        return false;
    }
    let (Some((_, old_value)), Some((new_key, new_value))) =
        (old.children.first(), new.children.first())
    else {
        return false;
    };
    if !old_value.value || !new_value.value || old_value.key == *new_key {
        return false;
    }

    let mut updated = new_value.clone();
    updated.change_kind = ChangeKind::Updated;
    updated.previous = old.children.pop().map(|(key, _)| key);
    old.add_child(updated);
    true
}
