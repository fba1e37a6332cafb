//! Report rendering for merged trees.
//!
//! The plain report lists every classified node depth-first, one line per
//! node, indented with one tab per level below the root:
//!
//! ```text
//! 	'firstName' - (Deleted)
//! 		'John' - (Deleted)
//! 	'Age' - (Inserted)
//! 		27 - (Inserted)
//! ```
//!
//! Unchanged nodes produce no line, but their children are still visited.
//! An empty report means the documents have no differences.
//!
//! # Examples
//!
//! ```
//! use jtdiff::{compute_diff, format_report, BuildOptions, DiffConfig, OutputFormat, OutputOptions};
//! use serde_json::json;
//!
//! let merged = compute_diff(
//!     &json!({"val": 42}),
//!     &json!({"val": 42}),
//!     &BuildOptions::default(),
//!     &DiffConfig::default(),
//! );
//! let output = format_report(&merged, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert_eq!(output, "Summary: No changes");
//! ```

use crate::diff::DiffStats;
use crate::error::OutputError;
use crate::tree::{ChangeKind, Key, Node};
use colored::*;
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented report with ANSI colors
    Terminal,
    /// Changes and statistics as JSON
    Json,
    /// Indented report without colors
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Append a summary line to the text formats
    pub summary: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { summary: true }
    }
}

/// Renders the plain report for a merged tree.
///
/// Rendering does not touch the tree, so the same tree always produces the
/// same text.
pub fn render_report(tree: &Node) -> String {
    render_lines(tree, |line, _| line)
}

/// Formats a merged tree according to the specified format and options.
pub fn format_report(
    tree: &Node,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_text(tree, options, format_terminal)),
        OutputFormat::Plain => Ok(format_text(tree, options, render_report)),
        OutputFormat::Json => format_json(tree),
    }
}

fn format_text(tree: &Node, options: &OutputOptions, render: fn(&Node) -> String) -> String {
    let mut output = render(tree);
    if options.summary {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&format_summary(&DiffStats::collect(tree)));
    }
    output
}

/// Inserted lines are green, deleted red and updated yellow.
fn format_terminal(tree: &Node) -> String {
    render_lines(tree, |line, kind| match kind {
        ChangeKind::Inserted => line.green().to_string(),
        ChangeKind::Deleted => line.red().to_string(),
        ChangeKind::Updated => line.yellow().to_string(),
        ChangeKind::Unchanged => line,
    })
}

fn render_lines<F>(tree: &Node, mut paint: F) -> String
where
    F: FnMut(String, ChangeKind) -> String,
{
    let mut output = String::new();
    tree.walk(&mut |node, depth| {
        if node.change_kind == ChangeKind::Unchanged {
            return;
        }
        output.push_str(&"\t".repeat(depth));
        output.push_str(&paint(describe(node), node.change_kind));
        output.push('\n');
    });
    output
}

/// Formats one report line, without indentation.
fn describe(node: &Node) -> String {
    match &node.previous {
        Some(previous) => format!("{} -> {} - ({})", previous, node.key, node.change_kind),
        None => format!("{} - ({})", node.key, node.change_kind),
    }
}

fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.inserted > 0 {
        parts.push(format!("{} inserted", stats.inserted));
    }
    if stats.deleted > 0 {
        parts.push(format!("{} deleted", stats.deleted));
    }
    if stats.updated > 0 {
        parts.push(format!("{} updated", stats.updated));
    }

    format!("Summary: {}", parts.join(", "))
}

#[derive(Serialize)]
struct JsonReport {
    changes: Vec<JsonChange>,
    stats: JsonStats,
}

#[derive(Serialize)]
struct JsonChange {
    path: Vec<serde_json::Value>,
    key: serde_json::Value,
    change: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct JsonStats {
    inserted: usize,
    deleted: usize,
    updated: usize,
    unchanged: usize,
}

fn format_json(tree: &Node) -> Result<String, OutputError> {
    let mut changes = Vec::new();
    let mut path = Vec::new();
    for child in tree.children.values() {
        collect_changes(child, &mut path, &mut changes);
    }

    let stats = DiffStats::collect(tree);
    let report = JsonReport {
        changes,
        stats: JsonStats {
            inserted: stats.inserted,
            deleted: stats.deleted,
            updated: stats.updated,
            unchanged: stats.unchanged,
        },
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn collect_changes<'a>(node: &'a Node, path: &mut Vec<&'a Key>, changes: &mut Vec<JsonChange>) {
    if node.change_kind != ChangeKind::Unchanged {
        changes.push(JsonChange {
            path: path.iter().map(|key| key.to_json()).collect(),
            key: node.key.to_json(),
            change: node.change_kind.name().to_lowercase(),
            previous: node.previous.as_ref().map(Key::to_json),
        });
    }
    path.push(&node.key);
    for child in node.children.values() {
        collect_changes(child, path, changes);
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_tree, BuildOptions};
    use crate::diff::{merge, DiffConfig};
    use serde_json::json;

    fn merged(old: serde_json::Value, new: serde_json::Value, config: &DiffConfig) -> Node {
        let options = BuildOptions::default();
        merge(build_tree(&old, &options), &build_tree(&new, &options), config)
    }

    #[test]
    fn test_describe_lines() {
        let mut node = Node::new("firstName");
        node.change_kind = ChangeKind::Deleted;
        assert_eq!(describe(&node), "'firstName' - (Deleted)");

        let mut node = Node::value_leaf(Key::Number("28".to_string()));
        node.change_kind = ChangeKind::Updated;
        node.previous = Some(Key::Number("27".to_string()));
        assert_eq!(describe(&node), "27 -> 28 - (Updated)");
    }

    #[test]
    fn test_render_indents_by_depth() {
        let tree = merged(json!({"a": {"b": 1}}), json!({}), &DiffConfig::default());
        assert_eq!(
            render_report(&tree),
            "\t'a' - (Deleted)\n\t\t'b' - (Deleted)\n\t\t\t1 - (Deleted)\n"
        );
    }

    #[test]
    fn test_render_equal_is_empty() {
        let tree = merged(json!({"val": 42}), json!({"val": 42}), &DiffConfig::default());
        assert_eq!(render_report(&tree), "");
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(format_summary(&DiffStats::default()), "Summary: No changes");
        let stats = DiffStats {
            inserted: 2,
            deleted: 1,
            updated: 3,
            unchanged: 5,
        };
        assert_eq!(
            format_summary(&stats),
            "Summary: 2 inserted, 1 deleted, 3 updated"
        );
    }

    #[test]
    fn test_format_plain_without_summary() {
        let tree = merged(json!({"a": 1}), json!({"a": 2}), &DiffConfig::default());
        let options = OutputOptions { summary: false };
        let output = format_report(&tree, &OutputFormat::Plain, &options).unwrap();
        assert_eq!(output, "\t\t1 - (Deleted)\n\t\t2 - (Inserted)\n");
    }

    #[test]
    fn test_format_json() {
        let config = DiffConfig {
            detect_updates: true,
        };
        let tree = merged(json!({"a": {"b": 1}}), json!({"a": {"b": 2}}), &config);
        let output = format_report(&tree, &OutputFormat::Json, &OutputOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value["changes"],
            json!([{"path": ["a", "b"], "key": 2, "change": "updated", "previous": 1}])
        );
        assert_eq!(value["stats"]["updated"], 1);
    }
}
