//! jtdiff - structural diff of JSON documents.
//!
//! Each document is converted into a tree of labeled nodes, and the two trees
//! are merged into one whose nodes are classified as unchanged, inserted,
//! deleted or updated. The merged tree renders as a human-readable report.
//!
//! # Example
//!
//! ```no_run
//! use jtdiff::{build_tree, diff, parse_file, render_report, BuildOptions, DiffConfig};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = BuildOptions::default();
//! let old = build_tree(&parse_file(Path::new("old.json"))?, &options);
//! let new = build_tree(&parse_file(Path::new("new.json"))?, &options);
//!
//! let merged = diff(Some(old), Some(&new), &DiffConfig::default())?;
//! print!("{}", render_report(&merged));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod diff;
pub mod error;
pub mod output;
pub mod parser;
pub mod tree;

pub use builder::{build_tree, BuildOptions, ListMode};
pub use diff::{compute_diff, diff, merge, DiffConfig, DiffStats};
pub use error::{DiffError, JtdiffError, OutputError, ParseError};
pub use output::{format_report, render_report, OutputFormat, OutputOptions};
pub use parser::{parse_file, parse_json, parse_toml, parse_yaml};
pub use tree::{ChangeKind, Key, Node, ROOT_KEY};
