//! Arbor I/O - Nested trees to hierarchical containers and back
//!
//! This crate provides the tree-level API on top of `arbor-format`:
//!
//! - The in-memory [`Tree`] model and the [`tree!`] literal macro
//! - [`write_tree`] / [`dict_to_container`]: one group per mapping, one
//!   dataset per leaf, with an optional JSON backup when the write fails
//! - [`read_tree`] / [`container_to_dict`]: the reverse, with list and
//!   string normalization
//! - [`list_container`] for inspecting a file without materializing a tree

#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod convert;
pub mod fallback;
pub mod file;
pub mod reader;
pub mod tree;
pub mod writer;

// Re-export commonly used types
pub use arbor_format::{ArborError, Limits, Result};
pub use fallback::{json_sibling_path, serialize_json};
pub use file::ContainerFile;
pub use reader::{list_container, read_tree, EntrySummary, TreeReader};
pub use tree::{tree_from_json, tree_to_json, Array, LeafValue, Scalar, Tree, TreeNode};
pub use writer::{write_tree, TreeWriter, WriteError, WriteOutcome, DETAIL_HINT};

use std::path::Path;
use tracing::error;

/// Options for [`write_tree`]
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write the tree as JSON next to the container if the container write fails
    pub use_json_backup: bool,
    /// Include the failing leaf's error in the diagnostics
    pub show_detail: bool,
    /// Security limits
    pub limits: Limits,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            use_json_backup: false,
            show_detail: false,
            limits: Limits::default(),
        }
    }
}

/// Options for [`read_tree`]
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Return sequences in list form rather than array-like form
    pub to_lists: bool,
    /// Decode scalar byte strings to text
    pub decode_strings: bool,
    /// Security limits
    pub limits: Limits,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            to_lists: true,
            decode_strings: true,
            limits: Limits::default(),
        }
    }
}

/// Write `tree` to the container at `path`.
///
/// Returns `true` when the container was written, and also when it failed
/// but `use_json_backup` was set (the backup's own result is only logged).
/// Use [`write_tree`] to inspect the full outcome.
pub fn dict_to_container(
    tree: &Tree,
    path: impl AsRef<Path>,
    use_json_backup: bool,
    show_detail: bool,
) -> bool {
    let opts = WriteOptions {
        use_json_backup,
        show_detail,
        ..WriteOptions::default()
    };
    write_tree(tree, path, &opts).succeeded()
}

/// Read the container at `path` into a tree, or `None` if it cannot be read.
pub fn container_to_dict(
    path: impl AsRef<Path>,
    to_lists: bool,
    decode_strings: bool,
) -> Option<Tree> {
    let opts = ReadOptions {
        to_lists,
        decode_strings,
        ..ReadOptions::default()
    };
    match read_tree(path.as_ref(), &opts) {
        Ok(tree) => Some(tree),
        Err(e) => {
            error!(path = %path.as_ref().display(), "Failed to read container! ({})", e);
            None
        }
    }
}
