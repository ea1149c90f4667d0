//! Tree reader: container groups and datasets back into nested trees

use std::path::Path;

use arbor_format::{Group, Limits, Node, Result};
use serde::Serialize;

use crate::convert::{leaf_from_dataset, normalize_leaf};
use crate::file::ContainerFile;
use crate::tree::{Tree, TreeNode};
use crate::ReadOptions;

/// Rebuilds a [`Tree`] from a container hierarchy.
pub struct TreeReader<'a> {
    opts: &'a ReadOptions,
}

impl<'a> TreeReader<'a> {
    /// Create a reader with the given normalization options
    pub fn new(opts: &'a ReadOptions) -> Self {
        Self { opts }
    }

    /// Consume `root` and rebuild the tree below it.
    pub fn read(&self, root: Group) -> Result<Tree> {
        self.read_level(root, 0)
    }

    fn read_level(&self, group: Group, depth: usize) -> Result<Tree> {
        let mut out = Tree::with_capacity(group.len());
        for (name, node) in group.into_entries() {
            let value = match node {
                Node::Group(child) => {
                    self.opts.limits.check_depth(depth + 1)?;
                    TreeNode::Group(self.read_level(child, depth + 1)?)
                }
                Node::Dataset(dataset) => TreeNode::Leaf(normalize_leaf(
                    leaf_from_dataset(dataset)?,
                    self.opts.to_lists,
                    self.opts.decode_strings,
                )?),
            };
            out.insert(name, value);
        }
        Ok(out)
    }
}

/// Read the container at `path` into a tree.
///
/// Any failure aborts the whole read; no partial tree is returned.
pub fn read_tree(path: impl AsRef<Path>, opts: &ReadOptions) -> Result<Tree> {
    let root = ContainerFile::open(path, opts.limits.clone())?.into_root();
    TreeReader::new(opts).read(root)
}

/// One line of a container listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    /// Slash-separated path from the root
    pub path: String,
    /// `group`, or the dataset's dtype
    pub kind: String,
    /// Dataset shape, absent for groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

/// List every group and dataset in the container at `path`, depth first.
pub fn list_container(path: impl AsRef<Path>, limits: &Limits) -> Result<Vec<EntrySummary>> {
    let file = ContainerFile::open(path, limits.clone())?;
    let mut entries = Vec::new();
    collect_entries(file.root(), "", &mut entries);
    Ok(entries)
}

fn collect_entries(group: &Group, prefix: &str, out: &mut Vec<EntrySummary>) {
    for (name, node) in group.iter() {
        let path = format!("{}/{}", prefix, name);
        match node {
            Node::Group(child) => {
                out.push(EntrySummary {
                    path: path.clone(),
                    kind: "group".to_string(),
                    shape: None,
                });
                collect_entries(child, &path, out);
            }
            Node::Dataset(dataset) => out.push(EntrySummary {
                path,
                kind: dataset.dtype().to_string(),
                shape: Some(dataset.shape().to_string()),
            }),
        }
    }
}
