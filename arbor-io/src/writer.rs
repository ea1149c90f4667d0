//! Tree writer: nested trees into container groups and datasets

use std::path::Path;
use std::time::{Duration, Instant};

use arbor_format::{ArborError, Group, Limits};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::convert::dataset_from_leaf;
use crate::fallback::{json_sibling_path, try_serialize_json};
use crate::file::ContainerFile;
use crate::tree::{Tree, TreeNode};
use crate::WriteOptions;

/// Diagnostic used for leaf failures when detail is not requested
pub const DETAIL_HINT: &str = "Set show_detail to true for details";

/// Reasons a container write fails
#[derive(Debug, Error)]
pub enum WriteError {
    /// The container rejected a single leaf value
    #[error("Failed to write dataset '{key}' with value of type {type_name}. ({source})")]
    Leaf {
        /// Name of the rejected leaf
        key: String,
        /// Type name of the rejected value
        type_name: &'static str,
        /// Container's reason
        #[source]
        source: ArborError,
    },
    /// Opening, building or committing the container failed
    #[error("{0}")]
    Container(#[from] ArborError),
}

/// What happened during [`write_tree`]
#[derive(Debug, Clone, Default)]
pub struct WriteOutcome {
    /// The container was written completely
    pub primary_ok: bool,
    /// A JSON backup was attempted after the container write failed
    pub fallback_attempted: bool,
    /// Result of the JSON backup, when attempted
    pub fallback_ok: Option<bool>,
    /// Wall-clock time spent on the container write
    pub elapsed: Duration,
    /// Human-readable report lines, in order
    pub diagnostics: Vec<String>,
}

impl WriteOutcome {
    /// Boolean result of a write: `true` when the container was written, or
    /// when it failed and a JSON backup was attempted (whatever its result).
    pub fn succeeded(&self) -> bool {
        self.primary_ok || self.fallback_attempted
    }

    fn report(&mut self, line: String) {
        self.diagnostics.push(line);
    }
}

/// Walks a [`Tree`], creating a group per mapping and a dataset per leaf.
pub struct TreeWriter<'a> {
    limits: &'a Limits,
}

impl<'a> TreeWriter<'a> {
    /// Create a writer bounded by `limits`
    pub fn new(limits: &'a Limits) -> Self {
        Self { limits }
    }

    /// Write `tree` into `group`, stopping at the first failure.
    pub fn write(&self, group: &mut Group, tree: &Tree) -> Result<(), WriteError> {
        self.write_level(group, tree, 0)
    }

    fn write_level(&self, group: &mut Group, level: &Tree, depth: usize) -> Result<(), WriteError> {
        for (key, node) in level {
            // Anything accepted here must also pass the limits applied on read
            let next_len = group.len() + 1;
            match node {
                TreeNode::Group(sub) => {
                    self.limits.check_depth(depth + 1)?;
                    self.limits.check_name(key)?;
                    self.limits.check_entries(next_len)?;
                    let child = group.create_group(key)?;
                    self.write_level(child, sub, depth + 1)?;
                }
                TreeNode::Leaf(value) => {
                    self.limits
                        .check_name(key)
                        .and_then(|()| self.limits.check_entries(next_len))
                        .and_then(|()| dataset_from_leaf(value))
                        .and_then(|dataset| {
                            self.limits.check_dataset(&dataset)?;
                            group.create_dataset(key, dataset)
                        })
                        .map_err(|source| WriteError::Leaf {
                            key: key.clone(),
                            type_name: value.type_name(),
                            source,
                        })?;
                }
            }
        }
        Ok(())
    }
}

/// Write `tree` to a fresh container at `path`.
///
/// The container is committed to disk even when a leaf is rejected part way
/// through. When the write fails and [`WriteOptions::use_json_backup`] is set,
/// the tree is also written as JSON next to `path`.
pub fn write_tree(tree: &Tree, path: impl AsRef<Path>, opts: &WriteOptions) -> WriteOutcome {
    let path = path.as_ref();
    let start = Instant::now();
    let mut outcome = WriteOutcome::default();

    let result = write_container(tree, path, &opts.limits);
    outcome.elapsed = start.elapsed();

    let err = match result {
        Ok(()) => {
            outcome.primary_ok = true;
            let line = format!("Wrote file in {} sec.", outcome.elapsed.as_secs_f64());
            info!(path = %path.display(), elapsed = ?outcome.elapsed, "{}", line);
            outcome.report(line);
            return outcome;
        }
        Err(err) => err,
    };

    let reason = match &err {
        WriteError::Leaf { .. } => {
            if opts.show_detail {
                let detail = err.to_string();
                warn!("{}", detail);
                outcome.report(detail.clone());
                detail
            } else {
                DETAIL_HINT.to_string()
            }
        }
        WriteError::Container(inner) => {
            error!(tree = ?tree, "container write aborted");
            outcome.report(format!("{:?}", tree));
            inner.to_string()
        }
    };
    let line = format!("Failed to write container! ({})", reason);
    error!(path = %path.display(), "{}", line);
    outcome.report(line);

    if opts.use_json_backup {
        let json_path = json_sibling_path(path);
        outcome.fallback_attempted = true;
        match try_serialize_json(tree, &json_path) {
            Ok(()) => {
                info!(path = %json_path.display(), "wrote JSON backup");
                outcome.fallback_ok = Some(true);
            }
            Err(err) => {
                let line = format!("Failed to write JSON backup: ({}).", err);
                warn!(path = %json_path.display(), "{}", line);
                outcome.report(line);
                outcome.fallback_ok = Some(false);
            }
        }
    }

    outcome
}

fn write_container(tree: &Tree, path: &Path, limits: &Limits) -> Result<(), WriteError> {
    let mut file = ContainerFile::create(path, limits.clone())?;
    let written = TreeWriter::new(limits).write(file.root_mut(), tree);
    if let Err(err) = &written {
        debug!(error = %err, "tree write stopped; committing partial container");
    }
    let closed = file.close();
    written?;
    closed?;
    Ok(())
}
