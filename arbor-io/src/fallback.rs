//! JSON backup for trees that could not be written as a container

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use arbor_format::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{info, warn};

use crate::tree::Tree;

/// Indentation used for JSON backups
pub const JSON_INDENT: &[u8] = b"    ";

/// Sibling path of `path` with its extension replaced by `.json`.
pub fn json_sibling_path(path: &Path) -> PathBuf {
    path.with_extension("json")
}

/// Write `tree` as 4-space indented JSON to `path`.
///
/// The file is created before the tree is rendered, so a tree that cannot be
/// represented in JSON (byte strings, array-like leaves) leaves an empty file
/// behind along with the error.
pub fn try_serialize_json(tree: &Tree, path: &Path) -> Result<()> {
    let file = File::create(path)?;

    let mut rendered = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut rendered, PrettyFormatter::with_indent(JSON_INDENT));
    tree.serialize(&mut serializer)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&rendered)?;
    writer.flush()?;
    Ok(())
}

/// Write `tree` as JSON to `path`, reporting rather than returning failures.
pub fn serialize_json(tree: &Tree, path: &Path) -> bool {
    match try_serialize_json(tree, path) {
        Ok(()) => {
            info!(path = %path.display(), "wrote JSON backup");
            true
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to write JSON backup");
            false
        }
    }
}
