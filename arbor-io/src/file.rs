//! Scoped container file handle

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use arbor_format::{decode_hierarchy, encode_hierarchy, Group, Limits, Result};
use tracing::{debug, warn};

/// A container file opened for one write or one read.
///
/// [`ContainerFile::create`] truncates the target immediately; the hierarchy
/// built through [`ContainerFile::root_mut`] is written out by
/// [`ContainerFile::close`], or when the handle is dropped without closing.
pub struct ContainerFile {
    path: PathBuf,
    file: Option<File>,
    root: Group,
    limits: Limits,
}

impl ContainerFile {
    /// Create (or truncate) a container at `path` with an empty root group.
    pub fn create(path: impl AsRef<Path>, limits: Limits) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        debug!(path = %path.display(), "created container");
        Ok(Self {
            path,
            file: Some(file),
            root: Group::new(),
            limits,
        })
    }

    /// Open an existing container, verifying and decoding all of it.
    pub fn open(path: impl AsRef<Path>, limits: Limits) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path)?;
        let root = decode_hierarchy(&bytes, &limits)?;
        debug!(path = %path.display(), bytes = bytes.len(), "opened container");
        Ok(Self {
            path,
            file: None,
            root,
            limits,
        })
    }

    /// Location on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Root group
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Root group, for building the hierarchy before close
    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Take the root group out of a container opened for reading.
    pub fn into_root(mut self) -> Group {
        self.file = None;
        std::mem::take(&mut self.root)
    }

    /// Write the hierarchy and close the file.
    pub fn close(mut self) -> Result<()> {
        self.commit()
    }

    fn commit(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };

        let bytes = encode_hierarchy(&self.root, &self.limits)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "committed container");
        Ok(())
    }
}

impl Drop for ContainerFile {
    fn drop(&mut self) {
        if let Err(err) = self.commit() {
            warn!(path = %self.path.display(), error = %err, "failed to commit container on drop");
        }
    }
}
