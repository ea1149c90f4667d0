//! Security limits and configuration

use crate::dataset::{Data, Dataset};
use crate::error::{ArborError, Result};

/// Limits applied while building and decoding hierarchies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum group nesting depth below the root (default: 64)
    pub max_depth: usize,
    /// Maximum entries in a single group (default: 1,000,000)
    pub max_entries_per_group: usize,
    /// Maximum group/dataset name length in bytes (default: 4,096)
    pub max_name_len: usize,
    /// Maximum elements in a single dataset (default: 256 Mi)
    pub max_elements_per_dataset: usize,
    /// Maximum length of a single byte string element (default: 16 MiB)
    pub max_string_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_entries_per_group: 1_000_000,
            max_name_len: 4_096,
            max_elements_per_dataset: 256 * 1024 * 1024,
            max_string_len: 16 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Return limits with a different depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fail when `depth` is beyond [`Limits::max_depth`].
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ArborError::LimitExceeded(format!(
                "Nesting depth {} exceeds limit {}",
                depth, self.max_depth
            )));
        }
        Ok(())
    }

    /// Fail when `name` is longer than [`Limits::max_name_len`] bytes.
    pub fn check_name(&self, name: &str) -> Result<()> {
        check_len("name length", name.len(), self.max_name_len)
    }

    /// Fail when a group would hold more than [`Limits::max_entries_per_group`] entries.
    pub fn check_entries(&self, count: usize) -> Result<()> {
        check_len("entry count", count, self.max_entries_per_group)
    }

    /// Fail when `dataset` could not be decoded again under these limits.
    pub fn check_dataset(&self, dataset: &Dataset) -> Result<()> {
        check_len("element count", dataset.len(), self.max_elements_per_dataset)?;
        if let Data::Bytes(values) = dataset.data() {
            for value in values {
                check_len("string length", value.len(), self.max_string_len)?;
            }
        }
        Ok(())
    }
}

fn check_len(what: &str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(ArborError::LimitExceeded(format!(
            "{} {} exceeds limit {}",
            what, len, max
        )));
    }
    Ok(())
}
