//! Arbor Format - Core primitives for hierarchical group/dataset containers
//!
//! This crate provides the container side of Arbor with no I/O dependencies.
//! It includes:
//!
//! - Magic numbers and constants
//! - Variable-length integer encoding (ULEB128/ZigZag)
//! - CRC32C checksums
//! - Error types
//! - Security limits
//! - Dataset element types and shapes
//! - In-memory groups and datasets
//! - Whole-hierarchy encoding and decoding

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod checksum;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod group;
pub mod header;
pub mod hierarchy;
pub mod limits;
pub mod types;
pub mod varint;

// Re-export commonly used types
pub use dataset::{Data, Dataset};
pub use error::{ArborError, Result};
pub use group::{Group, Node};
pub use header::FileHeader;
pub use hierarchy::{decode_hierarchy, encode_hierarchy};
pub use limits::Limits;
pub use types::{DType, Shape};
