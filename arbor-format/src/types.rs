//! Dataset element types and shapes

use crate::constants::{
    DTYPE_BOOL, DTYPE_BYTES, DTYPE_FLOAT64, DTYPE_INT64, RANK_SCALAR, RANK_VECTOR,
};
use crate::error::{ArborError, Result};
use std::fmt;

/// Element type of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DType {
    /// Boolean, one byte per element
    Bool = DTYPE_BOOL,
    /// Signed 64-bit integer
    Int64 = DTYPE_INT64,
    /// 64-bit IEEE 754 float
    Float64 = DTYPE_FLOAT64,
    /// Variable-length byte string
    Bytes = DTYPE_BYTES,
}

impl DType {
    /// Convert from the on-disk code
    pub fn from_u8(val: u8) -> Result<Self> {
        match val {
            DTYPE_BOOL => Ok(DType::Bool),
            DTYPE_INT64 => Ok(DType::Int64),
            DTYPE_FLOAT64 => Ok(DType::Float64),
            DTYPE_BYTES => Ok(DType::Bytes),
            _ => Err(ArborError::UnsupportedFeature(format!(
                "Unknown dtype: {}",
                val
            ))),
        }
    }

    /// Short lowercase name, as shown by listings
    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bytes => "bytes",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a dataset: a single value or a one-dimensional vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Rank 0, exactly one element
    Scalar,
    /// Rank 1 with the given length
    Vector(usize),
}

impl Shape {
    /// Rank byte written to disk
    pub fn rank(self) -> u8 {
        match self {
            Shape::Scalar => RANK_SCALAR,
            Shape::Vector(_) => RANK_VECTOR,
        }
    }

    /// Number of elements described by this shape
    pub fn element_count(self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(len) => len,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => f.write_str("()"),
            Shape::Vector(len) => write!(f, "({},)", len),
        }
    }
}
