//! Datasets: typed, fixed-shape values stored under a name in a group

use crate::error::{ArborError, Result};
use crate::types::{DType, Shape};

/// Element storage of a dataset
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// Boolean elements
    Bool(Vec<bool>),
    /// Signed integer elements
    Int(Vec<i64>),
    /// Floating point elements
    Float(Vec<f64>),
    /// Byte string elements
    Bytes(Vec<Vec<u8>>),
}

impl Data {
    /// Element type of this storage
    pub fn dtype(&self) -> DType {
        match self {
            Data::Bool(_) => DType::Bool,
            Data::Int(_) => DType::Int64,
            Data::Float(_) => DType::Float64,
            Data::Bytes(_) => DType::Bytes,
        }
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        match self {
            Data::Bool(v) => v.len(),
            Data::Int(v) => v.len(),
            Data::Float(v) => v.len(),
            Data::Bytes(v) => v.len(),
        }
    }

    /// True when no elements are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named value in the hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    shape: Shape,
    data: Data,
}

impl Dataset {
    /// Build a scalar dataset. `data` must hold exactly one element.
    pub fn scalar(data: Data) -> Result<Self> {
        if data.len() != 1 {
            return Err(ArborError::Internal(format!(
                "scalar dataset needs exactly one element, got {}",
                data.len()
            )));
        }
        Ok(Self {
            shape: Shape::Scalar,
            data,
        })
    }

    /// Build a one-dimensional dataset holding every element of `data`.
    pub fn vector(data: Data) -> Self {
        Self {
            shape: Shape::Vector(data.len()),
            data,
        }
    }

    /// Element type
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Shape
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Element storage
    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Consume the dataset and return its storage and shape
    pub fn into_parts(self) -> (Shape, Data) {
        (self.shape, self.data)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for an empty vector dataset
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
