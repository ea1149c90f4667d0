//! Conversions between leaf values and datasets

use arbor_format::{ArborError, Data, Dataset, Result, Shape};

use crate::tree::{Array, LeafValue, Scalar};

/// Build the dataset that stores `leaf`.
///
/// Text is stored as UTF-8 byte strings. Fails with
/// [`ArborError::UnsupportedLeaf`] for nulls and lists that cannot be coerced
/// to a single element type.
pub fn dataset_from_leaf(leaf: &LeafValue) -> Result<Dataset> {
    match leaf {
        LeafValue::Null => Err(ArborError::UnsupportedLeaf(
            "null has no dataset representation".to_string(),
        )),
        LeafValue::Bool(b) => Dataset::scalar(Data::Bool(vec![*b])),
        LeafValue::Int(i) => Dataset::scalar(Data::Int(vec![*i])),
        LeafValue::Float(f) => Dataset::scalar(Data::Float(vec![*f])),
        LeafValue::Text(t) => Dataset::scalar(Data::Bytes(vec![t.as_bytes().to_vec()])),
        LeafValue::Bytes(b) => Dataset::scalar(Data::Bytes(vec![b.clone()])),
        LeafValue::Array(array) => Ok(Dataset::vector(data_from_array(array.clone()))),
        LeafValue::List(items) => match Array::from_scalars(items) {
            Some(array) => Ok(Dataset::vector(data_from_array(array))),
            None => Err(ArborError::UnsupportedLeaf(format!(
                "list of [{}] has no common element type",
                describe_elements(items)
            ))),
        },
    }
}

fn data_from_array(array: Array) -> Data {
    match array {
        Array::Bool(v) => Data::Bool(v),
        Array::Int(v) => Data::Int(v),
        Array::Float(v) => Data::Float(v),
        Array::Text(v) => Data::Bytes(v.into_iter().map(String::into_bytes).collect()),
        Array::Bytes(v) => Data::Bytes(v),
    }
}

fn describe_elements(items: &[Scalar]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for item in items {
        let name = item.type_name();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names.join(", ")
}

/// Raw leaf for a stored dataset, before any normalization.
///
/// Scalars come back as scalar leaves and vectors as array-like leaves. Byte
/// strings stay byte strings.
pub fn leaf_from_dataset(dataset: Dataset) -> Result<LeafValue> {
    let (shape, data) = dataset.into_parts();
    match shape {
        Shape::Vector(_) => Ok(LeafValue::Array(match data {
            Data::Bool(v) => Array::Bool(v),
            Data::Int(v) => Array::Int(v),
            Data::Float(v) => Array::Float(v),
            Data::Bytes(v) => Array::Bytes(v),
        })),
        Shape::Scalar => {
            let leaf = match data {
                Data::Bool(v) => v.into_iter().next().map(LeafValue::Bool),
                Data::Int(v) => v.into_iter().next().map(LeafValue::Int),
                Data::Float(v) => v.into_iter().next().map(LeafValue::Float),
                Data::Bytes(v) => v.into_iter().next().map(LeafValue::Bytes),
            };
            leaf.ok_or_else(|| ArborError::Internal("scalar dataset without a value".to_string()))
        }
    }
}

/// Apply the read-side normalization to a raw leaf.
///
/// 1. `to_lists` turns array-like leaves into lists; otherwise lists are
///    coerced to array-like form where possible.
/// 2. A list whose first element is a byte string, or any byte string
///    array (empty included), has its byte strings decoded to text,
///    whatever `decode_strings` says.
/// 3. Otherwise a scalar byte string is decoded when `decode_strings` is set.
pub fn normalize_leaf(leaf: LeafValue, to_lists: bool, decode_strings: bool) -> Result<LeafValue> {
    let leaf = match leaf {
        LeafValue::Array(array) if to_lists => LeafValue::List(array.into_scalars()),
        LeafValue::List(items) if !to_lists => match Array::from_scalars(&items) {
            Some(array) => LeafValue::Array(array),
            None => LeafValue::List(items),
        },
        other => other,
    };

    match leaf {
        LeafValue::List(items) if matches!(items.first(), Some(Scalar::Bytes(_))) => {
            let decoded = items
                .into_iter()
                .map(|item| -> Result<Scalar> {
                    match item {
                        Scalar::Bytes(raw) => Ok(Scalar::Text(String::from_utf8(raw)?)),
                        other => Ok(other),
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(LeafValue::List(decoded))
        }
        LeafValue::Array(Array::Bytes(items)) => {
            let decoded = items
                .into_iter()
                .map(String::from_utf8)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(LeafValue::Array(Array::Text(decoded)))
        }
        LeafValue::Bytes(raw) if decode_strings => Ok(LeafValue::Text(String::from_utf8(raw)?)),
        other => Ok(other),
    }
}
