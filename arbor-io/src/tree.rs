//! In-memory tree model.
//!
//! A [`Tree`] is an ordered mapping from names to [`TreeNode`]s. A node is
//! either a nested tree, which becomes a group in the container, or a
//! [`LeafValue`], which becomes a dataset.
//!
//! Sequences come in two forms. [`LeafValue::List`] is the list form: an
//! ordered run of [`Scalar`]s that may mix types. [`LeafValue::Array`] is the
//! array-like form: one element type and a fixed length, matching what a
//! dataset stores.

use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use arbor_format::{ArborError, Result};

/// Nested mapping headed for, or read from, a container
pub type Tree = IndexMap<String, TreeNode>;

/// A value in a [`Tree`]
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Nested mapping, stored as a group
    Group(Tree),
    /// Anything else, stored as a dataset
    Leaf(LeafValue),
}

/// Single element of a list-form sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Missing value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Raw byte string
    Bytes(Vec<u8>),
}

/// Homogeneous, fixed-length sequence (array-like form)
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    /// Boolean elements
    Bool(Vec<bool>),
    /// Integer elements
    Int(Vec<i64>),
    /// Floating point elements
    Float(Vec<f64>),
    /// Text elements
    Text(Vec<String>),
    /// Byte string elements
    Bytes(Vec<Vec<u8>>),
}

/// Non-mapping value stored as a single dataset
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    /// Missing value. Containers cannot store it.
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// Text scalar
    Text(String),
    /// Byte string scalar
    Bytes(Vec<u8>),
    /// Sequence in list form
    List(Vec<Scalar>),
    /// Sequence in array-like form
    Array(Array),
}

impl Scalar {
    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
            Scalar::Bytes(_) => "bytes",
        }
    }
}

impl Array {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Array::Bool(v) => v.len(),
            Array::Int(v) => v.len(),
            Array::Float(v) => v.len(),
            Array::Text(v) => v.len(),
            Array::Bytes(v) => v.len(),
        }
    }

    /// True when there are no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Array::Bool(_) => "array[bool]",
            Array::Int(_) => "array[int]",
            Array::Float(_) => "array[float]",
            Array::Text(_) => "array[text]",
            Array::Bytes(_) => "array[bytes]",
        }
    }

    /// Convert to list form, element by element
    pub fn into_scalars(self) -> Vec<Scalar> {
        match self {
            Array::Bool(v) => v.into_iter().map(Scalar::Bool).collect(),
            Array::Int(v) => v.into_iter().map(Scalar::Int).collect(),
            Array::Float(v) => v.into_iter().map(Scalar::Float).collect(),
            Array::Text(v) => v.into_iter().map(Scalar::Text).collect(),
            Array::Bytes(v) => v.into_iter().map(Scalar::Bytes).collect(),
        }
    }

    /// Coerce a list to array-like form.
    ///
    /// Integers widen to floats when both appear, text mixed with byte
    /// strings becomes byte strings, and an empty list becomes an empty float
    /// array. Returns `None` for nulls and any other mix of types.
    pub fn from_scalars(items: &[Scalar]) -> Option<Array> {
        let Some(first) = items.first() else {
            return Some(Array::Float(Vec::new()));
        };

        let all = |pred: fn(&Scalar) -> bool| items.iter().all(pred);

        match first {
            Scalar::Null => None,
            Scalar::Bool(_) if all(|s| matches!(s, Scalar::Bool(_))) => Some(Array::Bool(
                items
                    .iter()
                    .filter_map(|s| match s {
                        Scalar::Bool(b) => Some(*b),
                        _ => None,
                    })
                    .collect(),
            )),
            Scalar::Int(_) | Scalar::Float(_)
                if all(|s| matches!(s, Scalar::Int(_) | Scalar::Float(_))) =>
            {
                if all(|s| matches!(s, Scalar::Int(_))) {
                    Some(Array::Int(
                        items
                            .iter()
                            .filter_map(|s| match s {
                                Scalar::Int(i) => Some(*i),
                                _ => None,
                            })
                            .collect(),
                    ))
                } else {
                    Some(Array::Float(
                        items
                            .iter()
                            .filter_map(|s| match s {
                                Scalar::Int(i) => Some(*i as f64),
                                Scalar::Float(f) => Some(*f),
                                _ => None,
                            })
                            .collect(),
                    ))
                }
            }
            Scalar::Text(_) if all(|s| matches!(s, Scalar::Text(_))) => Some(Array::Text(
                items
                    .iter()
                    .filter_map(|s| match s {
                        Scalar::Text(t) => Some(t.clone()),
                        _ => None,
                    })
                    .collect(),
            )),
            Scalar::Text(_) | Scalar::Bytes(_)
                if all(|s| matches!(s, Scalar::Text(_) | Scalar::Bytes(_))) =>
            {
                Some(Array::Bytes(
                    items
                        .iter()
                        .filter_map(|s| match s {
                            Scalar::Text(t) => Some(t.as_bytes().to_vec()),
                            Scalar::Bytes(b) => Some(b.clone()),
                            _ => None,
                        })
                        .collect(),
                ))
            }
            _ => None,
        }
    }
}

impl LeafValue {
    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            LeafValue::Null => "null",
            LeafValue::Bool(_) => "bool",
            LeafValue::Int(_) => "int",
            LeafValue::Float(_) => "float",
            LeafValue::Text(_) => "text",
            LeafValue::Bytes(_) => "bytes",
            LeafValue::List(_) => "list",
            LeafValue::Array(array) => array.type_name(),
        }
    }
}

macro_rules! impl_from {
    ($target:ident: $($ty:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$ty> for $target {
                fn from(v: $ty) -> Self {
                    $target::$variant($conv(v))
                }
            }
        )*
    };
}

impl_from!(Scalar:
    bool => Bool(|v| v),
    i32 => Int(i64::from),
    i64 => Int(|v| v),
    f64 => Float(|v| v),
    &str => Text(str::to_string),
    String => Text(|v| v),
);

impl_from!(LeafValue:
    bool => Bool(|v| v),
    i32 => Int(i64::from),
    i64 => Int(|v| v),
    f64 => Float(|v| v),
    &str => Text(str::to_string),
    String => Text(|v| v),
    Vec<u8> => Bytes(|v| v),
    Vec<Scalar> => List(|v| v),
    Array => Array(|v| v),
);

impl From<LeafValue> for TreeNode {
    fn from(v: LeafValue) -> Self {
        TreeNode::Leaf(v)
    }
}

impl From<Tree> for TreeNode {
    fn from(v: Tree) -> Self {
        TreeNode::Group(v)
    }
}

// JSON has no byte strings and no typed arrays, so those leaves refuse to
// serialize; the fallback writer reports the failure.

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TreeNode::Group(tree) => tree.serialize(serializer),
            TreeNode::Leaf(leaf) => leaf.serialize(serializer),
        }
    }
}

impl Serialize for LeafValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            LeafValue::Null => serializer.serialize_unit(),
            LeafValue::Bool(b) => serializer.serialize_bool(*b),
            LeafValue::Int(i) => serializer.serialize_i64(*i),
            LeafValue::Float(f) => serializer.serialize_f64(*f),
            LeafValue::Text(t) => serializer.serialize_str(t),
            LeafValue::Bytes(_) => Err(S::Error::custom(
                "byte string leaves are not JSON serializable",
            )),
            LeafValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            LeafValue::Array(array) => Err(S::Error::custom(format!(
                "{} leaves are not JSON serializable; convert to list form first",
                array.type_name()
            ))),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Text(t) => serializer.serialize_str(t),
            Scalar::Bytes(_) => Err(S::Error::custom(
                "byte string elements are not JSON serializable",
            )),
        }
    }
}

/// Build a tree from a parsed JSON document.
///
/// The document must be an object. Objects become groups, arrays become
/// lists, and `null` becomes [`LeafValue::Null`]. Arrays nested inside
/// arrays, or objects inside arrays, have no leaf representation. Integers
/// above `i64::MAX` are rejected rather than rounded to a float.
pub fn tree_from_json(value: Value) -> Result<Tree> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| Ok((key, node_from_json(value)?)))
            .collect(),
        other => Err(ArborError::UnsupportedLeaf(format!(
            "top-level JSON value must be an object, got {}",
            json_kind(&other)
        ))),
    }
}

fn node_from_json(value: Value) -> Result<TreeNode> {
    Ok(match value {
        Value::Object(_) => TreeNode::Group(tree_from_json(value)?),
        Value::Array(items) => TreeNode::Leaf(LeafValue::List(
            items
                .into_iter()
                .map(scalar_from_json)
                .collect::<Result<Vec<_>>>()?,
        )),
        Value::Null => TreeNode::Leaf(LeafValue::Null),
        Value::Bool(b) => TreeNode::Leaf(LeafValue::Bool(b)),
        Value::Number(n) => TreeNode::Leaf(match checked_i64(&n)? {
            Some(i) => LeafValue::Int(i),
            None => LeafValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::String(s) => TreeNode::Leaf(LeafValue::Text(s)),
    })
}

fn scalar_from_json(value: Value) -> Result<Scalar> {
    Ok(match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(b),
        Value::Number(n) => match checked_i64(&n)? {
            Some(i) => Scalar::Int(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Scalar::Text(s),
        other => {
            return Err(ArborError::UnsupportedLeaf(format!(
                "{} inside an array",
                json_kind(&other)
            )))
        }
    })
}

/// `Some` for integers that fit in `i64`, `None` for floats.
fn checked_i64(n: &Number) -> Result<Option<i64>> {
    match n.as_i64() {
        None if n.is_u64() => Err(ArborError::UnsupportedLeaf(format!(
            "integer {} does not fit in a signed 64-bit value",
            n
        ))),
        other => Ok(other),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a tree as a JSON value. Fails on byte strings and array-like leaves.
pub fn tree_to_json(tree: &Tree) -> Result<Value> {
    Ok(serde_json::to_value(tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_scalars_coercion_rules() {
        assert_eq!(Array::from_scalars(&[]), Some(Array::Float(vec![])));
        assert_eq!(
            Array::from_scalars(&[Scalar::Int(1), Scalar::Int(2)]),
            Some(Array::Int(vec![1, 2]))
        );
        assert_eq!(
            Array::from_scalars(&[Scalar::Int(1), Scalar::Float(2.5)]),
            Some(Array::Float(vec![1.0, 2.5]))
        );
        assert_eq!(
            Array::from_scalars(&[Scalar::Bool(true), Scalar::Bool(false)]),
            Some(Array::Bool(vec![true, false]))
        );
        assert_eq!(
            Array::from_scalars(&["a".into(), "b".into()]),
            Some(Array::Text(vec!["a".into(), "b".into()]))
        );
        assert_eq!(
            Array::from_scalars(&["a".into(), Scalar::Bytes(b"b".to_vec())]),
            Some(Array::Bytes(vec![b"a".to_vec(), b"b".to_vec()]))
        );
    }

    #[test]
    fn test_from_scalars_rejects_mixes_and_nulls() {
        assert_eq!(Array::from_scalars(&[Scalar::Null]), None);
        assert_eq!(Array::from_scalars(&[Scalar::Int(1), Scalar::Null]), None);
        assert_eq!(Array::from_scalars(&[Scalar::Int(1), "a".into()]), None);
        assert_eq!(
            Array::from_scalars(&[Scalar::Bool(true), Scalar::Int(1)]),
            None
        );
    }

    #[test]
    fn test_into_scalars_preserves_order() {
        let items = Array::Int(vec![3, 1, 2]).into_scalars();
        assert_eq!(items, vec![Scalar::Int(3), Scalar::Int(1), Scalar::Int(2)]);
    }

    #[test]
    fn test_tree_from_json_maps_kinds() {
        let tree = tree_from_json(json!({
            "a": {"b": [1, 2, 3]},
            "c": "hello",
            "d": 1.5,
            "e": null,
            "f": {}
        }))
        .unwrap();

        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["a", "c", "d", "e", "f"]);
        match &tree["a"] {
            TreeNode::Group(inner) => assert_eq!(
                inner["b"],
                TreeNode::Leaf(LeafValue::List(vec![
                    Scalar::Int(1),
                    Scalar::Int(2),
                    Scalar::Int(3)
                ]))
            ),
            other => panic!("expected group, got {other:?}"),
        }
        assert_eq!(tree["c"], TreeNode::Leaf("hello".into()));
        assert_eq!(tree["d"], TreeNode::Leaf(LeafValue::Float(1.5)));
        assert_eq!(tree["e"], TreeNode::Leaf(LeafValue::Null));
        assert_eq!(tree["f"], TreeNode::Group(Tree::new()));
    }

    #[test]
    fn test_tree_from_json_keeps_document_key_order() {
        let tree = tree_from_json(json!({"zeta": 1, "alpha": 2, "mid": {"y": 1, "x": 2}})).unwrap();
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);

        let text = serde_json::to_string(&tree_to_json(&tree).unwrap()).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":2,"mid":{"y":1,"x":2}}"#);
    }

    #[test]
    fn test_tree_from_json_rejects_integers_beyond_i64() {
        let err = tree_from_json(json!({"big": u64::MAX})).unwrap_err();
        assert!(matches!(err, ArborError::UnsupportedLeaf(_)));
        assert!(err.to_string().contains("18446744073709551615"));

        assert!(matches!(
            tree_from_json(json!({"list": [1, u64::MAX]})),
            Err(ArborError::UnsupportedLeaf(_))
        ));

        let tree = tree_from_json(json!({"max": i64::MAX, "min": i64::MIN, "f": 1e300})).unwrap();
        assert_eq!(tree["max"], TreeNode::Leaf(LeafValue::Int(i64::MAX)));
        assert_eq!(tree["min"], TreeNode::Leaf(LeafValue::Int(i64::MIN)));
        assert_eq!(tree["f"], TreeNode::Leaf(LeafValue::Float(1e300)));
    }

    #[test]
    fn test_tree_from_json_rejects_nested_arrays() {
        assert!(matches!(
            tree_from_json(json!({"m": [[1, 2], [3, 4]]})),
            Err(ArborError::UnsupportedLeaf(_))
        ));
        assert!(matches!(
            tree_from_json(json!([1, 2])),
            Err(ArborError::UnsupportedLeaf(_))
        ));
    }

    #[test]
    fn test_tree_to_json_rejects_bytes_and_arrays() {
        let mut tree = Tree::new();
        tree.insert("ok".into(), TreeNode::Leaf(LeafValue::List(vec![Scalar::Int(1)])));
        assert_eq!(tree_to_json(&tree).unwrap(), json!({"ok": [1]}));

        tree.insert("raw".into(), TreeNode::Leaf(LeafValue::Bytes(vec![0xFF])));
        assert!(matches!(tree_to_json(&tree), Err(ArborError::Json(_))));

        let mut tree = Tree::new();
        tree.insert(
            "arr".into(),
            TreeNode::Leaf(LeafValue::Array(Array::Int(vec![1]))),
        );
        assert!(matches!(tree_to_json(&tree), Err(ArborError::Json(_))));
    }
}
