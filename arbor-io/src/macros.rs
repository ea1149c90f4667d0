/// Build a [`Tree`](crate::Tree) from a JSON-like literal.
///
/// Objects become groups, bracketed lists become list-form leaves and every
/// other value goes through `LeafValue::from`. Negative numbers must be
/// parenthesized, e.g. `"x": (-1)`.
///
/// ```
/// use arbor_io::{tree, LeafValue, TreeNode};
///
/// let t = tree!({
///     "a": { "b": [1, 2, 3] },
///     "c": "hello",
///     "missing": null
/// });
/// assert_eq!(t["c"], TreeNode::Leaf(LeafValue::Text("hello".into())));
/// ```
#[macro_export]
macro_rules! tree {
    ({}) => {
        $crate::Tree::new()
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut tree = $crate::Tree::new();
        $(
            tree.insert($key.to_string(), $crate::tree_node!($value));
        )*
        tree
    }};
}

/// Build a single [`TreeNode`](crate::TreeNode); see [`tree!`].
#[macro_export]
macro_rules! tree_node {
    (null) => {
        $crate::TreeNode::Leaf($crate::LeafValue::Null)
    };

    ({ $($body:tt)* }) => {
        $crate::TreeNode::Group($crate::tree!({ $($body)* }))
    };

    ([ $($elem:expr),* $(,)? ]) => {
        $crate::TreeNode::Leaf($crate::LeafValue::List(vec![$($crate::Scalar::from($elem)),*]))
    };

    ($value:expr) => {
        $crate::TreeNode::Leaf($crate::LeafValue::from($value))
    };
}

#[cfg(test)]
mod tests {
    use crate::{Array, LeafValue, Scalar, Tree, TreeNode};

    #[test]
    fn test_tree_macro_leaves() {
        let t = tree!({
            "i": 42,
            "f": 3.5,
            "neg": (-7),
            "b": true,
            "s": "hello",
            "n": null
        });

        assert_eq!(t["i"], TreeNode::Leaf(LeafValue::Int(42)));
        assert_eq!(t["f"], TreeNode::Leaf(LeafValue::Float(3.5)));
        assert_eq!(t["neg"], TreeNode::Leaf(LeafValue::Int(-7)));
        assert_eq!(t["b"], TreeNode::Leaf(LeafValue::Bool(true)));
        assert_eq!(t["s"], TreeNode::Leaf(LeafValue::Text("hello".into())));
        assert_eq!(t["n"], TreeNode::Leaf(LeafValue::Null));
    }

    #[test]
    fn test_tree_macro_nesting_and_lists() {
        let t = tree!({
            "a": { "b": [1, 2, 3] },
            "empty": {},
            "mixed": [1, "x", Scalar::Null],
            "none": []
        });

        assert_eq!(t.keys().collect::<Vec<_>>(), vec!["a", "empty", "mixed", "none"]);
        match &t["a"] {
            TreeNode::Group(a) => assert_eq!(
                a["b"],
                TreeNode::Leaf(LeafValue::List(vec![
                    Scalar::Int(1),
                    Scalar::Int(2),
                    Scalar::Int(3)
                ]))
            ),
            other => panic!("expected group, got {other:?}"),
        }
        assert_eq!(t["empty"], TreeNode::Group(Tree::new()));
        assert_eq!(
            t["mixed"],
            TreeNode::Leaf(LeafValue::List(vec![
                Scalar::Int(1),
                Scalar::Text("x".into()),
                Scalar::Null
            ]))
        );
        assert_eq!(t["none"], TreeNode::Leaf(LeafValue::List(Vec::new())));
    }

    #[test]
    fn test_tree_macro_accepts_expressions() {
        let raw = vec![0xFFu8];
        let t = tree!({
            "raw": raw,
            "arr": (Array::Float(vec![0.5]))
        });
        assert_eq!(t["raw"], TreeNode::Leaf(LeafValue::Bytes(vec![0xFF])));
        assert_eq!(
            t["arr"],
            TreeNode::Leaf(LeafValue::Array(Array::Float(vec![0.5])))
        );
        assert!(tree!({}).is_empty());
    }
}
