//! Negative tests covering write and read failure paths

use arbor_format::{encode_hierarchy, ArborError, Data, Dataset, Group};
use arbor_io::{
    read_tree, tree, write_tree, Limits, ReadOptions, Tree, TreeNode, WriteError, WriteOptions,
    TreeWriter,
};
use std::fs;

fn write_raw_container(root: &Group) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raw.arb");
    let bytes = encode_hierarchy(root, &Limits::default()).expect("encode");
    fs::write(&path, bytes).expect("write");
    (dir, path)
}

#[test]
fn invalid_group_name_is_container_failure() {
    let tree = tree!({ "a/b": { "x": 1 } });
    let mut root = Group::new();
    let limits = Limits::default();
    let err = TreeWriter::new(&limits).write(&mut root, &tree).unwrap_err();
    assert!(matches!(err, WriteError::Container(ArborError::InvalidName(_))));
}

#[test]
fn invalid_dataset_name_is_leaf_failure() {
    for name in ["", ".", "x/y"] {
        let mut tree = Tree::new();
        tree.insert(name.to_string(), TreeNode::Leaf(1i64.into()));

        let mut root = Group::new();
        let limits = Limits::default();
        match TreeWriter::new(&limits).write(&mut root, &tree) {
            Err(WriteError::Leaf { key, source, .. }) => {
                assert_eq!(key, name);
                assert!(matches!(source, ArborError::InvalidName(_)));
            }
            other => panic!("expected leaf failure for {name:?}, got {other:?}"),
        }
    }
}

#[test]
fn container_failure_reports_tree_dump() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.arb");
    let tree = tree!({ "bad/name": {} });

    let outcome = write_tree(&tree, &path, &WriteOptions::default());
    assert!(!outcome.succeeded());
    assert!(outcome.diagnostics.iter().any(|l| l.contains("bad/name")));
    assert!(outcome
        .diagnostics
        .last()
        .unwrap()
        .starts_with("Failed to write container!"));
}

#[test]
fn unwritable_path_fails_without_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.arb");

    let outcome = write_tree(&tree!({ "x": 1 }), &path, &WriteOptions::default());
    assert!(!outcome.primary_ok);
    assert!(!outcome.fallback_attempted);
    assert!(!outcome.succeeded());
}

#[test]
fn unwritable_path_with_backup_is_still_true() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.arb");

    let opts = WriteOptions {
        use_json_backup: true,
        ..WriteOptions::default()
    };
    let outcome = write_tree(&tree!({ "x": 1 }), &path, &opts);
    assert_eq!(outcome.fallback_ok, Some(false));
    assert!(outcome.succeeded());
}

#[test]
fn invalid_utf8_scalar_fails_read_only_when_decoding() {
    let mut root = Group::new();
    root.create_dataset(
        "s",
        Dataset::scalar(Data::Bytes(vec![vec![0xFF, 0xFE]])).unwrap(),
    )
    .unwrap();
    let (_dir, path) = write_raw_container(&root);

    assert!(matches!(
        read_tree(&path, &ReadOptions::default()),
        Err(ArborError::Utf8(_))
    ));

    let raw = ReadOptions {
        decode_strings: false,
        ..ReadOptions::default()
    };
    assert!(read_tree(&path, &raw).is_ok());
}

#[test]
fn invalid_utf8_in_sequence_always_fails() {
    let mut root = Group::new();
    root.create_dataset(
        "v",
        Dataset::vector(Data::Bytes(vec![b"ok".to_vec(), vec![0xC3]])),
    )
    .unwrap();
    let (_dir, path) = write_raw_container(&root);

    let raw = ReadOptions {
        decode_strings: false,
        ..ReadOptions::default()
    };
    assert!(matches!(read_tree(&path, &raw), Err(ArborError::Utf8(_))));
}

#[test]
fn truncated_file_fails_read() {
    let mut root = Group::new();
    root.create_group("g").unwrap();
    let (_dir, path) = write_raw_container(&root);

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
    assert!(read_tree(&path, &ReadOptions::default()).is_err());
}

#[test]
fn wrong_magic_fails_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("magic.arb");
    fs::write(&path, b"HDF\x01\0\0\0\0\0").unwrap();
    assert!(matches!(
        read_tree(&path, &ReadOptions::default()),
        Err(ArborError::InvalidMagic)
    ));
}
