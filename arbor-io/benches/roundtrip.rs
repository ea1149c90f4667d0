use arbor_io::{read_tree, write_tree, LeafValue, ReadOptions, Scalar, Tree, TreeNode, WriteOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn generate_tree(groups: usize) -> Tree {
    let users = ["alice", "bob", "carol", "dave", "eve"];
    let mut tree = Tree::new();

    for i in 0..groups {
        let mut run = Tree::new();
        run.insert("id".into(), TreeNode::Leaf(LeafValue::Int(i as i64)));
        run.insert(
            "user".into(),
            TreeNode::Leaf(LeafValue::Text(users[i % users.len()].to_string())),
        );
        run.insert(
            "samples".into(),
            TreeNode::Leaf(LeafValue::List(
                (0..256).map(|j| Scalar::Float((i * j) as f64 * 0.5)).collect(),
            )),
        );
        run.insert(
            "tags".into(),
            TreeNode::Leaf(LeafValue::List(vec!["raw".into(), "calibrated".into()])),
        );
        tree.insert(format!("run_{i}"), TreeNode::Group(run));
    }

    tree
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_tree");
    let dir = tempfile::tempdir().unwrap();

    for &size in &[10usize, 100, 1_000] {
        let tree = generate_tree(size);
        let path = dir.path().join(format!("bench_{size}.arb"));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| {
                let outcome = write_tree(black_box(tree), &path, &WriteOptions::default());
                assert!(outcome.primary_ok);
            })
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_tree");
    let dir = tempfile::tempdir().unwrap();

    for &size in &[10usize, 100, 1_000] {
        let path = dir.path().join(format!("bench_{size}.arb"));
        assert!(write_tree(&generate_tree(size), &path, &WriteOptions::default()).primary_ok);

        for (label, to_lists) in [("lists", true), ("arrays", false)] {
            let opts = ReadOptions {
                to_lists,
                ..ReadOptions::default()
            };
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(label, size), &path, |b, path| {
                b.iter(|| black_box(read_tree(path, &opts).unwrap()))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
