//! Benchmarks for tree navigation, patching, and restructuring gestures.
//!
//! Run with: cargo bench -p mosaic-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mosaic_layout::{
    Corner, DropPosition, MosaicEngine, MosaicNode, MosaicPath, balanced_tree, leaf_paths, leaves,
    path_to_corner, solve_layout,
};
use std::hint::black_box;

fn build_tree(leaf_count: u32) -> MosaicNode<u32> {
    balanced_tree(0..leaf_count).expect("bench tree has leaves")
}

fn first_and_last_leaf(tree: &MosaicNode<u32>) -> (MosaicPath, MosaicPath) {
    let paths = leaf_paths(Some(tree));
    let first = paths.first().expect("bench tree has leaves").0.clone();
    let last = paths.last().expect("bench tree has leaves").0.clone();
    (first, last)
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mosaic/navigation");

    for n in [8_u32, 64, 512] {
        let tree = build_tree(n);
        group.bench_with_input(BenchmarkId::new("leaves", n), &tree, |b, tree| {
            b.iter(|| black_box(leaves(Some(tree))))
        });
        group.bench_with_input(BenchmarkId::new("path_to_corner", n), &tree, |b, tree| {
            b.iter(|| black_box(path_to_corner(tree, Corner::BottomRight)))
        });
        group.bench_with_input(BenchmarkId::new("solve_layout", n), &tree, |b, tree| {
            b.iter(|| black_box(solve_layout(Some(tree)).tiles().len()))
        });
    }

    group.finish();
}

fn bench_balanced(c: &mut Criterion) {
    let mut group = c.benchmark_group("mosaic/balanced_tree");

    for n in [8_u32, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(balanced_tree(0..n)))
        });
    }

    group.finish();
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("mosaic/gestures");
    let engine = MosaicEngine::default();

    for n in [8_u32, 64, 512] {
        let tree = build_tree(n);
        let (first, last) = first_and_last_leaf(&tree);

        group.bench_with_input(BenchmarkId::new("insert_at_corner", n), &tree, |b, tree| {
            b.iter(|| {
                black_box(
                    engine
                        .insert_at_corner(Some(tree), Corner::TopRight, || u32::MAX)
                        .expect("insert should succeed"),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("drag", n), &tree, |b, tree| {
            b.iter(|| {
                black_box(
                    engine
                        .drag(tree, &first, &last, DropPosition::Right)
                        .expect("drag should succeed"),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("resize", n), &tree, |b, tree| {
            b.iter(|| {
                black_box(
                    engine
                        .resize(tree, &MosaicPath::root(), 33.0)
                        .expect("resize should succeed"),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("remove", n), &tree, |b, tree| {
            b.iter(|| {
                black_box(
                    engine
                        .remove(tree, &last)
                        .expect("remove should succeed"),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("auto_arrange", n), &tree, |b, tree| {
            b.iter(|| black_box(engine.auto_arrange(Some(tree))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_navigation, bench_balanced, bench_gestures);

criterion_main!(benches);
