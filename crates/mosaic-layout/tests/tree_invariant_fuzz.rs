//! Property/fuzz-style invariants for mosaic restructuring gestures.
//!
//! Random gesture streams run against the public engine API. After every step
//! the tree must stay structurally valid, keep exactly the expected leaves, and
//! solve to a layout that partitions the container.

use mosaic_layout::{
    Corner, DropPosition, InvalidGesture, MosaicConfig, MosaicDirection, MosaicEngine,
    MosaicError, MosaicNode, MosaicPath, balanced_tree, leaves, node_at_path, solve_layout,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn next_f64_range(&mut self, min: f64, max: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
        min + unit * (max - min)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    fn choose_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 0
    }
}

#[derive(Debug, Clone)]
enum Gesture {
    Insert(Corner),
    Split {
        path: MosaicPath,
        direction: MosaicDirection,
    },
    Drag {
        source: MosaicPath,
        destination: MosaicPath,
        position: DropPosition,
    },
    Resize {
        path: MosaicPath,
        split_percentage: f64,
    },
    Remove(MosaicPath),
    Expand {
        path: MosaicPath,
        percentage: f64,
    },
    Hide(MosaicPath),
    AutoArrange,
}

const CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];

const POSITIONS: [DropPosition; 5] = [
    DropPosition::Left,
    DropPosition::Right,
    DropPosition::Top,
    DropPosition::Bottom,
    DropPosition::Swap,
];

fn node_paths(tree: &MosaicNode<u32>) -> Vec<MosaicPath> {
    tree.walk().map(|(path, _)| path).collect()
}

fn parent_paths(tree: &MosaicNode<u32>) -> Vec<MosaicPath> {
    tree.walk()
        .filter(|(_, node)| node.is_parent())
        .map(|(path, _)| path)
        .collect()
}

fn random_direction(rng: &mut Lcg) -> MosaicDirection {
    if rng.choose_bool() {
        MosaicDirection::Row
    } else {
        MosaicDirection::Column
    }
}

fn random_gesture(tree: &MosaicNode<u32>, rng: &mut Lcg) -> Gesture {
    let nodes = node_paths(tree);
    let parents = parent_paths(tree);

    let mut candidates = vec![0usize, 1, 7]; // Insert, Split, AutoArrange
    if nodes.len() > 1 {
        candidates.extend([2, 4, 5, 6]); // Drag, Remove, Expand, Hide
    }
    if !parents.is_empty() {
        candidates.push(3); // Resize
    }

    let non_root = &nodes[1..];
    match candidates[rng.choose_index(candidates.len())] {
        0 => Gesture::Insert(CORNERS[rng.choose_index(CORNERS.len())]),
        1 => Gesture::Split {
            path: nodes[rng.choose_index(nodes.len())].clone(),
            direction: random_direction(rng),
        },
        2 => Gesture::Drag {
            source: non_root[rng.choose_index(non_root.len())].clone(),
            destination: nodes[rng.choose_index(nodes.len())].clone(),
            position: POSITIONS[rng.choose_index(POSITIONS.len())],
        },
        3 => Gesture::Resize {
            path: parents[rng.choose_index(parents.len())].clone(),
            split_percentage: rng.next_f64_range(-20.0, 120.0),
        },
        4 => Gesture::Remove(non_root[rng.choose_index(non_root.len())].clone()),
        5 => Gesture::Expand {
            path: non_root[rng.choose_index(non_root.len())].clone(),
            percentage: rng.next_f64_range(0.0, 100.0),
        },
        6 => Gesture::Hide(non_root[rng.choose_index(non_root.len())].clone()),
        _ => Gesture::AutoArrange,
    }
}

fn sorted(mut ids: Vec<u32>) -> Vec<u32> {
    ids.sort_unstable();
    ids
}

/// Apply one gesture and check the leaf bookkeeping it promises.
fn apply_gesture(
    engine: &MosaicEngine,
    tree: &MosaicNode<u32>,
    gesture: &Gesture,
    next_id: &mut u32,
) -> MosaicNode<u32> {
    let before = sorted(leaves(Some(tree)));
    let mut mint = || {
        *next_id += 1;
        *next_id
    };

    let (after, expected) = match gesture {
        Gesture::Insert(corner) => {
            let next = engine
                .insert_at_corner(Some(tree), *corner, &mut mint)
                .expect("insert at corner always applies to a present tree");
            let mut expected = before.clone();
            expected.push(*next_id);
            (next, sorted(expected))
        }
        Gesture::Split { path, direction } => {
            let next = engine
                .split(tree, path, *direction, mint())
                .expect("split path comes from the tree");
            let mut expected = before.clone();
            expected.push(*next_id);
            (next, sorted(expected))
        }
        Gesture::Drag {
            source,
            destination,
            position,
        } => match engine.drag(tree, source, destination, *position) {
            Ok(next) => (next, before.clone()),
            Err(err) => {
                let related = source == destination
                    || source.is_ancestor_of(destination)
                    || destination.is_ancestor_of(source);
                assert!(related, "unrelated drag rejected: {err}");
                assert!(matches!(err, MosaicError::InvalidGesture(_)));
                (tree.clone(), before.clone())
            }
        },
        Gesture::Resize {
            path,
            split_percentage,
        } => {
            let next = engine
                .resize(tree, path, *split_percentage)
                .expect("resize targets a parent");
            (next, before.clone())
        }
        Gesture::Remove(path) => {
            let removed = sorted(leaves(
                node_at_path(Some(tree), path).ok(),
            ));
            let next = engine
                .remove(tree, path)
                .expect("remove path comes from the tree")
                .expect("non-root removal keeps a tree");
            let expected = before
                .iter()
                .copied()
                .filter(|id| !removed.contains(id))
                .collect::<Vec<_>>();
            (next, expected)
        }
        Gesture::Expand { path, percentage } => {
            let next = engine
                .expand(tree, path, *percentage)
                .expect("expand path comes from the tree");
            (next, before.clone())
        }
        Gesture::Hide(path) => {
            let next = engine
                .hide(tree, path)
                .expect("hide targets a non-root node");
            (next, before.clone())
        }
        Gesture::AutoArrange => {
            let next = engine
                .auto_arrange(Some(tree))
                .expect("present tree stays present");
            (next, before.clone())
        }
    };

    assert_eq!(
        sorted(leaves(Some(&after))),
        expected,
        "leaf set drifted after {gesture:?}"
    );
    after
}

fn assert_tree_invariants(tree: &MosaicNode<u32>) {
    tree.validate().expect("tree should remain structurally valid");
    let split_in_range = |(_, node): &(MosaicPath, &MosaicNode<u32>)| {
        node.as_parent()
            .and_then(|parent| parent.split_percentage)
            .is_none_or(|split| (0.0..=100.0).contains(&split))
    };
    assert!(tree.walk().all(|entry| split_in_range(&entry)));
}

fn assert_layout_partitions(tree: &MosaicNode<u32>) {
    let layout = solve_layout(Some(tree));
    assert_eq!(layout.tiles().len(), tree.leaf_count());
    assert_eq!(
        layout.tiles().len(),
        tree.walk().filter(|(_, node)| node.is_leaf()).count()
    );
    assert_eq!(layout.splits().len() + 1, layout.tiles().len());
    let total: f64 = layout.tiles().iter().map(|tile| tile.bounds.area()).sum();
    assert!((total - 100.0).abs() < 1e-6, "tile areas sum to {total}");
}

fn run_sequence(seed: u64, steps: usize) -> (MosaicNode<u32>, Vec<Gesture>) {
    let engine = MosaicEngine::default();
    let mut tree = MosaicNode::Leaf(0);
    let mut next_id = 0;
    let mut rng = Lcg::new(seed);
    let mut applied = Vec::with_capacity(steps);

    for _ in 0..steps {
        let gesture = random_gesture(&tree, &mut rng);
        tree = apply_gesture(&engine, &tree, &gesture, &mut next_id);
        assert_tree_invariants(&tree);
        assert_layout_partitions(&tree);
        applied.push(gesture);
    }

    (tree, applied)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_gesture_sequences_preserve_invariants(
        seed in any::<u64>(),
        steps in 20usize..120,
    ) {
        let (tree, _) = run_sequence(seed, steps);
        assert_tree_invariants(&tree);
    }

    #[test]
    fn random_gesture_sequences_replay_deterministically(
        seed in any::<u64>(),
        steps in 20usize..80,
    ) {
        let (final_tree, gestures) = run_sequence(seed, steps);

        let engine = MosaicEngine::default();
        let mut replay = MosaicNode::Leaf(0);
        let mut next_id = 0;
        for gesture in &gestures {
            replay = apply_gesture(&engine, &replay, gesture, &mut next_id);
        }
        prop_assert_eq!(replay, final_tree);
    }

    #[test]
    fn balanced_tree_preserves_order_and_height(count in 1usize..200) {
        let ids: Vec<u32> = (0..count as u32).collect();
        let tree = balanced_tree(ids.clone()).expect("non-empty input builds a tree");
        prop_assert_eq!(leaves(Some(&tree)), ids);
        prop_assert_eq!(tree.height(), count.next_power_of_two().trailing_zeros() as usize);
    }

    #[test]
    fn resize_always_lands_within_bounds(
        minimum in 0.0f64..50.0,
        requested in -1_000.0f64..1_000.0,
    ) {
        let engine = MosaicEngine::new(MosaicConfig::with_minimum_pane_size(minimum))
            .expect("symmetric bounds are valid");
        let tree = balanced_tree([1_u32, 2, 3]).expect("three leaves build a tree");
        let resized = engine
            .resize(&tree, &MosaicPath::root(), requested)
            .expect("root is a parent");
        let stored = resized
            .as_parent()
            .and_then(|root| root.split_percentage)
            .expect("resize stores an explicit split");
        prop_assert!(stored >= minimum && stored <= 100.0 - minimum, "stored={stored}");
    }

    #[test]
    fn drops_onto_ancestors_are_always_rejected(seed in any::<u64>()) {
        let (tree, _) = run_sequence(seed, 40);
        let engine = MosaicEngine::default();
        for (source, _) in tree.walk().filter(|(path, _)| !path.is_root()) {
            let mut ancestor = source.parent();
            while let Some(destination) = ancestor {
                let err = engine
                    .drag(&tree, &source, &destination, DropPosition::Right)
                    .expect_err("ancestor drop must be rejected");
                prop_assert!(
                    matches!(
                        err,
                        MosaicError::InvalidGesture(InvalidGesture::DropOntoAncestor { .. })
                    ),
                    "unexpected error {err}"
                );
                ancestor = destination.parent();
            }
        }
    }

    #[test]
    fn every_subtree_covers_a_contiguous_run_of_leaves(seed in any::<u64>(), steps in 20usize..80) {
        let (tree, _) = run_sequence(seed, steps);
        let all = leaves(Some(&tree));
        for (path, _) in tree.walk() {
            let node = node_at_path(Some(&tree), &path);
            prop_assert!(node.is_ok(), "path {path} does not resolve");
            let run = leaves(node.ok());
            prop_assert!(!run.is_empty());
            prop_assert!(
                all.windows(run.len()).any(|window| window == run.as_slice()),
                "leaves under {path} are not contiguous in reading order"
            );
        }
    }
}

#[test]
fn gesture_seed_corpus_preserves_invariants() {
    let seeds = [
        0_u64,
        1,
        2,
        3,
        5,
        8,
        13,
        21,
        34,
        55,
        89,
        144,
        u32::MAX as u64,
        (u32::MAX as u64) + 1,
        u64::MAX - 1,
        u64::MAX,
    ];

    for seed in seeds {
        let (tree, _) = run_sequence(seed, 180);
        tree.validate().expect("seed corpus tree is valid");
    }
}

#[test]
fn removing_then_reinserting_restores_leaf_count() {
    let engine = MosaicEngine::default();
    for seed in [7_u64, 42, 1_000] {
        let (tree, _) = run_sequence(seed, 60);
        for (path, _) in mosaic_layout::leaf_paths(Some(&tree)) {
            if path.is_root() {
                continue;
            }
            let pruned = engine
                .remove(&tree, &path)
                .expect("leaf path comes from the tree")
                .expect("non-root removal keeps a tree");
            let restored = engine
                .insert_at_corner(Some(&pruned), Corner::BottomRight, || u32::MAX)
                .expect("insert applies");
            assert_eq!(restored.leaf_count(), tree.leaf_count());
        }
    }
}
