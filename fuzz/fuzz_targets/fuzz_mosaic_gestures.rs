#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mosaic_layout::{
    Corner, DropPosition, MosaicBranch, MosaicDirection, MosaicEngine, MosaicNode, MosaicPath,
    leaves, solve_layout,
};

#[derive(Debug, Arbitrary)]
enum Gesture {
    Insert(u8),
    Split { path: Vec<bool>, column: bool },
    Drag { source: Vec<bool>, destination: Vec<bool>, position: u8 },
    Resize { path: Vec<bool>, split_percentage: f64 },
    Remove(Vec<bool>),
    Expand { path: Vec<bool>, percentage: f64 },
    Hide(Vec<bool>),
    AutoArrange,
}

fn path(bits: &[bool]) -> MosaicPath {
    bits.iter()
        .take(16)
        .map(|&second| if second { MosaicBranch::Second } else { MosaicBranch::First })
        .collect()
}

fn corner(byte: u8) -> Corner {
    match byte % 4 {
        0 => Corner::TopLeft,
        1 => Corner::TopRight,
        2 => Corner::BottomLeft,
        _ => Corner::BottomRight,
    }
}

fn position(byte: u8) -> DropPosition {
    match byte % 5 {
        0 => DropPosition::Left,
        1 => DropPosition::Right,
        2 => DropPosition::Top,
        3 => DropPosition::Bottom,
        _ => DropPosition::Swap,
    }
}

fuzz_target!(|gestures: Vec<Gesture>| {
    let engine = MosaicEngine::default();
    let mut tree: Option<MosaicNode<u32>> = None;
    let mut next_id = 0_u32;

    for gesture in gestures.into_iter().take(256) {
        let before = leaves(tree.as_ref()).len();
        let may_shrink = matches!(gesture, Gesture::Remove(_));
        let mut mint = || {
            next_id += 1;
            next_id
        };

        let Some(current) = tree.as_ref() else {
            tree = engine.insert_at_corner(None, Corner::TopLeft, &mut mint).ok();
            continue;
        };

        // Every gesture either applies or is rejected; rejections leave the tree as it was.
        let outcome = match gesture {
            Gesture::Insert(byte) => engine
                .insert_at_corner(Some(current), corner(byte), &mut mint)
                .map(Some),
            Gesture::Split { path: bits, column } => {
                let direction = if column { MosaicDirection::Column } else { MosaicDirection::Row };
                engine.split(current, &path(&bits), direction, mint()).map(Some)
            }
            Gesture::Drag { source, destination, position: byte } => engine
                .drag(current, &path(&source), &path(&destination), position(byte))
                .map(Some),
            Gesture::Resize { path: bits, split_percentage } => {
                engine.resize(current, &path(&bits), split_percentage).map(Some)
            }
            Gesture::Remove(bits) => engine.remove(current, &path(&bits)),
            Gesture::Expand { path: bits, percentage } => {
                engine.expand(current, &path(&bits), percentage).map(Some)
            }
            Gesture::Hide(bits) => engine.hide(current, &path(&bits)).map(Some),
            Gesture::AutoArrange => Ok(engine.auto_arrange(Some(current))),
        };

        if let Ok(next) = outcome {
            tree = next;
        }

        let after = leaves(tree.as_ref()).len();
        if !may_shrink {
            assert!(after >= before, "only removal may drop panes");
        }
        if let Some(current) = tree.as_ref() {
            assert!(current.validate().is_ok(), "gesture broke tree invariants");
            let layout = solve_layout(Some(current));
            assert_eq!(layout.tiles().len(), current.leaf_count());
        }
    }
});
