#![no_main]

use libfuzzer_sys::fuzz_target;
use mosaic_layout::{MosaicNode, leaves};

fuzz_target!(|data: &[u8]| {
    let Ok(tree) = serde_json::from_slice::<MosaicNode<String>>(data) else {
        return;
    };

    // Whatever deserializes must serialize back to the same shape.
    let json = serde_json::to_vec(&tree).expect("deserialized tree serializes");
    let back: MosaicNode<String> =
        serde_json::from_slice(&json).expect("serialized tree deserializes");
    assert_eq!(leaves(Some(&back)), leaves(Some(&tree)));
    assert_eq!(back.height(), tree.height());
});
