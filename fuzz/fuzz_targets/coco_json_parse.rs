//! Fuzz target for COCO JSON parsing, indexing and balancing.
//!
//! Any store that parses must also index and balance without panicking,
//! whatever ids, references and boxes it contains.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_json_parse

#![no_main]

use cocoprep::balance::balance_with_rng;
use cocoprep::coco::from_coco_slice;
use cocoprep::index::CocoDetection;
use libfuzzer_sys::fuzz_target;
use rand::{rngs::StdRng, SeedableRng};

fuzz_target!(|data: &[u8]| {
    // 10MB is generous for JSON annotation files.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(dataset) = from_coco_slice(data) else {
        return;
    };

    let mut rng = StdRng::seed_from_u64(0);
    let _ = balance_with_rng(&dataset, 3, &mut rng);

    let index = CocoDetection::from_dataset(".", dataset);
    for i in 0..index.len() {
        let _ = index.target(i);
    }
});
