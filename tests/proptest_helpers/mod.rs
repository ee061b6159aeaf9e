#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use texoverlay::ir::{BBox, Coord, DrawingSpace};

pub const EPS_ANGLE: f64 = 1e-4;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Distance between two angles on the circle, in degrees.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

pub fn arb_coord() -> impl Strategy<Value = Coord<DrawingSpace>> {
    (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Coord::new(x, y))
}

/// An ordered, finite box in drawing space.
pub fn arb_bbox() -> impl Strategy<Value = BBox<DrawingSpace>> {
    (arb_coord(), 0.0f64..1000.0, 0.0f64..1000.0).prop_map(|(corner, w, h)| {
        BBox::from_ltrb(corner.x, corner.y + h, corner.x + w, corner.y)
    })
}

pub fn arb_anchors(max: usize) -> impl Strategy<Value = Vec<Coord<DrawingSpace>>> {
    prop::collection::vec(arb_coord(), 0..=max)
}
