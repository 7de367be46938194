//! Property-based invariant tests for the connector geometry engine.
//!
//! 1. The closest pair lies on both boundaries and is optimal
//! 2. Pruned and exhaustive searches return the identical pair
//! 3. Recomputing the same arrow yields bit-identical geometry
//! 4. The major-rectangle flip is a pure 180° reversal
//! 5. Rectangles sharing a band get their anchor y on the facing-edge midpoint
//! 6. Rectangles overlapping on both axes fail without affecting others

use arrowdraw_core::{
    ArrowPipeline, ArrowSpec, ClosestPointSolver, GeometryError, Rect, SearchStrategy,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-50i32..50, -50i32..50, 1i32..30, 1i32..30).prop_map(|(x, y, w, h)| {
        Rect::from_origin_size(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    })
}

/// `(a, b)` with `a` strictly right of `b` and a horizontal gap.
fn right_of_strategy() -> impl Strategy<Value = (Rect, Rect)> {
    (rect_strategy(), 1i32..40, -60i32..60, 1i32..30, 1i32..30).prop_map(|(b, gap, y, w, h)| {
        let a = Rect::from_origin_size(
            b.right + f64::from(gap),
            f64::from(y),
            f64::from(w),
            f64::from(h),
        );
        (a, b)
    })
}

/// `(a, b)` sharing a horizontal band with disjoint x-ranges.
fn shared_band_strategy() -> impl Strategy<Value = (Rect, Rect)> {
    (rect_strategy(), 1i32..30, 0i32..40, any::<bool>(), 1i32..30)
        .prop_flat_map(|(b, h, gap, a_on_left, w)| {
            let b_top = b.top as i32;
            let b_bottom = b.bottom as i32;
            ((b_top - h + 1)..b_bottom).prop_map(move |top| {
                let left = if a_on_left {
                    b.left - f64::from(gap) - f64::from(w)
                } else {
                    b.right + f64::from(gap)
                };
                let a = Rect::from_origin_size(left, f64::from(top), f64::from(w), f64::from(h));
                (a, b)
            })
        })
}

/// `(a, b)` overlapping on both axes: `b`'s top-left corner lies inside `a`.
fn overlapping_strategy() -> impl Strategy<Value = (Rect, Rect)> {
    (rect_strategy(), 1i32..30, 1i32..30).prop_flat_map(|(a, w, h)| {
        let aw = a.width() as i32;
        let ah = a.height() as i32;
        (0..aw, 0..ah).prop_map(move |(dx, dy)| {
            let b = Rect::from_origin_size(
                a.left + f64::from(dx),
                a.top + f64::from(dy),
                f64::from(w),
                f64::from(h),
            );
            (a, b)
        })
    })
}

fn gap(a0: f64, a1: f64, b0: f64, b1: f64) -> i64 {
    (b0 - a1).max(a0 - b1).max(0.0) as i64
}

fn normalize_deg(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. Closest-point search
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn closest_pair_is_on_boundaries_and_optimal(a in rect_strategy(), b in rect_strategy()) {
        prop_assume!(!a.overlaps(&b));
        let pair = ClosestPointSolver::default().solve(&a, &b);

        prop_assert!(a.to_pixels().on_boundary(pair.from));
        prop_assert!(b.to_pixels().on_boundary(pair.to));

        let gx = gap(a.left, a.right, b.left, b.right);
        let gy = gap(a.top, a.bottom, b.top, b.bottom);
        prop_assert_eq!(pair.distance_sq, gx * gx + gy * gy);
    }

    #[test]
    fn pruned_search_matches_exhaustive(a in rect_strategy(), b in rect_strategy()) {
        let full = ClosestPointSolver::new(SearchStrategy::Exhaustive).solve(&a, &b);
        let fast = ClosestPointSolver::new(SearchStrategy::Pruned).solve(&a, &b);
        prop_assert_eq!(full.from, fast.from);
        prop_assert_eq!(full.to, fast.to);
        prop_assert_eq!(full.distance_sq, fast.distance_sq);
        prop_assert!(fast.pairs_scanned <= full.pairs_scanned);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn recomputation_is_bit_identical(a in rect_strategy(), b in rect_strategy()) {
        let spec = ArrowSpec::new("arrow", "a", "b");
        let pipeline = ArrowPipeline::default();
        let first = pipeline.compute(&spec, &a, &b);
        let second = pipeline.compute(&spec, &a, &b);
        match (first, second) {
            (Ok(x), Ok(y)) => {
                prop_assert_eq!(x.length_px.to_bits(), y.length_px.to_bits());
                prop_assert_eq!(x.angle_deg.to_bits(), y.angle_deg.to_bits());
                prop_assert_eq!(x.origin_x.to_bits(), y.origin_x.to_bits());
                prop_assert_eq!(x.origin_y.to_bits(), y.origin_y.to_bits());
                prop_assert_eq!(x, y);
            }
            (Err(x), Err(y)) => prop_assert_eq!(x, y),
            (x, y) => prop_assert!(false, "outcomes diverged: {:?} vs {:?}", x, y),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Flip rule
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flip_is_a_pure_reversal((a, b) in right_of_strategy()) {
        let pipeline = ArrowPipeline::default();
        let forward = pipeline.compute(&ArrowSpec::new("ab", "a", "b"), &a, &b).unwrap();
        let backward = pipeline.compute(&ArrowSpec::new("ba", "b", "a"), &b, &a).unwrap();
        prop_assert!(!forward.degenerate && !backward.degenerate);

        let diff = normalize_deg(forward.angle_deg - backward.angle_deg - 180.0);
        prop_assert!(
            diff < 1e-9 || (360.0 - diff) < 1e-9,
            "forward={} backward={}", forward.angle_deg, backward.angle_deg
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Axis alignment
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shared_band_anchors_on_facing_edge_midpoint((a, b) in shared_band_strategy()) {
        prop_assert!(a.overlaps_vertically(&b));
        prop_assert!(!a.overlaps_horizontally(&b));

        let geometry = ArrowPipeline::default()
            .compute(&ArrowSpec::new("ab", "a", "b"), &a, &b)
            .unwrap();
        let expected = (a.top.max(b.top) + a.bottom.min(b.bottom)) / 2.0;
        prop_assert_eq!(geometry.origin_y, expected);
        prop_assert_eq!(geometry.anchor_override.and_then(|o| o.y), Some(expected));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Overlap
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlap_fails_without_blocking_other_arrows(
        (a, b) in overlapping_strategy(),
        (c, d) in right_of_strategy(),
    ) {
        prop_assert!(a.overlaps(&b));
        let pipeline = ArrowPipeline::default();
        let arrows = [
            (ArrowSpec::new("bad", "a", "b"), a, b),
            (ArrowSpec::new("good", "c", "d"), c, d),
        ];
        let outcomes: Vec<_> = arrows
            .iter()
            .map(|(spec, from, to)| pipeline.compute(spec, from, to))
            .collect();

        prop_assert_eq!(
            outcomes[0].clone(),
            Err(GeometryError::Overlap { from: "a".into(), to: "b".into() })
        );
        prop_assert!(outcomes[1].is_ok());
    }
}
