#![no_main]

use arbitrary::Arbitrary;
use arrowdraw_core::{ClosestPointSolver, Rect, SearchStrategy};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    a: [i16; 4],
    b: [i16; 4],
    fractional: u8,
}

// Keep perimeters short enough for the exhaustive scan.
fn rect(edges: [i16; 4], fractional: u8) -> Rect {
    let [l, t, r, b] = edges.map(|v| f64::from(v % 256));
    let nudge = f64::from(fractional) / 256.0;
    Rect::new(l + nudge, t, r, b - nudge)
}

fuzz_target!(|input: Input| {
    let a = rect(input.a, input.fractional);
    let b = rect(input.b, input.fractional);

    let exhaustive = ClosestPointSolver::new(SearchStrategy::Exhaustive).solve(&a, &b);
    let pruned = ClosestPointSolver::new(SearchStrategy::Pruned).solve(&a, &b);

    // Same pair, same tie-break, never more work.
    assert_eq!(exhaustive.from, pruned.from);
    assert_eq!(exhaustive.to, pruned.to);
    assert_eq!(exhaustive.distance_sq, pruned.distance_sq);
    assert!(pruned.pairs_scanned <= exhaustive.pairs_scanned);

    // Swapping the arguments keeps the distance.
    let flipped = ClosestPointSolver::new(SearchStrategy::Pruned).solve(&b, &a);
    assert_eq!(flipped.distance_sq, pruned.distance_sq);
});
