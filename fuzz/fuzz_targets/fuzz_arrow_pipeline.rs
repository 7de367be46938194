#![no_main]

use arbitrary::Arbitrary;
use arrowdraw_core::{AngleMode, ArrowPipeline, ArrowSpec, Rect, ResolverConfig, SearchStrategy};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    a: [f32; 4],
    b: [f32; 4],
    inset: u8,
    four_quadrant: bool,
}

fn rect(edges: [f32; 4]) -> Rect {
    // Bounded magnitudes; non-finite values pass through untouched.
    let [l, t, r, b] = edges.map(|v| {
        let v = f64::from(v);
        if v.is_finite() { v % 300.0 } else { v }
    });
    Rect::new(l, t, r, b)
}

fuzz_target!(|input: Input| {
    let from = rect(input.a);
    let to = rect(input.b);
    let resolver = ResolverConfig {
        inset_px: f64::from(input.inset),
        angle_mode: if input.four_quadrant {
            AngleMode::FourQuadrant
        } else {
            AngleMode::SingleQuadrant
        },
    };
    let pipeline = ArrowPipeline::new(SearchStrategy::Pruned, resolver, "black");
    let spec = ArrowSpec::new("fuzz", "a", "b");

    // Overlap is the only error and must agree with the rectangles.
    match pipeline.compute(&spec, &from, &to) {
        Ok(geometry) => {
            assert!(geometry.length_px >= 0.0);
            assert!(geometry.length_px.is_finite());
            assert!(geometry.angle_deg.is_finite());
            assert!(geometry.origin_x.is_finite() && geometry.origin_y.is_finite());
        }
        Err(_) => assert!(from.overlaps(&to)),
    }
});
