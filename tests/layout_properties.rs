//! Property-based invariant tests for topping layouts and fractions.
//!
//! 1. Filled regions and decorations track the numerator for every shape.
//! 2. Radial dividers: one per slice, running from the hole to the surface rim.
//! 3. Placement radius stays in bounds and never shrinks as slices get thinner.
//! 4. Grid cells tile the lookup dimensions in row-major order.
//! 5. Every decoration lies inside the shape's box.
//! 6. Layouts are deterministic and scale proportionally.
//! 7. Coercion of arbitrary inputs always yields a drawable fraction.
//! 8. Generated fractions respect each shape's denominator domain.

use fraction_foods::layout::radial::{RadiusBounds, placement_radius};
use fraction_foods::layout::scatter::scatter;
use fraction_foods::layout::{Background, Region};
use fraction_foods::{FractionSpec, PlacementFamily, Shape, compute_layout, generate_fraction};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

// ── Helpers ─────────────────────────────────────────────────────────────

fn any_shape() -> impl Strategy<Value = Shape> {
    proptest::sample::select(Shape::ALL.to_vec())
}

/// A fraction from the shape's own domain
fn shape_and_fraction() -> impl Strategy<Value = (Shape, FractionSpec)> {
    (any_shape(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = Pcg32::seed_from_u64(seed);
        (shape, generate_fraction(shape.denominator_domain(), &mut rng))
    })
}

fn layout_of(shape: Shape, fraction: FractionSpec, scale: f32) -> fraction_foods::LayoutResult {
    compute_layout(shape, fraction, 180.0, scale, &shape.default_colors())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Counts follow the numerator
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counts_follow_numerator((shape, fraction) in shape_and_fraction()) {
        let layout = layout_of(shape, fraction, 1.0);
        let filled = fraction.numerator as usize;
        prop_assert_eq!(layout.filled_regions.len(), filled);
        prop_assert_eq!(
            layout.decorations.len(),
            filled * shape.decorations_per_unit() as usize
        );
    }

    #[test]
    fn counts_clamp_for_out_of_range_numerators(
        shape in any_shape(),
        numerator in 0u32..40,
        denominator in 0u32..16,
    ) {
        let layout = layout_of(shape, FractionSpec::new(numerator, denominator), 1.0);
        let total = denominator.max(1);
        let filled = numerator.min(total) as usize;
        prop_assert_eq!(layout.fraction.denominator, total);
        prop_assert_eq!(layout.filled_regions.len(), filled);
        prop_assert!(layout.decorations.len() <= total as usize * shape.decorations_per_unit() as usize);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Radial dividers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn radial_dividers_span_the_surface(
        shape in any_shape().prop_filter("radial", |s| s.family() == PlacementFamily::Radial),
        denominator in 1u32..=12,
    ) {
        let layout = layout_of(shape, FractionSpec::new(1, denominator), 1.0);
        prop_assert_eq!(layout.dividers.len(), denominator as usize);

        let (inner, outer) = match layout.background {
            Background::Disc { surface_radius, .. } => (0.0, surface_radius),
            Background::Ring { surface_radius, hole_radius, .. } => (hole_radius, surface_radius),
            Background::Slab { .. } => return Err(TestCaseError::fail("radial shape drew a slab")),
        };
        for d in &layout.dividers {
            prop_assert!((d.length() - (outer - inner)).abs() < 1e-3);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Placement radius
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placement_radius_in_bounds(
        total in 1u32..=24,
        outer in 30.0f32..300.0,
        diameter in 4.0f32..40.0,
        margin in 0.0f32..8.0,
    ) {
        let bounds = RadiusBounds::new(outer, diameter);
        let r = placement_radius(total, outer, diameter, margin);
        prop_assert!(r <= bounds.max + 1e-4);
        if bounds.min <= bounds.max {
            prop_assert!(r >= bounds.min - 1e-4);
        }
    }

    #[test]
    fn placement_radius_non_decreasing_in_slices(
        total in 1u32..24,
        outer in 30.0f32..300.0,
        diameter in 4.0f32..40.0,
        margin in 0.0f32..8.0,
    ) {
        let wide = placement_radius(total, outer, diameter, margin);
        let thin = placement_radius(total + 1, outer, diameter, margin);
        prop_assert!(thin >= wide - 1e-4, "{} slices at {}, {} slices at {}", total, wide, total + 1, thin);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Grid tiling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grid_cells_are_row_major(
        shape in any_shape().prop_filter("grid", |s| s.family() == PlacementFamily::Grid),
        denominator in proptest::sample::select(vec![2u32, 4, 6, 8, 10, 12]),
    ) {
        let (cols, rows) = shape.grid_dims(denominator);
        prop_assert_eq!(cols * rows, denominator);

        let layout = layout_of(shape, FractionSpec::new(denominator, denominator), 1.0);
        prop_assert_eq!(layout.dividers.len(), (cols - 1 + rows - 1) as usize);
        for (i, region) in layout.filled_regions.iter().enumerate() {
            match region {
                Region::Cell { index, row, col, .. } => {
                    prop_assert_eq!(*index, i as u32);
                    prop_assert_eq!(*row, i as u32 / cols);
                    prop_assert_eq!(*col, i as u32 % cols);
                }
                Region::Sector { .. } => return Err(TestCaseError::fail("grid shape drew a sector")),
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Decorations stay inside the box
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn decorations_inside_box(
        (shape, fraction) in shape_and_fraction(),
        scale in proptest::sample::select(vec![0.5f32, 0.75, 1.0]),
    ) {
        let layout = layout_of(shape, fraction, scale);
        for d in &layout.decorations {
            prop_assert!(d.x >= 0.0 && d.x <= layout.width, "x {} outside {}", d.x, layout.width);
            prop_assert!(d.y >= 0.0 && d.y <= layout.height, "y {} outside {}", d.y, layout.height);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Determinism and scaling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic((shape, fraction) in shape_and_fraction()) {
        prop_assert_eq!(layout_of(shape, fraction, 1.0), layout_of(shape, fraction, 1.0));
    }

    #[test]
    fn layout_scales_proportionally((shape, fraction) in shape_and_fraction()) {
        let full = layout_of(shape, fraction, 1.0);
        let half = layout_of(shape, fraction, 0.5);
        prop_assert!((half.width * 2.0 - full.width).abs() < 1e-3);
        for (a, b) in full.decorations.iter().zip(&half.decorations) {
            prop_assert!((a.x - 2.0 * b.x).abs() < 1e-2);
            prop_assert!((a.y - 2.0 * b.y).abs() < 1e-2);
            prop_assert_eq!(a.rotation_deg, b.rotation_deg);
            prop_assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn scatter_is_unit_interval(seed in 0u32..1_000_000) {
        let u = scatter(seed as f64);
        prop_assert!((0.0..1.0).contains(&u));
        prop_assert_eq!(u, scatter(seed as f64));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Coercion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coerce_any_input(numerator in any::<f64>(), denominator in any::<f64>()) {
        let f = FractionSpec::coerce(numerator, denominator);
        prop_assert!(f.denominator >= 1);
        prop_assert!(f.numerator <= f.denominator);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Generated fractions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn generated_fraction_in_domain((shape, fraction) in shape_and_fraction()) {
        prop_assert!(shape.denominator_domain().admits(fraction));
        prop_assert!(fraction.numerator >= 1);
        prop_assert!(fraction.numerator <= fraction.denominator);
    }
}
