//! Wedge-cut shapes: pizza, pancake, pie and donut
//!
//! Slices are measured clockwise from 12 o'clock. Renderers that draw a
//! downward-pointing line and rotate it need a constant 180° offset, so the
//! divider for slice `i` carries `rotation_deg = 180 + i * slice_deg`.

use glam::Vec2;

use super::scatter::{SALT_COLOR, SALT_OFFSET_A, SALT_OFFSET_B, SALT_ROTATION, SALT_SIZE, scatter_mark};
use super::{Background, ColorPair, Decoration, LayoutResult, Metrics, Region, Segment, palette_pick};
use crate::clock_to_screen;
use crate::fraction::FractionSpec;
use crate::shape::Shape;

/// Where a centered topping sits when its slice is wide enough
pub const TARGET_RADIUS_RATIO: f32 = 0.6;
/// Rotation that turns a downward line into one pointing at 12 o'clock
pub const DIVIDER_BASE_ROTATION_DEG: f32 = 180.0;

/// Allowed center radii for a round topping of `diameter` inside `outer_radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusBounds {
    pub min: f32,
    pub max: f32,
}

impl RadiusBounds {
    pub fn new(outer_radius: f32, diameter: f32) -> Self {
        let radius = diameter / 2.0;
        Self {
            min: radius + 1.0,
            max: (outer_radius - radius - 1.0).max(0.0),
        }
    }
}

/// Angular width of one slice in degrees
#[inline]
pub fn slice_degrees(total_slices: u32) -> f32 {
    360.0 / total_slices.max(1) as f32
}

/// Center radius for a topping in a slice of a `total_slices` cut.
///
/// Starts at `TARGET_RADIUS_RATIO` of the surface radius. When the wedge is
/// too narrow for the topping to clear both edges, it moves outward to the
/// radius where the chord fits `diameter + safety_margin`. It never moves
/// inward and never leaves `RadiusBounds`.
pub fn placement_radius(total_slices: u32, outer_radius: f32, diameter: f32, safety_margin: f32) -> f32 {
    let bounds = RadiusBounds::new(outer_radius, diameter);
    let target = (outer_radius * TARGET_RADIUS_RATIO).max(bounds.min).min(bounds.max);
    let required = if total_slices <= 1 {
        bounds.min
    } else {
        let half_slice = (slice_degrees(total_slices) / 2.0).to_radians();
        (diameter + safety_margin) / (2.0 * half_slice.sin())
    };
    target.max(required).max(bounds.min).min(bounds.max)
}

pub(super) fn layout(shape: Shape, fraction: FractionSpec, metrics: Metrics, colors: &ColorPair) -> LayoutResult {
    let size = metrics.width;
    let center = Vec2::splat(size / 2.0);
    let outer_radius = size / 2.0 - size * shape.inset_ratio();
    let hole_radius = outer_radius * shape.hole_ratio();

    let total = fraction.total_parts();
    let filled = fraction.filled_parts();
    let slice_deg = slice_degrees(total);

    let background = if hole_radius > 0.0 {
        Background::Ring {
            center,
            radius: size / 2.0,
            surface_radius: outer_radius,
            hole_radius,
            base: colors.base,
            surface: shape.surface_color(),
        }
    } else {
        Background::Disc {
            center,
            radius: size / 2.0,
            surface_radius: outer_radius,
            base: colors.base,
            surface: shape.surface_color(),
        }
    };

    let dividers = (0..total)
        .map(|i| {
            let angle = i as f32 * slice_deg;
            Segment {
                from: clock_to_screen(center, hole_radius, angle),
                to: clock_to_screen(center, outer_radius, angle),
                width: shape.divider_width() * metrics.scale,
                rotation_deg: DIVIDER_BASE_ROTATION_DEG + angle,
                color: shape.divider_color(),
            }
        })
        .collect();

    let filled_regions = (0..filled)
        .map(|s| Region::Sector {
            center,
            inner_radius: hole_radius,
            outer_radius,
            start_deg: s as f32 * slice_deg,
            end_deg: (s + 1) as f32 * slice_deg,
        })
        .collect();

    let decorations = if shape.scatters() {
        scattered_toppings(shape, center, outer_radius, hole_radius, total, filled, metrics, colors)
    } else {
        centered_toppings(shape, center, outer_radius, total, filled, metrics, colors)
    };

    LayoutResult {
        shape,
        fraction,
        width: metrics.width,
        height: metrics.height,
        background,
        dividers,
        filled_regions,
        decorations,
    }
}

/// One topping per filled slice, on the slice's mid-angle
fn centered_toppings(
    shape: Shape,
    center: Vec2,
    outer_radius: f32,
    total: u32,
    filled: u32,
    metrics: Metrics,
    colors: &ColorPair,
) -> Vec<Decoration> {
    let spec = shape.decoration();
    let diameter = spec.width * metrics.scale;
    let r = placement_radius(total, outer_radius, diameter, spec.safety_margin * metrics.scale);
    let slice_deg = slice_degrees(total);

    (0..filled)
        .map(|s| {
            let pos = clock_to_screen(center, r, (s as f32 + 0.5) * slice_deg);
            Decoration {
                x: pos.x,
                y: pos.y,
                width: diameter,
                height: spec.height * metrics.scale,
                rotation_deg: 0.0,
                color: colors.topping,
            }
        })
        .collect()
}

/// Many small toppings per filled slice, jittered between the hole and the rim
#[allow(clippy::too_many_arguments)]
fn scattered_toppings(
    shape: Shape,
    center: Vec2,
    outer_radius: f32,
    hole_radius: f32,
    total: u32,
    filled: u32,
    metrics: Metrics,
    colors: &ColorPair,
) -> Vec<Decoration> {
    let spec = shape.decoration();
    let margin = (spec.safety_margin + spec.max_extent() / 2.0) * metrics.scale;
    let r_min = hole_radius + margin;
    let r_max = (outer_radius - margin).max(r_min);
    let slice_deg = slice_degrees(total);
    let per_slice = shape.decorations_per_unit();

    let mut out = Vec::with_capacity((filled * per_slice) as usize);
    for s in 0..filled {
        for m in 0..per_slice {
            let angle = (s as f32 + scatter_mark(s, m, SALT_OFFSET_A)) * slice_deg;
            let r = r_min + scatter_mark(s, m, SALT_OFFSET_B) * (r_max - r_min);
            let pos = clock_to_screen(center, r, angle);
            out.push(Decoration {
                x: pos.x,
                y: pos.y,
                width: spec.width * metrics.scale,
                height: (spec.height + spec.height_jitter * scatter_mark(s, m, SALT_SIZE)) * metrics.scale,
                rotation_deg: scatter_mark(s, m, SALT_ROTATION) * 360.0,
                color: palette_pick(shape.palette(), colors, scatter_mark(s, m, SALT_COLOR)),
            });
        }
    }
    out
}
