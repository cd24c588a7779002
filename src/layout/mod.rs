//! Topping layout engine
//!
//! Turns a shape, a fraction and a size into renderer-agnostic geometry:
//! background, divider lines, topped regions and individual decorations.
//! Everything is expressed in one space: origin top-left, y down, pixels at
//! the requested size and scale.
//!
//! Layout is a pure function. Jitter comes from `scatter`, never from an RNG,
//! so the same inputs always produce the same picture.

pub mod grid;
pub mod radial;
pub mod scatter;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SIZE;
use crate::fraction::FractionSpec;
use crate::shape::{PlacementFamily, Shape};

pub use scatter::{mark_seed, scatter};

/// Linear RGBA color
pub type Rgba = [f32; 4];

/// Opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> Rgba {
    rgba(hex, 1.0)
}

/// Color from a 0xRRGGBB literal with alpha
pub const fn rgba(hex: u32, alpha: f32) -> Rgba {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Body and topping colors for one shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    /// Outer body (crust, dough, wrapper)
    pub base: Rgba,
    /// Decorations (for scattered toppings, the first palette entry)
    pub topping: Rgba,
}

impl ColorPair {
    pub const fn new(base: Rgba, topping: Rgba) -> Self {
        Self { base, topping }
    }
}

/// The untopped body of the shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Background {
    /// Round body with an inset surface (pizza, pancake, pie)
    Disc {
        center: Vec2,
        radius: f32,
        surface_radius: f32,
        base: Rgba,
        surface: Rgba,
    },
    /// Round body with a hole (donut)
    Ring {
        center: Vec2,
        radius: f32,
        surface_radius: f32,
        hole_radius: f32,
        base: Rgba,
        surface: Rgba,
    },
    /// Rectangular body with an inset surface (brownie, chocolate bar)
    Slab {
        origin: Vec2,
        size: Vec2,
        surface_origin: Vec2,
        surface_size: Vec2,
        base: Rgba,
        surface: Rgba,
    },
}

/// A straight divider line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    /// Clockwise rotation of a downward-pointing line anchored at `from`
    pub rotation_deg: f32,
    pub color: Rgba,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

/// Outline of one topped part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Region {
    /// Wedge between two clock angles (degrees clockwise from 12 o'clock)
    Sector {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        start_deg: f32,
        end_deg: f32,
    },
    /// Grid cell in row-major order
    Cell {
        index: u32,
        row: u32,
        col: u32,
        origin: Vec2,
        size: Vec2,
    },
}

/// One topping piece, positioned by its center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation_deg: f32,
    pub color: Rgba,
}

impl Decoration {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Complete geometry for one shape + fraction + scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub shape: Shape,
    /// The fraction actually drawn, after coercion
    pub fraction: FractionSpec,
    pub width: f32,
    pub height: f32,
    pub background: Background,
    pub dividers: Vec<Segment>,
    pub filled_regions: Vec<Region>,
    pub decorations: Vec<Decoration>,
}

impl LayoutResult {
    /// Serialize for a JavaScript or file-based renderer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Drop divider lines (slice lines toggled off)
    pub fn without_dividers(mut self) -> Self {
        self.dividers.clear();
        self
    }
}

/// Box and scale a layout is computed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Box width in pixels (size hint times scale)
    pub width: f32,
    /// Box height in pixels
    pub height: f32,
    /// Multiplier for every absolute length
    pub scale: f32,
}

impl Metrics {
    /// Coerce a size hint and scale factor and derive the box.
    ///
    /// Non-finite or non-positive sizes fall back to the default size;
    /// bad scale factors fall back to 1.
    pub fn new(shape: Shape, size_hint: f32, scale_factor: f32) -> Self {
        let size = if size_hint.is_finite() && size_hint > 0.0 {
            size_hint
        } else {
            DEFAULT_SIZE
        };
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let width = size * scale;
        Self {
            width,
            height: width / shape.aspect_ratio(),
            scale,
        }
    }
}

/// Compute the layout for `shape` showing `fraction`.
///
/// Never fails: the fraction is clamped to `[0, denominator]` with a
/// denominator of at least 1, and bad sizes are replaced (see [`Metrics::new`]).
pub fn compute_layout(
    shape: Shape,
    fraction: FractionSpec,
    size_hint: f32,
    scale_factor: f32,
    colors: &ColorPair,
) -> LayoutResult {
    let fraction = FractionSpec::new(fraction.filled_parts(), fraction.total_parts());
    let metrics = Metrics::new(shape, size_hint, scale_factor);
    match shape.family() {
        PlacementFamily::Radial => radial::layout(shape, fraction, metrics, colors),
        PlacementFamily::Grid => grid::layout(shape, fraction, metrics, colors),
    }
}

/// Pick a palette entry by a scatter value; entry 0 is the topping color
pub(crate) fn palette_pick(palette: &[Rgba], colors: &ColorPair, u: f32) -> Rgba {
    if palette.is_empty() {
        return colors.topping;
    }
    let idx = ((u * palette.len() as f32) as usize).min(palette.len() - 1);
    if idx == 0 { colors.topping } else { palette[idx] }
}
