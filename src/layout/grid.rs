//! Grid-cut shapes: brownie and chocolate bar
//!
//! Parts are cells numbered in row-major order. Topped cells are always the
//! first `numerator` cells, so a layout reads like text: full rows first.

use glam::Vec2;

use super::scatter::{SALT_COLOR, SALT_OFFSET_A, SALT_OFFSET_B, SALT_ROTATION, SALT_SIZE, scatter_mark};
use super::{Background, ColorPair, Decoration, LayoutResult, Metrics, Region, Segment, palette_pick};
use crate::fraction::FractionSpec;
use crate::shape::Shape;

/// Rotation of a left-to-right line (a downward line turned clockwise)
const HORIZONTAL_ROTATION_DEG: f32 = 270.0;

/// (row, col) of a row-major cell index
#[inline]
pub fn cell_position(index: u32, cols: u32) -> (u32, u32) {
    let cols = cols.max(1);
    (index / cols, index % cols)
}

/// Inset surface rectangle of a grid shape: (origin, size)
pub fn surface_rect(shape: Shape, metrics: Metrics) -> (Vec2, Vec2) {
    let inset = metrics.width.min(metrics.height) * shape.inset_ratio();
    let origin = Vec2::splat(inset);
    let size = Vec2::new(metrics.width - 2.0 * inset, metrics.height - 2.0 * inset).max(Vec2::ZERO);
    (origin, size)
}

pub(super) fn layout(shape: Shape, fraction: FractionSpec, metrics: Metrics, colors: &ColorPair) -> LayoutResult {
    let total = fraction.total_parts();
    let filled = fraction.filled_parts();
    let (cols, rows) = shape.grid_dims(total);
    let (origin, surface) = surface_rect(shape, metrics);
    let cell = Vec2::new(surface.x / cols as f32, surface.y / rows as f32);

    let background = Background::Slab {
        origin: Vec2::ZERO,
        size: Vec2::new(metrics.width, metrics.height),
        surface_origin: origin,
        surface_size: surface,
        base: colors.base,
        surface: shape.surface_color(),
    };

    let width = shape.divider_width() * metrics.scale;
    let color = shape.divider_color();
    let vertical = (1..cols).map(|c| {
        let x = origin.x + c as f32 * cell.x;
        Segment {
            from: Vec2::new(x, origin.y),
            to: Vec2::new(x, origin.y + surface.y),
            width,
            rotation_deg: 0.0,
            color,
        }
    });
    let horizontal = (1..rows).map(|r| {
        let y = origin.y + r as f32 * cell.y;
        Segment {
            from: Vec2::new(origin.x, y),
            to: Vec2::new(origin.x + surface.x, y),
            width,
            rotation_deg: HORIZONTAL_ROTATION_DEG,
            color,
        }
    });
    let dividers = vertical.chain(horizontal).collect();

    let filled_regions = (0..filled)
        .map(|index| {
            let (row, col) = cell_position(index, cols);
            Region::Cell {
                index,
                row,
                col,
                origin: origin + Vec2::new(col as f32 * cell.x, row as f32 * cell.y),
                size: cell,
            }
        })
        .collect();

    LayoutResult {
        shape,
        fraction,
        width: metrics.width,
        height: metrics.height,
        background,
        dividers,
        filled_regions,
        decorations: cell_marks(shape, origin, cell, cols, filled, metrics, colors),
    }
}

/// Scatter the per-cell marks. Each `(cell, mark)` pair always lands on the
/// same relative spot with the same rotation and color.
fn cell_marks(
    shape: Shape,
    origin: Vec2,
    cell: Vec2,
    cols: u32,
    filled: u32,
    metrics: Metrics,
    colors: &ColorPair,
) -> Vec<Decoration> {
    let spec = shape.decoration();
    let per_cell = shape.decorations_per_unit();
    let pad = (spec.max_extent() / 2.0 + spec.safety_margin) * metrics.scale;
    // Cells narrower than two pads collapse the jitter range to the center
    let span = (cell - Vec2::splat(2.0 * pad)).max(Vec2::ZERO);
    let inset = (cell - span) / 2.0;

    let mut out = Vec::with_capacity((filled * per_cell) as usize);
    for index in 0..filled {
        let (row, col) = cell_position(index, cols);
        let cell_origin = origin + Vec2::new(col as f32 * cell.x, row as f32 * cell.y);
        for m in 0..per_cell {
            let offset = Vec2::new(
                scatter_mark(index, m, SALT_OFFSET_A) * span.x,
                scatter_mark(index, m, SALT_OFFSET_B) * span.y,
            );
            let pos = cell_origin + inset + offset;
            out.push(Decoration {
                x: pos.x,
                y: pos.y,
                width: spec.width * metrics.scale,
                height: (spec.height + spec.height_jitter * scatter_mark(index, m, SALT_SIZE)) * metrics.scale,
                rotation_deg: scatter_mark(index, m, SALT_ROTATION) * 360.0,
                color: palette_pick(shape.palette(), colors, scatter_mark(index, m, SALT_COLOR)),
            });
        }
    }
    out
}
