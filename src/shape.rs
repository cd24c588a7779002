//! Food shapes and their tuned layout constants
//!
//! Every shape belongs to one placement family:
//! - `Radial`: cut into equal wedges around the center (pizza, pancake, pie, donut)
//! - `Grid`: cut into equal rectangular cells (brownie, chocolate bar)
//!
//! The numbers here are tuned by eye, not derived. Treat them as data.

use serde::{Deserialize, Serialize};

use crate::fraction::DenominatorDomain;
use crate::layout::{ColorPair, Rgba, rgb, rgba};

/// How a shape is divided into parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementFamily {
    Radial,
    Grid,
}

/// The closed set of food shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    Pizza,
    Brownie,
    Pancake,
    Pie,
    ChocolateBar,
    Donut,
}

/// Size parameters for one topping piece (pixels at scale 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationSpec {
    pub width: f32,
    pub height: f32,
    /// Extra height drawn from scatter, 0 for fixed-size toppings
    pub height_jitter: f32,
    /// Clearance kept between a topping and slice edges
    pub safety_margin: f32,
}

impl DecorationSpec {
    /// Largest extent a piece can reach at scale 1
    pub fn max_extent(&self) -> f32 {
        self.width.max(self.height + self.height_jitter)
    }
}

/// Denominators for wedge-cut shapes
pub const RADIAL_DOMAIN: DenominatorDomain = DenominatorDomain::Range { min: 2, max: 12 };

/// Denominators for grid-cut shapes
pub const GRID_DENOMINATORS: [u32; 6] = [2, 4, 6, 8, 10, 12];
pub const GRID_DOMAIN: DenominatorDomain = DenominatorDomain::Set(&GRID_DENOMINATORS);

/// (parts, cols, rows)
const BROWNIE_GRID: [(u32, u32, u32); 6] = [
    (2, 2, 1),
    (4, 2, 2),
    (6, 3, 2),
    (8, 4, 2),
    (10, 5, 2),
    (12, 4, 3),
];

const CHOCOLATE_BAR_GRID: [(u32, u32, u32); 6] = [
    (2, 2, 1),
    (4, 4, 1),
    (6, 6, 1),
    (8, 4, 2),
    (10, 5, 2),
    (12, 6, 2),
];

const DONUT_SPRINKLES: [Rgba; 5] = [
    rgb(0xf43f5e),
    rgb(0xfacc15),
    rgb(0x38bdf8),
    rgb(0x4ade80),
    rgb(0xffffff),
];
const BROWNIE_CHIPS: [Rgba; 3] = [rgb(0x1c0a00), rgb(0xfef3c7), rgb(0xa16207)];
const CHOCOLATE_BAR_NUTS: [Rgba; 3] = [rgb(0xd6a461), rgb(0xc08a4b), rgb(0xe8c58f)];

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Pizza,
        Shape::Brownie,
        Shape::Pancake,
        Shape::Pie,
        Shape::ChocolateBar,
        Shape::Donut,
    ];

    pub fn family(self) -> PlacementFamily {
        match self {
            Shape::Pizza | Shape::Pancake | Shape::Pie | Shape::Donut => PlacementFamily::Radial,
            Shape::Brownie | Shape::ChocolateBar => PlacementFamily::Grid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Pizza => "pizza",
            Shape::Brownie => "brownie",
            Shape::Pancake => "pancake",
            Shape::Pie => "pie",
            Shape::ChocolateBar => "chocolate bar",
            Shape::Donut => "donut",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "pizza" => Some(Shape::Pizza),
            "brownie" => Some(Shape::Brownie),
            "pancake" => Some(Shape::Pancake),
            "pie" => Some(Shape::Pie),
            "chocolate bar" | "chocolate" | "bar" => Some(Shape::ChocolateBar),
            "donut" | "doughnut" => Some(Shape::Donut),
            _ => None,
        }
    }

    /// What the decorations are called in the round prompt
    pub fn topping_name(self) -> &'static str {
        match self {
            Shape::Pizza => "pepperoni",
            Shape::Brownie => "chocolate chips",
            Shape::Pancake => "blueberries",
            Shape::Pie => "whipped cream",
            Shape::ChocolateBar => "almonds",
            Shape::Donut => "sprinkles",
        }
    }

    /// Width divided by height of the shape's bounding box
    pub fn aspect_ratio(self) -> f32 {
        match self {
            Shape::Brownie => 1.25,
            Shape::ChocolateBar => 1.8,
            _ => 1.0,
        }
    }

    /// Fraction of the box width between the outer edge and the topped surface
    pub fn inset_ratio(self) -> f32 {
        match self {
            Shape::Pizza => 0.08,
            Shape::Pancake => 0.05,
            Shape::Pie => 0.1,
            Shape::Donut => 0.06,
            Shape::Brownie => 0.06,
            Shape::ChocolateBar => 0.05,
        }
    }

    /// Donut hole radius as a fraction of the glazed radius (0 = no hole)
    pub fn hole_ratio(self) -> f32 {
        match self {
            Shape::Donut => 0.36,
            _ => 0.0,
        }
    }

    pub fn decoration(self) -> DecorationSpec {
        match self {
            Shape::Pizza => DecorationSpec {
                width: 24.0,
                height: 24.0,
                height_jitter: 0.0,
                safety_margin: 4.0,
            },
            Shape::Pancake => DecorationSpec {
                width: 20.0,
                height: 20.0,
                height_jitter: 0.0,
                safety_margin: 4.0,
            },
            Shape::Pie => DecorationSpec {
                width: 22.0,
                height: 22.0,
                height_jitter: 0.0,
                safety_margin: 4.0,
            },
            Shape::Donut => DecorationSpec {
                width: 3.0,
                height: 8.0,
                height_jitter: 3.0,
                safety_margin: 4.0,
            },
            Shape::Brownie => DecorationSpec {
                width: 5.0,
                height: 4.0,
                height_jitter: 2.0,
                safety_margin: 2.0,
            },
            Shape::ChocolateBar => DecorationSpec {
                width: 8.0,
                height: 5.0,
                height_jitter: 2.0,
                safety_margin: 3.0,
            },
        }
    }

    /// Decorations placed on each topped part
    pub fn decorations_per_unit(self) -> u32 {
        match self {
            Shape::Pizza | Shape::Pancake | Shape::Pie => 1,
            Shape::Donut => 12,
            Shape::Brownie => 18,
            Shape::ChocolateBar => 8,
        }
    }

    /// Whether the decorations are scattered rather than centered one per part
    pub fn scatters(self) -> bool {
        self.decorations_per_unit() > 1
    }

    /// Outer body color and topping color
    pub fn default_colors(self) -> ColorPair {
        match self {
            Shape::Pizza => ColorPair::new(rgb(0xb45309), rgb(0xdc2626)),
            Shape::Pancake => ColorPair::new(rgb(0xd97706), rgb(0x3730a3)),
            Shape::Pie => ColorPair::new(rgb(0x92400e), rgb(0xfef9c3)),
            Shape::Donut => ColorPair::new(rgb(0xc2410c), DONUT_SPRINKLES[0]),
            Shape::Brownie => ColorPair::new(rgb(0x451a03), BROWNIE_CHIPS[0]),
            Shape::ChocolateBar => ColorPair::new(rgb(0x4a2511), CHOCOLATE_BAR_NUTS[0]),
        }
    }

    /// Color of the inset surface (cheese, batter, filling, glaze...)
    pub fn surface_color(self) -> Rgba {
        match self {
            Shape::Pizza => rgb(0xfcd34d),
            Shape::Pancake => rgb(0xfbbf24),
            Shape::Pie => rgb(0x9f1239),
            Shape::Donut => rgb(0xf9a8d4),
            Shape::Brownie => rgb(0x78350f),
            Shape::ChocolateBar => rgb(0x5c2e14),
        }
    }

    /// Palette for scattered decorations; entry 0 is replaced by the topping color
    pub fn palette(self) -> &'static [Rgba] {
        match self {
            Shape::Donut => &DONUT_SPRINKLES,
            Shape::Brownie => &BROWNIE_CHIPS,
            Shape::ChocolateBar => &CHOCOLATE_BAR_NUTS,
            Shape::Pizza | Shape::Pancake | Shape::Pie => &[],
        }
    }

    pub fn divider_color(self) -> Rgba {
        match self.family() {
            PlacementFamily::Radial => rgba(0xffffff, 0.4),
            PlacementFamily::Grid => rgba(0x000000, 0.35),
        }
    }

    /// Divider thickness at scale 1
    pub fn divider_width(self) -> f32 {
        match self {
            Shape::ChocolateBar => 3.0,
            _ => 2.0,
        }
    }

    pub fn denominator_domain(self) -> DenominatorDomain {
        match self.family() {
            PlacementFamily::Radial => RADIAL_DOMAIN,
            PlacementFamily::Grid => GRID_DOMAIN,
        }
    }

    /// Resolve (cols, rows) for a part count.
    ///
    /// Counts outside the lookup fall back to a single row. Radial shapes
    /// always report a single row.
    pub fn grid_dims(self, parts: u32) -> (u32, u32) {
        let parts = parts.max(1);
        let table: &[(u32, u32, u32)] = match self {
            Shape::Brownie => &BROWNIE_GRID,
            Shape::ChocolateBar => &CHOCOLATE_BAR_GRID,
            _ => &[],
        };
        table
            .iter()
            .find(|(n, _, _)| *n == parts)
            .map(|&(_, cols, rows)| (cols, rows))
            .unwrap_or((parts, 1))
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
