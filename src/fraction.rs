//! Fraction values and the per-round fraction generator

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// A numerator/denominator pair describing the topped portion of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FractionSpec {
    pub numerator: u32,
    pub denominator: u32,
}

impl FractionSpec {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Coerce arbitrary numeric input into a layout-valid fraction.
    ///
    /// Non-finite or sub-1 denominators become 1. The numerator is floored
    /// and clamped into `[0, denominator]`.
    pub fn coerce(numerator: f64, denominator: f64) -> Self {
        let denominator = if denominator.is_finite() && denominator >= 1.0 {
            denominator.floor().min(u32::MAX as f64) as u32
        } else {
            1
        };
        let numerator = if numerator.is_finite() {
            numerator.floor().clamp(0.0, denominator as f64) as u32
        } else {
            0
        };
        Self {
            numerator,
            denominator,
        }
    }

    /// Number of equal parts the shape is cut into (never zero)
    #[inline]
    pub fn total_parts(&self) -> u32 {
        self.denominator.max(1)
    }

    /// Number of topped parts, clamped to the part count
    #[inline]
    pub fn filled_parts(&self) -> u32 {
        self.numerator.min(self.total_parts())
    }
}

impl std::fmt::Display for FractionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Denominators a shape family may roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenominatorDomain {
    /// Every integer in `min..=max`
    Range { min: u32, max: u32 },
    /// A fixed set of values
    Set(&'static [u32]),
}

impl DenominatorDomain {
    pub fn contains(&self, denominator: u32) -> bool {
        match *self {
            DenominatorDomain::Range { min, max } => (min..=max).contains(&denominator),
            DenominatorDomain::Set(values) => values.contains(&denominator),
        }
    }

    /// Whether `fraction` is a proper fraction this domain could have produced
    pub fn admits(&self, fraction: FractionSpec) -> bool {
        self.contains(fraction.denominator)
            && fraction.numerator >= 1
            && fraction.numerator <= fraction.denominator
    }
}

/// Roll a proper fraction: denominator uniform over `domain`, numerator
/// uniform over `1..=denominator`.
///
/// A degenerate domain (empty set, inverted range, zero) yields `1/1`.
pub fn generate_fraction<R: Rng>(domain: DenominatorDomain, rng: &mut R) -> FractionSpec {
    let denominator = match domain {
        DenominatorDomain::Range { min, max } if min <= max => rng.random_range(min..=max),
        DenominatorDomain::Range { .. } => 1,
        DenominatorDomain::Set(values) => values.choose(rng).copied().unwrap_or(1),
    }
    .max(1);
    let numerator = rng.random_range(1..=denominator);
    FractionSpec::new(numerator, denominator)
}
