//! Stable pseudo-random jitter for decoration placement
//!
//! `scatter` is a sine hash: the fractional part of `sin(seed) * 10000`.
//! It is stateless, so re-rendering the same shape (at any scale) reproduces
//! the same pattern. Not for anything security sensitive.

/// Seed spacing between parts (slices or cells)
pub const ENTITY_STRIDE: u32 = 1000;
/// Seed spacing between marks within one part; salts must stay below this
pub const MARK_STRIDE: u32 = 10;

/// Horizontal offset (grid) or angle (radial)
pub const SALT_OFFSET_A: u32 = 1;
/// Vertical offset (grid) or radius (radial)
pub const SALT_OFFSET_B: u32 = 2;
pub const SALT_ROTATION: u32 = 3;
pub const SALT_COLOR: u32 = 4;
pub const SALT_SIZE: u32 = 5;

/// Largest f32 below 1.0
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Deterministic scalar in `[0, 1)` for `seed`
pub fn scatter(seed: f64) -> f32 {
    let x = seed.sin() * 10000.0;
    let frac = x - x.floor();
    if frac.is_finite() {
        (frac as f32).clamp(0.0, BELOW_ONE)
    } else {
        0.0
    }
}

/// Build the seed for one attribute of one mark on one part
#[inline]
pub fn mark_seed(entity: u32, mark: u32, salt: u32) -> f64 {
    debug_assert!(salt < MARK_STRIDE);
    entity as f64 * ENTITY_STRIDE as f64 + mark as f64 * MARK_STRIDE as f64 + salt as f64
}

/// `scatter(mark_seed(..))` shorthand
#[inline]
pub fn scatter_mark(entity: u32, mark: u32, salt: u32) -> f32 {
    scatter(mark_seed(entity, mark, salt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scatter_is_deterministic() {
        for seed in [0.0, 1.0, 42.0, 1234.5, 999_999.0] {
            assert_eq!(scatter(seed).to_bits(), scatter(seed).to_bits());
        }
    }

    #[test]
    fn test_scatter_range() {
        for i in 0..10_000 {
            let v = scatter(i as f64 * 0.37 - 500.0);
            assert!((0.0..1.0).contains(&v), "seed {i} -> {v}");
        }
    }

    #[test]
    fn test_scatter_matches_sine_hash() {
        let x = 7.0_f64.sin() * 10000.0;
        let expected = (x - x.floor()) as f32;
        assert_eq!(scatter(7.0), expected);
        // Negative sine values are folded into [0, 1) too
        let y = 4.0_f64.sin() * 10000.0;
        assert!(y < 0.0);
        assert_eq!(scatter(4.0), (y - y.floor()) as f32);
    }

    #[test]
    fn test_mark_seeds_are_distinct() {
        let mut seeds = HashSet::new();
        for entity in 0..12 {
            for mark in 0..18 {
                for salt in [SALT_OFFSET_A, SALT_OFFSET_B, SALT_ROTATION, SALT_COLOR, SALT_SIZE] {
                    assert!(seeds.insert(mark_seed(entity, mark, salt).to_bits()));
                }
            }
        }
    }

    #[test]
    fn test_distinct_seeds_give_distinct_values() {
        let mut values = HashSet::new();
        let mut total = 0;
        for entity in 0..12 {
            for mark in 0..18 {
                for salt in [SALT_OFFSET_A, SALT_OFFSET_B, SALT_ROTATION] {
                    values.insert(scatter_mark(entity, mark, salt).to_bits());
                    total += 1;
                }
            }
        }
        assert!(values.len() * 100 >= total * 99, "{} of {total} unique", values.len());
    }
}
