//! Fraction Foods - guess the fraction of a food that carries toppings
//!
//! Core modules:
//! - `layout`: Deterministic topping layout (dividers, filled regions, decorations)
//! - `shape`: The closed set of food shapes and their tuned constants
//! - `fraction`: Fraction values and the per-round fraction generator
//! - `session`: Round state machine, timers and collaborator wiring
//! - `viewport`: Viewport width provider and scale policy
//! - `celebration`: Fire-and-forget correct-answer effect
//! - `settings`: Data-driven tuning, persisted separately from sessions

pub mod celebration;
pub mod fraction;
pub mod layout;
pub mod session;
pub mod settings;
pub mod shape;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use fraction::{DenominatorDomain, FractionSpec, generate_fraction};
pub use layout::{ColorPair, LayoutResult, compute_layout};
pub use session::{Phase, SessionController, SessionState};
pub use settings::Settings;
pub use shape::{PlacementFamily, Shape};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default rendered shape size (pixels, before scaling)
    pub const DEFAULT_SIZE: f32 = 180.0;

    /// Feedback delays (milliseconds)
    pub const CELEBRATE_DELAY_MS: u32 = 3000;
    pub const SHAKE_DELAY_MS: u32 = 500;

    /// Guess input bounds
    pub const GUESS_NUMERATOR_MIN: u32 = 1;
    pub const GUESS_NUMERATOR_MAX: u32 = 12;
    pub const GUESS_DENOMINATOR_MIN: u32 = 2;
    pub const GUESS_DENOMINATOR_MAX: u32 = 12;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert a clock-face polar position to screen coordinates.
///
/// `angle_deg` is measured clockwise from 12 o'clock and the screen y axis
/// points down, so 90° lands to the right of `center`.
#[inline]
pub fn clock_to_screen(center: Vec2, r: f32, angle_deg: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(center.x + r * theta.sin(), center.y - r * theta.cos())
}

/// Convert a screen position back to clock-face polar (r, degrees clockwise from 12 o'clock)
#[inline]
pub fn screen_to_clock(center: Vec2, pos: Vec2) -> (f32, f32) {
    let d = pos - center;
    let deg = d.x.atan2(-d.y).to_degrees();
    (d.length(), normalize_degrees(deg))
}
