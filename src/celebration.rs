//! Correct-answer celebration effect
//!
//! The session only says "celebrate now" with a burst configuration. How
//! the confetti looks is up to the host.

use serde::{Deserialize, Serialize};

/// Confetti burst configuration passed to the effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfettiBurst {
    pub particle_count: u32,
    /// Spread angle in degrees
    pub spread: f32,
    /// Launch point as a fraction of the viewport (x, y)
    pub origin: (f32, f32),
}

impl Default for ConfettiBurst {
    fn default() -> Self {
        Self {
            particle_count: 100,
            spread: 70.0,
            origin: (0.5, 0.6),
        }
    }
}

/// Fire-and-forget effect triggered on a correct answer
pub trait Celebration {
    fn celebrate(&mut self, burst: &ConfettiBurst);
}

/// Effect that does nothing (headless hosts, reduced motion)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn celebrate(&mut self, _burst: &ConfettiBurst) {}
}

/// Logs the burst instead of drawing it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCelebration;

impl Celebration for LogCelebration {
    fn celebrate(&mut self, burst: &ConfettiBurst) {
        log::info!(
            "Celebrate: {} confetti particles (spread {}°)",
            burst.particle_count,
            burst.spread
        );
    }
}

impl<F: FnMut(&ConfettiBurst)> Celebration for F {
    fn celebrate(&mut self, burst: &ConfettiBurst) {
        self(burst)
    }
}
