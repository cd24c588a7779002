//! Session state and core round types
//!
//! Everything the round state machine reads or writes lives here. The state
//! is plain data: `transition::step` is its only mutator.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::fraction::{FractionSpec, generate_fraction};
use crate::shape::Shape;

/// The learner's current answer; same shape as the target fraction
pub type Guess = FractionSpec;

/// Guess every round starts from
pub const INITIAL_GUESS: Guess = FractionSpec::new(1, 1);

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a guess
    Prompt,
    /// Correct answer, celebration running
    Celebrate,
    /// Wrong answer indicator; still accepts edits and submissions
    ShakeFeedback,
}

impl Phase {
    /// Whether guesses may be edited and submitted
    pub fn accepts_input(self) -> bool {
        !matches!(self, Phase::Celebrate)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Prompt => "prompt",
            Phase::Celebrate => "celebrate",
            Phase::ShakeFeedback => "shake",
        }
    }
}

/// Which half of the guess an adjustment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessField {
    Numerator,
    Denominator,
}

/// Identifies one scheduled delayed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// What a delayed transition does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of celebration: next shape, new fraction, reset guess
    EndCelebration,
    /// End of shake: back to prompt, nothing else changes
    EndShake,
}

/// The one delayed transition that may currently fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub delay_ms: u32,
}

/// Running tallies for the host UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_completed: u32,
    pub wrong_attempts: u32,
    /// Full passes through the shape sequence
    pub sequences_completed: u32,
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Shuffled order of every shape
    pub shape_sequence: Vec<Shape>,
    /// Index of the active shape in `shape_sequence`
    pub sequence_index: usize,
    /// Fraction the learner has to find
    pub active_fraction: FractionSpec,
    pub user_guess: Guess,
    pub phase: Phase,
    /// Delayed transition that is allowed to fire, if any
    pub pending_timer: Option<PendingTimer>,
    /// Round counter (0-based), bumped on every advance
    pub round: u64,
    pub stats: SessionStats,
    /// Set on teardown; all later events are ignored
    pub torn_down: bool,
    /// Next timer id
    next_timer: u64,
}

impl SessionState {
    /// Fresh session: shuffled shapes, first shape active, fraction rolled
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let shape_sequence = shuffled_shapes(rng);
        let active_fraction = generate_fraction(shape_sequence[0].denominator_domain(), rng);
        Self {
            shape_sequence,
            sequence_index: 0,
            active_fraction,
            user_guess: INITIAL_GUESS,
            phase: Phase::Prompt,
            pending_timer: None,
            round: 0,
            stats: SessionStats::default(),
            torn_down: false,
            next_timer: 1,
        }
    }

    pub fn active_shape(&self) -> Shape {
        self.shape_sequence
            .get(self.sequence_index)
            .copied()
            .unwrap_or(Shape::Pizza)
    }

    /// Allocate a new timer id (never reused within a session)
    pub(super) fn next_timer_id(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        id
    }

    /// Move to the next shape, reshuffling once the sequence is used up,
    /// then roll a fraction for it and reset the guess.
    pub(super) fn advance<R: Rng>(&mut self, rng: &mut R) {
        self.sequence_index += 1;
        if self.sequence_index >= self.shape_sequence.len() {
            self.shape_sequence = shuffled_shapes(rng);
            self.sequence_index = 0;
            self.stats.sequences_completed += 1;
            log::info!("Shape sequence exhausted, reshuffled: {:?}", self.shape_sequence);
        }
        self.active_fraction = generate_fraction(self.active_shape().denominator_domain(), rng);
        self.user_guess = INITIAL_GUESS;
        self.round += 1;
        log::info!(
            "Round {}: {} showing {}",
            self.round,
            self.active_shape(),
            self.active_fraction
        );
    }
}

/// Uniform random permutation of every shape (Fisher-Yates)
pub fn shuffled_shapes<R: Rng>(rng: &mut R) -> Vec<Shape> {
    let mut shapes = Shape::ALL.to_vec();
    shapes.shuffle(rng);
    shapes
}
