//! Round state machine
//!
//! `step` applies one event to the state and returns the side effects the
//! host has to carry out (start/cancel a timer, fire the celebration). It
//! never touches a clock or the screen.
//!
//! At most one delayed transition is pending. Scheduling a new one cancels
//! the old one, and a firing whose id is not the pending one does nothing,
//! so a late timer can never act on a round that has moved on.

use rand::Rng;

use super::state::{Guess, GuessField, PendingTimer, Phase, SessionState, TimerId, TimerKind};
use crate::celebration::ConfettiBurst;
use crate::settings::Settings;

/// A discrete input to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Learner submits a guess
    Submit(Guess),
    /// Learner nudges one half of the guess
    AdjustGuess { field: GuessField, delta: i32 },
    /// A scheduled delayed transition fired
    TimerFired(TimerId),
    /// Host is going away
    Teardown,
}

/// Work the host must perform after a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Fire `TimerFired(id)` after `delay_ms`
    Schedule { id: TimerId, delay_ms: u32 },
    /// Drop a timer scheduled earlier
    Cancel(TimerId),
    /// Trigger the celebration effect
    Celebrate(ConfettiBurst),
}

/// Apply `event` to `state`
pub fn step<R: Rng>(state: &mut SessionState, event: SessionEvent, settings: &Settings, rng: &mut R) -> Vec<Effect> {
    let mut effects = Vec::new();

    if state.torn_down {
        log::debug!("Ignoring {:?} after teardown", event);
        return effects;
    }

    match event {
        SessionEvent::Submit(guess) => {
            if !state.phase.accepts_input() {
                log::debug!("Ignoring submit during {:?}", state.phase);
                return effects;
            }
            // Retire the superseded timer before any other effect
            if let Some(previous) = state.pending_timer.take() {
                effects.push(Effect::Cancel(previous.id));
            }
            state.user_guess = guess;
            if guess == state.active_fraction {
                log::info!("Correct: {} on {}", guess, state.active_shape());
                state.phase = Phase::Celebrate;
                if let Some(burst) = settings.effective_confetti() {
                    effects.push(Effect::Celebrate(burst));
                }
                schedule(state, TimerKind::EndCelebration, settings.celebrate_delay_ms, &mut effects);
            } else {
                log::info!("Wrong: {} (expected {})", guess, state.active_fraction);
                state.phase = Phase::ShakeFeedback;
                state.stats.wrong_attempts += 1;
                schedule(state, TimerKind::EndShake, settings.shake_delay_ms, &mut effects);
            }
        }

        SessionEvent::AdjustGuess { field, delta } => {
            if !state.phase.accepts_input() {
                return effects;
            }
            let bounds = settings.guess_bounds;
            let (value, min, max) = match field {
                GuessField::Numerator => (
                    &mut state.user_guess.numerator,
                    bounds.numerator_min,
                    bounds.numerator_max,
                ),
                GuessField::Denominator => (
                    &mut state.user_guess.denominator,
                    bounds.denominator_min,
                    bounds.denominator_max,
                ),
            };
            let next = *value as i64 + delta as i64;
            if next >= min as i64 && next <= max as i64 {
                *value = next as u32;
                log::debug!("Guess now {}", state.user_guess);
            }
        }

        SessionEvent::TimerFired(id) => {
            let pending = match state.pending_timer {
                Some(pending) if pending.id == id => pending,
                _ => {
                    log::debug!("Stale timer {:?} ignored", id);
                    return effects;
                }
            };
            state.pending_timer = None;
            match pending.kind {
                TimerKind::EndCelebration => {
                    state.stats.rounds_completed += 1;
                    state.advance(rng);
                    state.phase = Phase::Prompt;
                }
                TimerKind::EndShake => {
                    state.phase = Phase::Prompt;
                }
            }
        }

        SessionEvent::Teardown => {
            if let Some(pending) = state.pending_timer.take() {
                effects.push(Effect::Cancel(pending.id));
            }
            state.torn_down = true;
            log::info!("Session torn down after {} rounds", state.stats.rounds_completed);
        }
    }

    effects
}

/// Arm a new timer of `kind`; the caller has already cancelled the old one
fn schedule(state: &mut SessionState, kind: TimerKind, delay_ms: u32, effects: &mut Vec<Effect>) {
    debug_assert!(state.pending_timer.is_none());
    let id = state.next_timer_id();
    state.pending_timer = Some(PendingTimer { id, kind, delay_ms });
    effects.push(Effect::Schedule { id, delay_ms });
}
