//! Guessing-game session
//!
//! - `state`: Plain session data (shape order, target fraction, guess, phase)
//! - `transition`: The round state machine, `(state, event) -> effects`
//! - `scheduler`: Timer execution (virtual clock or browser timers)
//! - `controller`: Owns state + collaborators and runs effects

pub mod controller;
pub mod scheduler;
pub mod state;
pub mod transition;

pub use controller::SessionController;
pub use scheduler::{ManualScheduler, Scheduler};
pub use state::{
    Guess, GuessField, INITIAL_GUESS, PendingTimer, Phase, SessionState, SessionStats, TimerId, TimerKind,
};
pub use transition::{Effect, SessionEvent, step};
