//! Turn sequencing, drop animation and the automated opponent.
//!
//! - [`GameState`] - Board, side to move and result
//! - [`TurnController`] - Turn state machine over a [`Scheduler`]
//! - [`PendingMove`] - A piece falling towards its landing cell
//! - [`FrameScheduler`] - Deterministic frame/timer scheduler
//! - [`RandomOpponent`] - Uniformly random column choice
//! - [`GameSession`] - Controller and scheduler driven one frame at a time
//! - [`GameSeed`] - Seed for reproducible games
//!
//! # Game Flow
//!
//! 1. A controller starts with a random first player
//! 2. The human selects a column, or the opponent picks one after thinking
//! 3. The piece falls frame by frame and lands in the lowest empty cell
//! 4. The mover's square win is checked, then a full board
//! 5. Otherwise the turn passes; a reset starts over at any time

pub use self::{
    game_session::*, game_state::*, opponent::*, pending_move::*, scheduler::*, seed::*,
    turn_controller::*,
};

mod game_session;
mod game_state;
mod opponent;
mod pending_move;
mod scheduler;
mod seed;
mod turn_controller;

#[cfg(test)]
mod test_support;
