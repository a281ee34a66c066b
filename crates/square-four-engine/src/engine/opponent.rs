use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{GameSeed, core::Board};

/// Column choice for the automated player.
pub trait OpponentPolicy: fmt::Debug {
    /// Picks a column that can still receive a piece.
    ///
    /// Only called while the board has at least one available column.
    fn choose_column(&mut self, board: &Board) -> usize;
}

/// Picks uniformly at random among the available columns.
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: Pcg32,
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomOpponent {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.to_bytes()),
        }
    }
}

impl OpponentPolicy for RandomOpponent {
    fn choose_column(&mut self, board: &Board) -> usize {
        let columns = board.legal_columns();
        assert!(!columns.is_empty(), "no column available on a full board");
        columns[self.rng.random_range(0..columns.len())]
    }
}
