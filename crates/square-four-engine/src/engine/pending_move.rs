use serde::Serialize;

use crate::core::{Player, Position};

/// Animation steps needed to fall by one row.
pub const DROP_STEPS_PER_ROW: usize = 6;

/// A piece on its way down to its landing cell.
///
/// The board is not touched until the piece comes to rest; the controller then
/// folds the move into the game state and drops this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingMove {
    target: Position,
    player: Player,
    steps: usize,
}

impl PendingMove {
    #[must_use]
    pub(crate) const fn new(target: Position, player: Player) -> Self {
        Self {
            target,
            player,
            steps: 0,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Position {
        self.target
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.target.col
    }

    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }

    /// Distance fallen, in rows, capped at the landing row.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn fall_height(&self) -> f64 {
        let steps = self.steps.min(self.total_steps());
        steps as f64 / DROP_STEPS_PER_ROW as f64
    }

    /// Fraction of the fall completed, from 0.0 to 1.0.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        let total = self.total_steps();
        if total == 0 {
            return if self.steps == 0 { 0.0 } else { 1.0 };
        }
        self.steps.min(total) as f64 / total as f64
    }

    #[must_use]
    pub const fn is_at_rest(&self) -> bool {
        self.steps > 0 && self.steps >= self.total_steps()
    }

    /// Advances the fall by one frame and returns whether the piece is at rest.
    pub(crate) fn step(&mut self) -> bool {
        self.steps += 1;
        self.is_at_rest()
    }

    const fn total_steps(&self) -> usize {
        self.target.row * DROP_STEPS_PER_ROW
    }
}
