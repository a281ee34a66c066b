use serde::Serialize;

use crate::core::{Board, Player, Position, WinningSquare};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl Outcome {
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::Winner(player) => Some(player),
            Self::Draw => None,
        }
    }
}

/// Board contents, side to move and the result once the game is decided.
///
/// A state is mutated once per completed drop through [`Self::land_piece`]
/// and never again after it becomes terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<Outcome>,
    winning_square: Option<WinningSquare>,
}

impl GameState {
    #[must_use]
    pub const fn new(starting_player: Player) -> Self {
        Self {
            board: Board::EMPTY,
            current_player: starting_player,
            outcome: None,
            winning_square: None,
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move, or the player who made the last move once terminal.
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub const fn winning_square(&self) -> Option<WinningSquare> {
        self.winning_square
    }

    /// Places the current player's piece at `pos` and resolves the turn.
    ///
    /// The mover's square win is checked first, then a full board. The turn
    /// passes to the other player only if neither ends the game.
    ///
    /// # Panics
    ///
    /// Panics if the game is already decided or `pos` is not the lowest empty
    /// cell of its column.
    pub(crate) fn land_piece(&mut self, pos: Position) -> Option<Outcome> {
        assert!(!self.is_terminal(), "piece landed after the game ended");

        let mover = self.current_player;
        self.board.place_piece(pos, mover);

        if let Some(square) = self.board.find_square_win(mover) {
            self.winning_square = Some(square);
            self.outcome = Some(Outcome::Winner(mover));
        } else if self.board.is_full() {
            self.outcome = Some(Outcome::Draw);
        } else {
            self.current_player = mover.opponent();
        }
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::DRAW_ORDER;

    fn drop_in(state: &mut GameState, col: usize) -> Option<Outcome> {
        let row = state.board().available_row(col).unwrap();
        state.land_piece(Position::new(row, col))
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(Player::Blue);
        assert_eq!(state.current_player(), Player::Blue);
        assert!(!state.is_terminal());
        assert_eq!(state.winning_square(), None);
        assert_eq!(state.board(), &Board::EMPTY);
    }

    #[test]
    fn test_turn_flips_when_undecided() {
        let mut state = GameState::new(Player::Red);
        assert_eq!(drop_in(&mut state, 3), None);
        assert_eq!(state.current_player(), Player::Blue);
        assert_eq!(drop_in(&mut state, 3), None);
        assert_eq!(state.current_player(), Player::Red);
    }

    #[test]
    fn test_win_keeps_mover_as_current_player() {
        let mut state = GameState::new(Player::Red);
        // Red: 0, 1, 0, 1 / Blue: 6, 6, 5
        for col in [0, 6, 1, 6, 0, 5] {
            assert_eq!(drop_in(&mut state, col), None);
        }
        let outcome = drop_in(&mut state, 1);
        assert_eq!(outcome, Some(Outcome::Winner(Player::Red)));
        assert_eq!(state.current_player(), Player::Red);
        assert_eq!(state.winning_square(), Some(WinningSquare::new(4, 0, 2)));
    }

    #[test]
    fn test_second_player_can_win() {
        let mut state = GameState::new(Player::Red);
        for col in [6, 0, 4, 1, 2, 0, 6] {
            assert_eq!(drop_in(&mut state, col), None, "early end at column {col}");
        }
        assert_eq!(drop_in(&mut state, 1), Some(Outcome::Winner(Player::Blue)));
        assert_eq!(state.current_player(), Player::Blue);
        assert_eq!(state.winning_square(), Some(WinningSquare::new(4, 0, 2)));
    }

    #[test]
    fn test_full_board_is_draw() {
        let order = DRAW_ORDER;
        let mut state = GameState::new(Player::Red);
        for (i, &col) in order.iter().enumerate() {
            let outcome = drop_in(&mut state, col);
            if i + 1 < order.len() {
                assert_eq!(outcome, None, "game ended early at move {i}:\n{}", state.board());
            } else {
                assert_eq!(outcome, Some(Outcome::Draw), "\n{}", state.board());
            }
        }
        assert!(state.board().is_full());
        assert_eq!(state.winning_square(), None);
    }

    #[test]
    #[should_panic(expected = "after the game ended")]
    fn test_no_mutation_after_terminal() {
        let mut state = GameState::new(Player::Red);
        for col in [0, 6, 1, 6, 0, 5, 1] {
            drop_in(&mut state, col);
        }
        drop_in(&mut state, 3);
    }
}
