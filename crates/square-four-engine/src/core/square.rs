use serde::Serialize;

use super::{Cell, Grid, Player, Position};

/// An axis-aligned square whose four corners hold the same player's pieces.
///
/// Only the corners matter; interior cells may hold anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinningSquare {
    top: usize,
    left: usize,
    size: usize,
}

impl WinningSquare {
    #[must_use]
    pub const fn new(top: usize, left: usize, size: usize) -> Self {
        assert!(size >= 2, "a winning square spans at least two cells");
        Self { top, left, size }
    }

    /// Side length in cells.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn top_left(&self) -> Position {
        Position::new(self.top, self.left)
    }

    /// Corner cells in the order top-left, top-right, bottom-left, bottom-right.
    #[must_use]
    pub const fn corners(&self) -> [Position; 4] {
        let bottom = self.top + self.size - 1;
        let right = self.left + self.size - 1;
        [
            Position::new(self.top, self.left),
            Position::new(self.top, right),
            Position::new(bottom, self.left),
            Position::new(bottom, right),
        ]
    }

    #[must_use]
    pub fn contains_corner(&self, pos: Position) -> bool {
        self.corners().contains(&pos)
    }
}

impl<const R: usize, const C: usize> Grid<R, C> {
    /// Searches for a square of `player`'s pieces.
    ///
    /// Sizes are tried from 2 upwards, then rows top to bottom, then columns
    /// left to right, and the first match is returned. The smallest square
    /// wins ties, then the topmost, then the leftmost.
    ///
    /// # Example
    ///
    /// ```
    /// use square_four_engine::{Board, Player, Position};
    ///
    /// let mut board = Board::new();
    /// for col in [0, 1, 0, 1] {
    ///     let row = board.available_row(col).unwrap();
    ///     board.place_piece(Position::new(row, col), Player::Red);
    /// }
    ///
    /// let square = board.find_square_win(Player::Red).unwrap();
    /// assert_eq!(square.size(), 2);
    /// assert_eq!(square.top_left(), Position::new(4, 0));
    /// ```
    #[must_use]
    pub fn find_square_win(&self, player: Player) -> Option<WinningSquare> {
        let target = Cell::Piece(player);
        for size in 2..=R.min(C) {
            for top in 0..=R - size {
                for left in 0..=C - size {
                    let square = WinningSquare { top, left, size };
                    if square.corners().iter().all(|&pos| self.get(pos) == target) {
                        return Some(square);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BOARD_COLS, BOARD_ROWS, Board};

    #[test]
    fn test_empty_board_has_no_square() {
        let board = Board::new();
        for player in Player::ALL {
            assert_eq!(board.find_square_win(player), None);
        }
    }

    #[test]
    fn test_fewer_than_four_pieces_never_win() {
        let board = Board::from_rows([
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "RB.....", //
            "RR.BBB.", //
        ]);
        assert_eq!(board.find_square_win(Player::Red), None);
        assert_eq!(board.find_square_win(Player::Blue), None);
    }

    #[test]
    fn test_size_three_square_from_corners_only() {
        let board = Board::from_rows([
            "RBR....", //
            "BRB....", //
            "RBR....", //
            "BRB....", //
            "RBR....", //
            "BRB....", //
        ]);
        // Red holds (0,0),(0,2),(2,0),(2,2) and the centre, but no 2x2 square.
        let square = board.find_square_win(Player::Red).unwrap();
        assert_eq!(square.size(), 3);
        assert_eq!(
            square.corners(),
            [
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(2, 0),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_exact_corners_without_other_pieces() {
        let board = Board::from_rows([
            "R.R....", //
            "B.B....", //
            "R.R....", //
            "B.B....", //
            "B.B....", //
            "B.B....", //
        ]);
        let square = board.find_square_win(Player::Red).unwrap();
        assert_eq!(square, WinningSquare::new(0, 0, 3));
        // Blue's topmost size-3 square starts right below Red's.
        assert_eq!(board.find_square_win(Player::Blue), Some(WinningSquare::new(1, 0, 3)));
    }

    #[test]
    fn test_smallest_square_wins_tie() {
        let board = Board::from_rows([
            "RRR....", //
            "RRB....", //
            "RBR....", //
            "BBB....", //
            "BRB....", //
            "RBR....", //
        ]);
        let square = board.find_square_win(Player::Red).unwrap();
        assert_eq!(square, WinningSquare::new(0, 0, 2));
        assert_eq!(
            square.corners(),
            [
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_topmost_then_leftmost_within_size() {
        let board = Board::from_rows([
            ".......", //
            ".......", //
            ".....BB", //
            ".....BB", //
            "BB...RR", //
            "BB...RR", //
        ]);
        assert_eq!(board.find_square_win(Player::Blue), Some(WinningSquare::new(2, 5, 2)));

        let board = Board::from_rows([
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "BB...BB", //
            "BB...BB", //
        ]);
        assert_eq!(board.find_square_win(Player::Blue), Some(WinningSquare::new(4, 0, 2)));
    }

    #[test]
    fn test_largest_square_spans_full_height() {
        let board = Board::from_rows([
            "R....R.", //
            "B....B.", //
            "B....B.", //
            "B....B.", //
            "B....B.", //
            "R....R.", //
        ]);
        let square = board.find_square_win(Player::Red).unwrap();
        assert_eq!(square.size(), BOARD_ROWS);
        assert_eq!(square.top_left(), Position::new(0, 0));
        assert!(square.corners().iter().all(|pos| pos.col < BOARD_COLS));
    }

    #[test]
    fn test_single_cell_never_counts() {
        let grid = Grid::<1, 1>::from_rows(["R"]);
        assert_eq!(grid.find_square_win(Player::Red), None);
    }

    #[test]
    fn test_contains_corner() {
        let square = WinningSquare::new(1, 2, 3);
        assert!(square.contains_corner(Position::new(3, 4)));
        assert!(!square.contains_corner(Position::new(2, 3)));
    }
}
