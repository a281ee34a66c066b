use std::fmt;

use arrayvec::ArrayVec;
use serde::{Serialize, Serializer};

use super::{BOARD_COLS, BOARD_ROWS, Cell, Player};

/// Cell coordinate on a grid.
///
/// Row 0 is the top row, so the lowest empty cell of a column has the
/// greatest row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fixed-size grid of `R` rows by `C` columns.
///
/// Pieces only enter a column at its lowest empty cell, so no piece ever
/// floats above an empty cell of the same column. The only mutation path is
/// [`Self::place_piece`], which asserts this.
///
/// # Example
///
/// ```
/// use square_four_engine::{Board, Player, Position};
///
/// let mut board = Board::new();
/// let row = board.available_row(3).unwrap();
/// assert_eq!(row, 5);
///
/// board.place_piece(Position::new(row, 3), Player::Red);
/// assert_eq!(board.available_row(3), Some(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid<const R: usize, const C: usize> {
    cells: [[Cell; C]; R],
}

/// The standard 6×7 board.
pub type Board = Grid<BOARD_ROWS, BOARD_COLS>;

impl<const R: usize, const C: usize> Default for Grid<R, C> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<const R: usize, const C: usize> Grid<R, C> {
    pub const ROWS: usize = R;
    pub const COLS: usize = C;

    pub const EMPTY: Self = Self {
        cells: [[Cell::Empty; C]; R],
    };

    /// Creates a grid with every cell empty.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Returns the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; C]> {
        self.cells.iter()
    }

    /// Returns `true` iff every cell holds a piece.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Returns the row of the lowest empty cell in `col`.
    ///
    /// Scans from the bottom row upwards. `None` means the column is full,
    /// which callers treat as "column unavailable".
    ///
    /// `col` must be in `0..C`; callers validate column input.
    #[must_use]
    pub fn available_row(&self, col: usize) -> Option<usize> {
        (0..R).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Returns every column that can still receive a piece, in ascending order.
    #[must_use]
    pub fn legal_columns(&self) -> ArrayVec<usize, C> {
        (0..C)
            .filter(|&col| self.available_row(col).is_some())
            .collect()
    }

    /// Writes `player` into the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not the lowest empty cell of its column.
    pub fn place_piece(&mut self, pos: Position, player: Player) {
        assert_eq!(
            self.available_row(pos.col),
            Some(pos.row),
            "{pos} is not the lowest empty cell of column {}",
            pos.col,
        );
        self.cells[pos.row][pos.col] = Cell::Piece(player);
    }
}

impl<const R: usize, const C: usize> Serialize for Grid<R, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.cells.iter().map(<[Cell; C]>::as_slice))
    }
}

impl<const R: usize, const C: usize> fmt::Display for Grid<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Piece(Player::Red) => 'R',
                    Cell::Piece(Player::Blue) => 'B',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl<const R: usize, const C: usize> Grid<R, C> {
    /// Builds a grid from its textual form (`R`, `B`, `.`), top row first.
    ///
    /// Pieces are placed bottom-up so the fill invariant is checked.
    pub(crate) fn from_rows(rows: [&str; R]) -> Self {
        let mut grid = Self::EMPTY;
        for (row, line) in rows.iter().enumerate().rev() {
            assert_eq!(line.len(), C, "row {row} has wrong width: {line:?}");
            for (col, ch) in line.chars().enumerate() {
                let player = match ch {
                    '.' => continue,
                    'R' => Player::Red,
                    'B' => Player::Blue,
                    _ => panic!("unexpected cell {ch:?}"),
                };
                grid.place_piece(Position::new(row, col), player);
            }
        }
        grid
    }
}
