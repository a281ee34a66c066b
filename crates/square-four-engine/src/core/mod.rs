//! Board representation and the square-win search.
//!
//! - [`Grid`] / [`Board`] - Fixed-size grid filled bottom-up per column
//! - [`Player`] / [`Cell`] - Piece colours and cell contents
//! - [`WinningSquare`] - Four corners of an axis-aligned square held by one player

pub use self::{board::*, player::*, square::*};

mod board;
mod player;
mod square;

/// Number of rows on the standard board.
pub const BOARD_ROWS: usize = 6;
/// Number of columns on the standard board.
pub const BOARD_COLS: usize = 7;
