use serde::Serialize;

/// One of the two sides of the game.
///
/// `Red` is the side controlled through column selection, `Blue` is the
/// automated opponent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display, derive_more::IsVariant,
)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub const ALL: [Self; 2] = [Self::Red, Self::Blue];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    #[must_use]
    pub const fn is_human(self) -> bool {
        matches!(self, Self::Red)
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Player),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn player(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Piece(player) => Some(player),
        }
    }
}
