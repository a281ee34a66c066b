use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use square_four_engine::{BOARD_COLS, BOARD_ROWS, Cell, GameState, PendingMove, Position};

use super::player_color;

const CELL_WIDTH: u16 = 3;

/// Draws the grid, the falling piece, the hover preview and the winning corners.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    game: &'a GameState,
    pending_move: Option<PendingMove>,
    preview: Option<(usize, usize)>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(game: &'a GameState) -> Self {
        Self {
            game,
            pending_move: None,
            preview: None,
        }
    }

    pub fn pending_move(self, pending_move: Option<PendingMove>) -> Self {
        Self {
            pending_move,
            ..self
        }
    }

    /// Ghost piece for the human at `(row, col)`.
    pub fn preview(self, preview: Option<(usize, usize)>) -> Self {
        Self { preview, ..self }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_COLS as u16 * CELL_WIDTH + 2
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_ROWS as u16 + 2
    }

    /// Row the falling piece is drawn at.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn falling_position(&self) -> Option<Position> {
        self.pending_move.map(|pending| {
            let row = pending.fall_height().floor() as usize;
            Position::new(row.min(pending.target().row), pending.column())
        })
    }

    fn cell_span(&self, pos: Position) -> Span<'static> {
        let winning = self
            .game
            .winning_square()
            .is_some_and(|square| square.contains_corner(pos));

        let (symbol, mut style) = match self.game.board().get(pos) {
            Cell::Piece(player) => (" ● ", Style::default().fg(player_color(player))),
            Cell::Empty => {
                if let Some(pending) = self.pending_move
                    && self.falling_position() == Some(pos)
                {
                    (" ● ", Style::default().fg(player_color(pending.player())))
                } else if self.preview == Some((pos.row, pos.col)) {
                    (
                        " ○ ",
                        Style::default()
                            .fg(player_color(self.game.current_player()))
                            .add_modifier(Modifier::DIM),
                    )
                } else {
                    (" · ", Style::default().fg(Color::DarkGray))
                }
            }
        };
        if winning {
            style = style.bg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        Span::styled(symbol, style)
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = (0..BOARD_ROWS)
            .map(|row| {
                (0..BOARD_COLS)
                    .map(|col| self.cell_span(Position::new(row, col)))
                    .collect::<Line>()
            })
            .collect::<Vec<_>>();
        Paragraph::new(lines)
            .block(Block::bordered().title(" Square Four "))
            .render(area, buf);
    }
}
