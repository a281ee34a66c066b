use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Text,
    widgets::Widget,
};
use square_four_engine::{Player, Status};

use super::player_color;

#[derive(Debug)]
pub struct StatusDisplay {
    status: Status,
}

impl StatusDisplay {
    pub fn new(status: Status) -> Self {
        Self { status }
    }

    fn message(&self) -> (&'static str, Style) {
        let style = |player| Style::default().fg(player_color(player));
        let bold = |player| style(player).add_modifier(Modifier::BOLD);
        match self.status {
            Status::YourTurn => ("Your turn!", style(Player::Red)),
            Status::OpponentThinking => ("Opponent is thinking…", style(Player::Blue)),
            Status::Dropping(player) => ("Dropping…", style(player)),
            Status::Won(Player::Red) => ("You win!", bold(Player::Red)),
            Status::Won(Player::Blue) => ("Opponent wins!", bold(Player::Blue)),
            Status::Draw => (
                "Draw: the board is full.",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        }
    }
}

impl Widget for StatusDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (message, style) = self.message();
        Text::from(message).style(style).centered().render(area, buf);
    }
}
