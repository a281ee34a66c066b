pub use self::{
    board_display::BoardDisplay, rules_display::RulesDisplay, status_display::StatusDisplay,
};

use ratatui::style::Color;
use square_four_engine::Player;

mod board_display;
mod rules_display;
mod status_display;

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::LightRed,
        Player::Blue => Color::LightBlue,
    }
}
