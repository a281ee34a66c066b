use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

const RULES: [&str; 6] = [
    "Drop pieces into the 7 columns; they fall to the lowest empty cell.",
    "",
    "Win by holding all four corners of a square: any size from 2×2",
    "up to 6×6, sides parallel to the board. The inside doesn't matter.",
    "",
    "The game is a draw when the board fills up without a square.",
];

/// Rules overlay toggled with `?`.
#[derive(Debug, Default)]
pub struct RulesDisplay;

impl RulesDisplay {
    #[expect(clippy::cast_possible_truncation)]
    fn width() -> u16 {
        let text = RULES.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        text as u16 + 4
    }

    #[expect(clippy::cast_possible_truncation)]
    fn height() -> u16 {
        RULES.len() as u16 + 2
    }
}

impl Widget for RulesDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.centered(
            Constraint::Length(Self::width()),
            Constraint::Length(Self::height()),
        );
        let block = Block::bordered()
            .title(" Rules (? to close) ")
            .padding(Padding::horizontal(1))
            .style(Style::new().fg(Color::White).bg(Color::Black));
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Text::from_iter(RULES.map(Line::from)).render(inner, buf);
    }
}
