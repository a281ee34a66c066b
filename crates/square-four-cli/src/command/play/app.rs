use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::Text,
};
use square_four_engine::{BOARD_COLS, GameSeed, GameSession, Status};

use crate::{
    tui::{App, Tui},
    view::widgets::{BoardDisplay, RulesDisplay, StatusDisplay},
};

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    cursor: usize,
    show_rules: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(fps: u64, seed: Option<GameSeed>) -> Self {
        let session = match seed {
            Some(seed) => GameSession::with_seed(fps, seed),
            None => GameSession::new(fps),
        };
        Self::with_session(session)
    }

    fn with_session(session: GameSession) -> Self {
        Self {
            session,
            cursor: BOARD_COLS / 2,
            show_rules: false,
            is_exiting: false,
        }
    }

    fn help_text(&self) -> &'static str {
        match self.session.status() {
            Status::YourTurn => {
                "Controls: ← → (Move) | ↓ Enter (Drop) | 1-7 (Column) | R (Reset) | ? (Rules) | Q (Quit)"
            }
            Status::Won(_) | Status::Draw => "Controls: R (New Game) | ? (Rules) | Q (Quit)",
            Status::OpponentThinking | Status::Dropping(_) => {
                "Controls: R (Reset) | ? (Rules) | Q (Quit)"
            }
        }
    }
}

impl App for PlayApp {
    #[expect(clippy::cast_precision_loss)]
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(self.session.fps() as f64);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = usize::min(self.cursor + 1, BOARD_COLS - 1),
            KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ') => {
                _ = self.session.select_column(self.cursor);
            }
            KeyCode::Char(ch @ '1'..='7') => {
                let col = usize::from(ch as u8 - b'1');
                if self.session.select_column(col) {
                    self.cursor = col;
                }
            }
            KeyCode::Char('r') => self.session.reset(),
            KeyCode::Char('?') => self.show_rules = !self.show_rules,
            KeyCode::Esc if self.show_rules => self.show_rules = false,
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let board_display = BoardDisplay::new(self.session.game_state())
            .pending_move(self.session.pending_move().copied())
            .preview(
                self.session
                    .preview_row(self.cursor)
                    .map(|row| (row, self.cursor)),
            );
        let status_display = StatusDisplay::new(self.session.status());
        let help_text = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [status_area, board_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(board_display.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area] = Layout::horizontal([Constraint::Length(board_display.width())])
            .flex(Flex::Center)
            .areas(board_area);

        frame.render_widget(status_display, status_area);
        frame.render_widget(&board_display, board_area);
        frame.render_widget(help_text, help_area);
        if self.show_rules {
            frame.render_widget(RulesDisplay, frame.area());
        }
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.session.increment_frame();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use square_four_engine::{Player, Position};

    use super::*;

    const SEED: &str = "00112233445566778899aabbccddeeff";

    fn app() -> PlayApp {
        let session = GameSession::builder(60)
            .seed(SEED.parse().unwrap())
            .first_player(Player::Red)
            .build();
        PlayApp::with_session(session)
    }

    fn press(app: &mut PlayApp, tui: &mut Tui, code: KeyCode) {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        app.handle_event(tui, event);
    }

    fn run_frames(app: &mut PlayApp, tui: &mut Tui, frames: usize) {
        for _ in 0..frames {
            app.update(tui);
        }
    }

    #[test]
    fn test_cursor_is_clamped_to_board() {
        let mut tui = Tui::new();
        let mut app = app();
        assert_eq!(app.cursor, BOARD_COLS / 2);

        for _ in 0..10 {
            press(&mut app, &mut tui, KeyCode::Left);
        }
        assert_eq!(app.cursor, 0);

        for _ in 0..10 {
            press(&mut app, &mut tui, KeyCode::Right);
        }
        assert_eq!(app.cursor, BOARD_COLS - 1);
    }

    #[test]
    fn test_enter_drops_at_cursor() {
        let mut tui = Tui::new();
        let mut app = app();
        press(&mut app, &mut tui, KeyCode::Right);
        press(&mut app, &mut tui, KeyCode::Enter);

        assert_eq!(app.session.status(), Status::Dropping(Player::Red));
        let pending = app.session.pending_move().unwrap();
        assert_eq!(pending.target(), Position::new(5, 4));

        run_frames(&mut app, &mut tui, 30);
        assert_eq!(
            app.session.game_state().board().get(Position::new(5, 4)),
            square_four_engine::Cell::Piece(Player::Red)
        );
    }

    #[test]
    fn test_digit_drops_into_column_and_moves_cursor() {
        let mut tui = Tui::new();
        let mut app = app();
        press(&mut app, &mut tui, KeyCode::Char('1'));

        assert_eq!(app.cursor, 0);
        assert_eq!(app.session.pending_move().unwrap().column(), 0);
    }

    #[test]
    fn test_digits_past_last_column_are_ignored() {
        let mut tui = Tui::new();
        let mut app = app();
        for ch in ['8', '9', '0'] {
            press(&mut app, &mut tui, KeyCode::Char(ch));
        }
        assert_eq!(app.cursor, BOARD_COLS / 2);
        assert_eq!(app.session.status(), Status::YourTurn);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut tui = Tui::new();
        let mut app = app();
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        app.handle_event(&mut tui, Event::Key(release));
        assert!(!app.should_exit());
    }

    #[test]
    fn test_reset_clears_board() {
        let mut tui = Tui::new();
        let mut app = app();
        press(&mut app, &mut tui, KeyCode::Char('4'));
        run_frames(&mut app, &mut tui, 30);
        assert_eq!(app.session.game_state().board().piece_count(), 1);

        press(&mut app, &mut tui, KeyCode::Char('r'));
        assert_eq!(app.session.game_state().board().piece_count(), 0);
        assert!(app.session.pending_move().is_none());
    }

    #[test]
    fn test_rules_toggle_and_escape() {
        let mut tui = Tui::new();
        let mut app = app();
        press(&mut app, &mut tui, KeyCode::Char('?'));
        assert!(app.show_rules);
        press(&mut app, &mut tui, KeyCode::Char('?'));
        assert!(!app.show_rules);

        press(&mut app, &mut tui, KeyCode::Char('?'));
        press(&mut app, &mut tui, KeyCode::Esc);
        assert!(!app.show_rules);
        assert!(!app.should_exit());

        press(&mut app, &mut tui, KeyCode::Esc);
        assert!(app.should_exit());
    }

    #[test]
    fn test_q_quits() {
        let mut tui = Tui::new();
        let mut app = app();
        press(&mut app, &mut tui, KeyCode::Char('q'));
        assert!(app.should_exit());
    }
}
