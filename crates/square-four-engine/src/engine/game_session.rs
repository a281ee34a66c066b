use std::time::Duration;

use crate::{GameSeed, core::Player};

use super::{
    ControllerState, FrameScheduler, GameState, OpponentPolicy, Outcome, PendingMove,
    TurnController, TurnControllerBuilder,
};

/// What the status line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Status {
    YourTurn,
    OpponentThinking,
    Dropping(Player),
    Won(Player),
    Draw,
}

/// A game driven one display frame at a time.
///
/// Bundles a [`TurnController`] with a [`FrameScheduler`] whose virtual clock
/// advances by `1 / fps` per [`Self::increment_frame`].
///
/// # Example
///
/// ```
/// use square_four_engine::{GameSession, Player, Status};
///
/// let mut session = GameSession::builder(60).first_player(Player::Red).build();
/// assert_eq!(session.status(), Status::YourTurn);
///
/// assert!(session.select_column(3));
/// assert_eq!(session.status(), Status::Dropping(Player::Red));
///
/// while session.status().is_dropping() {
///     session.increment_frame();
/// }
/// assert_eq!(session.status(), Status::OpponentThinking);
/// ```
#[derive(Debug)]
pub struct GameSession {
    controller: TurnController,
    scheduler: FrameScheduler,
    fps: u64,
    total_frames: u64,
}

/// Builder for [`GameSession`].
#[derive(Debug)]
pub struct GameSessionBuilder {
    fps: u64,
    controller: TurnControllerBuilder,
}

impl GameSessionBuilder {
    #[must_use]
    pub fn seed(self, seed: GameSeed) -> Self {
        Self {
            controller: self.controller.seed(seed),
            ..self
        }
    }

    #[must_use]
    pub fn first_player(self, player: Player) -> Self {
        Self {
            controller: self.controller.first_player(player),
            ..self
        }
    }

    #[must_use]
    pub fn opponent<P>(self, opponent: P) -> Self
    where
        P: OpponentPolicy + 'static,
    {
        Self {
            controller: self.controller.opponent(opponent),
            ..self
        }
    }

    #[must_use]
    pub fn build(self) -> GameSession {
        let mut scheduler = FrameScheduler::new();
        let controller = self.controller.build(&mut scheduler);
        GameSession {
            controller,
            scheduler,
            fps: self.fps,
            total_frames: 0,
        }
    }
}

impl GameSession {
    #[must_use]
    pub fn new(fps: u64) -> Self {
        Self::builder(fps).build()
    }

    #[must_use]
    pub fn with_seed(fps: u64, seed: GameSeed) -> Self {
        Self::builder(fps).seed(seed).build()
    }

    /// # Panics
    ///
    /// Panics if `fps` is zero.
    #[must_use]
    pub fn builder(fps: u64) -> GameSessionBuilder {
        assert!(fps > 0, "frame rate must be positive");
        GameSessionBuilder {
            fps,
            controller: TurnController::builder(),
        }
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        self.controller.game_state()
    }

    #[must_use]
    pub fn controller_state(&self) -> ControllerState {
        self.controller.state()
    }

    #[must_use]
    pub fn pending_move(&self) -> Option<&PendingMove> {
        self.controller.pending_move()
    }

    #[must_use]
    pub fn fps(&self) -> u64 {
        self.fps
    }

    /// Play time covered by the frames run so far.
    #[must_use]
    pub fn duration(&self) -> Duration {
        frames_to_duration(self.total_frames, self.fps)
    }

    #[must_use]
    pub fn status(&self) -> Status {
        match self.controller.state() {
            ControllerState::AwaitingInput => Status::YourTurn,
            ControllerState::AwaitingOpponent => Status::OpponentThinking,
            ControllerState::Animating => {
                let player = self
                    .pending_move()
                    .map_or(self.game_state().current_player(), PendingMove::player);
                Status::Dropping(player)
            }
            ControllerState::Terminal => match self.game_state().outcome() {
                Some(Outcome::Winner(player)) => Status::Won(player),
                Some(Outcome::Draw) | None => Status::Draw,
            },
        }
    }

    /// Landing row for a hover preview in `col`.
    ///
    /// `None` unless the human may move and the column exists and has room.
    #[must_use]
    pub fn preview_row(&self, col: usize) -> Option<usize> {
        if !self.controller.state().is_awaiting_input() || col >= crate::BOARD_COLS {
            return None;
        }
        self.game_state().board().available_row(col)
    }

    /// Runs one frame: advances the clock and delivers due resumptions.
    pub fn increment_frame(&mut self) {
        let previous = frames_to_duration(self.total_frames, self.fps);
        self.total_frames += 1;
        let elapsed = frames_to_duration(self.total_frames, self.fps) - previous;
        for resumption in self.scheduler.advance(elapsed) {
            self.controller.resume(&mut self.scheduler, resumption);
        }
    }

    pub fn select_column(&mut self, col: usize) -> bool {
        self.controller.select_column(&mut self.scheduler, col)
    }

    pub fn reset(&mut self) {
        self.controller.reset(&mut self.scheduler);
    }
}

fn frames_to_duration(frames: u64, fps: u64) -> Duration {
    const NANOS_PER_SEC: u64 = 1_000_000_000;
    let secs = frames / fps;
    let nanos = (frames % fps) * NANOS_PER_SEC / fps;
    Duration::new(secs, u32::try_from(nanos).unwrap_or(u32::MAX))
}
