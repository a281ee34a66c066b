use std::{ops::RangeInclusive, time::Duration};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::{debug, info, trace};

use crate::{
    GameSeed,
    core::{BOARD_COLS, Player, Position},
};

use super::{
    Epoch, GameState, OpponentPolicy, Outcome, PendingMove, RandomOpponent, Resumption,
    ResumptionKind, Scheduler,
};

/// Default range of the opponent's simulated thinking time.
pub const DEFAULT_THINKING_DELAY: RangeInclusive<Duration> =
    Duration::from_millis(500)..=Duration::from_millis(1200);

/// Phase of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ControllerState {
    /// The human side may choose a column.
    AwaitingInput,
    /// The opponent's move is scheduled after its thinking delay.
    AwaitingOpponent,
    /// A piece is falling; the board is unchanged until it lands.
    Animating,
    /// The game is decided; only a reset leaves this state.
    Terminal,
}

/// Builder for [`TurnController`].
#[derive(Debug)]
pub struct TurnControllerBuilder {
    seed: Option<GameSeed>,
    first_player: Option<Player>,
    thinking_delay: RangeInclusive<Duration>,
    opponent: Option<Box<dyn OpponentPolicy>>,
}

impl Default for TurnControllerBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            first_player: None,
            thinking_delay: DEFAULT_THINKING_DELAY,
            opponent: None,
        }
    }
}

impl TurnControllerBuilder {
    /// Seeds every random decision, including the default opponent.
    #[must_use]
    pub fn seed(self, seed: GameSeed) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Fixes who moves first in the initial game. Resets still draw at random.
    #[must_use]
    pub fn first_player(self, player: Player) -> Self {
        Self {
            first_player: Some(player),
            ..self
        }
    }

    #[must_use]
    pub fn thinking_delay(self, range: RangeInclusive<Duration>) -> Self {
        assert!(
            range.start() <= range.end(),
            "empty thinking delay range: {range:?}"
        );
        Self {
            thinking_delay: range,
            ..self
        }
    }

    #[must_use]
    pub fn opponent<P>(self, opponent: P) -> Self
    where
        P: OpponentPolicy + 'static,
    {
        Self {
            opponent: Some(Box::new(opponent)),
            ..self
        }
    }

    /// Creates the controller and starts the first game.
    pub fn build<S>(self, scheduler: &mut S) -> TurnController
    where
        S: Scheduler + ?Sized,
    {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let opponent = self
            .opponent
            .unwrap_or_else(|| Box::new(RandomOpponent::with_seed(seed.derive(2))));
        let mut rng = Pcg32::from_seed(seed.derive(1).to_bytes());
        let first_player = self
            .first_player
            .unwrap_or_else(|| random_player(&mut rng));

        let mut controller = TurnController {
            game: GameState::new(first_player),
            state: ControllerState::AwaitingInput,
            pending: None,
            epoch: Epoch::default(),
            next_ticket: 0,
            outstanding: None,
            rng,
            thinking_delay: self.thinking_delay,
            opponent,
        };
        controller.start_game(scheduler, first_player);
        controller
    }
}

fn random_player(rng: &mut Pcg32) -> Player {
    if rng.random_bool(0.5) {
        Player::Red
    } else {
        Player::Blue
    }
}

/// Owns the game state and sequences turns, drops and resets.
///
/// The controller never blocks. Deferred work (the next animation frame, the
/// opponent's move after its thinking delay) is requested from a
/// [`Scheduler`] and continues when the host passes the resumption back to
/// [`Self::resume`]. At most one resumption is outstanding at a time; anything
/// else delivered to `resume` is discarded, including everything scheduled
/// before the last reset.
///
/// # Game Flow
///
/// 1. Human column choice or opponent move creates a [`PendingMove`]
/// 2. Each animation frame advances it until it reaches its landing cell
/// 3. The piece lands: the mover's square win is checked, then a full board
/// 4. Undecided games pass the turn to the other side
#[derive(Debug)]
pub struct TurnController {
    game: GameState,
    state: ControllerState,
    pending: Option<PendingMove>,
    epoch: Epoch,
    next_ticket: u64,
    outstanding: Option<Resumption>,
    rng: Pcg32,
    thinking_delay: RangeInclusive<Duration>,
    opponent: Box<dyn OpponentPolicy>,
}

impl TurnController {
    #[must_use]
    pub fn builder() -> TurnControllerBuilder {
        TurnControllerBuilder::default()
    }

    /// Creates a controller with a random seed and a random opponent.
    pub fn new<S>(scheduler: &mut S) -> Self
    where
        S: Scheduler + ?Sized,
    {
        Self::builder().build(scheduler)
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The falling piece, present only while [`ControllerState::Animating`].
    #[must_use]
    pub fn pending_move(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Drops the human's piece into `col`.
    ///
    /// Returns `false` and changes nothing when input is not expected, the
    /// column does not exist or the column is full.
    pub fn select_column<S>(&mut self, scheduler: &mut S, col: usize) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if !self.state.is_awaiting_input() {
            trace!(state = ?self.state, col, "column selection ignored");
            return false;
        }
        if col >= BOARD_COLS {
            trace!(col, "column out of range");
            return false;
        }
        let Some(row) = self.game.board().available_row(col) else {
            trace!(col, "column full");
            return false;
        };
        self.start_drop(scheduler, Position::new(row, col));
        true
    }

    /// Starts a fresh game with a randomly chosen first player.
    ///
    /// Honoured in every state. Whatever was scheduled before is invalidated.
    pub fn reset<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        self.epoch = self.epoch.next();
        self.outstanding = None;
        self.pending = None;
        let first_player = random_player(&mut self.rng);
        debug!(epoch = %self.epoch, "game reset");
        self.start_game(scheduler, first_player);
    }

    /// Continues deferred work.
    ///
    /// Returns `false` if `resumption` is stale or already consumed, in which
    /// case nothing changes.
    pub fn resume<S>(&mut self, scheduler: &mut S, resumption: Resumption) -> bool
    where
        S: Scheduler + ?Sized,
    {
        if self.outstanding != Some(resumption) {
            trace!(
                epoch = %resumption.epoch,
                current_epoch = %self.epoch,
                kind = ?resumption.kind,
                "discarding resumption"
            );
            return false;
        }
        self.outstanding = None;

        match resumption.kind {
            ResumptionKind::AnimationFrame => self.advance_animation(scheduler),
            ResumptionKind::OpponentMove => self.play_opponent_move(scheduler),
        }
        true
    }

    fn start_game<S>(&mut self, scheduler: &mut S, first_player: Player)
    where
        S: Scheduler + ?Sized,
    {
        self.game = GameState::new(first_player);
        debug!(epoch = %self.epoch, %first_player, "game started");
        self.begin_turn(scheduler);
    }

    fn begin_turn<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        if self.game.current_player().is_human() {
            self.set_state(ControllerState::AwaitingInput);
            return;
        }
        let delay = self.rng.random_range(self.thinking_delay.clone());
        let resumption = self.issue(ResumptionKind::OpponentMove);
        scheduler.after(delay, resumption);
        debug!(?delay, "opponent thinking");
        self.set_state(ControllerState::AwaitingOpponent);
    }

    fn play_opponent_move<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        assert!(self.state.is_awaiting_opponent());
        let col = self.opponent.choose_column(self.game.board());
        assert!(col < BOARD_COLS, "opponent chose column {col} out of range");
        let Some(row) = self.game.board().available_row(col) else {
            panic!("opponent chose full column {col}");
        };
        debug!(col, "opponent moves");
        self.start_drop(scheduler, Position::new(row, col));
    }

    fn start_drop<S>(&mut self, scheduler: &mut S, target: Position)
    where
        S: Scheduler + ?Sized,
    {
        let player = self.game.current_player();
        self.pending = Some(PendingMove::new(target, player));
        let resumption = self.issue(ResumptionKind::AnimationFrame);
        scheduler.on_next_frame(resumption);
        debug!(%player, %target, "drop started");
        self.set_state(ControllerState::Animating);
    }

    fn advance_animation<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler + ?Sized,
    {
        let pending = self
            .pending
            .as_mut()
            .expect("animation frame without a falling piece");
        if !pending.step() {
            let resumption = self.issue(ResumptionKind::AnimationFrame);
            scheduler.on_next_frame(resumption);
            return;
        }

        let target = pending.target();
        self.pending = None;
        match self.game.land_piece(target) {
            Some(outcome) => {
                match outcome {
                    Outcome::Winner(player) => {
                        info!(%player, square = ?self.game.winning_square(), "game won");
                    }
                    Outcome::Draw => info!("game drawn"),
                }
                self.set_state(ControllerState::Terminal);
            }
            None => self.begin_turn(scheduler),
        }
    }

    fn issue(&mut self, kind: ResumptionKind) -> Resumption {
        self.next_ticket += 1;
        let resumption = Resumption {
            epoch: self.epoch,
            ticket: self.next_ticket,
            kind,
        };
        self.outstanding = Some(resumption);
        resumption
    }

    fn set_state(&mut self, state: ControllerState) {
        trace!(from = ?self.state, to = ?state, "state transition");
        self.state = state;
    }
}
