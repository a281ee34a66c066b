use std::{mem, time::Duration};

/// Generation counter for scheduled resumptions.
///
/// Incremented on every reset; resumptions carrying an older epoch are
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, derive_more::Display)]
pub struct Epoch(u64);

impl Epoch {
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ResumptionKind {
    /// Advance the falling piece by one frame.
    AnimationFrame,
    /// The opponent has finished thinking.
    OpponentMove,
}

/// A deferred continuation of the turn controller.
///
/// Handed to a [`Scheduler`] and delivered back to
/// [`TurnController::resume`](super::TurnController::resume) when due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resumption {
    pub(crate) epoch: Epoch,
    pub(crate) ticket: u64,
    pub(crate) kind: ResumptionKind,
}

impl Resumption {
    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    #[must_use]
    pub const fn kind(&self) -> ResumptionKind {
        self.kind
    }
}

/// Cooperative scheduling capability used by the turn controller.
///
/// Implementations only record the request; they must not call back into the
/// controller from within these methods.
pub trait Scheduler {
    /// Delivers `resumption` once `delay` has elapsed.
    fn after(&mut self, delay: Duration, resumption: Resumption);

    /// Delivers `resumption` on the next display frame.
    fn on_next_frame(&mut self, resumption: Resumption);
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Duration,
    resumption: Resumption,
}

/// Scheduler driven by explicit frame steps over a virtual clock.
///
/// Each call to [`Self::advance`] is one frame: it returns the frame
/// resumptions requested since the previous frame, followed by the timers that
/// have become due, earliest first.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use square_four_engine::{FrameScheduler, Player, TurnController};
///
/// let mut scheduler = FrameScheduler::new();
/// let mut controller = TurnController::builder()
///     .first_player(Player::Blue)
///     .build(&mut scheduler);
///
/// // Run until the opponent's piece has landed.
/// while controller.game_state().board().piece_count() == 0 {
///     for resumption in scheduler.advance(Duration::from_millis(16)) {
///         controller.resume(&mut scheduler, resumption);
///     }
/// }
/// assert_eq!(controller.game_state().current_player(), Player::Red);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    now: Duration,
    frame_queue: Vec<Resumption>,
    timers: Vec<Timer>,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns `true` if nothing is waiting to be delivered.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.frame_queue.is_empty() && self.timers.is_empty()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Runs one frame of `elapsed` duration and returns the due resumptions.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Resumption> {
        self.now += elapsed;
        let mut due = mem::take(&mut self.frame_queue);

        let now = self.now;
        let (mut expired, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|timer| timer.due <= now);
        self.timers = pending;
        expired.sort_by_key(|timer| timer.due);
        due.extend(expired.into_iter().map(|timer| timer.resumption));
        due
    }

    /// Drops every queued resumption.
    pub fn clear(&mut self) {
        self.frame_queue.clear();
        self.timers.clear();
    }
}

impl Scheduler for FrameScheduler {
    fn after(&mut self, delay: Duration, resumption: Resumption) {
        self.timers.push(Timer {
            due: self.now + delay,
            resumption,
        });
    }

    fn on_next_frame(&mut self, resumption: Resumption) {
        self.frame_queue.push(resumption);
    }
}
