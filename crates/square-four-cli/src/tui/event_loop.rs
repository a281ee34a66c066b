use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

/// Events produced by [`EventLoop::next`].
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    Tick,
    Render,
    Terminal(Event),
}

/// Merges the tick clock with terminal input.
///
/// A render is emitted after every tick or terminal event, before blocking
/// again.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    next_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            next_tick: Instant::now(),
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.next_tick = Instant::now();
    }

    /// Blocks until the next event is available.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now >= self.next_tick
            {
                // Skip missed ticks instead of replaying them in a burst.
                self.next_tick = Instant::max(self.next_tick + interval, now);
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }
            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self.tick_interval.map_or(Duration::from_secs(1), |_| {
                self.next_tick.saturating_duration_since(now)
            });
            if event::poll(timeout)? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}
