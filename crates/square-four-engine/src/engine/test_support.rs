use std::{collections::VecDeque, time::Duration};

use crate::core::Board;

use super::{ControllerState, FrameScheduler, OpponentPolicy, TurnController};

pub(crate) const FRAME: Duration = Duration::from_millis(16);

/// Column order for a full 42-move game in which neither side ever holds a
/// square. Moves alternate starting with Red.
///
/// Final position:
///
/// ```text
/// RRBBRBR
/// BRRRRBB
/// RRBRBBR
/// BRRBBRB
/// RBRRBRB
/// BBBBBRR
/// ```
pub(crate) const DRAW_ORDER: [usize; 42] = [
    5, 0, 0, 0, 0, 0, 0, 1, 5, 1, 1, 2, 1, 3, 1, 4, 1, 4, 2, 4, 2, //
    2, 2, 2, 3, 3, 3, 4, 3, 3, 5, 5, 4, 5, 6, 6, 4, 6, 6, 6, 6, 5, //
];

/// Opponent that plays a fixed list of columns.
#[derive(Debug, Default)]
pub(crate) struct ScriptedOpponent {
    columns: VecDeque<usize>,
}

impl ScriptedOpponent {
    pub(crate) fn new(columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }
}

impl OpponentPolicy for ScriptedOpponent {
    fn choose_column(&mut self, _board: &Board) -> usize {
        self.columns.pop_front().expect("scripted opponent ran out of moves")
    }
}

/// Runs `frames` frames, delivering every due resumption.
pub(crate) fn pump(controller: &mut TurnController, scheduler: &mut FrameScheduler, frames: usize) {
    for _ in 0..frames {
        for resumption in scheduler.advance(FRAME) {
            controller.resume(scheduler, resumption);
        }
    }
}

/// Runs frames until the controller waits for human input or the game ends.
pub(crate) fn settle(controller: &mut TurnController, scheduler: &mut FrameScheduler) {
    for _ in 0..10_000 {
        if matches!(
            controller.state(),
            ControllerState::AwaitingInput | ControllerState::Terminal
        ) {
            return;
        }
        pump(controller, scheduler, 1);
    }
    panic!("controller never settled: {:?}", controller.state());
}
