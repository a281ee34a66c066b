use square_four_engine::GameSeed;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

const DEFAULT_FPS: u64 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for a reproducible game (32 hex digits)
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Frames per second for the drop animation
    #[clap(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u64).range(1..=240))]
    fps: u64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            fps: DEFAULT_FPS,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, fps } = arg;
    let mut app = PlayApp::new(*fps, *seed);
    Tui::new().run(&mut app)
}
