use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use square_four_engine::{
    GameSeed, GameSession, OpponentPolicy as _, Outcome, Player, RandomOpponent, Status,
};

const DEFAULT_GAMES: usize = 100;
const DEFAULT_FPS: u64 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[clap(long, default_value_t = DEFAULT_GAMES)]
    games: usize,
    /// Seed for a reproducible run (32 hex digits)
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Frames per second of the virtual clock
    #[clap(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u64).range(1..=240))]
    fps: u64,
}

#[derive(Debug, Default, PartialEq, Serialize)]
struct Summary {
    seed: Option<GameSeed>,
    games: usize,
    red_wins: usize,
    blue_wins: usize,
    draws: usize,
    average_pieces: f64,
    average_seconds: f64,
}

impl Summary {
    #[expect(clippy::cast_precision_loss)]
    fn finish(&mut self, total_pieces: usize, total_time: Duration) {
        if self.games > 0 {
            self.average_pieces = total_pieces as f64 / self.games as f64;
            self.average_seconds = total_time.as_secs_f64() / self.games as f64;
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let summary = simulate(arg);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Plays `arg.games` games in one session, with a random player on the human side.
fn simulate(arg: &SimulateArg) -> Summary {
    let SimulateArg { games, seed, fps } = arg;

    let (mut session, mut stand_in) = match seed {
        Some(seed) => {
            let mut rng = Pcg32::from_seed(seed.to_bytes());
            (
                GameSession::with_seed(*fps, rng.random()),
                RandomOpponent::with_seed(rng.random()),
            )
        }
        None => (GameSession::new(*fps), RandomOpponent::new()),
    };

    let mut summary = Summary {
        seed: *seed,
        ..Summary::default()
    };
    let mut total_pieces = 0;
    let mut game_start = Duration::ZERO;

    for game in 0..*games {
        if game > 0 {
            session.reset();
        }
        loop {
            match session.status() {
                Status::YourTurn => {
                    let col = stand_in.choose_column(session.game_state().board());
                    _ = session.select_column(col);
                }
                Status::Won(_) | Status::Draw => break,
                Status::OpponentThinking | Status::Dropping(_) => session.increment_frame(),
            }
        }

        let state = session.game_state();
        let pieces = state.board().piece_count();
        match state.outcome() {
            Some(Outcome::Winner(Player::Red)) => summary.red_wins += 1,
            Some(Outcome::Winner(Player::Blue)) => summary.blue_wins += 1,
            Some(Outcome::Draw) | None => summary.draws += 1,
        }
        total_pieces += pieces;
        summary.games += 1;
        tracing::info!(
            game,
            outcome = ?state.outcome(),
            pieces,
            elapsed = ?session.duration() - game_start,
            "simulated game finished"
        );
        game_start = session.duration();
    }

    summary.finish(total_pieces, session.duration());
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(games: usize) -> SimulateArg {
        SimulateArg {
            games,
            seed: Some("0123456789abcdef0123456789abcdef".parse().unwrap()),
            fps: DEFAULT_FPS,
        }
    }

    #[test]
    fn test_summary_tallies_every_game() {
        let summary = simulate(&arg(5));
        assert_eq!(summary.games, 5);
        assert_eq!(summary.red_wins + summary.blue_wins + summary.draws, 5);
        // A win needs at least four pieces from the winner and three from the loser.
        assert!((7.0..=42.0).contains(&summary.average_pieces));
        assert!(summary.average_seconds > 0.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        assert_eq!(simulate(&arg(3)), simulate(&arg(3)));
    }

    #[test]
    fn test_zero_games_leaves_averages_at_zero() {
        let summary = simulate(&arg(0));
        assert_eq!(summary.games, 0);
        assert_eq!(summary.red_wins + summary.blue_wins + summary.draws, 0);
        assert!(summary.average_pieces.abs() < f64::EPSILON);
        assert!(summary.average_seconds.abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_serializes_seed_as_hex() {
        let json = serde_json::to_value(simulate(&arg(1))).unwrap();
        assert_eq!(json["seed"], "0123456789abcdef0123456789abcdef");
        assert_eq!(json["games"], 1);
    }
}
