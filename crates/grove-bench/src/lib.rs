//! Benchmark profiles and utilities for the grove stacking-game core.
//!
//! Provides pre-built [`GameConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: default tuning, a handful of trees per round
//! - [`stress_profile`]: tall trees and long rounds, for pool churn
//! - [`play_round`]: drive a game through one whole round at 60 Hz

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use grove_engine::{Game, GameConfig, GameError, GameEvent, PlayState};

pub use grove_test_utils::fixtures::FRAME;

/// Default tuning with a fixed seed.
pub fn reference_profile(seed: u64) -> GameConfig {
    GameConfig {
        seed,
        ..GameConfig::default()
    }
}

/// Trees of 40 to 60 pieces, 8 to 12 per round.
///
/// Piece fades overlap heavily here, so the piece pool sees many
/// concurrent actives and a deep reuse queue.
pub fn stress_profile(seed: u64) -> GameConfig {
    let mut cfg = reference_profile(seed);
    cfg.tree.min_pieces = 40;
    cfg.tree.max_pieces = 60;
    cfg.round.min_trees = 8;
    cfg.round.max_trees = 12;
    cfg.pool.min_pieces = 128;
    cfg
}

/// Play until the current round finishes, removing a piece whenever the
/// game accepts input. Returns the number of frames ticked.
///
/// The game must already be running (see [`Game::start_round`]).
pub fn play_round(game: &mut Game) -> Result<u64, GameError> {
    let mut frames = 0;
    loop {
        if game.state() == PlayState::Play {
            game.remove_piece()?;
        }
        game.tick(FRAME)?;
        frames += 1;
        let finished = game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::RoundFinished { .. }));
        if finished {
            return Ok(frames);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_valid() {
        assert_eq!(reference_profile(1).validate(), Ok(()));
        assert_eq!(stress_profile(1).validate(), Ok(()));
    }

    #[test]
    fn reference_round_finishes() {
        let mut game = Game::new(reference_profile(3)).unwrap();
        game.start_round().unwrap();
        let frames = play_round(&mut game).unwrap();
        assert!(frames > 0);
        assert_eq!(game.round().0, 2);
    }
}
