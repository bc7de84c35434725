//! Plays two rounds without a renderer, printing what a UI would show.
//!
//! ```text
//! RUST_LOG=grove_engine=debug cargo run -p grove-engine --example headless_round -- 42
//! ```
//!
//! The optional argument is the seed.

use std::error::Error;
use std::time::Duration;

use grove_engine::{Game, GameConfig, GameEvent, PlayState, Removal};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(7);
    let config = GameConfig {
        seed,
        ..GameConfig::default()
    };
    let mut game = Game::new(config)?;
    game.start_round()?;

    let mut frames = 0u64;
    let mut rounds_finished = 0;
    while rounds_finished < 2 {
        if game.state() == PlayState::Play {
            if let Removal::Removed { remaining } = game.remove_piece()? {
                println!("frame {frames:>5}: removed a piece, {remaining} left");
            }
        }
        game.tick(FRAME)?;
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::RoundStarted { round, trees } => {
                    println!("frame {frames:>5}: round {round} with {trees} trees");
                }
                GameEvent::TreeSpawned {
                    position,
                    pieces,
                    style,
                    ..
                } => println!(
                    "frame {frames:>5}: tree of {pieces} at ({:.1}, {:.1}) growing {style:?}",
                    position.x, position.z
                ),
                GameEvent::TreeDestroyed { .. } => println!("frame {frames:>5}: tree cleared"),
                GameEvent::RoundFinished { round } => {
                    rounds_finished += 1;
                    println!("frame {frames:>5}: round {round} finished");
                }
                GameEvent::FeedbackShown { text } => println!("frame {frames:>5}: [{text}]"),
                _ => {}
            }
        }
    }

    let camera = game.camera_position();
    println!(
        "done after {frames} frames; camera at ({:.1}, {:.1}, {:.1})",
        camera.x, camera.y, camera.z
    );
    Ok(())
}
