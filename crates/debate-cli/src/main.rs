//! Juego en Debate terminal host.

use debate_core::GameState;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod runner;
mod session;

use config::HostConfig;
use session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the game
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = HostConfig::from_env()?;
    info!(
        card_seconds = config.game.card_seconds,
        game_seconds = config.game.game_seconds,
        spin_seconds = config.game.spin_seconds,
        seed = ?config.seed,
        "Starting Juego en Debate..."
    );

    let game = match config.seed {
        Some(seed) => GameState::with_seed(config.game, seed),
        None => GameState::with_config(config.game),
    };

    runner::run(Session::new(game), config.tick).await
}
