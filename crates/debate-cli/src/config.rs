//! Host settings read from the environment.

use debate_core::GameConfig;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Everything the terminal host needs to start a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub game: GameConfig,
    /// Fixed seed for a reproducible wheel
    pub seed: Option<u64>,
    /// Wall-clock length of one engine second
    pub tick: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: None,
            tick: Duration::from_millis(1000),
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse(&lookup, "DEBATE_CARD_SECONDS")? {
            config.game.card_seconds = secs;
        }
        if let Some(secs) = parse(&lookup, "DEBATE_GAME_SECONDS")? {
            config.game.game_seconds = secs;
        }
        if let Some(secs) = parse(&lookup, "DEBATE_SPIN_SECONDS")? {
            config.game.spin_seconds = secs;
        }
        config.seed = parse(&lookup, "DEBATE_SEED")?;
        if let Some(ms) = parse::<u64, _>(&lookup, "DEBATE_TICK_MS")? {
            if ms == 0 {
                return Err(ConfigError::Zero("DEBATE_TICK_MS"));
            }
            config.tick = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn parse<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
