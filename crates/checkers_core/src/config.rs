//! Rule variants and presentation parameters for a game.

use crate::types::Player;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid game config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("animation frame interval must be non-zero")]
    ZeroFrame,
}

/// What happens after a capture that leaves the same piece another jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainRule {
    /// The piece must keep jumping until it cannot.
    #[default]
    Mandatory,
    /// The turn ends after one capture.
    SingleJump,
}

/// Outcome for a side that still has pieces but cannot move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockedRule {
    #[default]
    OpponentWins,
    Draw,
}

/// Timing of a simulated drag. None of this affects the rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Pause before an agent picks its piece up.
    pub delay_ms: u64,
    /// Time from pick-up to drop.
    pub duration_ms: u64,
    /// Interval between animation ticks.
    pub frame_ms: u64,
    /// Distance, in surface units, at which the piece counts as arrived.
    pub tolerance: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 250,
            duration_ms: 300,
            frame_ms: 10,
            tolerance: 1.0,
        }
    }
}

impl AnimationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub first_player: Player,
    pub chain_rule: ChainRule,
    pub blocked_rule: BlockedRule,
    pub animation: AnimationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_player: Player::P2,
            chain_rule: ChainRule::default(),
            blocked_rule: BlockedRule::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parses a config from TOML text; missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.frame_ms == 0 {
            return Err(ConfigError::ZeroFrame);
        }
        Ok(())
    }
}
