//! Per-session game settings.

use crate::player::{Player, STARTING_CREDITS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board width in cells
pub const DEFAULT_WIDTH: u32 = 10;

/// Default board height in cells
pub const DEFAULT_HEIGHT: u32 = 8;

/// Errors from building a `GameConfig`
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("Grid dimensions must be non-zero (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Grid dimension {0} does not fit a board coordinate")]
    GridTooLarge(u32),
}

/// Board size and economy. Fixed for the lifetime of a session; a reset
/// reuses the same config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub starting_credits: u32,
}

impl GameConfig {
    /// Create a validated config
    pub fn new(width: u32, height: u32, starting_credits: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        for dim in [width, height] {
            if i32::try_from(dim).is_err() {
                return Err(ConfigError::GridTooLarge(dim));
            }
        }

        Ok(Self {
            width,
            height,
            starting_credits,
        })
    }

    /// Whether column `x` lies in a side's deployment zone.
    ///
    /// Blue owns the columns with `x < width / 3`, red those with
    /// `x >= width * 2 / 3`. Both are compared in exact integer form, so on a
    /// 10-wide board blue gets 0..=3 and red gets 7..=9.
    pub fn in_deployment_zone(&self, player: Player, x: i32) -> bool {
        if x < 0 {
            return false;
        }
        let x = i64::from(x);
        let width = i64::from(self.width);
        match player {
            Player::Blue => 3 * x < width,
            Player::Red => 3 * x >= 2 * width,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            starting_credits: STARTING_CREDITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 8);
        assert_eq!(config.starting_credits, 1000);
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert_eq!(
            GameConfig::new(0, 8, 1000),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 8
            })
        );
        assert!(GameConfig::new(u32::MAX, 8, 1000).is_err());
        assert!(GameConfig::new(12, 6, 500).is_ok());
    }

    #[test]
    fn test_deployment_zone_boundaries() {
        let config = GameConfig::default();

        // 3 < 10/3 but 4 is not
        assert!(config.in_deployment_zone(Player::Blue, 0));
        assert!(config.in_deployment_zone(Player::Blue, 3));
        assert!(!config.in_deployment_zone(Player::Blue, 4));

        // 7 >= 20/3 but 6 is not
        assert!(!config.in_deployment_zone(Player::Red, 6));
        assert!(config.in_deployment_zone(Player::Red, 7));
        assert!(config.in_deployment_zone(Player::Red, 9));

        assert!(!config.in_deployment_zone(Player::Blue, -1));
    }

    #[test]
    fn test_deployment_zone_on_divisible_width() {
        let config = GameConfig::new(9, 6, 1000).unwrap();
        assert!(config.in_deployment_zone(Player::Blue, 2));
        assert!(!config.in_deployment_zone(Player::Blue, 3));
        assert!(!config.in_deployment_zone(Player::Red, 5));
        assert!(config.in_deployment_zone(Player::Red, 6));
    }
}
