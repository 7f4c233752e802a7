use serde::{Deserialize, Serialize};

use crate::error::SnakeError;

/// Configuration for the world.
///
/// Reward shaping lives here rather than in the step function, so a driver
/// that wants a per-step penalty changes a number, not the state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Width of the game grid.
    pub grid_width: usize,
    /// Height of the game grid.
    pub grid_height: usize,
    /// Initial length of the snake.
    pub initial_snake_length: usize,

    /// Reward for eating food.
    pub food_reward: i32,
    /// Reward for a non-eating, non-lethal move.
    pub step_reward: i32,
    /// Reward for dying.
    pub death_penalty: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            food_reward: 10,
            step_reward: 0,
            death_penalty: -10,
        }
    }
}

impl WorldConfig {
    /// Create a new configuration with custom grid size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing.
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Check that the initial snake fits horizontally at the grid center
    /// with at least one cell left over for food.
    pub fn validate(&self) -> Result<(), SnakeError> {
        if self.initial_snake_length < 2 {
            return Err(SnakeError::InvalidConfig(
                "initial snake length must be at least 2",
            ));
        }
        if self.grid_height == 0 || self.grid_width / 2 < self.initial_snake_length - 1 {
            return Err(SnakeError::InvalidConfig(
                "grid too small for the initial snake layout",
            ));
        }
        if self.grid_width * self.grid_height <= self.initial_snake_length {
            return Err(SnakeError::InvalidConfig(
                "grid has no free cell for food",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.step_reward, 0);
        assert_eq!(config.death_penalty, -10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = WorldConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_grids() {
        assert!(WorldConfig::new(3, 1).validate().is_err());
        assert!(WorldConfig::new(0, 10).validate().is_err());

        let mut config = WorldConfig::small();
        config.initial_snake_length = 1;
        assert!(config.validate().is_err());
    }
}
