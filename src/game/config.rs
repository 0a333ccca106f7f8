use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in tiles
    pub grid_width: usize,
    /// Height of the game grid in tiles
    pub grid_height: usize,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Where the head sits after a reset
    pub start: Position,
    /// Heading after a reset
    pub start_heading: Direction,
    /// Initial length of the snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        // classic 800x576 window with 32-pixel tiles
        Self::from_window(800, 576, 32)
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one tile");
        Self {
            grid_width: width,
            grid_height: height,
            tick_rate: 8,
            start: Position::new(0, 0),
            start_heading: Direction::Right,
            initial_snake_length: 1,
        }
    }

    /// Derive the grid from a window measured in pixels: one tile per
    /// `tile_size` square
    pub fn from_window(window_width: usize, window_height: usize, tile_size: usize) -> Self {
        assert!(tile_size > 0, "tile size must be positive");
        Self::new(window_width / tile_size, window_height / tile_size)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Wall-clock duration of one tick
    pub fn tick_interval(&self) -> Duration {
        assert!(self.tick_rate > 0, "tick rate must be positive");
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 25);
        assert_eq!(config.grid_height, 18);
        assert_eq!(config.tick_rate, 8);
        assert_eq!(config.start, Position::new(0, 0));
        assert_eq!(config.start_heading, Direction::Right);
        assert_eq!(config.initial_snake_length, 1);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_window_derivation() {
        let config = GameConfig::from_window(640, 480, 32);
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 15);
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::small();
        assert_eq!(config.tick_interval(), Duration::from_millis(125));
    }
}
