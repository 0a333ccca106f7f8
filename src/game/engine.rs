use rand::rngs::StdRng;
use rand::SeedableRng;

use super::apple;
use super::config::GameConfig;
use super::direction::Direction;
use super::state::{GameState, MoveOutcome, Snake, Status};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake advanced one cell; `ate` marks apple consumption
    Moved { ate: bool },
    /// The snake ran into itself; the round is over
    Collided,
    /// The snake covered the last free tile, leaving nowhere for an apple
    Filled,
    /// The round has already ended; the tick only repainted the grid
    Idle,
}

/// The game controller: one `tick` per simulation step, heading changes
/// through `turn`, a full reset through `reset`/`restart`.
///
/// The engine owns the RNG so apple placement is deterministic under a
/// seeded engine in tests.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic engine for tests
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round: snake at the configured start, score 0, new
    /// random apple, grid painted
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.start,
            self.config.start_heading,
            self.config.initial_snake_length,
            self.config.grid_width,
            self.config.grid_height,
        );

        let apple = apple::random_free_tile(
            &mut self.rng,
            self.config.grid_width,
            self.config.grid_height,
            snake.occupied(),
        )
        .expect("a fresh board has a free tile for the apple");

        GameState::new(
            snake,
            apple,
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    /// Apply a heading request as it arrives. Reversals are dropped by the
    /// snake itself; requests outside a running round are ignored.
    pub fn turn(&self, state: &mut GameState, requested: Direction) {
        if state.is_running() {
            state.snake.steer(requested);
        }
    }

    /// Restart is only honored once the round has ended
    pub fn restart(&mut self, state: &mut GameState) {
        if !state.is_running() {
            *state = self.reset();
        }
    }

    /// Execute one simulation step
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            // keep the frozen board visible
            state.repaint();
            return TickOutcome::Idle;
        }

        let (width, height) = (self.config.grid_width, self.config.grid_height);

        let outcome = match state.snake.advance(width, height, state.apple) {
            MoveOutcome::SelfCollision => {
                state.status = Status::GameOver;
                TickOutcome::Collided
            }
            MoveOutcome::Moved { ate, .. } => {
                if ate {
                    state.score += 1;
                    state.apple =
                        apple::random_free_tile(&mut self.rng, width, height, state.snake.occupied());
                    if state.apple.is_none() {
                        state.status = Status::Won;
                        TickOutcome::Filled
                    } else {
                        TickOutcome::Moved { ate: true }
                    }
                } else {
                    TickOutcome::Moved { ate: false }
                }
            }
        };

        state.ticks += 1;
        state.repaint();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Tile;
    use crate::game::state::Position;

    fn head_tiles(state: &GameState) -> usize {
        let mut count = 0;
        for y in 0..state.grid.height() {
            for x in 0..state.grid.width() {
                if state.grid.get(x, y) == Tile::SnakeHead {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(0, 0));
        assert_eq!(state.snake.heading(), Direction::Right);

        let apple = state.apple.unwrap();
        assert!(!state.snake.occupies(apple));
        assert_eq!(state.grid.get(apple.x as usize, apple.y as usize), Tile::Apple);
        assert_eq!(head_tiles(&state), 1);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.reset();
        // park the apple away from the path
        state.apple = Some(Position::new(5, 5));
        state.repaint();

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Moved { ate: false });
        assert_eq!(state.snake.head(), Position::new(1, 0));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_apple_consumption_and_respawn() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.reset();
        state.apple = Some(Position::new(1, 0));
        state.repaint();

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Moved { ate: true });
        assert_eq!(state.snake.head(), Position::new(1, 0));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);

        // the respawned apple avoids every segment
        let apple = state.apple.unwrap();
        assert_ne!(apple, Position::new(0, 0));
        assert_ne!(apple, Position::new(1, 0));
        assert!(!state.snake.occupies(apple));
    }

    #[test]
    fn test_wrap_around_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let snake = Snake::new(Position::new(9, 4), Direction::Right, 1, 10, 10);
        let mut state = GameState::new(snake, Position::new(5, 5), 10, 10);

        engine.tick(&mut state);

        assert_eq!(state.snake.head(), Position::new(0, 4));
    }

    #[test]
    fn test_reversal_request_is_ignored() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.reset();

        engine.turn(&mut state, Direction::Left);
        assert_eq!(state.snake.heading(), Direction::Right);

        engine.turn(&mut state, Direction::Down);
        assert_eq!(state.snake.heading(), Direction::Down);
    }

    #[test]
    fn test_self_collision_freezes_round() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let snake = Snake::from_segments(
            vec![
                Position::new(3, 3),
                Position::new(4, 3),
                Position::new(4, 4),
                Position::new(3, 4),
            ],
            Direction::Down,
        );
        let mut state = GameState::new(snake.clone(), Position::new(8, 8), 10, 10);
        state.score = 3;

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Collided);
        assert_eq!(state.status, Status::GameOver);
        // snake, score and apple keep their pre-collision values
        assert_eq!(state.snake, snake);
        assert_eq!(state.score, 3);
        assert_eq!(state.apple, Some(Position::new(8, 8)));
        // the frozen board renders without a head tile
        assert_eq!(head_tiles(&state), 0);
    }

    #[test]
    fn test_game_over_ticks_change_nothing() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.reset();
        state.status = Status::GameOver;
        state.repaint();
        let frozen = state.clone();

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_turn_ignored_after_game_over() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.reset();
        state.status = Status::GameOver;

        engine.turn(&mut state, Direction::Down);

        assert_eq!(state.snake.heading(), Direction::Right);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let snake = Snake::from_segments(
            vec![
                Position::new(3, 3),
                Position::new(4, 3),
                Position::new(4, 4),
                Position::new(3, 4),
            ],
            Direction::Down,
        );
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);
        state.score = 3;

        engine.tick(&mut state);
        assert_eq!(state.status, Status::GameOver);

        engine.restart(&mut state);

        assert!(state.is_running());
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(0, 0));
        assert_eq!(state.snake.heading(), Direction::Right);
        assert_eq!(state.score, 0);
        assert!(state.apple.is_some());
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.reset();
        state.score = 5;

        engine.restart(&mut state);

        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_filling_the_board_wins() {
        // 2x2 board, snake on three tiles, apple on the last one
        let mut engine = GameEngine::with_seed(GameConfig::new(2, 2), 1);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
            Direction::Right,
        );
        let mut state = GameState::new(snake, Position::new(1, 0), 2, 2);

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::Filled);
        assert_eq!(state.status, Status::Won);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.apple, None);

        // every tile is snake now
        for y in 0..2 {
            for x in 0..2 {
                assert_ne!(state.grid.get(x, y), Tile::Empty);
                assert_ne!(state.grid.get(x, y), Tile::Apple);
            }
        }
    }

    #[test]
    fn test_running_grid_has_exactly_one_head() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.reset();

        for _ in 0..20 {
            engine.tick(&mut state);
            if state.is_running() {
                assert_eq!(head_tiles(&state), 1);
            }
        }
    }
}
