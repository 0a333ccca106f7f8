use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::{Grid, Tile};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One step in `direction`, wrapped onto the opposite edge when the
    /// step would leave the grid
    pub fn stepped(self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx).rem_euclid(width as i32),
            y: (self.y + dy).rem_euclid(height as i32),
        }
    }
}

/// Result of advancing the snake by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The head moved to `head`; `ate` is set when it landed on the apple
    Moved { head: Position, ate: bool },
    /// The candidate head cell is already part of the body
    SelfCollision,
}

/// The snake: body segments with the head at index 0.
///
/// A parallel occupancy set mirrors the segment list so collision and
/// free-tile queries are O(1) instead of a scan over the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    occupied: HashSet<Position>,
    heading: Direction,
}

impl Snake {
    /// Create a snake whose body extends backwards from `head`, wrapping
    /// across grid edges the same way movement does
    pub fn new(
        head: Position,
        heading: Direction,
        length: usize,
        width: usize,
        height: usize,
    ) -> Self {
        assert!(length >= 1, "snake must have at least one segment");

        let mut body = vec![head];
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.stepped(heading.opposite(), width, height));
        }

        let occupied = body.iter().copied().collect();
        Self {
            body,
            occupied,
            heading,
        }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        assert!(!segments.is_empty(), "snake must have at least one segment");
        let occupied: HashSet<Position> = segments.iter().copied().collect();
        assert_eq!(
            occupied.len(),
            segments.len(),
            "snake segments must not overlap"
        );
        Self {
            body: segments,
            occupied,
            heading,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check whether a position is covered by any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.occupied.contains(&pos)
    }

    /// The set of all covered positions
    pub fn occupied(&self) -> &HashSet<Position> {
        &self.occupied
    }

    /// Apply a heading request. A request that reverses the current heading
    /// is dropped, so the snake can never fold back onto its own neck.
    pub fn steer(&mut self, requested: Direction) {
        if !self.heading.is_opposite(requested) {
            self.heading = requested;
        }
    }

    /// Move one cell in the current heading.
    ///
    /// Sequencing is load-bearing: the candidate head is tested against the
    /// full current body (the tail has not been popped yet), then inserted;
    /// the popped tail goes back only when the head landed on the apple.
    pub fn advance(
        &mut self,
        width: usize,
        height: usize,
        apple: Option<Position>,
    ) -> MoveOutcome {
        let candidate = self.head().stepped(self.heading, width, height);

        if self.occupied.contains(&candidate) {
            return MoveOutcome::SelfCollision;
        }

        self.body.insert(0, candidate);
        self.occupied.insert(candidate);

        let tail = self.body.pop().expect("snake body is never empty");
        let ate = apple == Some(candidate);
        if ate {
            self.body.push(tail);
        } else {
            self.occupied.remove(&tail);
        }

        MoveOutcome::Moved {
            head: candidate,
            ate,
        }
    }
}

/// Lifecycle of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The snake is alive and ticks advance it
    Running,
    /// The snake ran into itself; frozen until restart
    GameOver,
    /// The snake covers every tile, so no apple can spawn
    Won,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Option<Position>,
    pub grid: Grid,
    pub score: u32,
    pub ticks: u32,
    pub status: Status,
}

impl GameState {
    /// Create a running game state and paint the initial grid
    pub fn new(snake: Snake, apple: Position, width: usize, height: usize) -> Self {
        let mut state = Self {
            snake,
            apple: Some(apple),
            grid: Grid::new(width, height),
            score: 0,
            ticks: 0,
            status: Status::Running,
        };
        state.repaint();
        state
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Rebuild the grid from the snake and apple.
    ///
    /// Runs once per tick; the grid is never patched in place. After a
    /// self-collision the frozen snake paints as body only, so the grid
    /// holds a head tile exactly while the round can still advance.
    pub fn repaint(&mut self) {
        self.grid.clear();

        if let Some(apple) = self.apple {
            self.grid.set(apple.x as usize, apple.y as usize, Tile::Apple);
        }

        for (i, segment) in self.snake.segments().iter().enumerate() {
            let tile = if i == 0 && self.status != Status::GameOver {
                Tile::SnakeHead
            } else {
                Tile::SnakeBody
            };
            self.grid.set(segment.x as usize, segment.y as usize, tile);
        }
    }
}
