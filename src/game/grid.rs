/// What a single grid cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    SnakeHead,
    SnakeBody,
    Apple,
}

/// The render surface: a `width x height` matrix of tiles.
///
/// The grid carries no game logic of its own. The engine rebuilds it from
/// scratch every tick out of the snake and apple state, so it can never hold
/// a stale tile from a previous tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one tile");
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every tile to Empty
    pub fn clear(&mut self) {
        self.tiles.fill(Tile::Empty);
    }

    /// Write one tile. Out-of-bounds coordinates are a core-logic defect.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let index = self.index(x, y);
        self.tiles[index] = tile;
    }

    /// Read one tile
    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.index(x, y)]
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "tile ({}, {}) out of bounds for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }
}
