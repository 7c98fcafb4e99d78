//! Cell field storage and 4-neighborhood navigation
//!
//! The field is a fixed row-major sequence of possibility sets. Cell ids are
//! `y * width + x`; positions beyond the edge have no cell.

use crate::algorithm::bitset::TileBitset;

/// One of the four adjacency directions of a 2-D grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// All directions in rule-table order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The opposite direction (Up <-> Down, Left <-> Right)
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Position of this direction in [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// Row-major grid of per-cell tile possibility sets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<TileBitset>,
}

impl Field {
    /// Create a field where every cell allows every tile
    pub fn new(width: usize, height: usize, tile_count: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![TileBitset::full(tile_count); width * height],
        }
    }

    /// Predicted heap footprint of a field plus its neighbor rules
    ///
    /// Covers the per-cell bitsets and the four rule bitsets per tile, which
    /// dominate memory for any realistic catalog.
    pub const fn estimated_bytes(width: usize, height: usize, tile_count: usize) -> usize {
        let per_set = TileBitset::storage_bytes(tile_count);
        let cells = width.saturating_mul(height).saturating_mul(per_set);
        let rules = tile_count.saturating_mul(4).saturating_mul(per_set);
        cells.saturating_add(rules)
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test if the field has no cells
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[TileBitset] {
        &self.cells
    }

    /// Cell by id
    pub fn cell(&self, id: usize) -> Option<&TileBitset> {
        self.cells.get(id)
    }

    /// Mutable cell by id
    pub fn cell_mut(&mut self, id: usize) -> Option<&mut TileBitset> {
        self.cells.get_mut(id)
    }

    /// Cell id of a position, if it lies inside the field
    pub const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Position `(x, y)` of a cell id
    pub const fn coords(&self, id: usize) -> (usize, usize) {
        if self.width == 0 {
            return (0, 0);
        }
        (id % self.width, id / self.width)
    }

    /// Id of the adjacent cell in a direction, or `None` past the edge
    pub const fn neighbor_index(&self, id: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coords(id);
        match direction {
            Direction::Up if y > 0 => self.index(x, y - 1),
            Direction::Down => self.index(x, y + 1),
            Direction::Left if x > 0 => self.index(x - 1, y),
            Direction::Right => self.index(x + 1, y),
            _ => None,
        }
    }

    /// Adjacent cell in a direction, or `None` past the edge
    pub fn neighbor(&self, id: usize, direction: Direction) -> Option<&TileBitset> {
        self.neighbor_index(id, direction)
            .and_then(|neighbor| self.cells.get(neighbor))
    }

    /// Sum of all cell cardinalities
    pub fn uncertainty(&self) -> usize {
        self.cells.iter().map(TileBitset::count).sum()
    }

    /// Test if every cell holds exactly one tile
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(TileBitset::is_single)
    }
}
