//! Tile catalog construction and adjacency rules
//!
//! Slides a window over a seed pattern, deduplicates the window contents into
//! a weighted catalog, and derives which tiles may sit next to each other by
//! checking whether their windows overlap after a one-cell shift.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result, invalid_catalog, invalid_parameter};
use crate::spatial::grid::Direction;
use log::{debug, warn};
use ndarray::{Array2, ArrayView2, s};
use std::collections::HashMap;
use std::hash::Hash;

/// Tiles allowed next to one tile, one set per direction
///
/// `get(Direction::Right)` lists the tiles that may sit to the right of the
/// owning tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighbors {
    sets: [TileBitset; 4],
}

impl Neighbors {
    /// Rules allowing nothing in any direction
    pub fn new(tile_count: usize) -> Self {
        Self {
            sets: std::array::from_fn(|_| TileBitset::new(tile_count)),
        }
    }

    /// Rules allowing every tile in every direction
    pub fn full(tile_count: usize) -> Self {
        Self {
            sets: std::array::from_fn(|_| TileBitset::full(tile_count)),
        }
    }

    /// Allowed tiles in a direction
    pub const fn get(&self, direction: Direction) -> &TileBitset {
        match &self.sets {
            [up, down, left, right] => match direction {
                Direction::Up => up,
                Direction::Down => down,
                Direction::Left => left,
                Direction::Right => right,
            },
        }
    }

    /// Mutable allowed tiles in a direction
    pub const fn get_mut(&mut self, direction: Direction) -> &mut TileBitset {
        match &mut self.sets {
            [up, down, left, right] => match direction {
                Direction::Up => up,
                Direction::Down => down,
                Direction::Left => left,
                Direction::Right => right,
            },
        }
    }

    /// Test if `tile` may sit in `direction` of the owning tile
    pub fn allows(&self, direction: Direction, tile: usize) -> bool {
        self.get(direction).get(tile)
    }
}

/// Tiles, weights and adjacency rules driving a collapse
///
/// The three vectors are parallel: entry `i` of each describes tile `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileCatalog<T> {
    /// Payload placed in the output for each tile
    pub tiles: Vec<T>,
    /// Relative likelihood of each tile; 0 makes a tile unselectable
    pub weights: Vec<u32>,
    /// Adjacency rules of each tile
    pub neighbors: Vec<Neighbors>,
}

impl<T> TileCatalog<T> {
    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test if the catalog has no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check the structural requirements of a collapse
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidCatalog`] if:
    /// - The catalog has no tiles
    /// - Weights or neighbor rules are not parallel to the tiles
    /// - A rule set has a capacity other than the tile count
    /// - Every weight is zero
    pub fn validate(&self) -> Result<()> {
        let count = self.tiles.len();
        if count == 0 {
            return Err(invalid_catalog(&"catalog has no tiles"));
        }
        if self.weights.len() != count {
            return Err(invalid_catalog(&format!(
                "{count} tiles but {} weights",
                self.weights.len()
            )));
        }
        if self.neighbors.len() != count {
            return Err(invalid_catalog(&format!(
                "{count} tiles but {} neighbor rules",
                self.neighbors.len()
            )));
        }

        let misfit = self.neighbors.iter().enumerate().find_map(|(tile, rules)| {
            Direction::ALL
                .into_iter()
                .find(|&direction| rules.get(direction).len() != count)
                .map(|direction| (tile, direction))
        });
        if let Some((tile, direction)) = misfit {
            return Err(invalid_catalog(&format!(
                "tile {tile} {direction:?} rules sized for {} tiles, expected {count}",
                self.neighbors
                    .get(tile)
                    .map_or(0, |rules| rules.get(direction).len())
            )));
        }

        if self.weights.iter().all(|&weight| weight == 0) {
            return Err(invalid_catalog(&"every tile weight is zero"));
        }

        if !self.is_symmetric() {
            warn!("adjacency rules are not symmetric; propagation may be order dependent");
        }

        Ok(())
    }

    /// Test if A allows B in a direction exactly when B allows A in reverse
    pub fn is_symmetric(&self) -> bool {
        self.neighbors.iter().enumerate().all(|(a, rules)| {
            Direction::ALL.into_iter().all(|direction| {
                rules.get(direction).iter_ones().all(|b| {
                    self.neighbors
                        .get(b)
                        .is_some_and(|other| other.allows(direction.reverse(), a))
                })
            })
        })
    }
}

/// Window-based tile extraction from a seed pattern
pub struct TileExtractor;

impl TileExtractor {
    /// Build a weighted catalog from every window position in a pattern
    ///
    /// Windows are visited in raster order, so tile ids are stable for
    /// identical input. Each distinct window becomes one tile whose payload
    /// is the window's top-left value and whose weight is its number of
    /// occurrences.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A pattern or window dimension is zero
    /// - The pattern buffer holds fewer than `pattern_width * pattern_height` values
    /// - The window is larger than the pattern
    pub fn extract<T>(
        pattern: &[T],
        pattern_width: usize,
        pattern_height: usize,
        tile_width: usize,
        tile_height: usize,
    ) -> Result<TileCatalog<T>>
    where
        T: Clone + Eq + Hash,
    {
        if tile_width == 0 || tile_height == 0 {
            return Err(invalid_parameter(
                "tile window",
                &format!("{tile_width}x{tile_height}"),
                &"window dimensions must be positive",
            ));
        }
        if tile_width > pattern_width || tile_height > pattern_height {
            return Err(invalid_parameter(
                "tile window",
                &format!("{tile_width}x{tile_height}"),
                &format!("window exceeds the {pattern_width}x{pattern_height} pattern"),
            ));
        }

        let required = pattern_width.saturating_mul(pattern_height);
        let pixels = pattern
            .get(..required)
            .ok_or_else(|| AlgorithmError::InvalidSourceData {
                reason: format!(
                    "pattern buffer holds {} values, {pattern_width}x{pattern_height} needs {required}",
                    pattern.len()
                ),
            })?;
        let view = ArrayView2::from_shape((pattern_height, pattern_width), pixels).map_err(
            |error| AlgorithmError::InvalidSourceData {
                reason: error.to_string(),
            },
        )?;

        let mut windows: Vec<Array2<T>> = Vec::new();
        let mut lookup: HashMap<Array2<T>, usize> = HashMap::new();
        let mut tiles = Vec::new();
        let mut weights: Vec<u32> = Vec::new();

        for window in view.windows((tile_height, tile_width)) {
            let snapshot = window.to_owned();
            if let Some(&id) = lookup.get(&snapshot) {
                if let Some(weight) = weights.get_mut(id) {
                    *weight = weight.saturating_add(1);
                }
                continue;
            }

            let Some(payload) = snapshot.iter().next().cloned() else {
                continue;
            };
            lookup.insert(snapshot.clone(), windows.len());
            tiles.push(payload);
            weights.push(1);
            windows.push(snapshot);
        }

        let neighbors = Self::build_neighbors(&windows);
        debug!(
            "extracted {} tiles from {pattern_width}x{pattern_height} pattern with {tile_width}x{tile_height} window",
            tiles.len()
        );

        Ok(TileCatalog {
            tiles,
            weights,
            neighbors,
        })
    }

    /// Derive symmetric adjacency rules from tile windows
    ///
    /// A lone tile is self-adjacent in every direction, since a one-tile
    /// catalog can only ever border itself.
    pub fn build_neighbors<T: PartialEq>(windows: &[Array2<T>]) -> Vec<Neighbors> {
        let count = windows.len();
        if count == 1 {
            return vec![Neighbors::full(1)];
        }

        let mut neighbors = vec![Neighbors::new(count); count];
        for (i, original) in windows.iter().enumerate() {
            for direction in Direction::ALL {
                for (j, candidate) in windows.iter().enumerate().skip(i) {
                    if !Self::is_neighbor(original.view(), candidate.view(), direction) {
                        continue;
                    }
                    if let Some(rules) = neighbors.get_mut(i) {
                        rules.get_mut(direction).set(j, true);
                    }
                    if let Some(rules) = neighbors.get_mut(j) {
                        rules.get_mut(direction.reverse()).set(i, true);
                    }
                }
            }
        }
        neighbors
    }

    /// Test if `candidate` may sit one cell in `direction` of `original`
    ///
    /// The windows must agree on the region they share after the shift:
    /// all rows but one for vertical directions, all columns but one for
    /// horizontal directions.
    pub fn is_neighbor<T: PartialEq>(
        original: ArrayView2<'_, T>,
        candidate: ArrayView2<'_, T>,
        direction: Direction,
    ) -> bool {
        if original.dim() != candidate.dim() {
            return false;
        }
        let (rows, cols) = original.dim();
        let last_row = rows.saturating_sub(1);
        let last_col = cols.saturating_sub(1);

        match direction {
            Direction::Up => original.slice(s![..last_row, ..]) == candidate.slice(s![1.., ..]),
            Direction::Down => original.slice(s![1.., ..]) == candidate.slice(s![..last_row, ..]),
            Direction::Left => original.slice(s![.., ..last_col]) == candidate.slice(s![.., 1..]),
            Direction::Right => original.slice(s![.., 1..]) == candidate.slice(s![.., ..last_col]),
        }
    }
}
