//! Candidate filtering and breadth-first wavefront propagation
//!
//! After a cell collapses, its neighbors are re-filtered against the rules
//! of the tiles still possible around them. Any neighbor whose set shrinks
//! pushes its own neighbors, until the wave dies out.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::grid::{Direction, Field};
use crate::spatial::tiles::Neighbors;
use bitvec::prelude::*;
use log::trace;
use std::collections::VecDeque;

/// Reusable per-direction scratch for candidate filtering
#[derive(Clone, Debug)]
pub struct CandidateFilter {
    unions: [TileBitset; 4],
}

impl CandidateFilter {
    /// Create scratch sized for a catalog
    pub fn new(tile_count: usize) -> Self {
        Self {
            unions: std::array::from_fn(|_| TileBitset::new(tile_count)),
        }
    }

    /// Restrict a cell to tiles its four neighbors can accept
    ///
    /// For each direction, the allowed set is the union of the reverse rules
    /// of every tile still possible in the neighbor; a position past the edge
    /// behaves like a neighbor holding `everything`. An empty cell starts
    /// from the full set. If the four-way intersection is empty, the cell
    /// instead receives the union of the four allowed sets.
    pub fn apply(
        &mut self,
        field: &mut Field,
        id: usize,
        rules: &[Neighbors],
        everything: &TileBitset,
    ) {
        for (direction, union) in Direction::ALL.into_iter().zip(self.unions.iter_mut()) {
            union.reset(false);
            let neighbor = field.neighbor(id, direction).unwrap_or(everything);
            for tile in neighbor.iter_ones() {
                if let Some(tile_rules) = rules.get(tile) {
                    union.union_with(tile_rules.get(direction.reverse()));
                }
            }
        }

        let Some(cell) = field.cell_mut(id) else {
            return;
        };
        if cell.is_empty() {
            cell.reset(true);
        }
        for union in &self.unions {
            cell.intersect_with(union);
        }

        if cell.is_empty() {
            trace!("cell {id} has no consistent tile, widening to neighbor unions");
            for union in &self.unions {
                cell.union_with(union);
            }
        }
    }
}

/// FIFO frontier and visited mask for one propagation step
#[derive(Clone, Debug)]
pub struct Wavefront {
    frontier: VecDeque<usize>,
    visited: BitVec,
}

impl Wavefront {
    /// Create scratch sized for a field
    pub fn new(cell_count: usize) -> Self {
        Self {
            frontier: VecDeque::new(),
            visited: bitvec![0; cell_count],
        }
    }

    /// Start a step: empty the frontier and mark every singleton visited
    pub fn reset(&mut self, field: &Field) {
        self.frontier.clear();
        for (id, cell) in field.cells().iter().enumerate() {
            if id < self.visited.len() {
                self.visited.set(id, cell.is_single());
            }
        }
    }

    /// Test if a cell has been visited during this step
    pub fn is_visited(&self, id: usize) -> bool {
        self.visited.get(id).as_deref() == Some(&true)
    }

    /// Number of cells waiting in the frontier
    pub fn len(&self) -> usize {
        self.frontier.len()
    }

    /// Test if the frontier is drained
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Queue the in-bounds, unvisited, undecided neighbors of a cell
    pub fn push_neighbors(&mut self, field: &Field, id: usize) {
        for direction in Direction::ALL {
            let Some(neighbor) = field.neighbor_index(id, direction) else {
                continue;
            };
            if self.is_visited(neighbor) {
                continue;
            }
            if field.cell(neighbor).is_some_and(TileBitset::is_single) {
                continue;
            }
            self.frontier.push_back(neighbor);
        }
    }

    /// Pop the next unvisited cell and mark it visited
    pub fn next_unvisited(&mut self) -> Option<usize> {
        while let Some(id) = self.frontier.pop_front() {
            if self.is_visited(id) {
                continue;
            }
            if id < self.visited.len() {
                self.visited.set(id, true);
            }
            return Some(id);
        }
        None
    }
}
