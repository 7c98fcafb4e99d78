//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - The cell field and its 4-neighborhood
//! - Tile extraction and adjacency rules

/// Field storage and direction handling
pub mod grid;
/// Tile extraction and adjacency rule construction
pub mod tiles;

pub use grid::{Direction, Field};
