//! Overlapping-window wave function collapse for 2-D tile grids
//!
//! Tiles and adjacency rules are extracted from a seed pattern (or supplied
//! directly), then an output field is collapsed cell by cell: the cell with
//! the fewest remaining tiles is forced to a weighted random pick and the
//! change propagates breadth-first until the field is consistent again.

#![deny(unsafe_code)]

/// Bitsets, cell selection, propagation and the collapse engine
pub mod algorithm;
/// Command-line front end, configuration, image I/O and error handling
pub mod io;
/// Random number sources
pub mod math;
/// Field storage, directions and tile extraction
pub mod spatial;

pub use algorithm::bitset::TileBitset;
pub use algorithm::executor::{CollapseObserver, Wave};
pub use io::error::{AlgorithmError, Result};
pub use spatial::grid::{Direction, Field};
pub use spatial::tiles::{Neighbors, TileCatalog, TileExtractor};
