//! Mathematical utilities for the algorithm

/// Seedable random source for tie-breaking and weighted picks
pub mod random;
