/// Word-packed bitset for per-cell tile possibilities
pub mod bitset;
/// Collapse engine owning the field and driving each step
pub mod executor;
/// Candidate filtering and wavefront propagation
pub mod propagation;
/// Collapse-point selection and weighted tile picks
pub mod selection;
