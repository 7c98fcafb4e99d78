//! Input/output operations, configuration and error handling

/// Command-line argument parsing and the generation driver
pub mod cli;
/// Algorithm constants and runtime defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Seed image loading and result export
pub mod image;
/// Terminal progress display
pub mod progress;
