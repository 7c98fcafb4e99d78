//! Algorithm constants and runtime configuration defaults

/// Random seed value that requests a nondeterministic seed
pub const NONDETERMINISTIC_SEED: u64 = 0;

// Safety limit so oversized catalogs fail before allocation
/// Maximum field and rule memory the CLI will allocate, in bytes
pub const MAX_FIELD_BYTES: usize = 1 << 30;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
/// Number of progress bar positions between an empty and a solved field
pub const PROGRESS_RESOLUTION: u64 = 1000;

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";
