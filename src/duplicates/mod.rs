pub mod detector;
pub mod hasher;

pub use detector::{find_duplicates, DetectOutcome, DuplicateSet};

/// Directory name extras are relocated to, under the output root.
pub const DUPLICATES_DIR: &str = "_duplicates";
