pub mod walker;

pub use walker::{scan, FileRecord, ScanOutcome};
