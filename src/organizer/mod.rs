pub mod categorize;
pub mod execute;
pub mod pipeline;
pub mod resolve;

pub use categorize::{classify_by_date, Category, CategoryMap, DateBucket};
pub use pipeline::{run, Action, FileOutcome, RunOptions, RunReport, Stage};
