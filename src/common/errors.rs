use std::path::PathBuf;
use thiserror::Error;

/// Typed errors for sortd operations.
/// We use `anyhow` at the CLI boundary; these typed errors let the
/// engine be precise about per-file failures, which are recorded in the
/// run report while processing continues.
#[derive(Debug, Error)]
pub enum SortError {
    /// A file could not be stat'ed or hashed
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be moved to its destination
    #[error("cannot move '{}' to '{}': {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The suffix search ran out of names
    #[error("no free name for '{name}' under '{}'", dir.display())]
    NameResolutionExhausted { dir: PathBuf, name: String },

    /// Invalid run configuration. Fatal: aborts before any file is touched.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type SortResult<T> = Result<T, SortError>;
