use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

/// Metadata snapshot for one eligible file, taken at scan time.
///
/// The snapshot goes stale if the filesystem changes while a run is in
/// flight; concurrent external modification is not guarded against.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

/// Result of one scan pass: records in traversal order, plus non-fatal
/// warnings for entries that could not be read.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub records: Vec<FileRecord>,
    pub warnings: Vec<String>,
}

/// Collect eligible files under `root`.
///
/// Hidden entries (leading dot) are pruned, symlinks are not followed,
/// and `recursive` controls whether subdirectories are descended. The
/// whole tree is snapshotted before any stage mutates it.
pub fn scan(root: &Path, recursive: bool) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    let walker = if recursive {
        WalkDir::new(root).follow_links(false)
    } else {
        WalkDir::new(root).follow_links(false).max_depth(1)
    };

    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                outcome.warnings.push(format!("skipped unreadable entry: {}", e));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(meta) => {
                outcome.records.push(FileRecord {
                    path: entry.path().to_path_buf(),
                    size: meta.len(),
                    modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                });
            }
            Err(e) => {
                outcome
                    .warnings
                    .push(format!("cannot stat '{}': {}", entry.path().display(), e));
            }
        }
    }

    debug!(
        files = outcome.records.len(),
        warnings = outcome.warnings.len(),
        "scan complete"
    );
    outcome
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_skips_hidden_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("visible.txt"), "a").unwrap();
        std::fs::write(dir.path().join(".hidden"), "b").unwrap();

        let outcome = scan(dir.path(), false);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].path.ends_with("visible.txt"));
    }

    #[test]
    fn test_scan_non_recursive_ignores_subdirs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("top.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/nested.txt"), "b").unwrap();

        let outcome = scan(dir.path(), false);
        assert_eq!(outcome.records.len(), 1);

        let recursive = scan(dir.path(), true);
        assert_eq!(recursive.records.len(), 2);
    }

    #[test]
    fn test_scan_prunes_hidden_dirs() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git/config"), "x").unwrap();
        std::fs::write(dir.path().join("file.txt"), "y").unwrap();

        let outcome = scan(dir.path(), true);
        assert_eq!(outcome.records.len(), 1);
    }
}
