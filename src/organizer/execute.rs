use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::common::errors::{SortError, SortResult};

/// A single planned relocation: move `source` to `dest`.
#[derive(Debug, Clone)]
pub struct RelocationPlan {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Carry out one relocation.
///
/// In dry-run mode the filesystem is not touched at all, not even to
/// create the target directory; the caller records the intended
/// destination. A live move creates the target directory, renames, and
/// falls back to copy + delete when rename fails (cross-volume). A
/// failed move always leaves the source intact.
pub fn execute(plan: &RelocationPlan, dry_run: bool) -> SortResult<()> {
    if dry_run {
        debug!(
            from = %plan.source.display(),
            to = %plan.dest.display(),
            "dry-run move"
        );
        return Ok(());
    }

    if let Some(parent) = plan.dest.parent() {
        fs::create_dir_all(parent).map_err(|e| move_err(plan, e))?;
    }

    match fs::rename(&plan.source, &plan.dest) {
        Ok(()) => {
            debug!(
                from = %plan.source.display(),
                to = %plan.dest.display(),
                "moved"
            );
            Ok(())
        }
        Err(_) => copy_then_delete(plan),
    }
}

/// Cross-volume fallback: copy, verify the byte count, then delete the
/// source. Any failure removes the partial destination so the source
/// is never lost and nothing half-moved is left behind.
fn copy_then_delete(plan: &RelocationPlan) -> SortResult<()> {
    let expected = fs::metadata(&plan.source)
        .map_err(|e| move_err(plan, e))?
        .len();

    let copied = match fs::copy(&plan.source, &plan.dest) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&plan.dest);
            return Err(move_err(plan, e));
        }
    };

    if copied != expected {
        let _ = fs::remove_file(&plan.dest);
        return Err(move_err(
            plan,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("short copy: {} of {} bytes", copied, expected),
            ),
        ));
    }

    fs::remove_file(&plan.source).map_err(|e| move_err(plan, e))?;
    debug!(
        from = %plan.source.display(),
        to = %plan.dest.display(),
        "moved (copy + delete)"
    );
    Ok(())
}

fn move_err(plan: &RelocationPlan, e: std::io::Error) -> SortError {
    SortError::Move {
        from: plan.source.clone(),
        to: plan.dest.clone(),
        source: e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        std::fs::write(&source, "content").unwrap();

        let plan = RelocationPlan {
            source: source.clone(),
            dest: dir.path().join("documents/a.txt"),
        };
        execute(&plan, true).unwrap();

        assert!(source.exists());
        assert!(!dir.path().join("documents").exists());
    }

    #[test]
    fn test_live_move_creates_dir_and_preserves_content() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        std::fs::write(&source, "content").unwrap();

        let dest = dir.path().join("documents/a.txt");
        let plan = RelocationPlan {
            source: source.clone(),
            dest: dest.clone(),
        };
        execute(&plan, false).unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "content");
    }

    #[test]
    fn test_vanished_source_is_an_error() {
        let dir = TempDir::new().unwrap();
        let plan = RelocationPlan {
            source: dir.path().join("gone.txt"),
            dest: dir.path().join("documents/gone.txt"),
        };
        let err = execute(&plan, false).unwrap_err();
        assert!(matches!(err, SortError::Move { .. }));
    }
}
