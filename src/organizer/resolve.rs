use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::common::errors::{SortError, SortResult};

/// Ceiling on the suffix search. The search is bounded by the number of
/// existing entries in the target directory; reaching the ceiling means
/// the directory state is pathological and the move is reported failed.
const MAX_SUFFIX: u32 = 1_000_000;

/// Compute a conflict-free destination for `source` inside `target_dir`.
///
/// Returns `Ok(None)` when the file already sits at its destination
/// (same path), which makes repeated by-type runs idempotent. Otherwise
/// the original basename is tried first, then `name_1`, `name_2`, ...
/// inserted before the extension, monotonically, until a free name is
/// found.
///
/// `claimed` holds destinations promised to earlier files in the same
/// run; `vacated` holds source paths earlier moves emptied. Both are
/// maintained in dry-run too, where the disk never changes, so a
/// simulated plan matches what a live run would produce: a name that is
/// claimed is taken even if the disk says otherwise, and a name that
/// was vacated is free even if the file is still physically there.
///
/// Resolution never touches the disk beyond existence checks; directory
/// creation is the executor's job.
pub fn resolve(
    source: &Path,
    target_dir: &Path,
    claimed: &HashSet<PathBuf>,
    vacated: &HashSet<PathBuf>,
) -> SortResult<Option<PathBuf>> {
    let name = source.file_name().ok_or_else(|| SortError::Move {
        from: source.to_path_buf(),
        to: target_dir.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "file has no name component",
        ),
    })?;

    let candidate = target_dir.join(name);
    if candidate == source {
        return Ok(None);
    }
    if is_free(&candidate, claimed, vacated) {
        return Ok(Some(candidate));
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source.extension().map(|e| e.to_string_lossy().into_owned());

    for n in 1..=MAX_SUFFIX {
        let file_name = match &ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        let candidate = target_dir.join(file_name);
        if is_free(&candidate, claimed, vacated) {
            return Ok(Some(candidate));
        }
    }

    Err(SortError::NameResolutionExhausted {
        dir: target_dir.to_path_buf(),
        name: name.to_string_lossy().into_owned(),
    })
}

fn is_free(candidate: &Path, claimed: &HashSet<PathBuf>, vacated: &HashSet<PathBuf>) -> bool {
    if claimed.contains(candidate) {
        return false;
    }
    !candidate.exists() || vacated.contains(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn none() -> HashSet<PathBuf> {
        HashSet::new()
    }

    #[test]
    fn test_resolve_without_conflict_keeps_basename() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photo.jpg");
        let target = dir.path().join("images");

        let dest = resolve(&source, &target, &none(), &none()).unwrap();
        assert_eq!(dest, Some(target.join("photo.jpg")));
    }

    #[test]
    fn test_resolve_suffixes_on_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("images");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("photo.jpg"), "old").unwrap();

        let source = dir.path().join("photo.jpg");
        let dest = resolve(&source, &target, &none(), &none()).unwrap();
        assert_eq!(dest, Some(target.join("photo_1.jpg")));
    }

    #[test]
    fn test_resolve_skips_claimed_names() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("images");
        let source = dir.path().join("photo.jpg");

        let mut claimed = HashSet::new();
        claimed.insert(target.join("photo.jpg"));
        claimed.insert(target.join("photo_1.jpg"));

        let dest = resolve(&source, &target, &claimed, &none()).unwrap();
        assert_eq!(dest, Some(target.join("photo_2.jpg")));
    }

    #[test]
    fn test_resolve_in_place_returns_none() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("images");
        std::fs::create_dir(&target).unwrap();
        let source = target.join("photo.jpg");
        std::fs::write(&source, "x").unwrap();

        let dest = resolve(&source, &target, &none(), &none()).unwrap();
        assert_eq!(dest, None);
    }

    #[test]
    fn test_resolve_treats_vacated_name_as_free() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("this_week");
        std::fs::create_dir(&target).unwrap();
        // Still on disk, but an earlier move in the same run emptied it.
        std::fs::write(target.join("b.txt"), "leaving").unwrap();

        let mut vacated = HashSet::new();
        vacated.insert(target.join("b.txt"));

        let source = dir.path().join("documents").join("b.txt");
        let dest = resolve(&source, &target, &none(), &vacated).unwrap();
        assert_eq!(dest, Some(target.join("b.txt")));
    }

    #[test]
    fn test_resolve_claimed_wins_over_vacated() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("this_week");
        let slot = target.join("b.txt");

        let mut vacated = HashSet::new();
        vacated.insert(slot.clone());
        let mut claimed = HashSet::new();
        claimed.insert(slot);

        let source = dir.path().join("documents").join("b.txt");
        let dest = resolve(&source, &target, &claimed, &vacated).unwrap();
        assert_eq!(dest, Some(target.join("b_1.txt")));
    }

    #[test]
    fn test_resolve_file_without_extension() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("other");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("README"), "x").unwrap();

        let source = dir.path().join("README");
        let dest = resolve(&source, &target, &none(), &none()).unwrap();
        assert_eq!(dest, Some(target.join("README_1")));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("images");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("photo.jpg"), "old").unwrap();

        let source = dir.path().join("photo.jpg");
        let first = resolve(&source, &target, &none(), &none()).unwrap();
        let second = resolve(&source, &target, &none(), &none()).unwrap();
        assert_eq!(first, second);
    }
}
