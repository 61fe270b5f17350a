use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use tracing::debug;

use super::hasher;
use crate::scanner::FileRecord;

/// Files sharing both byte length and content digest.
///
/// The keeper stays where it is; every extra is routed to the
/// duplicates folder.
#[derive(Debug, Clone)]
pub struct DuplicateSet {
    pub hash: String,
    pub size: u64,
    pub keeper: FileRecord,
    pub extras: Vec<FileRecord>,
}

/// Result of one detection pass over a scan snapshot.
#[derive(Debug, Default)]
pub struct DetectOutcome {
    pub sets: Vec<DuplicateSet>,
    /// Files that vanished or became unreadable between scan and hash;
    /// they are skipped, never fatal.
    pub warnings: Vec<String>,
}

/// Two-pass duplicate detection: size buckets first, then a full
/// content digest per surviving candidate. Detection performs no
/// filesystem mutation.
///
/// Size groups are visited in ascending size order and records keep
/// their scan order throughout, so the output is deterministic for a
/// given input sequence.
pub fn find_duplicates(records: &[FileRecord], show_progress: bool) -> DetectOutcome {
    let mut outcome = DetectOutcome::default();

    let size_groups = hasher::group_by_size(records);
    let candidates: usize = size_groups.values().map(|v| v.len()).sum();
    debug!(
        groups = size_groups.len(),
        candidates, "size pass complete"
    );

    if size_groups.is_empty() {
        return outcome;
    }

    let pb = make_progress(show_progress, candidates as u64);

    let mut sizes: Vec<u64> = size_groups.keys().copied().collect();
    sizes.sort_unstable();

    for size in sizes {
        let group = &size_groups[&size];
        let mut by_hash: HashMap<String, Vec<FileRecord>> = HashMap::new();
        let mut hash_order: Vec<String> = Vec::new();

        for record in group {
            match hasher::content_hash(&record.path) {
                Ok(hash) => {
                    if !by_hash.contains_key(&hash) {
                        hash_order.push(hash.clone());
                    }
                    by_hash.entry(hash).or_default().push(record.clone());
                }
                Err(e) => outcome.warnings.push(e.to_string()),
            }
            if let Some(ref pb) = pb {
                pb.inc(1);
            }
        }

        for hash in hash_order {
            let members = by_hash.remove(&hash).unwrap_or_default();
            if members.len() < 2 {
                continue;
            }
            outcome.sets.push(split_keeper(hash, size, members));
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    debug!(sets = outcome.sets.len(), "duplicate detection complete");
    outcome
}

/// Keeper = minimum modified-time; on a tie, the record encountered
/// first in scan order wins.
fn split_keeper(hash: String, size: u64, mut members: Vec<FileRecord>) -> DuplicateSet {
    let keeper_idx = members
        .iter()
        .enumerate()
        .min_by_key(|(i, m)| (m.modified, *i))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let keeper = members.remove(keeper_idx);
    debug!(
        keeper = %keeper.path.display(),
        extras = members.len(),
        "duplicate set"
    );

    DuplicateSet {
        hash,
        size,
        keeper,
        extras: members,
    }
}

fn make_progress(show: bool, total: u64) -> Option<ProgressBar> {
    if show {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} Hashing...")
                .unwrap()
                .progress_chars("━━░"),
        );
        Some(pb)
    } else {
        None
    }
}
