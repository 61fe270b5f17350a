use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::common::errors::{SortError, SortResult};
use crate::scanner::FileRecord;

const HASH_BUF_SIZE: usize = 1024 * 1024;

/// Compute the full SHA-256 digest of a file's contents.
///
/// The file handle is released on every exit path, including mid-read
/// failures. No short-circuit prefix comparison: every candidate gets
/// exactly one full digest.
pub fn content_hash(path: &Path) -> SortResult<String> {
    let file = File::open(path).map_err(|e| SortError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::with_capacity(HASH_BUF_SIZE, file);
    let mut hasher = Sha256::new();

    let mut buffer = vec![0u8; HASH_BUF_SIZE];
    loop {
        let n = reader.read(&mut buffer).map_err(|e| SortError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Pass 1: bucket records by byte length, preserving scan order within
/// each bucket. Files with a unique length cannot be duplicates, and
/// zero-byte files are always exempt, so singleton and size-0 buckets
/// are dropped here.
pub fn group_by_size(records: &[FileRecord]) -> HashMap<u64, Vec<FileRecord>> {
    let mut groups: HashMap<u64, Vec<FileRecord>> = HashMap::new();

    for record in records {
        if record.size == 0 {
            continue;
        }
        groups.entry(record.size).or_default().push(record.clone());
    }

    groups.retain(|_, v| v.len() > 1);
    groups
}
