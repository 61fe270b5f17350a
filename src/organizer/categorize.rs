use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::common::errors::{SortError, SortResult};

/// Destination label for by-type sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Images,
    Documents,
    Videos,
    Audio,
    Archives,
    Code,
    Executables,
    Other,
}

impl Category {
    /// Directory name for this category under the output root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Documents => "documents",
            Category::Videos => "videos",
            Category::Audio => "audio",
            Category::Archives => "archives",
            Category::Code => "code",
            Category::Executables => "executables",
            Category::Other => "other",
        }
    }

    /// Parse a category from its directory name (for config overrides).
    pub fn from_name(name: &str) -> Option<Category> {
        match name {
            "images" => Some(Category::Images),
            "documents" => Some(Category::Documents),
            "videos" => Some(Category::Videos),
            "audio" => Some(Category::Audio),
            "archives" => Some(Category::Archives),
            "code" => Some(Category::Code),
            "executables" => Some(Category::Executables),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Destination label for by-date sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    ThisWeek,
    ThisMonth,
    Older,
}

impl DateBucket {
    pub fn dir_name(&self) -> &'static str {
        match self {
            DateBucket::ThisWeek => "this_week",
            DateBucket::ThisMonth => "this_month",
            DateBucket::Older => "older",
        }
    }
}

/// Immutable extension -> category table.
///
/// Built once from the standard table plus any user overrides, then
/// injected into the pipeline, so classification stays a pure function
/// of its inputs.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    extensions: HashMap<String, Category>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryMap {
    /// Create a map with the standard extension table.
    pub fn new() -> Self {
        let mut map = Self {
            extensions: HashMap::new(),
        };
        map.add(
            Category::Images,
            &["jpg", "jpeg", "png", "gif", "webp", "svg", "heic", "raw"],
        );
        map.add(
            Category::Documents,
            &[
                "pdf", "doc", "docx", "txt", "rtf", "xls", "xlsx", "ppt", "pptx", "csv", "md",
            ],
        );
        map.add(Category::Videos, &["mp4", "mkv", "avi", "mov", "webm"]);
        map.add(Category::Audio, &["mp3", "wav", "flac", "aac", "ogg", "m4a"]);
        map.add(Category::Archives, &["zip", "rar", "7z", "tar", "gz"]);
        map.add(
            Category::Code,
            &[
                "py", "js", "ts", "html", "css", "java", "cpp", "c", "go", "rs", "sh", "json",
            ],
        );
        map.add(
            Category::Executables,
            &["exe", "msi", "dmg", "pkg", "deb", "rpm", "appimage", "apk"],
        );
        map
    }

    fn add(&mut self, category: Category, exts: &[&str]) {
        for ext in exts {
            self.extensions.insert((*ext).to_string(), category);
        }
    }

    /// Merge user overrides (extension -> category name) over the
    /// standard table. An unknown category name is a fatal config error.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> SortResult<Self> {
        for (ext, name) in overrides {
            let category = Category::from_name(name).ok_or_else(|| {
                SortError::Config(format!(
                    "unknown category '{}' for extension '{}'",
                    name, ext
                ))
            })?;
            self.extensions
                .insert(ext.trim_start_matches('.').to_lowercase(), category);
        }
        Ok(self)
    }

    /// Map a path's extension to its category. Unmapped or missing
    /// extensions go to `other`.
    pub fn classify(&self, path: &Path) -> Category {
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .and_then(|e| self.extensions.get(&e).copied())
            .unwrap_or(Category::Other)
    }
}

const WEEK: Duration = Duration::from_secs(7 * 86400);
const MONTH: Duration = Duration::from_secs(30 * 86400);

/// Bucket a modification time relative to an injected `now`.
///
/// Boundaries are inclusive at the lower edge: exactly 7 days old is
/// still this_week and exactly 30 days old is still this_month. A
/// modification time in the future saturates to zero age.
pub fn classify_by_date(modified: SystemTime, now: SystemTime) -> DateBucket {
    let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
    if age <= WEEK {
        DateBucket::ThisWeek
    } else if age <= MONTH {
        DateBucket::ThisMonth
    } else {
        DateBucket::Older
    }
}
