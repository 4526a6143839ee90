//! Selection and ordering of the output document
//!
//! Filters the archive listing down to the files under the target prefix,
//! computes relative paths, applies the optional extension/glob filters,
//! and sorts by relative path.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;

use crate::domain::{ArchiveEntry, FileRecord};
use crate::utils::normalize_separators;

/// Build a matcher from exclude patterns; `None` when there are none.
pub fn build_exclude_globset(patterns: &HashSet<String>) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    let mut sorted: Vec<&String> = patterns.iter().collect();
    sorted.sort();
    for pattern in sorted {
        builder.add(Glob::new(pattern)?);
    }
    Ok(Some(builder.build()?))
}

fn extension_of(relative_path: &str) -> Option<String> {
    Path::new(relative_path).extension().and_then(|e| e.to_str()).map(|e| format!(".{e}"))
}

/// Produce the ordered output document for one target prefix.
///
/// Directory markers, entries outside the prefix, and the subdirectory
/// marker itself (empty relative path) are never kept. With no filters
/// configured every remaining file is kept. The result is sorted
/// ascending by relative path, byte-wise.
pub fn select_records(
    entries: &[ArchiveEntry],
    target_prefix: &str,
    include_extensions: &HashSet<String>,
    exclude_globs: Option<&GlobSet>,
) -> Vec<FileRecord> {
    let mut records: Vec<FileRecord> = entries
        .iter()
        .filter(|entry| !entry.is_dir)
        .filter_map(|entry| {
            let rest = entry.path.strip_prefix(target_prefix)?;
            let relative_path = normalize_separators(rest);
            if relative_path.is_empty() {
                return None;
            }
            Some(FileRecord {
                archive_path: entry.path.clone(),
                relative_path,
                size_bytes: entry.size,
            })
        })
        .filter(|record| {
            if include_extensions.is_empty() {
                return true;
            }
            extension_of(&record.relative_path)
                .map(|ext| include_extensions.contains(&ext))
                .unwrap_or(false)
        })
        .filter(|record| {
            exclude_globs.map(|globs| !globs.is_match(&record.relative_path)).unwrap_or(true)
        })
        .collect();

    records.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    records
}
