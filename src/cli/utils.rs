//! Shared helpers for CLI subcommands

use anyhow::{Context, Result};
use std::fs;

use crate::archive::SnapshotArchive;
use crate::domain::Config;
use crate::fetch::fetch_zipball;

/// Split an optional comma-separated flag value into trimmed, non-empty items.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|raw| {
        raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
    })
}

/// Like [`parse_csv`], but normalizes each item to a dot-prefixed
/// extension (`rs` → `.rs`) and collects into a set.
pub fn parse_ext_csv(value: &Option<String>) -> Option<std::collections::HashSet<String>> {
    parse_csv(value).map(|items| {
        items
            .into_iter()
            .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
            .collect()
    })
}

/// Resolve the target subdirectory from the merged config, rejecting a
/// missing or separator-only value up front.
pub fn resolve_subdir(merged: &Config) -> Result<String> {
    let raw = merged
        .subdir
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--subdir must be specified (flag, config, or env)"))?;
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        anyhow::bail!("--subdir must name a subdirectory, got '{raw}'");
    }
    Ok(trimmed.to_string())
}

/// Acquire the snapshot bytes (local archive or one remote GET) and open
/// them. Returns the archive and a human-readable source label.
pub fn load_snapshot(merged: &Config) -> Result<(SnapshotArchive, String)> {
    let (bytes, source) = if let Some(path) = merged.archive.as_deref() {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read archive {}", path.display()))?;
        (bytes, path.display().to_string())
    } else {
        let (Some(owner), Some(repo)) = (merged.owner.as_deref(), merged.repo.as_deref()) else {
            anyhow::bail!("Either --archive or both --owner and --repo must be specified");
        };
        let bytes =
            fetch_zipball(&merged.api_url, owner, repo, &merged.ref_, merged.token.as_deref())?;
        (bytes, format!("{owner}/{repo}@{}", merged.ref_))
    };

    let archive = SnapshotArchive::open(bytes)
        .with_context(|| format!("failed to open snapshot from {source}"))?;
    Ok((archive, source))
}
