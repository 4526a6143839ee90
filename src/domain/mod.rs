//! Core domain types and models
//!
//! Defines the configuration, archive-entry, and output-document types the
//! rest of the pipeline operates on.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Current report schema version.
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One path record listed from the downloaded archive.
///
/// Directory markers are entries whose stored path ends in a separator;
/// they never carry content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full path as stored within the archive
    pub path: String,

    /// Whether this entry is a directory marker
    pub is_dir: bool,

    /// Uncompressed size in bytes (zero for directory markers)
    pub size: u64,
}

/// A file selected for the output document.
///
/// Invariant: `relative_path` is never empty — the target-subdirectory
/// marker itself is excluded during selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path within the archive, used to read the content back
    pub archive_path: String,

    /// Path relative to the target subdirectory, separators normalized to `/`
    pub relative_path: String,

    /// Uncompressed size in bytes
    pub size_bytes: u64,
}

/// JSON run report written when `--report` is requested.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub schema_version: String,

    /// Resolved input: `owner/repo@ref` or a local archive path
    pub source: String,

    pub subdir: String,
    pub output: String,
    pub file_count: usize,
    pub bytes_written: u64,
    pub files: Vec<FileRecord>,

    /// Omitted under `--no-timestamp` for reproducible diffs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Shared visitor for list-valued config fields: accepts a comma-separated
/// string or an array, trims whitespace, drops empty items, and applies a
/// per-item normalizer.
struct ListVisitor {
    normalize: fn(&str) -> String,
}

impl<'de> serde::de::Visitor<'de> for ListVisitor {
    type Value = HashSet<String>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a comma-separated string or an array of strings")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let mut result = HashSet::new();
        for item in value.split(',') {
            let trimmed = item.trim();
            if !trimmed.is_empty() {
                result.insert((self.normalize)(trimmed));
            }
        }
        Ok(result)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut result = HashSet::new();
        while let Some(item) = seq.next_element::<String>()? {
            let trimmed = item.trim();
            if !trimmed.is_empty() {
                result.insert((self.normalize)(trimmed));
            }
        }
        Ok(result)
    }
}

fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// Extensions: normalizes each item to dot-prefixed form (`rs` → `.rs`).
fn deserialize_extensions<'de, D>(deserializer: D) -> Result<HashSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(ListVisitor { normalize: normalize_extension })
}

/// Globs: kept verbatim apart from trimming.
fn deserialize_globs<'de, D>(deserializer: D) -> Result<HashSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(ListVisitor { normalize: str::to_string })
}

/// Main configuration for repo-flatten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Remote source
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,

    #[serde(default = "default_ref", rename = "ref")]
    pub ref_: String,

    /// Local zipball path; mutually exclusive with owner/repo
    #[serde(default)]
    pub archive: Option<PathBuf>,

    // Selection
    #[serde(default)]
    pub subdir: Option<String>,

    #[serde(
        default,
        alias = "include_ext",
        deserialize_with = "deserialize_extensions",
        skip_serializing_if = "HashSet::is_empty"
    )]
    pub include_extensions: HashSet<String>,

    #[serde(
        default,
        alias = "exclude_glob",
        deserialize_with = "deserialize_globs",
        skip_serializing_if = "HashSet::is_empty"
    )]
    pub exclude_globs: HashSet<String>,

    // Output
    #[serde(default)]
    pub output: Option<PathBuf>,

    // Network
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer credential; normally supplied via GITHUB_TOKEN
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            ref_: default_ref(),
            archive: None,
            subdir: None,
            include_extensions: HashSet::new(),
            exclude_globs: HashSet::new(),
            output: None,
            api_url: default_api_url(),
            token: None,
        }
    }
}

fn default_ref() -> String {
    "main".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn extensions_accept_string_and_array_forms() {
        let from_string: Config =
            serde_json::from_str(r#"{"include_ext": "rs, .md,"}"#).expect("string form");
        assert!(from_string.include_extensions.contains(".rs"));
        assert!(from_string.include_extensions.contains(".md"));
        assert_eq!(from_string.include_extensions.len(), 2);

        let from_array: Config =
            serde_json::from_str(r#"{"include_extensions": [".rs", "toml"]}"#).expect("array form");
        assert!(from_array.include_extensions.contains(".rs"));
        assert!(from_array.include_extensions.contains(".toml"));
    }

    #[test]
    fn globs_accept_string_form_without_dot_normalization() {
        let config: Config =
            serde_json::from_str(r#"{"exclude_glob": "assets/**, *.min.js"}"#).expect("globs");
        assert!(config.exclude_globs.contains("assets/**"));
        assert!(config.exclude_globs.contains("*.min.js"));
    }

    #[test]
    fn defaults_point_at_github_main() {
        let config = Config::default();
        assert_eq!(config.ref_, "main");
        assert_eq!(config.api_url, "https://api.github.com");
        assert!(config.subdir.is_none());
    }
}
