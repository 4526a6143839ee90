//! In-memory reading of the downloaded snapshot archive
//!
//! The zipball is held entirely in memory; no temporary files. Archive
//! hosting services wrap all content in one synthetic top-level folder
//! named after the ref/commit, so the root prefix is always discovered
//! from the listing rather than assumed.

use std::io::{Cursor, Read};
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

use crate::domain::ArchiveEntry;

/// Errors from opening or reading the snapshot archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("invalid or corrupt zip archive: {0}")]
    InvalidFormat(#[from] zip::result::ZipError),

    #[error("archive contains no entries")]
    Empty,

    #[error("failed to read entry '{name}': {source}")]
    EntryRead { name: String, source: std::io::Error },
}

/// One repository snapshot, opened over the downloaded bytes.
#[derive(Debug)]
pub struct SnapshotArchive {
    zip: ZipArchive<Cursor<Vec<u8>>>,
    entries: Vec<ArchiveEntry>,
}

impl SnapshotArchive {
    /// Open the raw bytes as a zip archive and list its entries in
    /// central-directory order. An empty listing is the one designed
    /// failure path distinct from a malformed archive.
    pub fn open(bytes: Vec<u8>) -> Result<Self, ArchiveError> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        if zip.is_empty() {
            return Err(ArchiveError::Empty);
        }

        let mut entries = Vec::with_capacity(zip.len());
        for i in 0..zip.len() {
            let entry = zip.by_index_raw(i)?;
            let path = entry.name().to_string();
            let is_dir = path.ends_with('/');
            entries.push(ArchiveEntry { path, is_dir, size: entry.size() });
        }
        debug!("archive lists {} entries", entries.len());

        Ok(Self { zip, entries })
    }

    /// All listed entries, in central-directory order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// First path segment of the first listed entry plus a trailing `/`.
    ///
    /// The wrapper folder name is derived from the ref and is not
    /// predictable in advance.
    pub fn root_prefix(&self) -> String {
        let first = &self.entries[0].path;
        let segment = first.split('/').next().unwrap_or(first);
        format!("{segment}/")
    }

    /// Root prefix plus the target subdirectory (surrounding separators
    /// stripped) and a trailing `/`.
    pub fn target_prefix(&self, subdir: &str) -> String {
        format!("{}{}/", self.root_prefix(), subdir.trim_matches('/'))
    }

    /// Read one entry's raw bytes back by its original archive path.
    pub fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ArchiveError> {
        let mut entry = self.zip.by_name(path)?;
        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut buf)
            .map_err(|source| ArchiveError::EntryRead { name: path.to_string(), source })?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveError, SnapshotArchive};
    use std::io::Write;

    fn build_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, content) in files {
            if name.ends_with('/') {
                writer.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                writer.start_file(name.to_string(), options).unwrap();
                writer.write_all(content).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn open_rejects_non_zip_bytes() {
        let err = SnapshotArchive::open(b"not a zip at all".to_vec()).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidFormat(_)));
    }

    #[test]
    fn open_rejects_empty_listing() {
        let bytes = build_zip(&[]);
        let err = SnapshotArchive::open(bytes).unwrap_err();
        assert!(matches!(err, ArchiveError::Empty));
    }

    #[test]
    fn root_prefix_comes_from_first_listed_entry() {
        let bytes = build_zip(&[
            ("owner-repo-deadbee/", b"".as_slice()),
            ("owner-repo-deadbee/readme.md", b"hi"),
        ]);
        let archive = SnapshotArchive::open(bytes).unwrap();
        assert_eq!(archive.root_prefix(), "owner-repo-deadbee/");
    }

    #[test]
    fn root_prefix_works_when_first_entry_is_a_file() {
        let bytes = build_zip(&[("wrapper123/file.txt", b"x".as_slice())]);
        let archive = SnapshotArchive::open(bytes).unwrap();
        assert_eq!(archive.root_prefix(), "wrapper123/");
    }

    #[test]
    fn target_prefix_strips_surrounding_separators() {
        let bytes = build_zip(&[("root/sub/a.txt", b"A".as_slice())]);
        let archive = SnapshotArchive::open(bytes).unwrap();
        assert_eq!(archive.target_prefix("/sub/"), "root/sub/");
        assert_eq!(archive.target_prefix("sub"), "root/sub/");
    }

    #[test]
    fn entries_flag_directory_markers() {
        let bytes = build_zip(&[
            ("root/", b"".as_slice()),
            ("root/a.txt", b"A"),
        ]);
        let archive = SnapshotArchive::open(bytes).unwrap();
        let entries = archive.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
        assert_eq!(entries[1].size, 1);
    }

    #[test]
    fn read_entry_returns_stored_bytes() {
        let bytes = build_zip(&[("root/a.txt", b"hello\n".as_slice())]);
        let mut archive = SnapshotArchive::open(bytes).unwrap();
        assert_eq!(archive.read_entry("root/a.txt").unwrap(), b"hello\n");
    }
}
