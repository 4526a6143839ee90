//! Utility functions

use encoding_rs::UTF_8;

/// Decode bytes as UTF-8, substituting U+FFFD for undecodable sequences.
///
/// Lossy by design: this tool assumes text-only payloads, and an embedded
/// binary asset garbles rather than aborting the run. A BOM survives as
/// U+FEFF so output stays byte-reproducible.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let (text, _had_errors) = UTF_8.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Normalize backslash separators to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Default output file name for a subdirectory: `<subdir>_files.txt`
/// with any nested separators flattened to underscores.
pub fn default_output_name(subdir: &str) -> String {
    format!("{}_files.txt", subdir.trim_matches('/').replace('/', "_"))
}

#[cfg(test)]
mod tests {
    use super::{decode_lossy, default_output_name, normalize_separators};

    #[test]
    fn decode_lossy_replaces_invalid_bytes() {
        let decoded = decode_lossy(&[0xff, 0xfe, b'h', b'i']);
        assert_eq!(decoded, "\u{FFFD}\u{FFFD}hi");
    }

    #[test]
    fn decode_lossy_keeps_valid_utf8_intact() {
        assert_eq!(decode_lossy("héllo\n".as_bytes()), "héllo\n");
    }

    #[test]
    fn decode_lossy_preserves_bom_as_codepoint() {
        let decoded = decode_lossy(&[0xef, 0xbb, 0xbf, b'x']);
        assert_eq!(decoded, "\u{FEFF}x");
    }

    #[test]
    fn separators_normalize_to_forward_slashes() {
        assert_eq!(normalize_separators(r"a\b\c.txt"), "a/b/c.txt");
        assert_eq!(normalize_separators("a/b"), "a/b");
    }

    #[test]
    fn default_output_name_flattens_nested_subdirs() {
        assert_eq!(default_output_name("dashboard"), "dashboard_files.txt");
        assert_eq!(default_output_name("src/app/"), "src_app_files.txt");
    }
}
