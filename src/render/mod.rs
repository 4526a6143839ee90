//! Output rendering
//!
//! Writes the flat text document (path headers, content, `------ `
//! delimiters) and the optional JSON run report.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::archive::SnapshotArchive;
use crate::domain::{FileRecord, RunReport};
use crate::utils::decode_lossy;

/// Delimiter line emitted between records, never after the last.
const DELIMITER: &str = "------ ";

/// Write the flat output file, creating or truncating it.
///
/// Per record: a `/<relative_path>` header line, then the lossily decoded
/// content with trailing newlines collapsed to exactly one. Between
/// records: a blank line, the delimiter line, a blank line. Returns the
/// number of bytes written.
pub fn write_flat_file(
    archive: &mut SnapshotArchive,
    records: &[FileRecord],
    output: &Path,
) -> Result<u64> {
    let file = File::create(output)
        .with_context(|| format!("failed to create output file {}", output.display()))?;
    let mut out = BufWriter::new(file);
    let mut bytes_written = 0u64;

    let mut emit = |out: &mut BufWriter<File>, text: &str| -> Result<()> {
        out.write_all(text.as_bytes())?;
        bytes_written += text.len() as u64;
        Ok(())
    };

    for (i, record) in records.iter().enumerate() {
        let raw = archive.read_entry(&record.archive_path)?;
        let content = decode_lossy(&raw);

        emit(&mut out, &format!("/{}\n", record.relative_path))?;
        emit(&mut out, content.trim_end_matches('\n'))?;
        emit(&mut out, "\n")?;
        if i + 1 < records.len() {
            emit(&mut out, &format!("\n{DELIMITER}\n\n"))?;
        }
    }

    out.flush()?;
    debug!("wrote {} records ({} bytes) to {}", records.len(), bytes_written, output.display());
    Ok(bytes_written)
}

/// Write the run report as pretty-printed JSON with a trailing newline.
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(())
}
