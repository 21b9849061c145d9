//! CSV and JSON writers for the final record set.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use gcscrape_core::CacheRecord;

/// Export column order. Matches the field order of [`CacheRecord`].
pub(crate) const COLUMNS: [&str; 23] = [
    "cache_id",
    "cache_code",
    "name",
    "geocache_type",
    "container_type",
    "difficulty",
    "terrain",
    "favorite_points",
    "trackable_count",
    "latitude",
    "longitude",
    "region",
    "owner_id",
    "owner_name",
    "placed_date",
    "last_found_date",
    "last_found_time",
    "details_url",
    "description",
    "hint",
    "total_found",
    "total_did_not_find",
    "found_rate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ExportFormat {
    Csv,
    Json,
    #[default]
    Both,
}

impl ExportFormat {
    fn includes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }

    fn includes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

/// Writes one header row then one row per record.
///
/// The header is written explicitly so an empty record set still yields it.
pub(crate) fn write_csv<W: Write>(writer: W, records: &[CacheRecord]) -> anyhow::Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(COLUMNS)?;
    for record in records {
        csv.serialize(record)
            .with_context(|| format!("failed to write CSV row for {}", record.cache_code))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the records as a pretty-printed JSON array of objects.
pub(crate) fn write_json<W: Write>(mut writer: W, records: &[CacheRecord]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// `<stem>.<ext>`, appended rather than substituted so dotted stems survive.
pub(crate) fn output_path(stem: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Writes the selected formats next to `stem` and returns the paths written.
///
/// Both outputs are rendered in memory and staged as `<path>.partial` before
/// any is renamed into place. On failure every staged or already renamed file
/// is removed, so a run never leaves one format without the other.
///
/// # Errors
///
/// Returns an error naming the file if it cannot be rendered or written.
pub(crate) fn export_records(
    records: &[CacheRecord],
    stem: &Path,
    format: ExportFormat,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut rendered: Vec<(PathBuf, Vec<u8>)> = Vec::with_capacity(2);
    if format.includes_csv() {
        let mut buf = Vec::new();
        write_csv(&mut buf, records).context("failed to render CSV")?;
        rendered.push((output_path(stem, "csv"), buf));
    }
    if format.includes_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, records).context("failed to render JSON")?;
        rendered.push((output_path(stem, "json"), buf));
    }

    let mut staged: Vec<(PathBuf, &PathBuf)> = Vec::with_capacity(rendered.len());
    for (path, bytes) in &rendered {
        let partial = output_path(path, "partial");
        if let Err(e) = fs::write(&partial, bytes) {
            remove_all(staged.iter().map(|(p, _)| p));
            let _ = fs::remove_file(&partial);
            return Err(e).with_context(|| format!("failed to write {}", path.display()));
        }
        staged.push((partial, path));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (idx, (partial, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(partial, path) {
            remove_all(written.iter());
            remove_all(staged[idx..].iter().map(|(p, _)| p));
            return Err(e).with_context(|| format!("failed to write {}", path.display()));
        }
        written.push((*path).clone());
    }

    for path in &written {
        tracing::info!(path = %path.display(), count = records.len(), "wrote export");
    }
    Ok(written)
}

/// Best-effort cleanup after a failed export.
fn remove_all<'a>(paths: impl Iterator<Item = &'a PathBuf>) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove export file");
        }
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
