// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::DEFAULT_EXPORT_STEM;
use crate::config::ExportFormat;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::tabular::write_records;

/// Read the whole source file. A missing/unreadable file is a load failure.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    // Exports from spreadsheet tools are not always UTF-8; keep what we can.
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            logd!("input {} is not valid UTF-8; decoding lossily", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(text)
}

/// Write `records` as CSV/TSV to `out`, resolved with `resolve_out_path`.
/// Returns the final path written to.
pub fn write_export(out: &str, records: &[Record], format: ExportFormat) -> Result<PathBuf> {
    let path = resolve_out_path(out, format)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let contents = write_records(records, format.delim())?;
    fs::write(&path, contents)?;
    logf!("export: {} records → {}", records.len(), path.display());
    Ok(path)
}

/// Empty → `<stem>.<ext>` in the working directory.
/// A directory (existing, or hinted by a trailing separator) → `<dir>/<stem>.<ext>`.
/// Anything else is used as the file path, extension untouched.
pub fn resolve_out_path(user_o: &str, format: ExportFormat) -> Result<PathBuf> {
    let default_name = format!("{DEFAULT_EXPORT_STEM}.{}", format.ext());
    if user_o.trim().is_empty() { return Ok(PathBuf::from(default_name)); }

    let p = PathBuf::from(normalize_separators(user_o.trim()));
    if looks_like_dir_hint(user_o.trim()) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_name))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Config(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &str) -> bool {
    p.ends_with('/') || p.ends_with('\\')
}
