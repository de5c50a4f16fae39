//! Price-list directory loading.
//!
//! Every `*.csv` file directly inside the source directory is parsed with its
//! own header row. Headers are resolved to canonical fields through a
//! [`FieldMapping`], and one [`Record`] is appended per data row. Files are
//! visited in file-name order.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pricelist_engine::{CanonicalField, Catalog, FieldMapping, Record};

use crate::error::LoadError;

/// Extension a directory entry needs to be treated as a price list.
pub const PRICE_LIST_EXTENSION: &str = ".csv";

/// What to do when a single file cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadFilePolicy {
    /// Log the failure, leave the file's rows out, keep loading.
    #[default]
    Skip,
    /// Stop loading and return the file's error.
    Abort,
}

impl std::fmt::Display for BadFilePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub file: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Per-file outcome of a directory load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Load every price list in `dir` into a fresh catalog.
///
/// A missing or unreadable directory is always an error. A bad file is
/// all-or-nothing: either every row is appended or none is, and `policy`
/// decides whether loading continues.
pub fn load_catalog(
    dir: &Path,
    mapping: &FieldMapping,
    policy: BadFilePolicy,
) -> Result<(Catalog, LoadReport), LoadError> {
    let mut catalog = Catalog::new();
    let mut report = LoadReport::default();

    for (file_name, path) in price_list_entries(dir)? {
        match load_file(&path, &file_name, mapping) {
            Ok(records) => {
                log::debug!("loaded {} rows from {}", records.len(), file_name);
                report.loaded.push(LoadedFile { file: file_name, rows: records.len() });
                catalog.extend(records);
            }
            Err(err) => match policy {
                BadFilePolicy::Abort => return Err(err),
                BadFilePolicy::Skip => {
                    log::warn!("skipping {}: {}", file_name, err);
                    report.skipped.push(SkippedFile { file: file_name, reason: err.to_string() });
                }
            },
        }
    }

    log::info!(
        "catalog: {} records from {} file(s), {} skipped",
        catalog.len(),
        report.loaded.len(),
        report.skipped.len(),
    );

    Ok((catalog, report))
}

/// Qualifying files in `dir`, sorted by name.
fn price_list_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>, LoadError> {
    let source_err = |e: std::io::Error| LoadError::SourceDir {
        path: dir.to_path_buf(),
        message: e.to_string(),
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(source_err)? {
        let entry = entry.map_err(source_err)?;
        let path = entry.path();

        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            log::debug!("ignoring entry with non-UTF-8 name: {}", path.display());
            continue;
        };
        if !file_name.ends_with(PRICE_LIST_EXTENSION) || !path.is_file() {
            log::debug!("ignoring {}", file_name);
            continue;
        }
        entries.push((file_name, path));
    }

    entries.sort();
    Ok(entries)
}

/// Read and parse one price-list file.
pub fn load_file(path: &Path, file_name: &str, mapping: &FieldMapping) -> Result<Vec<Record>, LoadError> {
    let content = read_utf8(path, file_name)?;
    parse_records(file_name, &content, mapping)
}

/// Read a whole file as strict UTF-8.
fn read_utf8(path: &Path, file_name: &str) -> Result<String, LoadError> {
    let read_err = |e: std::io::Error| LoadError::ReadFile {
        file: file_name.to_string(),
        message: e.to_string(),
    };

    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    String::from_utf8(bytes).map_err(|e| LoadError::Encoding {
        file: file_name.to_string(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Parse CSV text (header row + data rows) into records tagged with `file_name`.
pub fn parse_records(file_name: &str, content: &str, mapping: &FieldMapping) -> Result<Vec<Record>, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let csv_err = |e: csv::Error| LoadError::Csv {
        file: file_name.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = mapping.resolve_columns(&headers);
    if columns.is_empty() && !headers.is_empty() {
        log::debug!("{}: no recognized columns in header {:?}", file_name, headers);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        // Cells past the header width are ignored; a short row is malformed.
        if row.len() < headers.len() {
            let line = row.position().map_or(0, |pos| pos.line());
            return Err(LoadError::Csv {
                file: file_name.to_string(),
                message: format!(
                    "line {line}: found {} fields, header has {}",
                    row.len(),
                    headers.len()
                ),
            });
        }
        let mut record = Record::new(file_name);
        for field in CanonicalField::ALL {
            if let Some(value) = columns.column(field).and_then(|idx| row.get(idx)) {
                record = record.with_field(field, value);
            }
        }
        records.push(record);
    }

    Ok(records)
}
