//! Listing providers: where versioned records come from.
//!
//! The engine never talks to the storage service. Listings are exported by the
//! storage client (`mc ls --recursive --versions --json`) or as CSV, then
//! loaded here in full before any comparison starts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ListingError;
use crate::model::VersionedRecord;

/// Produces every version record under a key prefix.
pub trait ListingProvider {
    fn list(&self, prefix: &str) -> Result<Vec<VersionedRecord>, ListingError>;
}

impl ListingProvider for Vec<VersionedRecord> {
    fn list(&self, prefix: &str) -> Result<Vec<VersionedRecord>, ListingError> {
        Ok(self.iter().filter(|r| r.key.starts_with(prefix)).cloned().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    /// One JSON object per line.
    JsonLines,
    /// A JSON array of objects. Falls back to JSON lines when the document
    /// starts with an object.
    JsonArray,
    Csv,
}

impl ListingFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            "json" => Some(Self::JsonArray),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// A listing export on disk.
#[derive(Debug, Clone)]
pub struct FileListing {
    path: PathBuf,
    format: ListingFormat,
}

impl FileListing {
    pub fn new(path: impl Into<PathBuf>, format: ListingFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Open a listing, inferring its format from the file extension.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ListingError> {
        let path = path.into();
        let format = ListingFormat::from_path(&path)
            .ok_or_else(|| ListingError::UnknownFormat(path.display().to_string()))?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ListingFormat {
        self.format
    }
}

impl ListingProvider for FileListing {
    fn list(&self, prefix: &str) -> Result<Vec<VersionedRecord>, ListingError> {
        let origin = self.path.display().to_string();
        let data = std::fs::read_to_string(&self.path).map_err(|e| ListingError::Io {
            path: origin.clone(),
            message: e.to_string(),
        })?;

        let records = parse_listing(&data, self.format, &origin)?;
        let loaded = records.len();
        let filtered: Vec<VersionedRecord> = records
            .into_iter()
            .filter(|r| r.key.starts_with(prefix))
            .collect();

        tracing::debug!(
            path = %origin,
            prefix,
            loaded,
            kept = filtered.len(),
            "loaded listing"
        );

        Ok(filtered)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// One entry as emitted by the storage client's JSON listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "type")]
    entry_type: Option<String>,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    key: String,
    #[serde(default)]
    etag: String,
    #[serde(default)]
    version_id: String,
    #[serde(default)]
    is_latest: bool,
    #[serde(default)]
    is_delete_marker: bool,
    #[serde(default)]
    storage_class: String,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CsvEntry {
    key: String,
    etag: String,
    size: i64,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
    version_id: String,
    is_latest: bool,
    is_delete_marker: bool,
    #[serde(default)]
    storage_class: String,
}

/// Parse a listing export. `origin` names the source in error messages.
pub fn parse_listing(
    data: &str,
    format: ListingFormat,
    origin: &str,
) -> Result<Vec<VersionedRecord>, ListingError> {
    match format {
        ListingFormat::JsonLines => parse_json_lines(data, origin),
        ListingFormat::JsonArray => {
            if data.trim_start().starts_with('{') {
                parse_json_lines(data, origin)
            } else {
                parse_json_array(data, origin)
            }
        }
        ListingFormat::Csv => parse_csv(data, origin),
    }
}

fn parse_json_lines(data: &str, origin: &str) -> Result<Vec<VersionedRecord>, ListingError> {
    let mut records = Vec::new();
    for (i, line) in data.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let entry: JsonEntry = serde_json::from_str(line).map_err(|e| ListingError::Json {
            path: origin.into(),
            line: line_no,
            message: e.to_string(),
        })?;
        if let Some(record) = entry_to_record(entry, origin, line_no)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn parse_json_array(data: &str, origin: &str) -> Result<Vec<VersionedRecord>, ListingError> {
    let entries: Vec<JsonEntry> = serde_json::from_str(data).map_err(|e| ListingError::Json {
        path: origin.into(),
        line: e.line(),
        message: e.to_string(),
    })?;

    let mut records = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        // Array position stands in for the line number.
        if let Some(record) = entry_to_record(entry, origin, i + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn entry_to_record(
    entry: JsonEntry,
    origin: &str,
    line: usize,
) -> Result<Option<VersionedRecord>, ListingError> {
    if entry.status.as_deref() == Some("error") || entry.error.is_some() {
        let message = match entry.error {
            Some(serde_json::Value::Object(ref obj)) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| serde_json::Value::Object(obj.clone()).to_string()),
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "unknown error".to_string(),
        };
        return Err(ListingError::ErrorEntry {
            path: origin.into(),
            line,
            message,
        });
    }

    if entry.entry_type.as_deref() == Some("folder") {
        return Ok(None);
    }

    if entry.key.is_empty() {
        return Err(ListingError::Json {
            path: origin.into(),
            line,
            message: "missing field `key`".into(),
        });
    }
    if entry.size < 0 {
        return Err(ListingError::Json {
            path: origin.into(),
            line,
            message: format!("negative size {} for `{}`", entry.size, entry.key),
        });
    }

    Ok(Some(VersionedRecord {
        key: entry.key,
        fingerprint: entry.etag,
        size_bytes: entry.size,
        modified_at: entry.last_modified,
        version_id: entry.version_id,
        is_current: entry.is_latest,
        is_tombstone: entry.is_delete_marker,
        storage_class: entry.storage_class,
    }))
}

fn parse_csv(data: &str, origin: &str) -> Result<Vec<VersionedRecord>, ListingError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<CsvEntry>().enumerate() {
        let row = row.map_err(|e| ListingError::Csv {
            path: origin.into(),
            message: e.to_string(),
        })?;
        if row.size < 0 {
            // Header is line 1.
            return Err(ListingError::Csv {
                path: origin.into(),
                message: format!("line {}: negative size {} for `{}`", i + 2, row.size, row.key),
            });
        }
        records.push(VersionedRecord {
            key: row.key,
            fingerprint: row.etag,
            size_bytes: row.size,
            modified_at: row.last_modified,
            version_id: row.version_id,
            is_current: row.is_latest,
            is_tombstone: row.is_delete_marker,
            storage_class: row.storage_class,
        });
    }
    Ok(records)
}
