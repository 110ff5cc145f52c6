//! Core data model types for an import run.
//!
//! Everything here is transient: a [`RawGrid`] is decoded, classified into a [`RecordKind`],
//! mapped into [`MappedRecord`]s and committed, and the only thing handed back to the caller is
//! a [`ProcessingResult`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};

/// An uploaded file: raw bytes plus whatever the client declared about them.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name, used for extension-based format detection and reporting.
    pub name: String,
    /// Declared media type (e.g. `text/csv`), if the client sent one.
    pub media_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an uploaded file from its parts.
    pub fn new(name: impl Into<String>, media_type: Option<&str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.map(str::to_owned),
            bytes: bytes.into(),
        }
    }

    /// Read a local file. No media type is declared, so detection relies on the extension.
    pub fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_owned();
        Ok(Self {
            name,
            media_type: None,
            bytes,
        })
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Authenticated identity the import runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded file contents: row 0 is the header row, the rest are data rows.
///
/// Rows are not required to be the same length; missing trailing cells read as blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    /// Row-major cell storage.
    pub rows: Vec<Vec<String>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The header row, if the grid has any rows at all.
    pub fn headers(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// Closed classification of what a sheet contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Inventory,
    Employee,
    Unrecognized,
}

/// An inventory row ready to persist. Inventory is shared, so no actor is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_name: String,
    pub quantity: i64,
    pub minimum_level: i64,
    pub category: String,
}

/// An employee row as mapped from the sheet, before it is stamped with the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub position: String,
    /// `YYYY-MM-DD` when defaulted, otherwise the cell text as written.
    pub hire_date: String,
}

impl EmployeeDraft {
    /// Attach the acting user, producing the record that gets persisted.
    pub fn stamp(self, actor: &ActorId) -> EmployeeRecord {
        EmployeeRecord {
            name: self.name,
            position: self.position,
            hire_date: self.hire_date,
            actor_id: actor.clone(),
        }
    }
}

/// A persisted employee row, scoped to the user who imported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub position: String,
    pub hire_date: String,
    pub actor_id: ActorId,
}

/// Output of the column mapper for one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappedRecord {
    Inventory(InventoryRecord),
    Employee(EmployeeDraft),
}

/// The externally visible outcome of importing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    /// `true` iff at least one record was committed.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Number of committed records; absent when the file failed before any row was attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_processed: Option<usize>,
    /// Per-row errors in file order; absent when there were none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ProcessingResult {
    /// A failed result for an error that stopped the whole file.
    pub fn from_error(err: &ImportError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            records_processed: None,
            errors: None,
        }
    }

    /// Number of committed records (0 when absent).
    pub fn committed(&self) -> usize {
        self.records_processed.unwrap_or(0)
    }

    /// Number of per-row errors (0 when absent).
    pub fn error_count(&self) -> usize {
        self.errors.as_ref().map_or(0, Vec::len)
    }
}
