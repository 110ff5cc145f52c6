use thiserror::Error;

/// Convenience result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Fatal error for a whole file.
///
/// Any of these aborts the import before a single row is committed. Per-row problems are
/// reported as [`RowError`] instead and never abort the batch.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error (e.g. file not found when reading from a path).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither the extension nor the media type names a CSV or workbook file.
    #[error("unsupported file format for '{file_name}' (media type: {})", .media_type.as_deref().unwrap_or("unknown"))]
    UnsupportedFormat {
        file_name: String,
        media_type: Option<String>,
    },

    /// CSV input was not valid UTF-8.
    #[error("csv input is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// CSV grammar error (only raised by the quoted CSV mode).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Workbook decoding error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The decoded grid has no data rows beyond the header.
    #[error("file is empty: no data rows to import")]
    EmptyFile,

    /// The header row matches neither inventory nor employee vocabulary.
    #[error("unrecognized spreadsheet layout. headers={headers:?}")]
    UnrecognizedSchema { headers: Vec<String> },

    /// No authenticated actor was supplied for the import.
    #[error("no authenticated user: sign in before importing")]
    ActorUnauthenticated,
}

/// Non-fatal error tied to one data row.
///
/// `row` is the 1-based row number in the original file, counting the header as row 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row lacks the field its record kind requires.
    #[error("row {row}: missing required field '{field}'")]
    Validation { row: usize, field: &'static str },

    /// The store rejected the insert.
    #[error("row {row}: {message}")]
    Persistence { row: usize, message: String },
}

impl RowError {
    /// The original-file row number this error refers to.
    pub fn row(&self) -> usize {
        match self {
            RowError::Validation { row, .. } | RowError::Persistence { row, .. } => *row,
        }
    }
}

/// Error returned by a [`crate::commit::RecordStore`] when it rejects a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
