//! Unified import entrypoint.
//!
//! Most callers should use [`import_file`], which runs the whole pipeline for one uploaded
//! file: decode → classify → map → commit.
//!
//! - If [`ImportOptions::format`] is `None`, the decoder is chosen from the file extension,
//!   falling back to the declared media type.
//! - If an [`super::observability::ImportObserver`] is provided, success/failure/row
//!   errors/alerts are reported to it.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::commit::{commit_records_observed, require_actor, RecordStore};
use crate::error::{ImportError, ImportResult};
use crate::mapping::{classify, ColumnPlan};
use crate::types::{ActorId, ProcessingResult, RawGrid, RecordKind, UploadedFile};

use super::csv::{decode_csv, CsvMode};
use super::observability::{FileProgress, ImportContext, ImportObserver, ImportSeverity, ImportStats};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet workbook (feature-gated behind `excel`).
    Workbook,
}

impl FileFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }

    /// Parse a format from a declared media type. Parameters (`; charset=...`) are ignored.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "text/csv" | "application/csv" | "text/comma-separated-values" => Some(Self::Csv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel"
            | "application/vnd.ms-excel.sheet.macroenabled.12"
            | "application/vnd.ms-excel.sheet.binary.macroenabled.12"
            | "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Workbook),
            _ => None,
        }
    }

    /// Detect the format of an upload. The extension wins over the media type, because
    /// browsers commonly label `.csv` files as `application/vnd.ms-excel`.
    pub fn detect(file_name: &str, media_type: Option<&str>) -> Option<Self> {
        file_name
            .rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
            .or_else(|| media_type.and_then(Self::from_media_type))
    }
}

/// Options controlling import behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ImportOptions {
    /// If `None`, detect the format from the file name and media type.
    pub format: Option<FileFormat>,
    /// CSV splitting rules.
    pub csv_mode: CsvMode,
    /// Date used when an employee row has no hire date. `None` means the local current date.
    pub today: Option<NaiveDate>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ImportSeverity,
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("format", &self.format)
            .field("csv_mode", &self.csv_mode)
            .field("today", &self.today)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            format: None,
            csv_mode: CsvMode::default(),
            today: None,
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

impl ImportOptions {
    fn effective_today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Decode an uploaded file into a grid, choosing the decoder per [`ImportOptions::format`].
pub fn decode_file(file: &UploadedFile, options: &ImportOptions) -> ImportResult<RawGrid> {
    let fmt = resolve_format(file, options)?;
    decode_as(fmt, &file.bytes, options.csv_mode)
}

fn resolve_format(file: &UploadedFile, options: &ImportOptions) -> ImportResult<FileFormat> {
    options
        .format
        .or_else(|| FileFormat::detect(&file.name, file.media_type.as_deref()))
        .ok_or_else(|| ImportError::UnsupportedFormat {
            file_name: file.name.clone(),
            media_type: file.media_type.clone(),
        })
}

fn decode_as(fmt: FileFormat, bytes: &[u8], csv_mode: CsvMode) -> ImportResult<RawGrid> {
    match fmt {
        FileFormat::Csv => decode_csv(bytes, csv_mode),
        FileFormat::Workbook => decode_workbook_dispatch(bytes),
    }
}

fn decode_workbook_dispatch(bytes: &[u8]) -> ImportResult<RawGrid> {
    #[cfg(feature = "excel")]
    {
        super::excel::decode_workbook(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = bytes;
        Err(ImportError::UnsupportedFormat {
            file_name: "workbook".to_string(),
            media_type: Some("excel decoding not enabled (enable cargo feature 'excel')".to_string()),
        })
    }
}

/// Run the full pipeline for one file, returning fatal errors as `Err`.
///
/// Fatal errors (unsupported format, decode failure, empty file, unrecognized headers, no
/// actor) are raised before any row reaches the store. Once committing starts the call always
/// returns `Ok`, with per-row failures listed in [`ProcessingResult::errors`].
///
/// Only `on_row_error` reaches the observer from here; [`import_file`] adds the
/// success/failure/alert callbacks.
pub fn try_import_file<S>(
    file: &UploadedFile,
    actor: Option<&ActorId>,
    store: &mut S,
    options: &ImportOptions,
) -> ImportResult<ProcessingResult>
where
    S: RecordStore + ?Sized,
{
    let mut ctx = context_for(file);
    run(file, actor, store, options, &mut ctx).map(|(result, _)| result)
}

/// Run the full pipeline for one file.
///
/// Fatal errors are folded into a failed [`ProcessingResult`] with no `errors` list. When an
/// observer is configured, this function reports:
///
/// - `on_row_error` for each skipped/rejected row
/// - `on_success` once the file has been processed to the end, with row stats
/// - `on_failure` on a fatal error, with a computed severity
/// - `on_alert` on a fatal error when the severity is >= `options.alert_at_or_above`
///
/// # Example
///
/// ```rust
/// use sheet_import::commit::MemoryStore;
/// use sheet_import::ingestion::{import_file, ImportOptions};
/// use sheet_import::types::{ActorId, UploadedFile};
///
/// let csv = "product,quantity,minimum,category\nWidget,10,5,Tools\n,3,1,Tools\nGadget,abc,2,Electronics\n";
/// let file = UploadedFile::new("stock.csv", Some("text/csv"), csv);
/// let mut store = MemoryStore::new();
///
/// let result = import_file(&file, Some(&ActorId::new("user-1")), &mut store, &ImportOptions::default());
/// assert!(result.success);
/// assert_eq!(result.records_processed, Some(2));
/// assert_eq!(result.errors.unwrap(), vec!["row 3: missing required field 'product_name'"]);
/// assert_eq!(store.inventory()[1].quantity, 0);
/// ```
pub fn import_file<S>(
    file: &UploadedFile,
    actor: Option<&ActorId>,
    store: &mut S,
    options: &ImportOptions,
) -> ProcessingResult
where
    S: RecordStore + ?Sized,
{
    let mut ctx = context_for(file);
    let outcome = run(file, actor, store, options, &mut ctx);

    match outcome {
        Ok((result, stats)) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_success(&ctx, stats);
            }
            result
        }
        Err(e) => {
            tracing::debug!(file = %file.name, error = %e, "import aborted");
            if let Some(obs) = options.observer.as_ref() {
                let sev = ImportSeverity::for_error(&e);
                obs.on_failure(&ctx, sev, &e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, &e);
                }
            }
            ProcessingResult::from_error(&e)
        }
    }
}

/// Outcome of one file in a multi-file import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub file_name: String,
    pub result: ProcessingResult,
}

/// Import several files one after another.
///
/// Files are processed in the given order and never overlap; a file that fails (fatally or
/// partially) does not stop the ones after it. `on_progress` is reported before each file.
pub fn import_files<S>(
    files: &[UploadedFile],
    actor: Option<&ActorId>,
    store: &mut S,
    options: &ImportOptions,
) -> Vec<FileOutcome>
where
    S: RecordStore + ?Sized,
{
    let total = files.len();
    files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            if let Some(obs) = options.observer.as_ref() {
                let progress = FileProgress {
                    index,
                    total,
                    file_name: file.name.clone(),
                };
                obs.on_progress(&context_for(file), &progress);
            }
            FileOutcome {
                file_name: file.name.clone(),
                result: import_file(file, actor, store, options),
            }
        })
        .collect()
}

fn context_for(file: &UploadedFile) -> ImportContext {
    ImportContext {
        file_name: file.name.clone(),
        format: None,
        kind: None,
    }
}

fn run<S>(
    file: &UploadedFile,
    actor: Option<&ActorId>,
    store: &mut S,
    options: &ImportOptions,
    ctx: &mut ImportContext,
) -> ImportResult<(ProcessingResult, ImportStats)>
where
    S: RecordStore + ?Sized,
{
    let fmt = resolve_format(file, options)?;
    ctx.format = Some(fmt);

    let grid = decode_as(fmt, &file.bytes, options.csv_mode)?;
    tracing::debug!(file = %file.name, format = ?fmt, rows = grid.row_count(), "decoded file");

    let headers = match grid.headers() {
        Some(h) if grid.row_count() >= 2 => h,
        _ => return Err(ImportError::EmptyFile),
    };

    let kind = classify(headers);
    ctx.kind = Some(kind);
    tracing::debug!(file = %file.name, ?kind, "classified sheet");
    if kind == RecordKind::Unrecognized {
        return Err(ImportError::UnrecognizedSchema {
            headers: headers.to_vec(),
        });
    }

    let actor = require_actor(actor)?;

    let plan = ColumnPlan::resolve(kind, headers);
    let today = options.effective_today();
    let records = grid
        .data_rows()
        .iter()
        .filter_map(|row| plan.map_row(row.as_slice(), today));

    let observer = options.observer.as_deref();
    let ctx: &ImportContext = ctx;
    let ledger = commit_records_observed(records, actor, store, |e| {
        if let Some(obs) = observer {
            obs.on_row_error(ctx, e);
        }
    });

    let stats = ImportStats {
        rows: grid.data_rows().len(),
        committed: ledger.committed(),
        failed: ledger.errors().len(),
    };
    tracing::debug!(
        file = %file.name,
        committed = stats.committed,
        failed = stats.failed,
        "committed rows"
    );
    Ok((ledger.finish(), stats))
}
