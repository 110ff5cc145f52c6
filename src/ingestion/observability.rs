use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{ImportError, RowError};
use crate::types::RecordKind;

use super::unified::FileFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportSeverity {
    /// Informational event.
    Info,
    /// A single row was skipped; the file continues.
    Warning,
    /// The file could not be imported.
    Error,
    /// Infrastructure or authentication failure.
    Critical,
}

impl ImportSeverity {
    /// Severity of an error that stopped a whole file.
    pub fn for_error(e: &ImportError) -> Self {
        match e {
            ImportError::Io(_) | ImportError::ActorUnauthenticated => ImportSeverity::Critical,
            ImportError::UnsupportedFormat { .. }
            | ImportError::Encoding(_)
            | ImportError::Csv(_)
            | ImportError::EmptyFile
            | ImportError::UnrecognizedSchema { .. } => ImportSeverity::Error,
            #[cfg(feature = "excel")]
            ImportError::Excel(_) => ImportSeverity::Error,
        }
    }
}

/// Context about one file's import attempt.
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// Name of the uploaded file.
    pub file_name: String,
    /// Decoder used, once known.
    pub format: Option<FileFormat>,
    /// Classification, once known.
    pub kind: Option<RecordKind>,
}

/// Counters reported when a file finishes without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Data rows seen (header excluded).
    pub rows: usize,
    /// Rows committed to the store.
    pub committed: usize,
    /// Rows skipped or rejected.
    pub failed: usize,
}

/// Position of a file within a multi-file import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProgress {
    /// 0-based index of the file about to be processed.
    pub index: usize,
    /// Total number of files in the run.
    pub total: usize,
    pub file_name: String,
}

/// Observer interface for import outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. Every method defaults to a no-op.
pub trait ImportObserver: Send + Sync {
    /// Called when a file was processed to the end (even if every row failed).
    fn on_success(&self, _ctx: &ImportContext, _stats: ImportStats) {}

    /// Called when a fatal error stops a file.
    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// Called when a fatal error meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.on_failure(ctx, severity, error)
    }

    /// Called for every skipped or rejected row, in file order.
    fn on_row_error(&self, _ctx: &ImportContext, _error: &RowError) {}

    /// Called before each file of a multi-file import starts.
    fn on_progress(&self, _ctx: &ImportContext, _progress: &FileProgress) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_row_error(&self, ctx: &ImportContext, error: &RowError) {
        for o in &self.observers {
            o.on_row_error(ctx, error);
        }
    }

    fn on_progress(&self, ctx: &ImportContext, progress: &FileProgress) {
        for o in &self.observers {
            o.on_progress(ctx, progress);
        }
    }
}

/// Logs import events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ImportObserver for StdErrObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        eprintln!(
            "[import][ok] file={} kind={:?} rows={} committed={} failed={}",
            ctx.file_name, ctx.kind, stats.rows, stats.committed, stats.failed
        );
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        eprintln!(
            "[import][{:?}] file={} format={:?} err={}",
            severity, ctx.file_name, ctx.format, error
        );
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        eprintln!(
            "[ALERT][import][{:?}] file={} format={:?} err={}",
            severity, ctx.file_name, ctx.format, error
        );
    }

    fn on_row_error(&self, ctx: &ImportContext, error: &RowError) {
        eprintln!("[import][row] file={} {}", ctx.file_name, error);
    }

    fn on_progress(&self, _ctx: &ImportContext, progress: &FileProgress) {
        eprintln!(
            "[import][{}/{}] {}",
            progress.index + 1,
            progress.total,
            progress.file_name
        );
    }
}

/// Forwards import events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        tracing::info!(
            file = %ctx.file_name,
            kind = ?ctx.kind,
            rows = stats.rows,
            committed = stats.committed,
            failed = stats.failed,
            "import finished"
        );
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        tracing::warn!(file = %ctx.file_name, format = ?ctx.format, ?severity, %error, "import failed");
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        tracing::error!(file = %ctx.file_name, format = ?ctx.format, ?severity, %error, "import alert");
    }

    fn on_row_error(&self, ctx: &ImportContext, error: &RowError) {
        tracing::debug!(file = %ctx.file_name, row = error.row(), %error, "row skipped");
    }

    fn on_progress(&self, _ctx: &ImportContext, progress: &FileProgress) {
        tracing::info!(
            file = %progress.file_name,
            index = progress.index,
            total = progress.total,
            "importing file"
        );
    }
}

/// Appends import events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{} {line}", chrono::Utc::now().to_rfc3339());
        }
    }
}

impl ImportObserver for FileObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        self.append_line(&format!(
            "ok file={} kind={:?} rows={} committed={} failed={}",
            ctx.file_name, ctx.kind, stats.rows, stats.committed, stats.failed
        ));
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "fail severity={:?} file={} err={}",
            severity, ctx.file_name, error
        ));
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "ALERT severity={:?} file={} err={}",
            severity, ctx.file_name, error
        ));
    }

    fn on_row_error(&self, ctx: &ImportContext, error: &RowError) {
        self.append_line(&format!("row file={} {error}", ctx.file_name));
    }
}
