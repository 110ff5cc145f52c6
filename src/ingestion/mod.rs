//! Import entrypoints and decoders.
//!
//! Most callers should use [`import_file`] (from [`unified`]) which:
//!
//! - detects the file format by extension/media type (or you can force one via [`ImportOptions`])
//! - decodes, classifies, maps and commits the file's rows
//! - optionally reports success/failure/row errors/alerts to an [`ImportObserver`]
//!
//! Format-specific decoders are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use csv::CsvMode;
pub use observability::{
    CompositeObserver, FileObserver, FileProgress, ImportContext, ImportObserver, ImportSeverity, ImportStats,
    StdErrObserver, TracingObserver,
};
pub use unified::{decode_file, import_file, import_files, try_import_file, FileFormat, FileOutcome, ImportOptions};
