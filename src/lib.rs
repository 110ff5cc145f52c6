//! `sheet-import` ingests uploaded spreadsheets (CSV or Excel workbooks) into inventory or
//! employee records.
//!
//! The primary entrypoint is [`ingestion::import_file`], which runs one file through a strictly
//! sequential pipeline:
//!
//! 1. **Decode** the bytes into a [`types::RawGrid`] (header row + data rows)
//! 2. **Classify** the header row as a [`types::RecordKind`]
//! 3. **Map** every data row into a [`types::MappedRecord`], matching English or Portuguese
//!    header names and filling defaults
//! 4. **Commit** the rows one at a time to a [`commit::RecordStore`], collecting per-row errors
//!
//! ## What you can import
//!
//! **File formats (detected by extension, then by media type):**
//!
//! - **CSV**: `.csv`, `text/csv`
//! - **Excel/workbooks** (Cargo feature `excel`, on by default): `.xlsx`, `.xls`, `.xlsm`,
//!   `.xlsb`, `.ods` (first sheet only)
//!
//! **Record kinds:**
//!
//! | Kind | Detected by header tokens | Fields | Required |
//! |------|---------------------------|--------|----------|
//! | Inventory | product, quantity, stock | `product_name`, `quantity`, `minimum_level`, `category` | `product_name` |
//! | Employee | name, employee, position | `name`, `position`, `hire_date` | `name` |
//!
//! Inventory is checked first. Employee sheets may also use the Portuguese `nome` and `cargo`.
//!
//! ## Quick example
//!
//! ```rust
//! use sheet_import::commit::MemoryStore;
//! use sheet_import::ingestion::{import_file, ImportOptions};
//! use sheet_import::types::{ActorId, UploadedFile};
//!
//! let csv = "Nome,Cargo,Data de Contratação\nAda,Engenheira,2023-04-01\nGrace,,\n";
//! let file = UploadedFile::new("equipe.csv", Some("text/csv"), csv);
//! let actor = ActorId::new("user-42");
//! let mut store = MemoryStore::new();
//!
//! let result = import_file(&file, Some(&actor), &mut store, &ImportOptions::default());
//! assert!(result.success);
//! assert_eq!(result.records_processed, Some(2));
//! assert_eq!(store.employees()[1].position, "Funcionário");
//! assert_eq!(store.employees()[1].actor_id, actor);
//! ```
//!
//! ## Failure model
//!
//! - Problems with the file as a whole ([`ImportError`]) stop the import before any row is
//!   committed and come back as a failed [`types::ProcessingResult`] without an error list.
//! - Problems with a single row ([`error::RowError`]) skip that row only. The result lists them
//!   as `row N: ...`, where `N` is the row number in the original file (header = row 1).
//! - Successful rows are never rolled back.
//!
//! ## Modules
//!
//! - [`ingestion`]: unified entrypoints, decoders and observer hooks
//! - [`mapping`]: sheet classification and column mapping
//! - [`commit`]: batch committer, ledger and store collaborator
//! - [`types`]: grid, record and result types
//! - [`error`]: error types used across the pipeline

pub mod commit;
pub mod error;
pub mod ingestion;
pub mod mapping;
pub mod types;

pub use error::{ImportError, ImportResult, RowError, StoreError};
