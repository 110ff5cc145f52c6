//! Batch committer: validate and persist mapped rows one at a time.
//!
//! Rows are committed strictly in file order, each with a single store call. A row that lacks
//! its required field is skipped; a row the store rejects is recorded and skipped. Neither
//! stops the batch and nothing is rolled back, so a file can end partially imported.
//!
//! ```rust
//! use sheet_import::commit::{commit_records, MemoryStore};
//! use sheet_import::types::{ActorId, InventoryRecord, MappedRecord};
//!
//! let rows = vec![
//!     MappedRecord::Inventory(InventoryRecord {
//!         product_name: "Widget".to_string(),
//!         quantity: 10,
//!         minimum_level: 5,
//!         category: "Tools".to_string(),
//!     }),
//!     MappedRecord::Inventory(InventoryRecord {
//!         product_name: String::new(),
//!         quantity: 3,
//!         minimum_level: 1,
//!         category: "Tools".to_string(),
//!     }),
//! ];
//!
//! let mut store = MemoryStore::new();
//! let result = commit_records(rows, &ActorId::new("user-1"), &mut store).finish();
//! assert_eq!(result.records_processed, Some(1));
//! assert_eq!(result.errors.unwrap(), vec!["row 3: missing required field 'product_name'"]);
//! ```

mod ledger;
mod store;

use crate::error::{ImportError, ImportResult, RowError};
use crate::types::{ActorId, MappedRecord};

pub use ledger::Ledger;
pub use store::{MemoryStore, RecordStore};

/// Offset from a 0-based data-row index to the 1-based file row (header is row 1).
pub const FILE_ROW_OFFSET: usize = 2;

/// Gate applied before any row is committed: the actor must be present and non-blank.
pub fn require_actor(actor: Option<&ActorId>) -> ImportResult<&ActorId> {
    match actor {
        Some(a) if !a.as_str().trim().is_empty() => Ok(a),
        _ => Err(ImportError::ActorUnauthenticated),
    }
}

/// Commit `records` (in original row order) and return the filled ledger.
pub fn commit_records<S, I>(records: I, actor: &ActorId, store: &mut S) -> Ledger
where
    S: RecordStore + ?Sized,
    I: IntoIterator<Item = MappedRecord>,
{
    commit_records_observed(records, actor, store, |_| {})
}

/// Like [`commit_records`], calling `on_row_error` for each failed row as it happens.
pub fn commit_records_observed<S, I, F>(records: I, actor: &ActorId, store: &mut S, mut on_row_error: F) -> Ledger
where
    S: RecordStore + ?Sized,
    I: IntoIterator<Item = MappedRecord>,
    F: FnMut(&RowError),
{
    records
        .into_iter()
        .enumerate()
        .fold(Ledger::new(), |ledger, (idx, record)| {
            let outcome = commit_one(idx + FILE_ROW_OFFSET, record, actor, store);
            if let Err(e) = &outcome {
                on_row_error(e);
            }
            ledger.record(outcome)
        })
}

fn commit_one<S: RecordStore + ?Sized>(
    row: usize,
    record: MappedRecord,
    actor: &ActorId,
    store: &mut S,
) -> Result<(), RowError> {
    let persisted = match record {
        MappedRecord::Inventory(item) => {
            if item.product_name.trim().is_empty() {
                return Err(RowError::Validation {
                    row,
                    field: "product_name",
                });
            }
            store.insert_inventory(&item)
        }
        MappedRecord::Employee(draft) => {
            if draft.name.trim().is_empty() {
                return Err(RowError::Validation { row, field: "name" });
            }
            store.insert_employee(&draft.stamp(actor))
        }
    };

    persisted.map_err(|e| {
        tracing::debug!(row, error = %e, "store rejected row");
        RowError::Persistence {
            row,
            message: e.message,
        }
    })
}
