//! Sheet classification and column mapping.
//!
//! Given a decoded [`crate::types::RawGrid`]:
//!
//! - [`classify()`] decides the [`crate::types::RecordKind`] from the header row
//! - [`ColumnPlan::resolve`] maps each header cell to a field of that kind
//! - [`ColumnPlan::map_row`] turns a data row into a [`crate::types::MappedRecord`]
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sheet_import::mapping::{classify, ColumnPlan};
//! use sheet_import::types::{MappedRecord, RecordKind};
//!
//! let headers = ["Product", "Quantidade", "Categoria"];
//! let kind = classify(&headers);
//! assert_eq!(kind, RecordKind::Inventory);
//!
//! let plan = ColumnPlan::resolve(kind, &headers);
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let Some(MappedRecord::Inventory(item)) = plan.map_row(&["Parafuso", "12", ""], today) else {
//!     unreachable!()
//! };
//! assert_eq!(item.product_name, "Parafuso");
//! assert_eq!(item.quantity, 12);
//! assert_eq!(item.category, "Geral");
//! ```

pub mod classify;
pub mod columns;

pub use classify::classify;
pub use columns::{field_rules, match_header, ColumnPlan, Field, FieldRule};
