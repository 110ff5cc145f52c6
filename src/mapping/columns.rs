//! Column mapping: header cells to record fields, data cells to typed values.
//!
//! Each [`RecordKind`] has an ordered table of [`FieldRule`]s. A header cell maps to the first
//! rule whose tokens it contains (case-insensitive), so the table order is the tie-break. The
//! resolution is done once per file into a [`ColumnPlan`] and then applied to every row.

use chrono::NaiveDate;

use crate::types::{EmployeeDraft, InventoryRecord, MappedRecord, RecordKind};

/// Default category for inventory rows with a blank category.
pub const DEFAULT_CATEGORY: &str = "Geral";
/// Default position for employee rows with a blank position.
pub const DEFAULT_POSITION: &str = "Funcionário";

/// A named field of a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProductName,
    Quantity,
    MinimumLevel,
    Category,
    Name,
    Position,
    HireDate,
}

impl Field {
    /// Field name as persisted.
    pub fn name(self) -> &'static str {
        match self {
            Field::ProductName => "product_name",
            Field::Quantity => "quantity",
            Field::MinimumLevel => "minimum_level",
            Field::Category => "category",
            Field::Name => "name",
            Field::Position => "position",
            Field::HireDate => "hire_date",
        }
    }
}

/// One entry of a kind's header-matching table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    /// Lowercase substrings (English and Portuguese) that select this field.
    pub tokens: &'static [&'static str],
}

const INVENTORY_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::ProductName,
        tokens: &["product", "nome"],
    },
    FieldRule {
        field: Field::Quantity,
        tokens: &["quantity", "quantidade"],
    },
    FieldRule {
        field: Field::MinimumLevel,
        tokens: &["minimum", "minimo"],
    },
    FieldRule {
        field: Field::Category,
        tokens: &["category", "categoria"],
    },
];

const EMPLOYEE_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::Name,
        tokens: &["name", "nome"],
    },
    FieldRule {
        field: Field::Position,
        tokens: &["position", "cargo"],
    },
    FieldRule {
        field: Field::HireDate,
        tokens: &["hire", "contrat"],
    },
];

/// The ordered rule table for a kind. Empty for [`RecordKind::Unrecognized`].
pub fn field_rules(kind: RecordKind) -> &'static [FieldRule] {
    match kind {
        RecordKind::Inventory => INVENTORY_RULES,
        RecordKind::Employee => EMPLOYEE_RULES,
        RecordKind::Unrecognized => &[],
    }
}

/// The field a single header cell maps to, if any.
pub fn match_header(kind: RecordKind, header: &str) -> Option<Field> {
    let header = header.to_lowercase();
    field_rules(kind)
        .iter()
        .find(|rule| rule.tokens.iter().any(|t| header.contains(t)))
        .map(|rule| rule.field)
}

/// Per-file column resolution: `columns[i]` is the field header cell `i` feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub kind: RecordKind,
    pub columns: Vec<Option<Field>>,
}

impl ColumnPlan {
    /// Resolve every header cell against the kind's rule table.
    pub fn resolve<S: AsRef<str>>(kind: RecordKind, headers: &[S]) -> Self {
        let columns = headers
            .iter()
            .map(|h| match_header(kind, h.as_ref()))
            .collect();
        Self { kind, columns }
    }

    /// The cell for `field` in `row`, trimmed. When several columns map to the same field the
    /// rightmost one wins. Missing cells read as blank.
    fn cell<'a, S: AsRef<str>>(&self, row: &'a [S], field: Field) -> &'a str {
        self.columns
            .iter()
            .enumerate()
            .rev()
            .find(|(_, f)| **f == Some(field))
            .and_then(|(idx, _)| row.get(idx))
            .map_or("", |c| c.as_ref().trim())
    }

    /// Map one data row into a record, applying defaults.
    ///
    /// Returns `None` only for an `Unrecognized` plan. Missing required fields are left blank
    /// here; the committer decides whether the row is rejected.
    pub fn map_row<S: AsRef<str>>(&self, row: &[S], today: NaiveDate) -> Option<MappedRecord> {
        match self.kind {
            RecordKind::Inventory => Some(MappedRecord::Inventory(InventoryRecord {
                product_name: self.cell(row, Field::ProductName).to_owned(),
                quantity: parse_count(self.cell(row, Field::Quantity)),
                minimum_level: parse_count(self.cell(row, Field::MinimumLevel)),
                category: or_default(self.cell(row, Field::Category), DEFAULT_CATEGORY),
            })),
            RecordKind::Employee => Some(MappedRecord::Employee(EmployeeDraft {
                name: self.cell(row, Field::Name).to_owned(),
                position: or_default(self.cell(row, Field::Position), DEFAULT_POSITION),
                hire_date: match self.cell(row, Field::HireDate) {
                    "" => today.format("%Y-%m-%d").to_string(),
                    s => s.to_owned(),
                },
            })),
            RecordKind::Unrecognized => None,
        }
    }
}

/// Integer coercion: the trimmed cell must be a plain integer, anything else is 0.
///
/// Workbook numbers reach this as strings; whole floats are already rendered without `.0`.
pub fn parse_count(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_owned()
    } else {
        value.to_owned()
    }
}
