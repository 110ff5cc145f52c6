//! Header-based sheet classification.

use crate::types::RecordKind;

/// Tokens that mark a sheet as inventory. Checked before [`EMPLOYEE_TOKENS`].
pub const INVENTORY_TOKENS: &[&str] = &["product", "quantity", "stock"];

/// Tokens that mark a sheet as employee records. `nome` and `cargo` cover Portuguese sheets.
pub const EMPLOYEE_TOKENS: &[&str] = &["name", "employee", "position", "nome", "cargo"];

/// Classify a sheet from its header row.
///
/// All header cells are lowercased and joined with a space, then searched for substrings.
/// Inventory is checked first, so a header row matching both vocabularies is `Inventory`.
pub fn classify<S: AsRef<str>>(headers: &[S]) -> RecordKind {
    let joined = headers
        .iter()
        .map(|h| h.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if contains_any(&joined, INVENTORY_TOKENS) {
        RecordKind::Inventory
    } else if contains_any(&joined, EMPLOYEE_TOKENS) {
        RecordKind::Employee
    } else {
        RecordKind::Unrecognized
    }
}

fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| haystack.contains(t))
}
