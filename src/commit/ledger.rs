use crate::error::RowError;
use crate::types::ProcessingResult;

/// Per-file accumulator of committed rows and row errors.
///
/// Built empty when committing starts, fed one outcome per row in file order, and consumed by
/// [`Ledger::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    committed: usize,
    errors: Vec<RowError>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row's outcome into the ledger.
    pub fn record(mut self, outcome: Result<(), RowError>) -> Self {
        match outcome {
            Ok(()) => self.committed += 1,
            Err(e) => self.errors.push(e),
        }
        self
    }

    pub fn committed(&self) -> usize {
        self.committed
    }

    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    /// Finalize into the caller-facing result.
    pub fn finish(self) -> ProcessingResult {
        let mut message = format!("{} record(s) imported successfully", self.committed);
        if !self.errors.is_empty() {
            message.push_str(&format!(", {} error(s)", self.errors.len()));
        }

        let errors = if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.iter().map(ToString::to_string).collect())
        };

        ProcessingResult {
            success: self.committed > 0,
            message,
            records_processed: Some(self.committed),
            errors,
        }
    }
}
