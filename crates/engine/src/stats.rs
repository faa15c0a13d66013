use crate::error::EngineError;
use crate::extract::ParsedTimestamp;

/// Result of processing one candidate file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Modification time was set.
    Updated(ParsedTimestamp),
    /// Dry run: modification time would have been set.
    WouldUpdate(ParsedTimestamp),
    /// No readable `Date` header.
    NoDate,
    ReadFailed(EngineError),
    SetFailed(EngineError),
}

impl FileOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Updated(_) | Self::WouldUpdate(_))
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of candidate files found.
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    #[must_use]
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
        }
    }

    pub const fn record(&mut self, outcome: &FileOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    #[must_use]
    pub const fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}
