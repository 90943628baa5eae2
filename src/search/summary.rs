use crate::model::SourceError;
use crate::search::coordinator::{OutcomeStatus, SourceOutcome};
use std::fmt;
use std::time::Duration;

/// Per-request tally of how the selected sources settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub succeeded: usize,
    pub empty: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub offers: usize,
    pub slowest: Duration,
}

impl SearchSummary {
    pub fn from_outcomes(outcomes: &[SourceOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match &outcome.status {
                OutcomeStatus::Success(offers) if offers.is_empty() => summary.empty += 1,
                OutcomeStatus::Success(offers) => {
                    summary.succeeded += 1;
                    summary.offers += offers.len();
                }
                OutcomeStatus::Failure(SourceError::Timeout) => summary.timed_out += 1,
                OutcomeStatus::Failure(_) => summary.failed += 1,
            }
            summary.slowest = summary.slowest.max(outcome.elapsed);
        }
        summary
    }

    pub fn sources(&self) -> usize {
        self.succeeded + self.empty + self.failed + self.timed_out
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sources: {} with offers, {} empty, {} failed, {} timed out; {} offers, slowest {:?}",
            self.sources(),
            self.succeeded,
            self.empty,
            self.failed,
            self.timed_out,
            self.offers,
            self.slowest
        )
    }
}
