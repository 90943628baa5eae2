// Search engine: fan-out over the selected sources, then merge into one ordered list.

pub mod coordinator;
pub mod merger;
pub mod summary;

pub use coordinator::{Coordinator, OutcomeStatus, SourceOutcome};
pub use merger::merge;
pub use summary::SearchSummary;
