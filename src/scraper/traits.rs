use crate::model::{Offer, SourceError};
use tokio::time::Instant;

/// One retailer behind a uniform contract.
///
/// `Ok(vec![])` means the source answered and had nothing for the term;
/// `Err` means the source could not be queried or its answer not understood.
/// Implementations should give up by `deadline`; the coordinator enforces it
/// regardless.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Human-readable retailer name shown on offers.
    fn name(&self) -> &str;

    async fn fetch_offers(&self, term: &str, deadline: Instant) -> Result<Vec<Offer>, SourceError>;
}
