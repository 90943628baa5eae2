use crate::model::{Offer, SearchError, SearchRequest, SourceError, SourceId};
use crate::scraper::SourceRegistry;
use crate::search::merger::merge;
use crate::search::summary::SearchSummary;
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeStatus {
    /// The source answered; an empty list means it had no results.
    Success(Vec<Offer>),
    Failure(SourceError),
}

/// Terminal state of one source for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    pub source_id: SourceId,
    pub status: OutcomeStatus,
    pub elapsed: Duration,
}

impl SourceOutcome {
    pub fn offer_count(&self) -> usize {
        match &self.status {
            OutcomeStatus::Success(offers) => offers.len(),
            OutcomeStatus::Failure(_) => 0,
        }
    }
}

/// Queries the selected sources concurrently and settles every one of them.
pub struct Coordinator {
    registry: Arc<SourceRegistry>,
    per_source_timeout: Duration,
}

impl Coordinator {
    pub fn new(registry: Arc<SourceRegistry>, per_source_timeout: Duration) -> Self {
        Self {
            registry,
            per_source_timeout,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Validates the request, searches with the configured timeout and merges.
    pub async fn run(&self, request: &SearchRequest) -> Result<Vec<Offer>, SearchError> {
        let search = request.validate()?;
        info!(
            "🔎 Search '{}' in {} source(s)",
            search.term,
            search.sources.len()
        );

        let outcomes = self
            .search(&search.term, &search.sources, self.per_source_timeout)
            .await?;

        let summary = SearchSummary::from_outcomes(&outcomes);
        info!("Search '{}' settled: {}", search.term, summary);

        let offers = merge(outcomes);
        info!("Returning {} offers", offers.len());
        Ok(offers)
    }

    /// Runs one task per resolved source, each bounded by `per_source_timeout`,
    /// and waits until all of them have finished, failed or timed out. Outcomes
    /// come back in registration order.
    pub async fn search<'a, I>(
        &self,
        term: &str,
        ids: I,
        per_source_timeout: Duration,
    ) -> Result<Vec<SourceOutcome>, SearchError>
    where
        I: IntoIterator<Item = &'a SourceId>,
    {
        let resolution = self.registry.resolve(ids)?;
        if resolution.unknown > 0 {
            info!("Dropped {} unknown source id(s)", resolution.unknown);
        }

        let (source_ids, handles): (Vec<SourceId>, Vec<_>) = resolution
            .adapters
            .into_iter()
            .map(|(id, adapter)| {
                let term = term.to_string();
                let handle = tokio::spawn(async move {
                    let task_started = Instant::now();
                    let deadline = task_started + per_source_timeout;
                    let fetch =
                        AssertUnwindSafe(adapter.fetch_offers(&term, deadline)).catch_unwind();
                    let result = match timeout_at(deadline, fetch).await {
                        Ok(Ok(result)) => result,
                        Ok(Err(payload)) => Err(SourceError::Panicked(panic_message(payload))),
                        Err(_) => Err(SourceError::Timeout),
                    };
                    (result, task_started.elapsed())
                });
                (id, handle)
            })
            .unzip();

        let joined = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(joined.len());
        for (source_id, joined) in source_ids.into_iter().zip(joined) {
            let (result, elapsed) = match joined {
                Ok(settled) => settled,
                Err(e) => {
                    return Err(SearchError::Internal(format!(
                        "task for '{}' did not complete: {}",
                        source_id, e
                    )));
                }
            };

            let status = match result {
                Ok(offers) => {
                    if offers.is_empty() {
                        info!("{}: no results ({:?})", source_id, elapsed);
                    } else {
                        info!("{}: {} offers ({:?})", source_id, offers.len(), elapsed);
                    }
                    OutcomeStatus::Success(offers)
                }
                Err(e) => {
                    warn!("❌ {}: {} ({:?})", source_id, e, elapsed);
                    OutcomeStatus::Failure(e)
                }
            };

            outcomes.push(SourceOutcome {
                source_id,
                status,
                elapsed,
            });
        }
        Ok(outcomes)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
