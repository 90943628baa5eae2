use crate::config::{AppConfig, ConfigError, SourceCategory};
use crate::model::{SourceId, ValidationError};
use crate::scraper::fetcher::HttpFetcher;
use crate::scraper::listing_source::ListingSource;
use crate::scraper::traits::SourceAdapter;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

pub struct RegisteredSource {
    pub id: SourceId,
    pub category: SourceCategory,
    pub adapter: Arc<dyn SourceAdapter>,
}

/// Catalogue entry as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    pub id: SourceId,
    pub name: String,
    pub category: SourceCategory,
}

/// Adapters selected for one request, in registration order.
pub struct Resolution {
    pub adapters: Vec<(SourceId, Arc<dyn SourceAdapter>)>,
    pub unknown: usize,
}

/// Maps source identifiers to adapters. Registration order is the dispatch order.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<RegisteredSource>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one adapter per enabled source in the config, all sharing one HTTP client.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let fetcher = HttpFetcher::new(&config.user_agent)
            .map_err(|e| ConfigError::Invalid(format!("cannot build http client: {}", e)))?;

        let mut registry = Self::new();
        for source in config.sources.iter().filter(|s| s.enabled) {
            let adapter = ListingSource::from_config(source, fetcher.clone())?;
            registry.register(&source.id, source.category, Arc::new(adapter))?;
        }
        info!("Registered {} sources", registry.len());
        Ok(registry)
    }

    pub fn register(
        &mut self,
        id: &str,
        category: SourceCategory,
        adapter: Arc<dyn SourceAdapter>,
    ) -> Result<(), ConfigError> {
        if self.sources.iter().any(|s| s.id == id) {
            return Err(ConfigError::Invalid(format!("duplicate source id '{}'", id)));
        }
        self.sources.push(RegisteredSource {
            id: id.to_string(),
            category,
            adapter,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn catalogue(&self) -> Vec<SourceInfo> {
        self.sources
            .iter()
            .map(|s| SourceInfo {
                id: s.id.clone(),
                name: s.adapter.name().to_string(),
                category: s.category,
            })
            .collect()
    }

    /// Picks the registered adapters named in `ids`. Unknown ids are counted and
    /// dropped. Fails only when none of the ids is registered.
    pub fn resolve<'a, I>(&self, ids: I) -> Result<Resolution, ValidationError>
    where
        I: IntoIterator<Item = &'a SourceId>,
    {
        let wanted: HashSet<&str> = ids.into_iter().map(String::as_str).collect();

        let adapters: Vec<(SourceId, Arc<dyn SourceAdapter>)> = self
            .sources
            .iter()
            .filter(|s| wanted.contains(s.id.as_str()))
            .map(|s| (s.id.clone(), Arc::clone(&s.adapter)))
            .collect();
        let unknown = wanted.len() - adapters.len();

        if adapters.is_empty() {
            return Err(ValidationError::NoValidSources);
        }
        Ok(Resolution { adapters, unknown })
    }
}
