use crate::normalizer::PriceLocale;
use scraper::Selector;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::time::Duration;
use thiserror::Error;

pub const QUERY_PLACEHOLDER: &str = "{query}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Search results page scraped with CSS selectors.
    Html,
    /// Search endpoint returning JSON.
    JsonApi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStyle {
    /// Percent-encoded term, e.g. `leite%20em%20p%C3%B3`.
    #[default]
    Encoded,
    /// Hyphenated lowercase term, e.g. `leite-em-pó`.
    Slug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    #[default]
    Retail,
    Pharmacy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    pub item: String,
    pub title: String,
    pub price: String,
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: SourceCategory,
    pub kind: SourceKind,
    pub search_url: String,
    #[serde(default)]
    pub query_style: QueryStyle,
    #[serde(default)]
    pub price_locale: PriceLocale,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub selectors: Option<SelectorConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_timeout_ms")]
    pub per_source_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub sources: Vec<SourceConfig>,
}

impl AppConfig {
    pub fn per_source_timeout(&self) -> Duration {
        Duration::from_millis(self.per_source_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_source_timeout_ms == 0 {
            return Err(ConfigError::Invalid("per_source_timeout_ms must be positive".into()));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.id.trim().is_empty() {
                return Err(ConfigError::Invalid("source with empty id".into()));
            }
            if !seen.insert(source.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate source id '{}'", source.id)));
            }
            if !source.search_url.contains(QUERY_PLACEHOLDER) {
                return Err(ConfigError::Invalid(format!(
                    "source '{}': search_url lacks {}",
                    source.id, QUERY_PLACEHOLDER
                )));
            }
            if source.kind == SourceKind::Html {
                let selectors = source.selectors.as_ref().ok_or_else(|| {
                    ConfigError::Invalid(format!("source '{}': html sources need selectors", source.id))
                })?;
                check_selectors(&source.id, selectors)?;
            }
        }
        Ok(())
    }
}

fn check_selectors(id: &str, selectors: &SelectorConfig) -> Result<(), ConfigError> {
    let all = [
        Some(&selectors.item),
        Some(&selectors.title),
        Some(&selectors.price),
        Some(&selectors.link),
        selectors.image.as_ref(),
        selectors.description.as_ref(),
    ];
    for css in all.into_iter().flatten() {
        Selector::parse(css)
            .map_err(|e| ConfigError::Invalid(format!("source '{}': bad selector '{}': {}", id, css, e)))?;
    }
    Ok(())
}

fn default_enabled() -> bool {
    true
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_timeout_ms() -> u64 {
    8000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
        .to_string()
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
