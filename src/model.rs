// Core structs: Offer, Price, SearchRequest, SearchResponse
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Canonical price of an offer: the display string sent to clients and the
/// numeric value used for ordering. `value` is `None` when the source price
/// could not be parsed; it is never negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    #[serde(rename = "price")]
    pub display: String,
    #[serde(rename = "priceValue")]
    pub value: Option<f64>,
}

impl Price {
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub price: Price,
    pub source_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Stable key a client uses to select a source ("amazon", "drogasil", ...).
pub type SourceId = String;

/// Search request as received from a client, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub sources: Vec<SourceId>,
}

/// A request that passed validation: trimmed non-empty term and a non-empty,
/// de-duplicated set of source identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSearch {
    pub term: String,
    pub sources: BTreeSet<SourceId>,
}

impl SearchRequest {
    pub fn validate(&self) -> Result<ValidSearch, ValidationError> {
        let term = self.term.trim();
        if term.is_empty() {
            return Err(ValidationError::EmptyTerm);
        }

        let sources: BTreeSet<SourceId> = self
            .sources
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if sources.is_empty() {
            return Err(ValidationError::NoSources);
        }

        Ok(ValidSearch {
            term: term.to_string(),
            sources,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Offer>,
}

/// A listing as extracted by a parser, before price normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub title: String,
    pub price: RawPrice,
    pub link: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawPrice {
    /// Price text as shown on the source page, e.g. "R$ 1.234,56".
    Text(String),
    /// Price already delivered as a number by a structured API.
    Amount(f64),
    #[default]
    Missing,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("timed out")]
    Timeout,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("adapter panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserError {
    #[error("html parse error: {0}")]
    HtmlParseError(String),
    #[error("invalid json: {0}")]
    InvalidJson(String),
}

impl From<ParserError> for SourceError {
    fn from(e: ParserError) -> Self {
        SourceError::Parse(e.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("search term must not be empty")]
    EmptyTerm,
    #[error("at least one source must be selected")]
    NoSources,
    #[error("no valid source selected")]
    NoValidSources,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("internal error: {0}")]
    Internal(String),
}
