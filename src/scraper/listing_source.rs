// Config-driven retailer adapter: build search URL -> fetch -> parse -> normalize
use crate::config::{ConfigError, QUERY_PLACEHOLDER, QueryStyle, SourceConfig, SourceKind};
use crate::model::{Offer, RawListing, SourceError};
use crate::normalizer::{PriceLocale, normalize_raw};
use crate::parser::{HtmlListingParser, Parser, VtexCatalogParser};
use crate::scraper::fetcher::HttpFetcher;
use crate::scraper::traits::SourceAdapter;
use crate::utils::{generate_offer_id, is_ean, to_kebab_case};
use tokio::time::Instant;
use tracing::debug;
use url::{Url, form_urlencoded};

pub struct ListingSource {
    id: String,
    name: String,
    search_url: String,
    base_url: Option<Url>,
    query_style: QueryStyle,
    locale: PriceLocale,
    fetcher: HttpFetcher,
    parser: Box<dyn Parser>,
}

impl ListingSource {
    pub fn from_config(cfg: &SourceConfig, fetcher: HttpFetcher) -> Result<Self, ConfigError> {
        let parser: Box<dyn Parser> = match cfg.kind {
            SourceKind::Html => {
                let selectors = cfg.selectors.as_ref().ok_or_else(|| {
                    ConfigError::Invalid(format!("source '{}': html sources need selectors", cfg.id))
                })?;
                let parser = HtmlListingParser::new(selectors)
                    .map_err(|e| ConfigError::Invalid(format!("source '{}': {}", cfg.id, e)))?;
                Box::new(parser)
            }
            SourceKind::JsonApi => Box::new(VtexCatalogParser::new()),
        };

        let base_url = cfg
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| ConfigError::Invalid(format!("source '{}': bad base_url: {}", cfg.id, e)))?;

        Ok(Self {
            id: cfg.id.clone(),
            name: cfg.name.clone(),
            search_url: cfg.search_url.clone(),
            base_url,
            query_style: cfg.query_style,
            locale: cfg.price_locale,
            fetcher,
            parser,
        })
    }

    /// Barcodes go into the URL verbatim, other terms per the source's query style.
    pub fn build_url(&self, term: &str) -> String {
        let query = if is_ean(term) {
            term.to_string()
        } else {
            match self.query_style {
                QueryStyle::Encoded => encode_component(term),
                QueryStyle::Slug => encode_component(&to_kebab_case(term)),
            }
        };
        self.search_url.replace(QUERY_PLACEHOLDER, &query)
    }

    fn to_offers(&self, listings: Vec<RawListing>, search_url: &str) -> Vec<Offer> {
        let base = self.base_url.clone().or_else(|| Url::parse(search_url).ok());
        listings
            .into_iter()
            .map(|listing| Offer {
                id: generate_offer_id(&self.id),
                price: normalize_raw(&listing.price, self.locale),
                url: listing
                    .link
                    .as_deref()
                    .and_then(|href| resolve_link(base.as_ref(), href))
                    .unwrap_or_else(|| search_url.to_string()),
                image_url: listing
                    .image
                    .as_deref()
                    .and_then(|src| resolve_link(base.as_ref(), src)),
                title: listing.title,
                source_name: self.name.clone(),
                description: listing.description,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SourceAdapter for ListingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_offers(&self, term: &str, deadline: Instant) -> Result<Vec<Offer>, SourceError> {
        let url = self.build_url(term);
        let body = self.fetcher.fetch(&url, deadline).await?;
        let listings = self.parser.parse(&body)?;
        debug!("{}: {} listings parsed", self.id, listings.len());
        Ok(self.to_offers(listings, &url))
    }
}

/// Percent-encodes a term so it is safe both in a path segment and a query value.
fn encode_component(term: &str) -> String {
    form_urlencoded::byte_serialize(term.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.to_string());
    }
    base.and_then(|b| b.join(href).ok()).map(|u| u.to_string())
}
