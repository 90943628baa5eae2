// Retailer-agnostic extraction plugins. Each turns a response body into RawListings.
pub mod listing_parser;
pub mod vtex_parser;

pub use listing_parser::HtmlListingParser;
pub use vtex_parser::VtexCatalogParser;

use crate::model::{ParserError, RawListing};

pub trait Parser: Send + Sync {
    fn parse(&self, body: &str) -> Result<Vec<RawListing>, ParserError>;
}
