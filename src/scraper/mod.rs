pub mod fetcher;
pub mod listing_source;
pub mod registry;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use listing_source::ListingSource;
pub use registry::{RegisteredSource, Resolution, SourceInfo, SourceRegistry};
pub use traits::SourceAdapter;
