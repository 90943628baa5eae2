pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod scraper;
pub mod search;
pub mod server;
pub mod utils;
