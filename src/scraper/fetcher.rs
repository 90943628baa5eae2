use crate::model::SourceError;
use reqwest::Client;
use tokio::time::Instant;
use tracing::debug;

/// Shared HTTP client for all sources. Cloning shares the connection pool.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the body text, giving up at `deadline`.
    pub async fn fetch(&self, url: &str, deadline: Instant) -> Result<String, SourceError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(SourceError::Timeout);
        }

        debug!("GET {} (budget {:?})", url, remaining);
        let response = self
            .client
            .get(url)
            .timeout(remaining)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Http(e.to_string())
    }
}
