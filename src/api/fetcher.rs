//! Page fetching.
//!
//! [`PageFetcher`] is the seam between the scraping pipeline and the
//! network. [`HttpFetcher`] is the `reqwest` implementation; tests plug
//! in canned pages instead.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::ScraperConfig;
use crate::error::{Result, SoundtrackError};

/// Something that can turn a URL into an HTML body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page.
    ///
    /// # Errors
    ///
    /// Returns `HttpStatus` for any status other than 200, or the
    /// transport error if no response arrived.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP page fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher sending the configured user agent.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder().user_agent(config.user_agent.as_str()).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SoundtrackError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
