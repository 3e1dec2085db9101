// src/utils/http.rs

//! HTTP retrieval behind the [`Fetcher`] seam.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// A retrieved document with its transport status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Retrieves raw documents by URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL. Transport failures are errors; HTTP status codes are not.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Fetch a URL and return its body, treating any status other than 200 as a load error.
pub async fn fetch_document(fetcher: &dyn Fetcher, url: &str) -> Result<String> {
    let page = fetcher.fetch(url).await?;
    if !page.is_success() {
        return Err(AppError::page_load(url, page.status));
    }
    Ok(page.body)
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// [`Fetcher`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("GET {} -> {}", url, status);
        Ok(FetchedPage { status, body })
    }
}
