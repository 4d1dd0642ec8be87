use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use url::Url;

use crate::error::{HarvestError, Result};

const USER_AGENT: &str = concat!("pslib_harvester/", env!("CARGO_PKG_VERSION"));

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// One GET. Non-2xx statuses are turned into errors.
    pub async fn fetch_url_response(&self, url: &Url) -> Result<Response> {
        let fetch_error = |source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_error)?;
        response.error_for_status().map_err(fetch_error)
    }

    pub async fn fetch_url_body(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.fetch_url_response(url).await?;
        let body = response.bytes().await.map_err(|source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}
