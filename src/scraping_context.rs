use crate::{config::HarvestConfig, requests::RequestClient};

pub struct ScrapingContext {
    pub config: HarvestConfig,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new(config: HarvestConfig) -> anyhow::Result<Self> {
        let request_client = RequestClient::new(config.request_timeout)?;
        Ok(ScrapingContext {
            config,
            request_client,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(HarvestConfig::new()?)
    }
}
