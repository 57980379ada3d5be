use crate::config::HttpConfig;
use crate::error::{Result, SyncError};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared HTTP client. Built once at startup from config and cloned into
/// every component that talks to the network.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    /// GET a JSON document and decode it.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(SyncError::unexpected_status(url, response.status()));
        }

        Ok(response.json::<T>().await?)
    }

    /// GET a raw response for streaming the body to disk.
    pub async fn get_raw(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SyncError::unexpected_status(url, response.status()));
        }

        Ok(response)
    }
}
