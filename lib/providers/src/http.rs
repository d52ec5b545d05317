//! Thin JSON-over-GET client shared by the providers

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::EndpointConfig;
use crate::error::ProviderError;

pub struct JsonClient {
    client: Client,
    url: String,
}

impl JsonClient {
    pub fn new(endpoint: &EndpointConfig, user_agent: &str) -> Result<Self, ProviderError> {
        if endpoint.timeout.is_zero() {
            return Err(ProviderError::InvalidConfig(format!(
                "zero timeout for {}",
                endpoint.url
            )));
        }

        let client = Client::builder()
            .timeout(endpoint.timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: endpoint.url.clone(),
        })
    }

    /// GET the endpoint with `params` and decode the body as `T`.
    /// Any decode failure is reported as [`ProviderError::Malformed`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self.client.get(&self.url).query(params).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}
