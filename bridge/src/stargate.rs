use crate::{
    config::StargateConfig,
    error::{BridgeError, Result},
    types::{BridgeParams, BridgeQuote, QuoteRequest},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};

/// Anything that can price a bridge transfer.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn get_quote(&self, params: &BridgeParams) -> Result<BridgeQuote>;
}

/// Client for the public Stargate HTTP API.
pub struct StargateClient {
    client: Client,
    base_url: String,
}

impl StargateClient {
    pub fn new(config: &StargateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw route listing from `GET /v2/routes`.
    pub async fn get_all_routes(&self) -> Result<serde_json::Value> {
        let url = format!("{}/v2/routes", self.base_url);
        debug!("Fetching routes from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(BridgeError::RoutesFailed(status_text(&response)));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QuoteSource for StargateClient {
    async fn get_quote(&self, params: &BridgeParams) -> Result<BridgeQuote> {
        let request = QuoteRequest::from_params(params)?;
        let url = format!("{}/v1/quotes", self.base_url);

        info!(
            "Requesting quote: {} {} from chain {} to chain {}",
            params.amount, params.from_token, params.from_chain_id, params.to_chain_id
        );

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(BridgeError::QuoteFailed(status_text(&response)));
        }

        let quote: BridgeQuote = response.json().await?;
        debug!("Received quote: {:?}", quote);
        Ok(quote)
    }
}

fn status_text(response: &Response) -> String {
    let status = response.status();
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
