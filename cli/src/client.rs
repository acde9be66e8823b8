use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};
use wyvern::error::FlagError;
use wyvern::flags::AssetsDocument;
use wyvern::token::TokenId;

use crate::conf::Conf;

/// HTTP client for the asset metadata API.
pub struct AssetsClient {
    client: reqwest::Client,
    api_url: String,
    forward_params: bool,
}

impl AssetsClient {
    pub fn new(conf: &Conf) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(conf.request_timeout_secs))
            .connect_timeout(Duration::from_secs(conf.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(AssetsClient {
            client,
            api_url: conf.api_url.clone(),
            forward_params: conf.forward_params,
        })
    }

    /// Fetches the asset document for the given contract and token ids.
    /// When parameter forwarding is off the URL is fetched bare and both
    /// inputs are ignored, which replays a static document.
    pub async fn fetch_assets(
        &self,
        contract_address: &str,
        token_ids: &[TokenId],
    ) -> Result<AssetsDocument, FlagError> {
        let mut request = self.client.get(&self.api_url);

        if self.forward_params {
            let mut params: Vec<(&str, String)> = token_ids
                .iter()
                .map(|token_id| ("token_ids", token_id.to_string()))
                .collect();
            params.push(("asset_contract_address", contract_address.to_string()));
            params.push(("include_orders", "false".to_string()));
            params.push(("format", "json".to_string()));
            request = request.query(&params);
        } else {
            debug!("Parameter forwarding disabled, fetching {} bare", self.api_url);
        }

        let response = request.send().await.map_err(|err| {
            FlagError::Network(format!("request to {} failed: {err}", self.api_url))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            FlagError::Network(format!("reading response from {} failed: {err}", self.api_url))
        })?;

        if !status.is_success() {
            return Err(FlagError::Network(format!(
                "{} returned status {status}: {body}",
                self.api_url
            )));
        }

        let doc: AssetsDocument =
            serde_json::from_str(&body).map_err(|err| FlagError::Parse(err.to_string()))?;
        info!("Fetched {} asset records", doc.assets.len());

        Ok(doc)
    }
}
