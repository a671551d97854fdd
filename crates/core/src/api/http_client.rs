use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::analytics::PortfolioSummary;
use crate::models::investment::{Investment, InvestmentId, InvestmentRequest, InvestmentType};
use crate::models::settings::ClientSettings;
use super::traits::InvestmentApi;

/// REST client for the investment API.
///
/// - **Resource**: `/investments` under the configured base URL.
/// - **Bodies**: JSON, camelCase fields, decimals as numbers, dates as `YYYY-MM-DD`.
/// - **Errors**: non-2xx statuses are mapped with [`CoreError::from_status`],
///   using the `message` field of the server's error body when there is one.
pub struct HttpInvestmentApi {
    client: Client,
    base_url: String,
}

impl HttpInvestmentApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, CoreError> {
        settings.validate()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.normalized_base_url().to_string(),
        })
    }

    /// URL of the investments collection.
    #[must_use]
    pub fn investments_url(&self) -> String {
        format!("{}/investments", self.base_url)
    }

    /// URL of a single investment.
    #[must_use]
    pub fn investment_url(&self, id: InvestmentId) -> String {
        format!("{}/investments/{id}", self.base_url)
    }

    /// Turn a non-success response into a `CoreError`, pass successes through.
    async fn check_status(resp: Response) -> Result<Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let fallback = status.canonical_reason().unwrap_or("request failed");
        let message = extract_error_message(&body, fallback);
        warn!("Investment API returned HTTP {}: {message}", status.as_u16());
        Err(CoreError::from_status(status.as_u16(), message))
    }

    async fn read_json<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T, CoreError> {
        Self::check_status(resp)
            .await?
            .json::<T>()
            .await
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse {what}: {e}")))
    }
}

/// Pull a human-readable message out of an error response body.
///
/// The API answers errors with a JSON object carrying `message` (or
/// `error`); plain-text bodies are used as-is, empty ones fall back.
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(trimmed) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                if !msg.trim().is_empty() {
                    return msg.clone();
                }
            }
        }
        return fallback.to_string();
    }
    trimmed.to_string()
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl InvestmentApi for HttpInvestmentApi {
    async fn list(
        &self,
        type_filter: Option<InvestmentType>,
    ) -> Result<Vec<Investment>, CoreError> {
        debug!("GET /investments (type filter: {type_filter:?})");
        let mut request = self.client.get(self.investments_url());
        if let Some(t) = type_filter {
            request = request.query(&[("type", t.api_name())]);
        }
        let resp = request.send().await?;
        Self::read_json(resp, "investment list").await
    }

    async fn get(&self, id: InvestmentId) -> Result<Investment, CoreError> {
        debug!("GET /investments/{id}");
        let resp = self.client.get(self.investment_url(id)).send().await?;
        Self::read_json(resp, &format!("investment {id}")).await
    }

    async fn create(&self, request: &InvestmentRequest) -> Result<Investment, CoreError> {
        debug!("POST /investments ({})", request.symbol);
        let resp = self
            .client
            .post(self.investments_url())
            .json(request)
            .send()
            .await?;
        Self::read_json(resp, "created investment").await
    }

    async fn update(
        &self,
        id: InvestmentId,
        request: &InvestmentRequest,
    ) -> Result<Investment, CoreError> {
        debug!("PUT /investments/{id}");
        let resp = self
            .client
            .put(self.investment_url(id))
            .json(request)
            .send()
            .await?;
        Self::read_json(resp, &format!("updated investment {id}")).await
    }

    async fn delete(&self, id: InvestmentId) -> Result<(), CoreError> {
        debug!("DELETE /investments/{id}");
        let resp = self.client.delete(self.investment_url(id)).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn summary(&self) -> Result<PortfolioSummary, CoreError> {
        debug!("GET /investments/summary");
        let resp = self
            .client
            .get(format!("{}/summary", self.investments_url()))
            .send()
            .await?;
        Self::read_json(resp, "portfolio summary").await
    }

    async fn update_price(
        &self,
        id: InvestmentId,
        new_price: Decimal,
    ) -> Result<Investment, CoreError> {
        debug!("PATCH /investments/{id}/price");
        let resp = self
            .client
            .patch(format!("{}/price", self.investment_url(id)))
            .query(&[("newPrice", new_price.to_string())])
            .send()
            .await?;
        Self::read_json(resp, &format!("repriced investment {id}")).await
    }
}
