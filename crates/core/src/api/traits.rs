use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::analytics::PortfolioSummary;
use crate::models::investment::{Investment, InvestmentId, InvestmentRequest, InvestmentType};

/// Contract of the remote investment API.
///
/// [`HttpInvestmentApi`](super::http_client::HttpInvestmentApi) talks to the
/// real service; tests plug in an in-memory implementation. The server owns
/// the data: it assigns ids, validates payloads and derives `profit_loss`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InvestmentApi: Send + Sync {
    /// List investments, optionally restricted to one type.
    async fn list(
        &self,
        type_filter: Option<InvestmentType>,
    ) -> Result<Vec<Investment>, CoreError>;

    /// Fetch a single investment. `CoreError::NotFound` if it doesn't exist.
    async fn get(&self, id: InvestmentId) -> Result<Investment, CoreError>;

    async fn create(&self, request: &InvestmentRequest) -> Result<Investment, CoreError>;

    /// Replace the editable fields of an existing investment.
    async fn update(
        &self,
        id: InvestmentId,
        request: &InvestmentRequest,
    ) -> Result<Investment, CoreError>;

    async fn delete(&self, id: InvestmentId) -> Result<(), CoreError>;

    /// Server-computed summary over all investments (ignores any filter).
    async fn summary(&self) -> Result<PortfolioSummary, CoreError>;

    /// Set the market price of an investment. The returned record carries
    /// the recomputed `profit_loss`.
    async fn update_price(
        &self,
        id: InvestmentId,
        new_price: Decimal,
    ) -> Result<Investment, CoreError>;
}
