pub mod api;
pub mod errors;
pub mod models;
pub mod services;

use log::{debug, info, warn};
use rust_decimal::Decimal;

use api::http_client::HttpInvestmentApi;
use api::traits::InvestmentApi;
use models::{
    analytics::{PortfolioReport, PortfolioSummary},
    investment::{Investment, InvestmentForm, InvestmentId, InvestmentRequest, InvestmentType},
    settings::ClientSettings,
};
use services::{analytics_service::AnalyticsService, validation_service::ValidationService};

use errors::CoreError;

const LOAD_FAILED: &str = "Failed to load portfolio data";
const FETCH_FAILED: &str = "Failed to load investment";
const SAVE_FAILED: &str = "Failed to save investment";
const DELETE_FAILED: &str = "Failed to remove investment";
const PRICE_FAILED: &str = "Failed to update price";

/// Main entry point for the Investment Tracker core library.
///
/// Holds the last successfully loaded view of the portfolio (investment
/// list, server summary, active type filter) plus the services that work
/// on it. State only changes after the remote API confirms: a failed fetch
/// keeps whatever was shown before, and mutations are reflected by a full
/// reload once the server has accepted them.
#[must_use]
pub struct InvestmentTracker {
    api: Box<dyn InvestmentApi>,
    investments: Vec<Investment>,
    summary: Option<PortfolioSummary>,
    filter_type: Option<InvestmentType>,
    /// User-facing message for the most recent failure, cleared by a successful load.
    last_error: Option<String>,
    analytics_service: AnalyticsService,
    validation_service: ValidationService,
}

impl std::fmt::Debug for InvestmentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentTracker")
            .field("investments", &self.investments.len())
            .field("has_summary", &self.summary.is_some())
            .field("filter_type", &self.filter_type)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl InvestmentTracker {
    /// Connect to the investment API described by `settings`.
    /// Nothing is fetched until [`reload`](Self::reload) is called.
    pub fn connect(settings: &ClientSettings) -> Result<Self, CoreError> {
        let api = HttpInvestmentApi::new(settings)?;
        info!("Investment API client configured for {}", settings.normalized_base_url());
        Ok(Self::with_api(Box::new(api)))
    }

    /// Build a tracker on top of any [`InvestmentApi`] implementation.
    pub fn with_api(api: Box<dyn InvestmentApi>) -> Self {
        Self {
            api,
            investments: Vec::new(),
            summary: None,
            filter_type: None,
            last_error: None,
            analytics_service: AnalyticsService::new(),
            validation_service: ValidationService::new(),
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Fetch the (filtered) investment list and the server summary.
    ///
    /// Both requests run concurrently. Either both results are applied or,
    /// on failure, neither is and the previous data stays in place.
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        let filter = self.filter_type;
        let api = self.api.as_ref();
        let fetched = futures::try_join!(api.list(filter), api.summary());

        match fetched {
            Ok((investments, summary)) => {
                debug!(
                    "Loaded {} investments (filter: {filter:?}), summary covers {} assets",
                    investments.len(),
                    summary.asset_count
                );
                self.investments = investments;
                self.summary = Some(summary);
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.record_failure(LOAD_FAILED, e)),
        }
    }

    /// Switch the type filter and reload.
    /// If the reload fails the previous filter is restored, so the filter
    /// always describes the list currently held.
    pub async fn set_filter_type(
        &mut self,
        filter: Option<InvestmentType>,
    ) -> Result<(), CoreError> {
        let previous = std::mem::replace(&mut self.filter_type, filter);
        if let Err(e) = self.reload().await {
            self.filter_type = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Fetch a single investment (e.g., to prefill an edit form).
    pub async fn fetch_investment(&mut self, id: InvestmentId) -> Result<Investment, CoreError> {
        let fetched = self.api.get(id).await;
        match fetched {
            Ok(inv) => Ok(inv),
            Err(e) => Err(self.record_failure(FETCH_FAILED, e)),
        }
    }

    /// Fetch every investment, ignoring the active filter, and build the
    /// gains/losses report. Tracker state is left untouched.
    pub async fn load_report(&self) -> Result<PortfolioReport, CoreError> {
        let investments = self.api.list(None).await.map_err(|e| {
            warn!("Failed to load report data: {e}");
            e
        })?;
        Ok(self.analytics_service.compute_report(&investments))
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Validate and create a new investment, then reload.
    pub async fn create_investment(
        &mut self,
        request: InvestmentRequest,
    ) -> Result<Investment, CoreError> {
        self.validation_service.validate_request(&request, today())?;

        let result = self.api.create(&request).await;
        let created = match result {
            Ok(inv) => inv,
            Err(e) => return Err(self.record_failure(SAVE_FAILED, e)),
        };
        info!("Created investment {} ({})", created.id, created.symbol);

        self.reload_after_mutation().await;
        Ok(created)
    }

    /// Parse raw form input and create an investment from it.
    pub async fn create_from_form(
        &mut self,
        form: &InvestmentForm,
    ) -> Result<Investment, CoreError> {
        let request = self.validation_service.parse_form(form, today())?;
        self.create_investment(request).await
    }

    /// Validate and replace an existing investment, then reload.
    pub async fn update_investment(
        &mut self,
        id: InvestmentId,
        request: InvestmentRequest,
    ) -> Result<Investment, CoreError> {
        self.validation_service.validate_request(&request, today())?;

        let result = self.api.update(id, &request).await;
        let updated = match result {
            Ok(inv) => inv,
            Err(e) => return Err(self.record_failure(SAVE_FAILED, e)),
        };
        info!("Updated investment {id}");

        self.reload_after_mutation().await;
        Ok(updated)
    }

    /// Parse raw form input and apply it to an existing investment.
    pub async fn update_from_form(
        &mut self,
        id: InvestmentId,
        form: &InvestmentForm,
    ) -> Result<Investment, CoreError> {
        let request = self.validation_service.parse_form(form, today())?;
        self.update_investment(id, request).await
    }

    /// Delete an investment, then reload.
    pub async fn delete_investment(&mut self, id: InvestmentId) -> Result<(), CoreError> {
        let result = self.api.delete(id).await;
        if let Err(e) = result {
            return Err(self.record_failure(DELETE_FAILED, e));
        }
        info!("Deleted investment {id}");

        self.reload_after_mutation().await;
        Ok(())
    }

    /// Set the market price of an investment, then reload.
    /// Returns the server's updated record with its recomputed profit/loss.
    pub async fn update_price(
        &mut self,
        id: InvestmentId,
        new_price: Decimal,
    ) -> Result<Investment, CoreError> {
        self.validation_service.validate_price(new_price)?;

        let result = self.api.update_price(id, new_price).await;
        let updated = match result {
            Ok(inv) => inv,
            Err(e) => return Err(self.record_failure(PRICE_FAILED, e)),
        };
        info!("Updated price of investment {id} to {new_price}");

        self.reload_after_mutation().await;
        Ok(updated)
    }

    // ── Loaded State ────────────────────────────────────────────────

    /// Investments from the last successful load, in server order.
    #[must_use]
    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    /// Server summary from the last successful load.
    #[must_use]
    pub fn summary(&self) -> Option<&PortfolioSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn filter_type(&self) -> Option<InvestmentType> {
        self.filter_type
    }

    /// User-facing message describing the most recent failure, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Look up a loaded investment by id.
    #[must_use]
    pub fn find_investment(&self, id: InvestmentId) -> Option<&Investment> {
        self.investments.iter().find(|inv| inv.id == id)
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Summary computed locally over the loaded (possibly filtered) list.
    #[must_use]
    pub fn local_summary(&self) -> PortfolioSummary {
        self.analytics_service.compute_summary(&self.investments)
    }

    /// Gains/losses report over the loaded (possibly filtered) list.
    #[must_use]
    pub fn report(&self) -> PortfolioReport {
        self.analytics_service.compute_report(&self.investments)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the loaded investments as a JSON array.
    pub fn export_investments_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.investments).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize investments to JSON: {e}"))
        })
    }

    /// Export the report rows for the loaded investments as CSV.
    /// Columns: id, symbol, type, quantity, purchase_price, current_price,
    /// profit_loss, percent_return. `profit_loss` is empty when there is no
    /// quote; `percent_return` is rounded to two decimals.
    #[must_use]
    pub fn export_report_to_csv(&self) -> String {
        let report = self.report();
        let mut csv = String::from(
            "id,symbol,type,quantity,purchase_price,current_price,profit_loss,percent_return\n",
        );
        for row in &report.holdings {
            let symbol = if row.symbol.contains(',') || row.symbol.contains('"') {
                format!("\"{}\"", row.symbol.replace('"', "\"\""))
            } else {
                row.symbol.clone()
            };
            let profit_loss = row.profit_loss.map(|pl| pl.to_string()).unwrap_or_default();
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{:.2}\n",
                row.id,
                symbol,
                row.investment_type.api_name(),
                row.quantity,
                row.purchase_price,
                row.effective_current_price,
                profit_loss,
                row.percent_return,
            ));
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn reload_after_mutation(&mut self) {
        // The mutation is already confirmed; a failed reload only leaves
        // stale data behind, which `reload` has recorded in `last_error`.
        if let Err(e) = self.reload().await {
            debug!("Reload after mutation failed: {e}");
        }
    }

    fn record_failure(&mut self, context: &str, e: CoreError) -> CoreError {
        warn!("{context}: {e}");
        self.last_error = Some(format!("{context}: {e}"));
        e
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
