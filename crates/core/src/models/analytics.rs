use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::investment::{Investment, InvestmentId, InvestmentType};

/// Aggregate totals over a set of investments, grouped by type.
///
/// Same shape as the summary the investment API returns, so a locally
/// computed summary and a fetched one can be compared directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of `quantity * purchase_price` over all investments
    pub total_invested: Decimal,

    /// Per-type totals. Only types that occur at least once have an entry;
    /// a missing key means zero.
    pub total_by_type: BTreeMap<InvestmentType, Decimal>,

    /// Number of investments
    pub asset_count: usize,
}

impl PortfolioSummary {
    /// Total invested in `investment_type`, zero when the type is absent.
    #[must_use]
    pub fn total_for(&self, investment_type: InvestmentType) -> Decimal {
        self.total_by_type
            .get(&investment_type)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Share of the total invested held in `investment_type`, as a percentage.
    /// Zero when nothing is invested.
    #[must_use]
    pub fn allocation_pct(&self, investment_type: InvestmentType) -> Decimal {
        if self.total_invested.is_zero() {
            return Decimal::ZERO;
        }
        percent_of(self.total_for(investment_type), self.total_invested)
    }
}

/// Gains/losses breakdown over a set of investments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub total_invested: Decimal,

    /// Sum of `quantity * effective_current_price`
    pub total_current_value: Decimal,

    /// `total_current_value - total_invested`
    pub total_profit_loss: Decimal,

    /// `total_profit_loss / total_invested * 100`, zero when nothing is invested
    pub profit_loss_percentage: Decimal,

    /// Investments with a server-reported profit, in input order
    pub winners: Vec<Investment>,

    /// Investments with a server-reported loss, in input order
    pub losers: Vec<Investment>,

    /// One row per investment, in input order
    pub holdings: Vec<HoldingReturn>,
}

/// Per-investment row of a [`PortfolioReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingReturn {
    pub id: InvestmentId,
    pub symbol: String,
    pub investment_type: InvestmentType,
    pub quantity: Decimal,
    pub purchase_price: Decimal,

    /// Current price, or the purchase price when no quote exists yet
    pub effective_current_price: Decimal,

    /// As reported by the server; `None` when there is no quote
    pub profit_loss: Option<Decimal>,

    /// `(effective_current_price - purchase_price) / purchase_price * 100`
    pub percent_return: Decimal,
}

/// `part / whole * 100`, or zero when `whole` is zero or the result does
/// not fit in a [`Decimal`].
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}
