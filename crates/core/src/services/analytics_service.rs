use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::analytics::{percent_of, HoldingReturn, PortfolioReport, PortfolioSummary};
use crate::models::investment::{Investment, InvestmentType};

/// Computes portfolio analytics: totals, per-type breakdown, gain/loss, returns.
///
/// Pure and stateless. Inputs are never modified and every function is
/// total. Empty input, zero purchase prices and zero totals produce zeros
/// instead of dividing by zero. Amounts saturate at the bounds of
/// [`Decimal`], and a percentage that overflows is reported as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Total invested, per-type totals and asset count.
    ///
    /// Types with no investments get no entry in `total_by_type`.
    #[must_use]
    pub fn compute_summary(&self, investments: &[Investment]) -> PortfolioSummary {
        let total_by_type = investments.iter().fold(
            BTreeMap::<InvestmentType, Decimal>::new(),
            |mut acc, inv| {
                let total = acc.entry(inv.investment_type).or_insert(Decimal::ZERO);
                *total = total.saturating_add(inv.invested());
                acc
            },
        );

        PortfolioSummary {
            total_invested: Self::total_invested(investments),
            total_by_type,
            asset_count: investments.len(),
        }
    }

    /// Full gains/losses report.
    ///
    /// Winners and losers are partitioned on the server-reported
    /// `profit_loss`; investments without one, or with exactly zero, land
    /// in neither list.
    #[must_use]
    pub fn compute_report(&self, investments: &[Investment]) -> PortfolioReport {
        let total_invested = Self::total_invested(investments);
        let total_current_value = saturating_sum(investments.iter().map(Investment::current_value));
        let total_profit_loss = total_current_value.saturating_sub(total_invested);
        let profit_loss_percentage = percent_of(total_profit_loss, total_invested);

        let winners = investments
            .iter()
            .filter(|inv| inv.profit_loss.is_some_and(|pl| pl > Decimal::ZERO))
            .cloned()
            .collect();
        let losers = investments
            .iter()
            .filter(|inv| inv.profit_loss.is_some_and(|pl| pl < Decimal::ZERO))
            .cloned()
            .collect();

        let holdings = investments
            .iter()
            .map(|inv| HoldingReturn {
                id: inv.id,
                symbol: inv.symbol.clone(),
                investment_type: inv.investment_type,
                quantity: inv.quantity,
                purchase_price: inv.purchase_price,
                effective_current_price: inv.effective_current_price(),
                profit_loss: inv.profit_loss,
                percent_return: self.percent_return(inv),
            })
            .collect();

        PortfolioReport {
            total_invested,
            total_current_value,
            total_profit_loss,
            profit_loss_percentage,
            winners,
            losers,
            holdings,
        }
    }

    /// Percentage return of a single investment at its effective current price.
    ///
    /// Zero when `purchase_price` is zero or the return overflows.
    #[must_use]
    pub fn percent_return(&self, investment: &Investment) -> Decimal {
        let purchase = investment.purchase_price;
        let change = investment.effective_current_price().saturating_sub(purchase);
        percent_of(change, purchase)
    }

    fn total_invested(investments: &[Investment]) -> Decimal {
        saturating_sum(investments.iter().map(Investment::invested))
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}
