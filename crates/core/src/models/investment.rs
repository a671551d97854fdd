use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an investment record.
pub type InvestmentId = i64;

/// The category of a tracked investment.
///
/// Serialized with the names the investment API uses on the wire
/// (`ACAO`, `CRIPTO`, ...). The English names are accepted on input too.
/// Variant order is the order summaries list their per-type totals in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    /// Listed shares
    #[serde(rename = "ACAO", alias = "STOCK")]
    Stock,
    /// Cryptocurrencies
    #[serde(rename = "CRIPTO", alias = "CRYPTO")]
    Crypto,
    /// Investment funds
    #[serde(rename = "FUNDO", alias = "FUND")]
    Fund,
    /// Bonds, deposits and other fixed-income products
    #[serde(rename = "RENDA_FIXA", alias = "FIXED_INCOME")]
    FixedIncome,
    #[serde(rename = "OUTRO", alias = "OTHER")]
    Other,
}

impl InvestmentType {
    /// Every variant, in declaration order.
    pub const ALL: [InvestmentType; 5] = [
        InvestmentType::Stock,
        InvestmentType::Crypto,
        InvestmentType::Fund,
        InvestmentType::FixedIncome,
        InvestmentType::Other,
    ];

    /// The name the investment API uses for this type (query params, JSON).
    #[must_use]
    pub fn api_name(&self) -> &'static str {
        match self {
            InvestmentType::Stock => "ACAO",
            InvestmentType::Crypto => "CRIPTO",
            InvestmentType::Fund => "FUNDO",
            InvestmentType::FixedIncome => "RENDA_FIXA",
            InvestmentType::Other => "OUTRO",
        }
    }

    /// Parse either the wire name or the English name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let upper = value.trim().to_uppercase();
        Self::ALL.into_iter().find(|t| {
            t.api_name() == upper || t.to_string().to_uppercase().replace(' ', "_") == upper
        })
    }
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentType::Stock => write!(f, "Stock"),
            InvestmentType::Crypto => write!(f, "Crypto"),
            InvestmentType::Fund => write!(f, "Fund"),
            InvestmentType::FixedIncome => write!(f, "Fixed Income"),
            InvestmentType::Other => write!(f, "Other"),
        }
    }
}

/// One tracked investment position, as returned by the investment API.
///
/// Instances are read-only snapshots of server state. `current_price` and
/// `profit_loss` are `None` until the server has a market quote; `None` is
/// never the same thing as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: InvestmentId,

    #[serde(rename = "type")]
    pub investment_type: InvestmentType,

    /// Display identifier (e.g., "BBAS3", "BTC")
    pub symbol: String,

    pub quantity: Decimal,

    /// Price paid per unit
    pub purchase_price: Decimal,

    pub purchase_date: NaiveDate,

    /// Latest market price per unit, if one has been set
    #[serde(default)]
    pub current_price: Option<Decimal>,

    /// Server-computed `quantity * (current_price - purchase_price)`
    #[serde(default)]
    pub profit_loss: Option<Decimal>,
}

impl Investment {
    /// Amount paid for the whole position: `quantity * purchase_price`.
    ///
    /// Saturates at the bounds of [`Decimal`].
    #[must_use]
    pub fn invested(&self) -> Decimal {
        self.quantity.saturating_mul(self.purchase_price)
    }

    /// `current_price` when present, otherwise `purchase_price`.
    #[must_use]
    pub fn effective_current_price(&self) -> Decimal {
        self.current_price.unwrap_or(self.purchase_price)
    }

    /// Market value of the position at the effective current price.
    /// Saturates like [`Investment::invested`].
    #[must_use]
    pub fn current_value(&self) -> Decimal {
        self.quantity.saturating_mul(self.effective_current_price())
    }
}

/// Payload for creating or replacing an investment.
///
/// The server assigns `id`, sets `current_price` to the purchase price on
/// create, and derives `profit_loss`; none of those are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRequest {
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub symbol: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
}

impl InvestmentRequest {
    pub fn new(
        investment_type: InvestmentType,
        symbol: impl Into<String>,
        quantity: Decimal,
        purchase_price: Decimal,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            investment_type,
            symbol: symbol.into().trim().to_string(),
            quantity,
            purchase_price,
            purchase_date,
        }
    }
}

impl From<&Investment> for InvestmentRequest {
    /// Prefill an edit form from an existing record.
    fn from(inv: &Investment) -> Self {
        Self {
            investment_type: inv.investment_type,
            symbol: inv.symbol.clone(),
            quantity: inv.quantity,
            purchase_price: inv.purchase_price,
            purchase_date: inv.purchase_date,
        }
    }
}

/// Raw, unparsed values straight from an edit form.
///
/// Turned into an [`InvestmentRequest`] by
/// [`ValidationService::parse_form`](crate::services::validation_service::ValidationService::parse_form).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestmentForm {
    pub investment_type: String,
    pub symbol: String,
    pub quantity: String,
    pub purchase_price: String,
    pub purchase_date: String,
}
