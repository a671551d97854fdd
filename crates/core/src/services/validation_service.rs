use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::investment::{InvestmentForm, InvestmentRequest, InvestmentType};

/// Date format used by forms and the investment API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Producer-side checks run before anything is sent to the investment API.
///
/// Pure business logic. "Today" is always passed in so results don't
/// depend on the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Check a create/update payload. All violations are collected and
    /// reported together, separated by `"; "`.
    pub fn validate_request(
        &self,
        request: &InvestmentRequest,
        today: NaiveDate,
    ) -> Result<(), CoreError> {
        let problems = [
            Self::symbol_problem(&request.symbol),
            Self::quantity_problem(request.quantity),
            Self::purchase_price_problem(request.purchase_price),
            Self::purchase_date_problem(request.purchase_date, today),
        ];
        Self::into_result(problems.into_iter().flatten().collect())
    }

    /// Parse raw form input into a validated request.
    ///
    /// Parsing errors and rule violations are reported together, in field
    /// order. Fields that parse are still checked against the rules when a
    /// neighbouring field does not.
    pub fn parse_form(
        &self,
        form: &InvestmentForm,
        today: NaiveDate,
    ) -> Result<InvestmentRequest, CoreError> {
        let mut problems: Vec<String> = Self::symbol_problem(&form.symbol).into_iter().collect();

        let investment_type = InvestmentType::parse(&form.investment_type);
        if investment_type.is_none() {
            problems.push(format!("type '{}' is not recognised", form.investment_type));
        }

        let quantity = Self::parse_decimal("quantity", &form.quantity, &mut problems);
        problems.extend(quantity.and_then(Self::quantity_problem));

        let purchase_price =
            Self::parse_decimal("purchase price", &form.purchase_price, &mut problems);
        problems.extend(purchase_price.and_then(Self::purchase_price_problem));

        let purchase_date = match Self::parse_date(&form.purchase_date) {
            Ok(date) => Some(date),
            Err(msg) => {
                problems.push(msg);
                None
            }
        };
        problems.extend(purchase_date.and_then(|date| Self::purchase_date_problem(date, today)));

        let (Some(investment_type), Some(quantity), Some(purchase_price), Some(purchase_date)) =
            (investment_type, quantity, purchase_price, purchase_date)
        else {
            return Err(CoreError::Validation(problems.join("; ")));
        };
        Self::into_result(problems)?;

        Ok(InvestmentRequest::new(
            investment_type,
            form.symbol.as_str(),
            quantity,
            purchase_price,
            purchase_date,
        ))
    }

    /// A market price may be zero but never negative.
    pub fn validate_price(&self, price: Decimal) -> Result<(), CoreError> {
        if price < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "price cannot be negative (got {price})"
            )));
        }
        Ok(())
    }

    /// Parse a strict `YYYY-MM-DD` date.
    pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
        let value = value.trim();
        let well_formed = value.len() == 10
            && value.char_indices().all(|(i, c)| match i {
                4 | 7 => c == '-',
                _ => c.is_ascii_digit(),
            });
        if !well_formed {
            return Err(format!("date '{value}' must use the YYYY-MM-DD format"));
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map_err(|_| format!("date '{value}' is not a valid calendar date"))
    }

    fn symbol_problem(symbol: &str) -> Option<String> {
        symbol.trim().is_empty().then(|| "symbol is required".to_string())
    }

    fn quantity_problem(quantity: Decimal) -> Option<String> {
        (quantity <= Decimal::ZERO).then(|| format!("quantity must be positive (got {quantity})"))
    }

    fn purchase_price_problem(price: Decimal) -> Option<String> {
        (price <= Decimal::ZERO)
            .then(|| format!("purchase price must be greater than zero (got {price})"))
    }

    fn purchase_date_problem(date: NaiveDate, today: NaiveDate) -> Option<String> {
        (date > today).then(|| format!("purchase date {date} cannot be in the future"))
    }

    fn parse_decimal(field: &str, raw: &str, problems: &mut Vec<String>) -> Option<Decimal> {
        match Decimal::from_str(raw.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                problems.push(format!("{field} '{}' is not a number", raw.trim()));
                None
            }
        }
    }

    fn into_result(problems: Vec<String>) -> Result<(), CoreError> {
        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(problems.join("; ")))
        }
    }
}
