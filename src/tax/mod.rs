pub mod income;
pub mod savings;
pub mod sg;

use rust_decimal::Decimal;

pub use income::{calculate_tax, tax_breakdown, BracketSlice, TaxBreakdown};
pub use savings::{net_income, NetIncomeReport};
pub use sg::{Bracket, BRACKETS, YEAR_OF_ASSESSMENT};

/// Errors raised by the tax and savings calculations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },
    #[error("{field} is too large to calculate with")]
    AmountTooLarge { field: &'static str },
}

/// Rejects negative amounts rather than clamping them
pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<Decimal, TaxError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(TaxError::NegativeAmount { field, value });
    }
    Ok(value)
}

/// Turns the `None` of a checked `Decimal` operation into an overflow error
pub(crate) fn checked(field: &'static str, value: Option<Decimal>) -> Result<Decimal, TaxError> {
    value.ok_or(TaxError::AmountTooLarge { field })
}
