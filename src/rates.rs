use rust_decimal::Decimal;

use crate::decimal::{checked_powi, nth_root, Rate};
use crate::errors::{MortgageError, Result};

const MONTHS_PER_YEAR: u32 = 12;

/// effective monthly rate equivalent to a nominal annual rate
///
/// `(1 + annual)^(1/12) - 1`, undefined below -100% a year.
pub fn annual_to_monthly_rate(annual: Rate) -> Result<Rate> {
    let base = Decimal::ONE + annual.as_decimal();
    if base.is_sign_negative() && !base.is_zero() {
        return Err(MortgageError::InvalidInterestRate { rate: annual });
    }
    if annual.is_zero() {
        return Ok(Rate::ZERO);
    }

    let root = nth_root(base, MONTHS_PER_YEAR)?;
    Ok(Rate::from_decimal(root - Decimal::ONE))
}

/// annual rate compounding to the given effective monthly rate
pub fn monthly_to_annual_rate(monthly: Rate) -> Result<Rate> {
    let compound = checked_powi(Decimal::ONE + monthly.as_decimal(), MONTHS_PER_YEAR)?;
    Ok(Rate::from_decimal(compound - Decimal::ONE))
}
