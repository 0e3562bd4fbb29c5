//! Constant installment (PRICE / french table).

use rust_decimal::Decimal;

use crate::config::MortgageParameters;
use crate::decimal::{checked_powi, ratio_or_zero, Rate};
use crate::errors::{MortgageError, Result};

use super::{due_date, monthly_interest, CalculatedInstallment, InstallmentParts};

/// annuity payment amortizing `balance` over `installments` periods
///
/// `pmt = P * i * (1 + i)^n / ((1 + i)^n - 1)`, or `P / n` without interest.
pub fn annuity_payment(balance: Decimal, monthly_rate: Rate, installments: u32) -> Result<Decimal> {
    let i = monthly_rate.as_decimal();
    if i.is_zero() {
        return Ok(ratio_or_zero(balance, Decimal::from(installments)));
    }

    let compound = checked_powi(Decimal::ONE + i, installments)?;
    let numerator = balance
        .checked_mul(i)
        .and_then(|x| x.checked_mul(compound))
        .ok_or_else(|| MortgageError::overflow("annuity payment"))?;

    Ok(ratio_or_zero(numerator, compound - Decimal::ONE))
}

pub(super) fn generate(params: &MortgageParameters, monthly_rate: Rate) -> Result<Vec<CalculatedInstallment>> {
    let count = params.installment_count();
    let mut balance = params.opening_balance();
    let payment = annuity_payment(balance, monthly_rate, count)?;
    let dfi = params.charges.dfi();

    let mut installments = Vec::with_capacity(count as usize);

    for offset in 0..count {
        let interest = monthly_interest(balance, monthly_rate);
        let amortization = payment - interest;
        let mip = params.charges.mip(balance);
        let balance_after = (balance - amortization).max(Decimal::ZERO);

        installments.push(CalculatedInstallment::record(
            params.starting_installment + offset,
            due_date(params.first_installment_date, offset)?,
            InstallmentParts {
                amortization,
                interest,
                mip,
                dfi,
                admin_fee: params.charges.admin_fee,
                total: payment + mip + dfi + params.charges.admin_fee,
                balance_before: balance,
                balance_after,
            },
        ));

        balance = balance_after;
    }

    Ok(installments)
}
