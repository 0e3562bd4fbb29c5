//! Constant amortization (SAC).
//!
//! The principal slice is `financed_amount / total_installments` and stays the
//! same when the schedule is resumed mid-term, so a recomputation after a real
//! payment event keeps the contractual slice.

use rust_decimal::Decimal;

use crate::config::MortgageParameters;
use crate::decimal::{ratio_or_zero, Rate};
use crate::errors::Result;

use super::{due_date, monthly_interest, CalculatedInstallment, InstallmentParts};

pub(super) fn generate(params: &MortgageParameters, monthly_rate: Rate) -> Result<Vec<CalculatedInstallment>> {
    let amortization = ratio_or_zero(params.financed_amount, Decimal::from(params.total_installments));
    let dfi = params.charges.dfi();

    let count = params.installment_count();
    let mut installments = Vec::with_capacity(count as usize);
    let mut balance = params.opening_balance();

    for offset in 0..count {
        let interest = monthly_interest(balance, monthly_rate);
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
                total: amortization + interest + mip + dfi + params.charges.admin_fee,
                balance_before: balance,
                balance_after,
            },
        ));

        balance = balance_after;
    }

    Ok(installments)
}
