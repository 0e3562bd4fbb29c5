use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LoanPosition;
use crate::decimal::{ratio_or_zero, Money};
use crate::errors::Result;
use crate::rates::annual_to_monthly_rate;
use crate::schedule::monthly_interest;
use crate::types::ExtraPaymentPolicy;

use super::project;

/// quotient digits kept before rounding a term up
const TERM_QUOTIENT_DP: u32 = 12;

/// effect of a single extra payment on a running mortgage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPaymentResult {
    pub payment_type: ExtraPaymentPolicy,
    pub amount: Money,
    pub current_balance: Money,
    pub new_balance: Money,
    pub current_remaining_installments: u32,
    pub new_remaining_installments: u32,
    pub current_installment_value: Money,
    pub new_installment_value: Money,
    pub interest_saved: Money,
    pub months_reduced: u32,
    /// savings net of the extra payment itself
    pub total_saved: Money,
}

/// apply `extra_payment` to the position under the given policy
///
/// The amount is not checked against the balance; an extra payment above
/// the balance yields a negative new balance and a degenerate schedule.
pub fn simulate_extra_payment(
    position: &LoanPosition,
    current_installment_value: Decimal,
    extra_payment: Decimal,
    policy: ExtraPaymentPolicy,
) -> Result<ExtraPaymentResult> {
    debug!(
        balance = %position.current_balance,
        remaining = position.remaining_installments,
        extra_payment = %extra_payment,
        policy = ?policy,
        "simulating extra payment"
    );

    let current_balance = position.current_balance;
    let remaining = position.remaining_installments;
    let new_balance = current_balance - extra_payment;
    if new_balance.is_sign_negative() && !new_balance.is_zero() {
        warn!(
            balance = %current_balance,
            extra_payment = %extra_payment,
            "extra payment exceeds the outstanding balance"
        );
    }

    let monthly_rate = annual_to_monthly_rate(position.annual_rate)?;
    let charges = &position.charges;
    let installment_for = |amortization: Decimal, balance: Decimal| {
        amortization
            + monthly_interest(balance, monthly_rate)
            + charges.mip(balance)
            + charges.dfi()
            + charges.admin_fee
    };

    let (new_remaining, new_installment_value) = match policy {
        ExtraPaymentPolicy::ReduceTerm => {
            // the pre-payment amortization slice is held constant
            let amortization = ratio_or_zero(current_balance, Decimal::from(remaining));
            let new_remaining = remaining_for_slice(new_balance, amortization);
            let value = if new_remaining == 0 {
                Decimal::ZERO
            } else {
                installment_for(amortization, new_balance)
            };
            (new_remaining, value)
        }
        ExtraPaymentPolicy::ReduceInstallment => {
            let amortization = ratio_or_zero(new_balance, Decimal::from(remaining));
            (remaining, installment_for(amortization, new_balance))
        }
    };

    let before = project(position, current_balance, remaining)?;
    let after = project(position, new_balance, new_remaining)?;
    let extra = Money::from_decimal(extra_payment);

    Ok(ExtraPaymentResult {
        payment_type: policy,
        amount: extra,
        current_balance: Money::from_decimal(current_balance),
        new_balance: Money::from_decimal(new_balance),
        current_remaining_installments: remaining,
        new_remaining_installments: new_remaining,
        current_installment_value: Money::from_decimal(current_installment_value),
        new_installment_value: Money::from_decimal(new_installment_value),
        interest_saved: before.total_interest - after.total_interest,
        months_reduced: remaining.saturating_sub(new_remaining),
        total_saved: before.total_paid - after.total_paid - extra,
    })
}

/// installments needed to clear `balance` at a constant `slice`, rounded up
fn remaining_for_slice(balance: Decimal, slice: Decimal) -> u32 {
    let quotient = ratio_or_zero(balance, slice).round_dp(TERM_QUOTIENT_DP).ceil();
    if quotient.is_sign_negative() {
        return 0;
    }
    quotient.to_u32().unwrap_or(u32::MAX)
}
