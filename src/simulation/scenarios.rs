use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{ExtraPaymentConfig, LoanPosition, MortgageParameters};
use crate::decimal::{ratio_or_zero, round_money, Money};
use crate::errors::Result;
use crate::rates::annual_to_monthly_rate;
use crate::schedule::{
    calculate_mortgage_installments, due_date, monthly_interest, AmortizationScenario, CalculatedInstallment,
    InstallmentParts, MortgageProjection,
};
use crate::types::AmortizationSystem;

use super::project;

pub const ORIGINAL_SCENARIO: &str = "Original";
pub const WITH_EXTRAS_SCENARIO: &str = "Com Aportes";

/// balances at or below this are treated as paid off
const PAID_OFF_THRESHOLD: Decimal = dec!(0.01);

/// original schedule versus the schedule with extra payments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub interest_saved: Money,
    pub months_reduced: u32,
    pub total_saved: Money,
    /// extra payments actually applied across the schedule
    pub total_extra_payments: Money,
    /// interest saved per unit of extra payment, in percent
    pub roi_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiScenarioResult {
    pub scenarios: Vec<AmortizationScenario>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ScenarioComparison>,
}

impl MultiScenarioResult {
    pub fn scenario(&self, name: &str) -> Option<&AmortizationScenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

/// compare the original schedule with one that applies every extra payment
///
/// The month-by-month run always amortizes a constant slice of
/// `current_balance / remaining_installments`, whatever the position's
/// amortization system. Only the original scenario follows the system.
pub fn simulate_multiple_extra_payments(
    position: &LoanPosition,
    extra_payments: &[ExtraPaymentConfig],
    include_original: bool,
) -> Result<MultiScenarioResult> {
    debug!(
        balance = %position.current_balance,
        remaining = position.remaining_installments,
        extra_payments = extra_payments.len(),
        include_original,
        "simulating extra payment scenarios"
    );

    let mut scenarios = Vec::new();

    let original = if include_original {
        let projection = project(position, position.current_balance, position.remaining_installments)?;
        trace!(installments = projection.len(), "original scenario generated");
        Some(projection)
    } else {
        None
    };

    if extra_payments.is_empty() {
        if let Some(projection) = original {
            scenarios.push(AmortizationScenario::new(ORIGINAL_SCENARIO, projection));
        }
        return Ok(MultiScenarioResult {
            scenarios,
            comparison: None,
        });
    }

    let (rows, total_extra) = schedule_with_extras(position, extra_payments)?;
    let with_extras = MortgageProjection::from_installments(rows);
    trace!(installments = with_extras.len(), "extra payment scenario generated");

    let comparison = original.as_ref().map(|original| {
        let interest_saved = original.total_interest - with_extras.total_interest;
        let roi_percentage = if total_extra > Decimal::ZERO {
            round_money(ratio_or_zero(interest_saved.as_decimal(), total_extra) * Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };

        ScenarioComparison {
            interest_saved,
            months_reduced: position
                .remaining_installments
                .saturating_sub(with_extras.len() as u32),
            total_saved: original.total_paid - with_extras.total_paid,
            total_extra_payments: Money::from_decimal(total_extra),
            roi_percentage,
        }
    });

    if let Some(projection) = original {
        scenarios.push(AmortizationScenario::new(ORIGINAL_SCENARIO, projection));
    }
    scenarios.push(AmortizationScenario::new(WITH_EXTRAS_SCENARIO, with_extras));

    Ok(MultiScenarioResult { scenarios, comparison })
}

/// month-by-month schedule applying every matching extra payment
///
/// Returns the rows and the sum of the extra payments actually applied.
fn schedule_with_extras(
    position: &LoanPosition,
    extra_payments: &[ExtraPaymentConfig],
) -> Result<(Vec<CalculatedInstallment>, Decimal)> {
    let remaining = position.remaining_installments;
    let monthly_rate = annual_to_monthly_rate(position.annual_rate)?;
    let charges = &position.charges;
    let base_amortization = ratio_or_zero(position.current_balance, Decimal::from(remaining));
    let dfi = charges.dfi();

    let mut rows = Vec::new();
    let mut balance = position.current_balance;
    let mut total_extra = Decimal::ZERO;

    for offset in 0..remaining {
        if balance <= PAID_OFF_THRESHOLD {
            break;
        }

        let installment_number = offset + 1;
        let interest = monthly_interest(balance, monthly_rate);
        let amortization = base_amortization.min(balance);
        let mip = charges.mip(balance);

        let scheduled_extra: Decimal = extra_payments
            .iter()
            .filter(|p| p.applies_to(installment_number, remaining))
            .map(|p| p.amount)
            .sum();
        let extra = scheduled_extra.min(balance - amortization);
        let total_amortization = amortization + extra;
        let balance_after = (balance - total_amortization).max(Decimal::ZERO);

        rows.push(CalculatedInstallment::record(
            installment_number,
            due_date(position.next_due_date, offset)?,
            InstallmentParts {
                amortization: total_amortization,
                interest,
                mip,
                dfi,
                admin_fee: charges.admin_fee,
                total: amortization + interest + mip + dfi + charges.admin_fee + extra,
                balance_before: balance,
                balance_after,
            },
        ));

        total_extra += extra;
        balance = balance_after;

        if balance <= PAID_OFF_THRESHOLD {
            debug!(installment_number, remaining, "paid off ahead of term");
            break;
        }
    }

    Ok((rows, total_extra))
}

/// the same parameters generated under every amortization system
pub fn compare_systems(params: &MortgageParameters) -> Result<Vec<AmortizationScenario>> {
    AmortizationSystem::ALL
        .iter()
        .map(|system| {
            let params = MortgageParameters {
                amortization_system: *system,
                ..params.clone()
            };
            let projection = calculate_mortgage_installments(&params)?;
            Ok(AmortizationScenario::new(system.name(), projection))
        })
        .collect()
}
