pub mod early_payoff;
pub mod extra_payment;
pub mod scenarios;

use rust_decimal::Decimal;

use crate::config::LoanPosition;
use crate::errors::Result;
use crate::schedule::{calculate_mortgage_installments, MortgageProjection};

pub use early_payoff::{simulate_early_payoff, EarlyPayoffResult};
pub use extra_payment::{simulate_extra_payment, ExtraPaymentResult};
pub use scenarios::{
    compare_systems, simulate_multiple_extra_payments, MultiScenarioResult, ScenarioComparison,
    ORIGINAL_SCENARIO, WITH_EXTRAS_SCENARIO,
};

/// project `balance` over `installments` with the position's rate, system and charges
///
/// A zero-length term projects to an empty schedule instead of failing.
pub(crate) fn project(position: &LoanPosition, balance: Decimal, installments: u32) -> Result<MortgageProjection> {
    if installments == 0 {
        return Ok(MortgageProjection::from_installments(Vec::new()));
    }
    calculate_mortgage_installments(&position.projection_parameters(balance, installments))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::config::{LoanPosition, MonthlyCharges};
    use crate::decimal::Rate;
    use crate::types::AmortizationSystem;

    pub fn position(
        balance: Decimal,
        remaining: u32,
        rate_percent: Decimal,
        system: AmortizationSystem,
    ) -> LoanPosition {
        LoanPosition {
            current_balance: balance,
            remaining_installments: remaining,
            annual_rate: Rate::from_percent(rate_percent),
            amortization_system: system,
            next_due_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            charges: MonthlyCharges::none(),
        }
    }
}
