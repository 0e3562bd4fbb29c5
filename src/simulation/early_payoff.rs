use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LoanPosition;
use crate::decimal::Money;
use crate::errors::Result;

use super::project;

/// cost and savings of settling the whole balance today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyPayoffResult {
    /// outstanding principal, no prepayment penalty applies
    pub payoff_amount: Money,
    pub remaining_installments: u32,
    /// everything still due if the schedule runs to term
    pub remaining_payments: Money,
    pub remaining_interest: Money,
    pub total_savings: Money,
}

pub fn simulate_early_payoff(position: &LoanPosition) -> Result<EarlyPayoffResult> {
    debug!(
        balance = %position.current_balance,
        remaining = position.remaining_installments,
        system = %position.amortization_system,
        "simulating early payoff"
    );

    let projection = project(position, position.current_balance, position.remaining_installments)?;
    let payoff_amount = Money::from_decimal(position.current_balance);

    Ok(EarlyPayoffResult {
        payoff_amount,
        remaining_installments: position.remaining_installments,
        remaining_payments: projection.total_paid,
        remaining_interest: projection.total_interest,
        total_savings: projection.total_paid - payoff_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonthlyCharges;
    use crate::simulation::fixtures::position;
    use crate::types::AmortizationSystem;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payoff_costs_the_balance() {
        let pos = position(dec!(85000.456), 96, dec!(10), AmortizationSystem::Sac);
        let result = simulate_early_payoff(&pos).unwrap();

        assert_eq!(result.payoff_amount.to_string(), "85000.46");
        assert_eq!(result.remaining_installments, 96);
        assert!(result.remaining_interest > Money::ZERO);
        assert_eq!(result.total_savings, result.remaining_payments - result.payoff_amount);
    }

    #[test]
    fn test_savings_equal_remaining_interest_without_charges() {
        let pos = position(dec!(12000), 12, dec!(12), AmortizationSystem::Sac);
        let result = simulate_early_payoff(&pos).unwrap();

        // the rounded principal slices add back up to the balance
        assert_eq!(result.total_savings, result.remaining_interest);
    }

    #[test]
    fn test_savings_include_charges() {
        let mut pos = position(dec!(12000), 12, Decimal::ZERO, AmortizationSystem::Price);
        pos.charges = MonthlyCharges::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec!(20));
        let result = simulate_early_payoff(&pos).unwrap();

        assert_eq!(result.remaining_interest, Money::ZERO);
        assert_eq!(result.total_savings, Money::from_major(240));
    }

    #[test]
    fn test_zero_rate_saves_nothing() {
        let pos = position(dec!(12000), 12, Decimal::ZERO, AmortizationSystem::Sac);
        let result = simulate_early_payoff(&pos).unwrap();
        assert_eq!(result.total_savings, Money::ZERO);
    }

    #[test]
    fn test_zero_remaining_term() {
        let pos = position(dec!(500), 0, dec!(10), AmortizationSystem::Sac);
        let result = simulate_early_payoff(&pos).unwrap();
        assert_eq!(result.remaining_payments, Money::ZERO);
        assert_eq!(result.total_savings, Money::from_major(-500));
    }
}
