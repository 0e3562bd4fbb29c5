use serde::{Deserialize, Serialize};
use std::fmt;

/// amortization system of a mortgage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AmortizationSystem {
    /// constant amortization, declining installment
    Sac,
    /// constant installment (french table)
    Price,
    /// SAC with periodic TR-driven recalculation. Currently generated as SAC,
    /// the recalculation step is not modelled.
    Sacre,
}

impl AmortizationSystem {
    pub const ALL: [AmortizationSystem; 3] = [
        AmortizationSystem::Sac,
        AmortizationSystem::Price,
        AmortizationSystem::Sacre,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AmortizationSystem::Sac => "SAC",
            AmortizationSystem::Price => "PRICE",
            AmortizationSystem::Sacre => "SACRE",
        }
    }
}

impl fmt::Display for AmortizationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// how often an extra payment recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraPaymentKind {
    /// paid once, on the start month
    OneTime,
    /// paid every month from start month through end month
    Recurring,
}

/// what an extra payment buys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraPaymentPolicy {
    /// keep the installment, shorten the term
    ReduceTerm,
    /// keep the term, shrink the installment
    ReduceInstallment,
}
