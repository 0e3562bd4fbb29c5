use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{ratio_or_zero, Money};

use super::CalculatedInstallment;

/// a generated schedule plus its aggregates
///
/// Totals are summed over the rounded rows once generation is done, never
/// accumulated while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageProjection {
    pub installments: Vec<CalculatedInstallment>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_amortization: Money,
    pub total_insurance: Money,
    pub total_admin_fee: Money,
    pub average_installment: Money,
    pub first_installment: Money,
    pub last_installment: Money,
}

impl MortgageProjection {
    pub fn from_installments(installments: Vec<CalculatedInstallment>) -> Self {
        let total_paid: Money = installments.iter().map(|i| i.total_amount).sum();
        let total_interest = installments.iter().map(|i| i.interest_amount).sum();
        let total_amortization = installments.iter().map(|i| i.amortization_amount).sum();
        let total_insurance = installments.iter().map(|i| i.insurance()).sum();
        let total_admin_fee = installments.iter().map(|i| i.admin_fee).sum();

        let average_installment = Money::from_decimal(ratio_or_zero(
            total_paid.as_decimal(),
            Decimal::from(installments.len() as u64),
        ));
        let first_installment = installments.first().map(|i| i.total_amount).unwrap_or(Money::ZERO);
        let last_installment = installments.last().map(|i| i.total_amount).unwrap_or(Money::ZERO);

        Self {
            installments,
            total_paid,
            total_interest,
            total_amortization,
            total_insurance,
            total_admin_fee,
            average_installment,
            first_installment,
            last_installment,
        }
    }

    /// look up a row by its installment number
    pub fn installment(&self, installment_number: u32) -> Option<&CalculatedInstallment> {
        self.installments
            .iter()
            .find(|i| i.installment_number == installment_number)
    }

    pub fn final_due_date(&self) -> Option<NaiveDate> {
        self.installments.last().map(|i| i.due_date)
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }
}

/// aggregates reported next to a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_amortization: Money,
    pub final_installment_number: u32,
    pub estimated_end_date: Option<NaiveDate>,
}

/// one named schedule of a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationScenario {
    pub name: String,
    pub installments: Vec<CalculatedInstallment>,
    pub summary: ScenarioSummary,
}

impl AmortizationScenario {
    pub fn new(name: impl Into<String>, projection: MortgageProjection) -> Self {
        let summary = ScenarioSummary {
            total_paid: projection.total_paid,
            total_interest: projection.total_interest,
            total_amortization: projection.total_amortization,
            final_installment_number: projection.len() as u32,
            estimated_end_date: projection.final_due_date(),
        };

        Self {
            name: name.into(),
            installments: projection.installments,
            summary,
        }
    }
}
