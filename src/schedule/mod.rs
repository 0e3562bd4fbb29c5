pub mod price;
pub mod projection;
pub mod sac;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MortgageParameters;
use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::rates::annual_to_monthly_rate;
use crate::types::AmortizationSystem;

pub use projection::{AmortizationScenario, MortgageProjection, ScenarioSummary};

/// one row of a mortgage schedule, every amount rounded to cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedInstallment {
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub amortization_amount: Money,
    pub interest_amount: Money,
    pub mip_insurance: Money,
    pub dfi_insurance: Money,
    pub admin_fee: Money,
    /// monetary correction, applied by the caller after generation
    pub tr_adjustment: Money,
    pub total_amount: Money,
    pub balance_before: Money,
    pub balance_after: Money,
}

/// unrounded components of an installment
#[derive(Debug, Clone, Copy)]
pub(crate) struct InstallmentParts {
    pub amortization: Decimal,
    pub interest: Decimal,
    pub mip: Decimal,
    pub dfi: Decimal,
    pub admin_fee: Decimal,
    pub total: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
}

impl CalculatedInstallment {
    /// round the raw parts into a reported row
    pub(crate) fn record(installment_number: u32, due_date: NaiveDate, parts: InstallmentParts) -> Self {
        Self {
            installment_number,
            due_date,
            amortization_amount: Money::from_decimal(parts.amortization),
            interest_amount: Money::from_decimal(parts.interest),
            mip_insurance: Money::from_decimal(parts.mip),
            dfi_insurance: Money::from_decimal(parts.dfi),
            admin_fee: Money::from_decimal(parts.admin_fee),
            tr_adjustment: Money::ZERO,
            total_amount: Money::from_decimal(parts.total),
            balance_before: Money::from_decimal(parts.balance_before),
            balance_after: Money::from_decimal(parts.balance_after),
        }
    }

    /// MIP plus DFI
    pub fn insurance(&self) -> Money {
        self.mip_insurance + self.dfi_insurance
    }
}

/// schedule generator for one amortization system
pub struct ScheduleGenerator {
    system: AmortizationSystem,
}

impl ScheduleGenerator {
    pub fn new(system: AmortizationSystem) -> Self {
        Self { system }
    }

    /// generate installments `starting_installment..=total_installments`
    pub fn generate(&self, params: &MortgageParameters) -> Result<Vec<CalculatedInstallment>> {
        params.validate()?;
        let monthly_rate = annual_to_monthly_rate(params.annual_rate)?;

        match self.system {
            AmortizationSystem::Price => price::generate(params, monthly_rate),
            // SACRE recalculation is not modelled yet, it amortizes like SAC
            AmortizationSystem::Sac | AmortizationSystem::Sacre => sac::generate(params, monthly_rate),
        }
    }
}

/// full schedule and aggregates for the given parameters
pub fn calculate_mortgage_installments(params: &MortgageParameters) -> Result<MortgageProjection> {
    debug!(
        system = %params.amortization_system,
        financed_amount = %params.financed_amount,
        total_installments = params.total_installments,
        starting_installment = params.starting_installment,
        annual_rate = %params.annual_rate,
        "generating mortgage schedule"
    );

    let installments = ScheduleGenerator::new(params.amortization_system).generate(params)?;
    Ok(MortgageProjection::from_installments(installments))
}

/// due date `offset` calendar months after `first`, clamped to the month end
pub(crate) fn due_date(first: NaiveDate, offset: u32) -> Result<NaiveDate> {
    first
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| MortgageError::CalculationError {
            message: format!("due date out of range: {} + {} months", first, offset),
        })
}

/// interest accrued on `balance` for one month
pub(crate) fn monthly_interest(balance: Decimal, monthly_rate: Rate) -> Decimal {
    balance * monthly_rate.as_decimal()
}
