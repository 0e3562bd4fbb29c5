use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{MortgageError, Result};
use crate::types::{AmortizationSystem, ExtraPaymentKind, ExtraPaymentPolicy};

/// insurance premiums and fees charged on top of every installment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MonthlyCharges {
    /// base for the DFI (property damage) premium
    #[serde(default)]
    pub property_value: Decimal,
    /// monthly MIP (life/disability) rate applied to the opening balance, percent in json
    #[serde(default, with = "crate::decimal::percent")]
    pub mip_rate: Rate,
    /// DFI rate applied to the property value, spread over 12 months, percent in json
    #[serde(default, with = "crate::decimal::percent")]
    pub dfi_rate: Rate,
    /// flat monthly administration fee
    #[serde(default)]
    pub admin_fee: Decimal,
}

impl MonthlyCharges {
    /// no insurance and no fees
    pub fn none() -> Self {
        Self::default()
    }

    /// create from percentage rates (e.g., 0.025 for 0.025% a month)
    pub fn new(
        property_value: Decimal,
        mip_rate_percent: Decimal,
        dfi_rate_percent: Decimal,
        admin_fee: Decimal,
    ) -> Self {
        Self {
            property_value,
            mip_rate: Rate::from_percent(mip_rate_percent),
            dfi_rate: Rate::from_percent(dfi_rate_percent),
            admin_fee,
        }
    }

    pub fn mip(&self, balance: Decimal) -> Decimal {
        balance * self.mip_rate.as_decimal()
    }

    pub fn dfi(&self) -> Decimal {
        self.property_value * self.dfi_rate.as_decimal() / dec!(12)
    }
}

fn default_starting_installment() -> u32 {
    1
}

/// parameters of a mortgage schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageParameters {
    pub financed_amount: Decimal,
    pub total_installments: u32,
    /// nominal annual rate, converted to an effective monthly rate, percent in json
    #[serde(with = "crate::decimal::percent")]
    pub annual_rate: Rate,
    pub amortization_system: AmortizationSystem,
    /// due date of the first generated installment
    pub first_installment_date: NaiveDate,
    #[serde(flatten)]
    pub charges: MonthlyCharges,
    /// installment number the schedule resumes from
    #[serde(default = "default_starting_installment")]
    pub starting_installment: u32,
    /// balance at the resumption point, defaults to the financed amount
    #[serde(default)]
    pub starting_balance: Option<Decimal>,
}

impl MortgageParameters {
    pub fn builder() -> MortgageParametersBuilder {
        MortgageParametersBuilder::new()
    }

    /// balance the first generated installment accrues on
    pub fn opening_balance(&self) -> Decimal {
        self.starting_balance.unwrap_or(self.financed_amount)
    }

    /// number of rows the schedule will hold
    pub fn installment_count(&self) -> u32 {
        self.total_installments.saturating_sub(self.starting_installment.saturating_sub(1))
    }

    /// reject parameters that make the schedule mathematically undefined
    pub fn validate(&self) -> Result<()> {
        if self.total_installments == 0 {
            return Err(MortgageError::InvalidConfiguration {
                message: "total installments must be at least 1".to_string(),
            });
        }
        if self.starting_installment == 0 {
            return Err(MortgageError::InvalidConfiguration {
                message: "starting installment must be at least 1".to_string(),
            });
        }
        if self.annual_rate.as_decimal() < -Decimal::ONE {
            return Err(MortgageError::InvalidInterestRate {
                rate: self.annual_rate,
            });
        }
        Ok(())
    }
}

pub struct MortgageParametersBuilder {
    financed_amount: Option<Decimal>,
    total_installments: Option<u32>,
    annual_rate: Option<Rate>,
    amortization_system: Option<AmortizationSystem>,
    first_installment_date: Option<NaiveDate>,
    charges: MonthlyCharges,
    starting_installment: u32,
    starting_balance: Option<Decimal>,
}

impl Default for MortgageParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MortgageParametersBuilder {
    pub fn new() -> Self {
        Self {
            financed_amount: None,
            total_installments: None,
            annual_rate: None,
            amortization_system: None,
            first_installment_date: None,
            charges: MonthlyCharges::none(),
            starting_installment: 1,
            starting_balance: None,
        }
    }

    pub fn financed_amount(mut self, amount: Decimal) -> Self {
        self.financed_amount = Some(amount);
        self
    }

    pub fn total_installments(mut self, installments: u32) -> Self {
        self.total_installments = Some(installments);
        self
    }

    /// nominal annual rate in percent (e.g., 10 for 10% a year)
    pub fn annual_rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_rate = Some(Rate::from_percent(percent));
        self
    }

    pub fn amortization_system(mut self, system: AmortizationSystem) -> Self {
        self.amortization_system = Some(system);
        self
    }

    pub fn first_installment_date(mut self, date: NaiveDate) -> Self {
        self.first_installment_date = Some(date);
        self
    }

    pub fn charges(mut self, charges: MonthlyCharges) -> Self {
        self.charges = charges;
        self
    }

    /// resume the schedule at `installment` with the given outstanding balance
    pub fn resume_from(mut self, installment: u32, balance: Decimal) -> Self {
        self.starting_installment = installment;
        self.starting_balance = Some(balance);
        self
    }

    pub fn build(self) -> Result<MortgageParameters> {
        let financed_amount = self.financed_amount.ok_or(MortgageError::InvalidConfiguration {
            message: "Financed amount required".to_string(),
        })?;
        if financed_amount.is_sign_negative() {
            return Err(MortgageError::InvalidConfiguration {
                message: format!("financed amount must not be negative: {}", financed_amount),
            });
        }

        let total_installments = self.total_installments.ok_or(MortgageError::InvalidConfiguration {
            message: "Total installments required".to_string(),
        })?;

        let annual_rate = self.annual_rate.ok_or(MortgageError::InvalidConfiguration {
            message: "Annual rate required".to_string(),
        })?;

        let first_installment_date = self.first_installment_date.ok_or(MortgageError::InvalidConfiguration {
            message: "First installment date required".to_string(),
        })?;

        let params = MortgageParameters {
            financed_amount,
            total_installments,
            annual_rate,
            amortization_system: self.amortization_system.unwrap_or(AmortizationSystem::Sac),
            first_installment_date,
            charges: self.charges,
            starting_installment: self.starting_installment,
            starting_balance: self.starting_balance,
        };
        params.validate()?;

        Ok(params)
    }
}

/// outstanding position of a running mortgage, the input of every simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPosition {
    pub current_balance: Decimal,
    pub remaining_installments: u32,
    #[serde(with = "crate::decimal::percent")]
    pub annual_rate: Rate,
    pub amortization_system: AmortizationSystem,
    /// due date of the next installment
    pub next_due_date: NaiveDate,
    #[serde(flatten)]
    pub charges: MonthlyCharges,
}

impl LoanPosition {
    /// schedule parameters projecting `balance` over `installments` from the next due date
    pub(crate) fn projection_parameters(&self, balance: Decimal, installments: u32) -> MortgageParameters {
        MortgageParameters {
            financed_amount: balance,
            total_installments: installments,
            annual_rate: self.annual_rate,
            amortization_system: self.amortization_system,
            first_installment_date: self.next_due_date,
            charges: self.charges,
            starting_installment: 1,
            starting_balance: None,
        }
    }
}

fn default_start_month() -> u32 {
    1
}

/// one extra (extraordinary) payment rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentConfig {
    #[serde(rename = "type")]
    pub kind: ExtraPaymentKind,
    pub amount: Decimal,
    /// first installment (1-based, relative to the position) the payment lands on
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// last installment of a recurring payment; `None` runs to the end of the term
    #[serde(default)]
    pub end_month: Option<u32>,
    pub payment_type: ExtraPaymentPolicy,
}

impl ExtraPaymentConfig {
    pub fn one_time(amount: Decimal, month: u32, policy: ExtraPaymentPolicy) -> Self {
        Self {
            kind: ExtraPaymentKind::OneTime,
            amount,
            start_month: month,
            end_month: None,
            payment_type: policy,
        }
    }

    pub fn recurring(amount: Decimal, start_month: u32, end_month: Option<u32>, policy: ExtraPaymentPolicy) -> Self {
        Self {
            kind: ExtraPaymentKind::Recurring,
            amount,
            start_month,
            end_month,
            payment_type: policy,
        }
    }

    /// whether this payment falls on `installment` of a term of `remaining_installments`
    pub fn applies_to(&self, installment: u32, remaining_installments: u32) -> bool {
        match self.kind {
            ExtraPaymentKind::OneTime => installment == self.start_month,
            ExtraPaymentKind::Recurring => {
                let end = self.end_month.unwrap_or(remaining_installments);
                self.start_month <= installment && installment <= end
            }
        }
    }
}
