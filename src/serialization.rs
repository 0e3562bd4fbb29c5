//! json input and output for callers that persist or transmit results
use serde::Serialize;

use crate::config::{ExtraPaymentConfig, LoanPosition, MortgageParameters};
use crate::errors::Result;
use crate::schedule::{AmortizationScenario, MortgageProjection};
use crate::simulation::{EarlyPayoffResult, ExtraPaymentResult, MultiScenarioResult};

/// engine output that renders as json, decimals as strings
pub trait JsonReport: Serialize {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// convert to pretty-printed json string
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl JsonReport for MortgageProjection {}
impl JsonReport for AmortizationScenario {}
impl JsonReport for ExtraPaymentResult {}
impl JsonReport for EarlyPayoffResult {}
impl JsonReport for MultiScenarioResult {}

/// parse and validate schedule parameters
pub fn parameters_from_json(json: &str) -> Result<MortgageParameters> {
    let params: MortgageParameters = serde_json::from_str(json)?;
    params.validate()?;
    Ok(params)
}

pub fn position_from_json(json: &str) -> Result<LoanPosition> {
    Ok(serde_json::from_str(json)?)
}

pub fn extra_payments_from_json(json: &str) -> Result<Vec<ExtraPaymentConfig>> {
    Ok(serde_json::from_str(json)?)
}
