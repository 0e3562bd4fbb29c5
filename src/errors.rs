use thiserror::Error;

use crate::decimal::Rate;

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MortgageError {
    pub(crate) fn overflow(context: &str) -> Self {
        MortgageError::CalculationError {
            message: format!("decimal overflow in {}", context),
        }
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
