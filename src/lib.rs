pub mod config;
pub mod decimal;
pub mod errors;
pub mod rates;
pub mod schedule;
pub mod serialization;
pub mod simulation;
pub mod types;

// re-export key types
pub use config::{ExtraPaymentConfig, LoanPosition, MonthlyCharges, MortgageParameters, MortgageParametersBuilder};
pub use decimal::{Money, Rate};
pub use errors::{MortgageError, Result};
pub use rates::{annual_to_monthly_rate, monthly_to_annual_rate};
pub use schedule::{
    calculate_mortgage_installments, AmortizationScenario, CalculatedInstallment, MortgageProjection,
    ScenarioSummary, ScheduleGenerator,
};
pub use serialization::JsonReport;
pub use simulation::{
    compare_systems, simulate_early_payoff, simulate_extra_payment, simulate_multiple_extra_payments,
    EarlyPayoffResult, ExtraPaymentResult, MultiScenarioResult, ScenarioComparison, ORIGINAL_SCENARIO,
    WITH_EXTRAS_SCENARIO,
};
pub use types::{AmortizationSystem, ExtraPaymentKind, ExtraPaymentPolicy};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
