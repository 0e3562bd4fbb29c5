use mortgage_engine_rs::chrono::NaiveDate;
use mortgage_engine_rs::*;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn first_due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

fn params(amount: Decimal, term: u32, rate_percent: Decimal, system: AmortizationSystem) -> MortgageParameters {
    MortgageParameters::builder()
        .financed_amount(amount)
        .total_installments(term)
        .annual_rate_percent(rate_percent)
        .amortization_system(system)
        .first_installment_date(first_due())
        .build()
        .unwrap()
}

fn position(balance: Decimal, remaining: u32, rate_percent: Decimal) -> LoanPosition {
    LoanPosition {
        current_balance: balance,
        remaining_installments: remaining,
        annual_rate: Rate::from_percent(rate_percent),
        amortization_system: AmortizationSystem::Sac,
        next_due_date: first_due(),
        charges: MonthlyCharges::none(),
    }
}

fn cents(n: u32) -> Money {
    Money::from_decimal(Decimal::new(n as i64, 2))
}

#[test]
fn rate_round_trip() {
    for step in 0..=50 {
        let percent = Decimal::from(step);
        let monthly = annual_to_monthly_rate(Rate::from_percent(percent)).unwrap();
        let annual = monthly_to_annual_rate(monthly).unwrap();
        assert!((annual.as_percentage() - percent).abs() < dec!(0.000000001));
    }
}

#[test]
fn sac_reference_installment() {
    let projection =
        calculate_mortgage_installments(&params(dec!(300000), 360, dec!(10), AmortizationSystem::Sac)).unwrap();
    let first = projection.installment(1).unwrap();

    assert_eq!(first.amortization_amount.to_string(), "833.33");
    assert_eq!(first.interest_amount.to_string(), "2392.24");
    assert_eq!(first.balance_after.to_string(), "299166.67");
    assert_eq!(first.due_date, first_due());
    assert_eq!(projection.len(), 360);
    assert_eq!(projection.final_due_date(), NaiveDate::from_ymd_opt(2053, 12, 10));
}

#[test]
fn sac_amortization_constant_and_balance_decreasing() {
    let projection =
        calculate_mortgage_installments(&params(dec!(300000), 360, dec!(10), AmortizationSystem::Sac)).unwrap();

    for pair in projection.installments.windows(2) {
        assert_eq!(pair[0].amortization_amount, pair[1].amortization_amount);
        assert!(pair[1].balance_after < pair[0].balance_after);
    }
    assert_eq!(projection.last_installment, projection.installments[359].total_amount);
    assert!(projection.first_installment > projection.last_installment);
}

#[test]
fn price_total_constant_without_charges() {
    let projection =
        calculate_mortgage_installments(&params(dec!(300000), 360, dec!(10), AmortizationSystem::Price)).unwrap();

    let first = projection.first_installment;
    for row in &projection.installments {
        assert!((row.total_amount - first).abs() <= cents(1));
    }
}

#[test]
fn schedule_conserves_principal() {
    for system in AmortizationSystem::ALL {
        let projection = calculate_mortgage_installments(&params(dec!(300000), 360, dec!(10), system)).unwrap();
        let tolerance = cents(360);
        assert!(
            (projection.total_amortization - Money::from_major(300000)).abs() <= tolerance,
            "{} amortized {}",
            system,
            projection.total_amortization
        );
        assert_eq!(
            projection.total_paid,
            projection.installments.iter().map(|i| i.total_amount).sum::<Money>()
        );
    }
}

#[test]
fn extra_payment_of_whole_balance_ends_term() {
    let pos = position(dec!(80000), 100, dec!(9));
    let result = simulate_extra_payment(&pos, dec!(1400), dec!(80000), ExtraPaymentPolicy::ReduceTerm).unwrap();

    assert_eq!(result.new_remaining_installments, 0);
    assert_eq!(result.months_reduced, 100);
}

#[test]
fn multi_scenario_terminates_early() {
    let pos = position(dec!(10000), 12, dec!(10));
    let extras = vec![ExtraPaymentConfig::recurring(dec!(900), 1, None, ExtraPaymentPolicy::ReduceTerm)];
    let result = simulate_multiple_extra_payments(&pos, &extras, true).unwrap();

    let names: Vec<&str> = result.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Original", "Com Aportes"]);

    let with_extras = result.scenario(WITH_EXTRAS_SCENARIO).unwrap();
    assert!(with_extras.installments.len() < 12);
    assert_eq!(with_extras.summary.final_installment_number as usize, with_extras.installments.len());

    let comparison = result.comparison.as_ref().unwrap();
    assert!(comparison.months_reduced > 0);
    assert!(comparison.interest_saved > Money::ZERO);
}

#[test]
fn multi_scenario_without_extras() {
    let pos = position(dec!(10000), 12, dec!(10));
    let result = simulate_multiple_extra_payments(&pos, &[], true).unwrap();

    assert_eq!(result.scenarios.len(), 1);
    assert_eq!(result.scenarios[0].name, ORIGINAL_SCENARIO);
    assert!(result.comparison.is_none());

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert!(json.get("comparison").is_none());
}

#[test]
fn early_payoff_matches_projection() {
    let pos = position(dec!(150000), 180, dec!(11));
    let result = simulate_early_payoff(&pos).unwrap();
    let projection =
        calculate_mortgage_installments(&params(dec!(150000), 180, dec!(11), AmortizationSystem::Sac)).unwrap();

    assert_eq!(result.payoff_amount, Money::from_major(150000));
    assert_eq!(result.remaining_payments, projection.total_paid);
    assert_eq!(result.total_savings, projection.total_paid - Money::from_major(150000));
}

#[test]
fn calculation_is_idempotent() {
    let mut p = params(dec!(250000), 300, dec!(8.75), AmortizationSystem::Price);
    p.charges = MonthlyCharges::new(dec!(400000), dec!(0.028), dec!(0.0086), dec!(25));

    let first = calculate_mortgage_installments(&p).unwrap().to_json().unwrap();
    let second = calculate_mortgage_installments(&p).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}
