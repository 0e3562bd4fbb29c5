/// quick start - generate a schedule and try a couple of extra payments
use mortgage_engine_rs::chrono::NaiveDate;
use mortgage_engine_rs::{
    calculate_mortgage_installments, compare_systems, simulate_early_payoff, simulate_extra_payment,
    simulate_multiple_extra_payments, AmortizationSystem, Decimal, ExtraPaymentConfig, ExtraPaymentPolicy, JsonReport,
    LoanPosition, MonthlyCharges, MortgageParameters, WITH_EXTRAS_SCENARIO,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let first_due = NaiveDate::from_ymd_opt(2025, 1, 10).ok_or("invalid date")?;
    let charges = MonthlyCharges::new(
        Decimal::from(500_000),
        Decimal::new(25, 3), // 0.025% a month
        Decimal::new(12, 3), // 0.012% a month
        Decimal::from(25),
    );

    // a 300k mortgage over 30 years at 10% a year
    let params = MortgageParameters::builder()
        .financed_amount(Decimal::from(300_000))
        .total_installments(360)
        .annual_rate_percent(Decimal::from(10))
        .amortization_system(AmortizationSystem::Sac)
        .first_installment_date(first_due)
        .charges(charges)
        .build()?;

    let projection = calculate_mortgage_installments(&params)?;
    println!("first installment: {}", projection.first_installment);
    println!("last installment:  {}", projection.last_installment);
    println!("total interest:    {}", projection.total_interest);

    for scenario in compare_systems(&params)? {
        println!("{:<6} total paid {}", scenario.name, scenario.summary.total_paid);
    }

    // five years in, with 250k still outstanding
    let position = LoanPosition {
        current_balance: Decimal::from(250_000),
        remaining_installments: 300,
        annual_rate: params.annual_rate,
        amortization_system: params.amortization_system,
        next_due_date: NaiveDate::from_ymd_opt(2030, 1, 10).ok_or("invalid date")?,
        charges,
    };

    let extra = simulate_extra_payment(
        &position,
        Decimal::from(2_950),
        Decimal::from(20_000),
        ExtraPaymentPolicy::ReduceTerm,
    )?;
    println!("{}", extra.to_json_pretty()?);

    let payoff = simulate_early_payoff(&position)?;
    println!("paying off today saves {}", payoff.total_savings);

    let plan = vec![
        ExtraPaymentConfig::recurring(Decimal::from(500), 1, None, ExtraPaymentPolicy::ReduceTerm),
        ExtraPaymentConfig::one_time(Decimal::from(15_000), 12, ExtraPaymentPolicy::ReduceTerm),
    ];
    let result = simulate_multiple_extra_payments(&position, &plan, true)?;
    if let (Some(scenario), Some(comparison)) = (result.scenario(WITH_EXTRAS_SCENARIO), &result.comparison) {
        println!(
            "with extra payments the loan ends on {:?}, {} months early, roi {}%",
            scenario.summary.estimated_end_date, comparison.months_reduced, comparison.roi_percentage
        );
    }

    Ok(())
}
