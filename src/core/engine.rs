use super::types::{Horizon, Inputs, ScenarioResult, Strategy, TargetSchedule, YearSnapshot};

#[derive(Debug, Default)]
struct Buckets {
    low_yield: f64,
    growth: f64,
}

/// Discounts `nominal` to today's purchasing power after `year` years of inflation.
pub fn real_value(nominal: f64, inflation_rate: f64, year: u32) -> f64 {
    let base = 1.0 + inflation_rate;
    let factor = match i32::try_from(year) {
        Ok(exponent) => base.powi(exponent),
        Err(_) => base.powf(f64::from(year)),
    };
    nominal / factor
}

/// Runs the yearly recurrence for one strategy.
///
/// Each year the deposit is added first and then the buckets compound, so a deposit
/// earns a full year of return in the year it is paid in. The hybrid strategy sweeps
/// low-yield balance above the current year's target into the growth bucket after
/// compounding.
pub fn simulate(horizon: &Horizon, strategy: &Strategy, inflation_rate: f64) -> Vec<YearSnapshot> {
    let total_years = horizon.total_years();
    let mut buckets = Buckets::default();
    let mut years = Vec::with_capacity(total_years as usize);

    for year in 1..=total_years {
        let deposit = horizon.deposit_for_year(year);
        match *strategy {
            Strategy::SavingsOnly { rate } => {
                buckets.low_yield = (buckets.low_yield + deposit) * (1.0 + rate);
            }
            Strategy::GrowthOnly { rate } => {
                buckets.growth = (buckets.growth + deposit) * (1.0 + rate);
            }
            Strategy::Hybrid {
                low_yield_rate,
                growth_rate,
                targets,
            } => {
                let target = targets.target_for_year(year);
                allocate_deposit(&mut buckets, deposit, target);
                apply_growth(&mut buckets, low_yield_rate, growth_rate);
                sweep_excess(&mut buckets, target);
            }
        }
        years.push(record_year(year, deposit, &buckets, inflation_rate));
    }

    years
}

pub fn simulate_savings(
    deposit_years: u32,
    growth_years: u32,
    annual_deposit: f64,
    rate: f64,
    inflation_rate: f64,
) -> Vec<YearSnapshot> {
    let horizon = Horizon {
        deposit_years,
        growth_years,
        annual_deposit,
    };
    simulate(&horizon, &Strategy::SavingsOnly { rate }, inflation_rate)
}

pub fn simulate_growth(
    deposit_years: u32,
    growth_years: u32,
    annual_deposit: f64,
    rate: f64,
    inflation_rate: f64,
) -> Vec<YearSnapshot> {
    let horizon = Horizon {
        deposit_years,
        growth_years,
        annual_deposit,
    };
    simulate(&horizon, &Strategy::GrowthOnly { rate }, inflation_rate)
}

pub fn simulate_hybrid(
    deposit_years: u32,
    growth_years: u32,
    annual_deposit: f64,
    low_yield_rate: f64,
    growth_rate: f64,
    inflation_rate: f64,
    targets: TargetSchedule,
) -> Vec<YearSnapshot> {
    let horizon = Horizon {
        deposit_years,
        growth_years,
        annual_deposit,
    };
    let strategy = Strategy::Hybrid {
        low_yield_rate,
        growth_rate,
        targets,
    };
    simulate(&horizon, &strategy, inflation_rate)
}

pub fn run_scenario(inputs: &Inputs, strategy: &Strategy) -> ScenarioResult {
    ScenarioResult {
        strategy: strategy.kind(),
        years: simulate(&inputs.horizon(), strategy, inputs.inflation_rate),
    }
}

/// Runs savings-only, index-fund-only and hybrid for the same inputs, in that order.
pub fn run_comparison(inputs: &Inputs) -> Vec<ScenarioResult> {
    let results = inputs
        .strategies()
        .iter()
        .map(|strategy| run_scenario(inputs, strategy))
        .collect::<Vec<_>>();

    for result in &results {
        tracing::debug!(
            strategy = ?result.strategy,
            years = result.years.len(),
            final_nominal = result.final_nominal(),
            final_real = result.final_real(),
            "scenario simulated"
        );
    }

    results
}

fn allocate_deposit(buckets: &mut Buckets, deposit: f64, target: f64) {
    let mut remaining = deposit;
    if buckets.low_yield < target && remaining > 0.0 {
        let allocated = remaining.min(target - buckets.low_yield);
        buckets.low_yield += allocated;
        remaining -= allocated;
    }
    buckets.growth += remaining;
}

fn apply_growth(buckets: &mut Buckets, low_yield_rate: f64, growth_rate: f64) {
    buckets.low_yield *= 1.0 + low_yield_rate;
    buckets.growth *= 1.0 + growth_rate;
}

fn sweep_excess(buckets: &mut Buckets, target: f64) {
    if buckets.low_yield > target {
        buckets.growth += buckets.low_yield - target;
        buckets.low_yield = target;
    }
}

fn record_year(year: u32, deposit: f64, buckets: &Buckets, inflation_rate: f64) -> YearSnapshot {
    let total_nominal = buckets.low_yield + buckets.growth;
    YearSnapshot {
        year,
        deposit,
        low_yield_balance: buckets.low_yield,
        growth_balance: buckets.growth,
        total_nominal,
        total_real: real_value(total_nominal, inflation_rate, year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StrategyKind;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_inputs() -> Inputs {
        Inputs {
            deposit_years: 11,
            growth_years: 5,
            annual_deposit: 10_200.0,
            savings_rate: 0.02,
            growth_rate: 0.05,
            inflation_rate: 0.02,
            phase1_target: 5_000.0,
            phase2_target: 10_000.0,
            phase1_years: 3,
        }
    }

    fn flat_targets(target: f64) -> TargetSchedule {
        TargetSchedule {
            phase1_target: target,
            phase2_target: target,
            phase1_years: 1,
        }
    }

    fn assert_shared_invariants(years: &[YearSnapshot], horizon: &Horizon, inflation_rate: f64) {
        assert_eq!(years.len(), horizon.total_years() as usize);
        for (idx, row) in years.iter().enumerate() {
            assert_eq!(row.year, idx as u32 + 1);
            assert_eq!(row.total_nominal, row.low_yield_balance + row.growth_balance);
            assert_eq!(
                row.total_real,
                real_value(row.total_nominal, inflation_rate, row.year)
            );
            assert_eq!(row.deposit, horizon.deposit_for_year(row.year));
        }
    }

    #[test]
    fn real_value_is_identity_without_inflation() {
        assert_eq!(real_value(12_345.67, 0.0, 1), 12_345.67);
        assert_eq!(real_value(12_345.67, 0.0, 40), 12_345.67);
    }

    #[test]
    fn real_value_discounts_by_compounded_inflation() {
        assert_approx(real_value(1_210.0, 0.10, 2), 1_000.0);
        assert_approx(real_value(1_000.0, 0.02, 3), 1_000.0 / 1.061208);
    }

    #[test]
    fn real_value_keeps_discounting_beyond_i32_years() {
        assert_eq!(real_value(100.0, 0.0, u32::MAX), 100.0);
        assert_eq!(real_value(100.0, 0.01, u32::MAX), 0.0);
        assert!(real_value(100.0, 0.01, i32::MAX as u32 + 1) < 100.0);
    }

    #[test]
    fn horizon_total_years_saturates_instead_of_overflowing() {
        let horizon = Horizon {
            deposit_years: u32::MAX,
            growth_years: 1,
            annual_deposit: 1.0,
        };
        assert_eq!(horizon.total_years(), u32::MAX);
        assert_eq!(horizon.deposit_for_year(u32::MAX), 1.0);
    }

    #[test]
    fn oracle_single_savings_year_compounds_the_deposit() {
        let years = simulate_savings(1, 0, 1_000.0, 0.10, 0.0);

        assert_eq!(years.len(), 1);
        let row = years[0];
        assert_eq!(row.year, 1);
        assert_approx(row.deposit, 1_000.0);
        assert_approx(row.low_yield_balance, 1_100.0);
        assert_eq!(row.growth_balance, 0.0);
        assert_approx(row.total_nominal, 1_100.0);
        assert_eq!(row.total_real, row.total_nominal);
    }

    #[test]
    fn oracle_single_savings_year_with_inflation_reports_todays_money() {
        let years = simulate_savings(1, 0, 1_000.0, 0.10, 0.10);

        assert_approx(years[0].total_nominal, 1_100.0);
        assert_approx(years[0].total_real, 1_000.0);
    }

    #[test]
    fn oracle_growth_only_matches_hand_calculation() {
        // ((100*1.1 + 100)*1.1)*1.1 = 254.1
        let years = simulate_growth(2, 1, 100.0, 0.10, 0.0);

        assert_eq!(years.len(), 3);
        assert_approx(years[0].growth_balance, 110.0);
        assert_approx(years[1].growth_balance, 231.0);
        assert_approx(years[2].growth_balance, 254.1);
        assert_eq!(years[2].deposit, 0.0);
        for row in &years {
            assert_eq!(row.low_yield_balance, 0.0);
        }
    }

    #[test]
    fn oracle_hybrid_fills_low_yield_then_routes_rest_to_growth() {
        let years = simulate_hybrid(2, 0, 1_000.0, 0.0, 0.0, 0.0, flat_targets(500.0));

        assert_eq!(years.len(), 2);
        assert_approx(years[0].low_yield_balance, 500.0);
        assert_approx(years[0].growth_balance, 500.0);
        assert_approx(years[1].low_yield_balance, 500.0);
        assert_approx(years[1].growth_balance, 1_500.0);
        assert_approx(years[1].total_nominal, 2_000.0);
    }

    #[test]
    fn oracle_hybrid_sweeps_interest_above_target_into_growth() {
        // Year 1: 1000 to savings, grows to 1100, 100 swept; growth = 100.
        // Year 2: savings full so 1000 goes to growth (1100); savings grows to 1100,
        // 100 swept; growth = 1200.
        let years = simulate_hybrid(2, 0, 1_000.0, 0.10, 0.0, 0.0, flat_targets(1_000.0));

        assert_approx(years[0].low_yield_balance, 1_000.0);
        assert_approx(years[0].growth_balance, 100.0);
        assert_approx(years[1].low_yield_balance, 1_000.0);
        assert_approx(years[1].growth_balance, 1_200.0);
        assert_approx(years[1].total_nominal, 2_200.0);
    }

    #[test]
    fn hybrid_phase_change_to_lower_target_sweeps_in_the_same_year() {
        let targets = TargetSchedule {
            phase1_target: 5_000.0,
            phase2_target: 1_000.0,
            phase1_years: 1,
        };
        let years = simulate_hybrid(1, 1, 5_000.0, 0.0, 0.0, 0.0, targets);

        assert_approx(years[0].low_yield_balance, 5_000.0);
        assert_approx(years[0].growth_balance, 0.0);
        assert_approx(years[1].low_yield_balance, 1_000.0);
        assert_approx(years[1].growth_balance, 4_000.0);
        assert_approx(years[1].total_nominal, 5_000.0);
    }

    #[test]
    fn hybrid_phase_change_to_higher_target_tops_up_low_yield_first() {
        let targets = TargetSchedule {
            phase1_target: 500.0,
            phase2_target: 2_000.0,
            phase1_years: 1,
        };
        let years = simulate_hybrid(2, 0, 1_000.0, 0.0, 0.0, 0.0, targets);

        assert_approx(years[0].low_yield_balance, 500.0);
        assert_approx(years[0].growth_balance, 500.0);
        assert_approx(years[1].low_yield_balance, 1_500.0);
        assert_approx(years[1].growth_balance, 500.0);
    }

    #[test]
    fn hybrid_zero_target_behaves_like_growth_only() {
        let hybrid = simulate_hybrid(6, 4, 2_500.0, 0.03, 0.07, 0.02, flat_targets(0.0));
        let growth = simulate_growth(6, 4, 2_500.0, 0.07, 0.02);

        assert_eq!(hybrid.len(), growth.len());
        for (h, g) in hybrid.iter().zip(growth.iter()) {
            assert_eq!(h.low_yield_balance, 0.0);
            assert_eq!(h.growth_balance, g.growth_balance);
            assert_eq!(h.total_real, g.total_real);
        }
    }

    #[test]
    fn no_deposit_years_yields_zero_rows_for_the_growth_tail() {
        for years in [
            simulate_savings(0, 3, 1_000.0, 0.05, 0.02),
            simulate_growth(0, 3, 1_000.0, 0.05, 0.02),
            simulate_hybrid(0, 3, 1_000.0, 0.05, 0.07, 0.02, flat_targets(500.0)),
        ] {
            assert_eq!(years.len(), 3);
            for row in &years {
                assert_eq!(row.deposit, 0.0);
                assert_eq!(row.low_yield_balance, 0.0);
                assert_eq!(row.growth_balance, 0.0);
                assert_eq!(row.total_real, 0.0);
            }
        }
    }

    #[test]
    fn empty_horizon_yields_empty_sequence() {
        assert!(simulate_savings(0, 0, 1_000.0, 0.05, 0.02).is_empty());

        let mut inputs = sample_inputs();
        inputs.deposit_years = 0;
        inputs.growth_years = 0;
        for result in run_comparison(&inputs) {
            assert!(result.years.is_empty());
            assert_eq!(result.final_nominal(), 0.0);
            assert_eq!(result.final_real(), 0.0);
            assert_eq!(result.total_deposits(), 0.0);
        }
    }

    #[test]
    fn run_comparison_orders_strategies_and_shares_deposits() {
        let inputs = sample_inputs();
        let results = run_comparison(&inputs);

        let kinds = results.iter().map(|r| r.strategy).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                StrategyKind::SavingsOnly,
                StrategyKind::GrowthOnly,
                StrategyKind::Hybrid
            ]
        );
        for result in &results {
            assert_eq!(result.years.len(), 16);
            assert_approx(result.total_deposits(), 11.0 * 10_200.0);
        }
        assert!(results[1].final_nominal() > results[2].final_nominal());
        assert!(results[2].final_nominal() > results[0].final_nominal());
    }

    #[test]
    fn reruns_with_identical_inputs_are_identical() {
        let inputs = sample_inputs();
        let left = run_comparison(&inputs);
        let right = run_comparison(&inputs);

        for (a, b) in left.iter().zip(right.iter()) {
            assert_eq!(a.strategy, b.strategy);
            assert_eq!(a.years, b.years);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_all_strategies_share_length_year_and_total_invariants(
            deposit_years in 0u32..30,
            growth_years in 0u32..20,
            annual_deposit in 0.0f64..50_000.0,
            low_yield_rate in 0.0f64..0.10,
            growth_rate in 0.0f64..0.15,
            inflation_rate in 0.0f64..0.10,
            phase1_target in 0.0f64..60_000.0,
            phase2_target in 0.0f64..60_000.0,
            phase1_years in 1u32..20,
        ) {
            let horizon = Horizon { deposit_years, growth_years, annual_deposit };
            let targets = TargetSchedule { phase1_target, phase2_target, phase1_years };

            for strategy in [
                Strategy::SavingsOnly { rate: low_yield_rate },
                Strategy::GrowthOnly { rate: growth_rate },
                Strategy::Hybrid { low_yield_rate, growth_rate, targets },
            ] {
                let years = simulate(&horizon, &strategy, inflation_rate);
                assert_shared_invariants(&years, &horizon, inflation_rate);

                for row in &years {
                    prop_assert!(row.low_yield_balance >= 0.0);
                    prop_assert!(row.growth_balance >= 0.0);
                    match strategy {
                        Strategy::SavingsOnly { .. } => prop_assert_eq!(row.growth_balance, 0.0),
                        Strategy::GrowthOnly { .. } => prop_assert_eq!(row.low_yield_balance, 0.0),
                        Strategy::Hybrid { .. } => {
                            prop_assert!(row.low_yield_balance <= targets.target_for_year(row.year));
                        }
                    }
                }

                for pair in years.windows(2) {
                    let tol = 1e-9 * pair[0].total_nominal.max(1.0);
                    prop_assert!(
                        pair[1].total_nominal + tol >= pair[0].total_nominal,
                        "total fell from {} to {} in year {}",
                        pair[0].total_nominal,
                        pair[1].total_nominal,
                        pair[1].year
                    );
                }
            }
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_hybrid_at_equal_rates_matches_single_bucket_total(
            deposit_years in 1u32..25,
            growth_years in 0u32..15,
            annual_deposit in 0.0f64..30_000.0,
            rate in 0.0f64..0.10,
            phase1_target in 0.0f64..40_000.0,
            phase2_target in 0.0f64..40_000.0,
            phase1_years in 1u32..10,
        ) {
            let targets = TargetSchedule { phase1_target, phase2_target, phase1_years };
            let hybrid = simulate_hybrid(
                deposit_years, growth_years, annual_deposit, rate, rate, 0.0, targets,
            );
            let savings = simulate_savings(deposit_years, growth_years, annual_deposit, rate, 0.0);

            for (h, s) in hybrid.iter().zip(savings.iter()) {
                let tol = 1e-9 * s.total_nominal.max(1.0);
                prop_assert!(
                    (h.total_nominal - s.total_nominal).abs() <= tol,
                    "year {}: hybrid {} vs savings {}",
                    h.year,
                    h.total_nominal,
                    s.total_nominal
                );
            }
        }
    }
}
