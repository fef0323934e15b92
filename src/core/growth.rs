use super::round_half_up;
use super::types::{GrowthDataPoint, GrowthProjection, InvestmentProfile, PortfolioAllocation};

pub const EQUITY_RETURN: f64 = 0.12;
pub const DEBT_RETURN: f64 = 0.07;
pub const GOLD_RETURN: f64 = 0.08;
pub const INFLATION_RATE: f64 = 0.06;
pub const BENCHMARK_SAVINGS_RATE: f64 = 0.035;

const MONTHS_PER_YEAR: u32 = 12;

/// Expected annual return of the allocation, weighted by its percentages.
pub fn blended_annual_rate(allocation: PortfolioAllocation) -> f64 {
    (f64::from(allocation.equity) * EQUITY_RETURN
        + f64::from(allocation.debt) * DEBT_RETURN
        + f64::from(allocation.gold) * GOLD_RETURN)
        / 100.0
}

/// Projects the portfolio month by month over the profile's horizon.
///
/// Both the portfolio and a plain savings-account benchmark start from
/// `current_savings`. Each month the contribution is added first and the
/// month's growth (annual rate / 12) is applied to the sum. The chart holds
/// year 0, every whole year, and the final month when the horizon is
/// fractional.
pub fn calculate_growth(
    profile: &InvestmentProfile,
    allocation: PortfolioAllocation,
) -> GrowthProjection {
    let years = profile.investment_horizon_years;
    let total_months = total_months(years);
    let monthly_contribution = profile.monthly_savings_target;

    let monthly_rate = blended_annual_rate(allocation) / f64::from(MONTHS_PER_YEAR);
    let monthly_savings_rate = BENCHMARK_SAVINGS_RATE / f64::from(MONTHS_PER_YEAR);

    let mut estimated = profile.current_savings;
    let mut savings = profile.current_savings;
    let mut invested = profile.current_savings;

    let mut chart = Vec::with_capacity((total_months / MONTHS_PER_YEAR + 2) as usize);
    chart.push(sample_point(0.0, invested, estimated, savings));

    for month in 1..=total_months {
        estimated = (estimated + monthly_contribution) * (1.0 + monthly_rate);
        savings = (savings + monthly_contribution) * (1.0 + monthly_savings_rate);
        invested += monthly_contribution;

        if month % MONTHS_PER_YEAR == 0 || month == total_months {
            let year = year_label(month);
            let is_new_year = chart.last().is_none_or(|last| last.year != year);
            if is_new_year {
                chart.push(sample_point(year, invested, estimated, savings));
            }
        }
    }

    let projected = round_half_up(estimated);
    let inflation_factor = (1.0 + INFLATION_RATE).powf(years);

    GrowthProjection {
        projected,
        inflation_adjusted_corpus: round_half_up(projected / inflation_factor),
        total_invested: round_half_up(invested),
        chart,
    }
}

fn total_months(years: f64) -> u32 {
    let months = round_half_up(years * f64::from(MONTHS_PER_YEAR));
    if months.is_nan() || months <= 0.0 {
        0
    } else {
        months as u32
    }
}

/// Elapsed years rounded to one decimal place.
fn year_label(month: u32) -> f64 {
    round_half_up(f64::from(month) / f64::from(MONTHS_PER_YEAR) * 10.0) / 10.0
}

fn sample_point(year: f64, invested: f64, estimated: f64, savings: f64) -> GrowthDataPoint {
    GrowthDataPoint {
        year,
        invested: round_half_up(invested),
        estimated: round_half_up(estimated),
        savings: round_half_up(savings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RiskTolerance;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_profile() -> InvestmentProfile {
        InvestmentProfile {
            age: 30,
            monthly_income: 5_000.0,
            current_savings: 10_000.0,
            monthly_savings_target: 1_000.0,
            risk_tolerance: RiskTolerance::Moderate,
            investment_horizon_years: 10.0,
            financial_goal: "Wealth Creation".to_string(),
            currency: "$".to_string(),
        }
    }

    fn moderate_allocation() -> PortfolioAllocation {
        PortfolioAllocation {
            equity: 59,
            debt: 32,
            gold: 9,
        }
    }

    fn point(year: f64, invested: f64, estimated: f64, savings: f64) -> GrowthDataPoint {
        GrowthDataPoint {
            year,
            invested,
            estimated,
            savings,
        }
    }

    #[test]
    fn blended_rate_weights_each_asset_class() {
        assert_approx(blended_annual_rate(moderate_allocation()), 0.1004);
        assert_approx(
            blended_annual_rate(PortfolioAllocation {
                equity: 100,
                debt: 0,
                gold: 0,
            }),
            0.12,
        );
        assert_approx(
            blended_annual_rate(PortfolioAllocation {
                equity: 0,
                debt: 0,
                gold: 100,
            }),
            0.08,
        );
    }

    #[test]
    fn oracle_ten_year_projection_matches_hand_calculation() {
        let projection = calculate_growth(&sample_profile(), moderate_allocation());

        assert_eq!(projection.projected, 234_211.0);
        assert_eq!(projection.inflation_adjusted_corpus, 130_782.0);
        assert_eq!(projection.total_invested, 130_000.0);

        assert_eq!(projection.chart.len(), 11);
        assert_eq!(projection.chart[0], point(0.0, 10_000.0, 10_000.0, 10_000.0));
        assert_eq!(projection.chart[1], point(1.0, 22_000.0, 23_725.0, 22_586.0));
        assert_eq!(projection.chart[5], point(5.0, 70_000.0, 94_653.0, 77_566.0));
        assert_eq!(
            projection.chart[10],
            point(10.0, 130_000.0, 234_211.0, 158_034.0)
        );
    }

    #[test]
    fn oracle_single_year_debt_only_contributions() {
        // 1000 * sum_{k=1..12} (1 + 0.07/12)^k = 12464.88
        let mut profile = sample_profile();
        profile.current_savings = 0.0;
        profile.investment_horizon_years = 1.0;
        let allocation = PortfolioAllocation {
            equity: 0,
            debt: 100,
            gold: 0,
        };

        let projection = calculate_growth(&profile, allocation);
        assert_eq!(projection.projected, 12_465.0);
        assert_eq!(projection.total_invested, 12_000.0);
        assert_eq!(projection.inflation_adjusted_corpus, 11_759.0);
        assert_eq!(
            projection.chart,
            vec![
                point(0.0, 0.0, 0.0, 0.0),
                point(1.0, 12_000.0, 12_465.0, 12_230.0)
            ]
        );
    }

    #[test]
    fn lump_sum_without_contributions_compounds_monthly() {
        let mut profile = sample_profile();
        profile.monthly_savings_target = 0.0;
        profile.investment_horizon_years = 2.0;
        let allocation = PortfolioAllocation {
            equity: 100,
            debt: 0,
            gold: 0,
        };

        let projection = calculate_growth(&profile, allocation);
        assert_eq!(projection.projected, 12_697.0);
        assert_eq!(projection.total_invested, 10_000.0);
        assert_eq!(projection.inflation_adjusted_corpus, 11_300.0);
        assert_eq!(projection.chart.len(), 3);
        assert_eq!(projection.chart[1], point(1.0, 10_000.0, 11_268.0, 10_356.0));
    }

    #[test]
    fn half_year_horizon_emits_start_and_final_points_only() {
        let mut profile = sample_profile();
        profile.current_savings = 0.0;
        profile.investment_horizon_years = 0.5;

        let projection = calculate_growth(&profile, moderate_allocation());
        assert_eq!(projection.chart.len(), 2);
        assert_eq!(projection.chart[0].year, 0.0);
        assert_eq!(projection.chart[1], point(0.5, 6_000.0, 6_178.0, 6_062.0));
        assert_eq!(projection.projected, 6_178.0);
        assert_eq!(projection.inflation_adjusted_corpus, 6_001.0);
    }

    #[test]
    fn fractional_horizon_appends_final_partial_year() {
        let mut profile = sample_profile();
        profile.investment_horizon_years = 2.5;

        let projection = calculate_growth(&profile, moderate_allocation());
        let years = projection
            .chart
            .iter()
            .map(|p| p.year)
            .collect::<Vec<_>>();
        assert_eq!(years, vec![0.0, 1.0, 2.0, 2.5]);
        assert_eq!(projection.projected, 47_064.0);
        assert_eq!(projection.inflation_adjusted_corpus, 40_684.0);
        assert_eq!(projection.total_invested, 40_000.0);
    }

    #[test]
    fn whole_year_horizon_does_not_duplicate_final_point() {
        let mut profile = sample_profile();
        profile.investment_horizon_years = 3.0;

        let projection = calculate_growth(&profile, moderate_allocation());
        let years = projection
            .chart
            .iter()
            .map(|p| p.year)
            .collect::<Vec<_>>();
        assert_eq!(years, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn sub_month_horizon_keeps_only_initial_state() {
        let mut profile = sample_profile();
        profile.investment_horizon_years = 0.02;

        let projection = calculate_growth(&profile, moderate_allocation());
        assert_eq!(projection.chart.len(), 1);
        assert_eq!(projection.projected, profile.current_savings);
        assert_eq!(projection.total_invested, profile.current_savings);
    }

    #[test]
    fn zero_horizon_is_a_valid_degenerate_projection() {
        let mut profile = sample_profile();
        profile.investment_horizon_years = 0.0;

        let projection = calculate_growth(&profile, moderate_allocation());
        assert_eq!(projection.chart.len(), 1);
        assert_eq!(projection.projected, 10_000.0);
        assert_eq!(projection.inflation_adjusted_corpus, 10_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_nothing_in_means_nothing_out(
            horizon_tenths in 5u32..=500,
            equity in 15u32..=90,
            gold in 5u32..=10
        ) {
            let mut profile = sample_profile();
            profile.current_savings = 0.0;
            profile.monthly_savings_target = 0.0;
            profile.investment_horizon_years = f64::from(horizon_tenths) / 10.0;
            let allocation = PortfolioAllocation { equity, debt: 100 - equity - gold, gold };

            let projection = calculate_growth(&profile, allocation);
            prop_assert_eq!(projection.projected, 0.0);
            prop_assert_eq!(projection.total_invested, 0.0);
            prop_assert_eq!(projection.inflation_adjusted_corpus, 0.0);
            for p in &projection.chart {
                prop_assert_eq!(p.invested, 0.0);
                prop_assert_eq!(p.estimated, 0.0);
                prop_assert_eq!(p.savings, 0.0);
            }
        }

        #[test]
        fn prop_chart_shape_and_inflation_deflation(
            horizon_months in 6u32..=600,
            current_savings in 0u32..1_000_000,
            monthly in 0u32..50_000,
            equity in 15u32..=90,
            gold in 5u32..=10
        ) {
            let mut profile = sample_profile();
            profile.current_savings = f64::from(current_savings);
            profile.monthly_savings_target = f64::from(monthly);
            profile.investment_horizon_years = f64::from(horizon_months) / 12.0;
            let allocation = PortfolioAllocation { equity, debt: 100 - equity - gold, gold };

            let projection = calculate_growth(&profile, allocation);

            prop_assert!(projection.inflation_adjusted_corpus <= projection.projected);
            prop_assert!(projection.projected >= projection.total_invested);

            let whole_years = horizon_months / 12;
            let expected_points = 1 + whole_years + u32::from(horizon_months % 12 != 0);
            prop_assert_eq!(projection.chart.len() as u32, expected_points);

            prop_assert_eq!(projection.chart[0].year, 0.0);
            for pair in projection.chart.windows(2) {
                prop_assert!(pair[0].year < pair[1].year);
                prop_assert!(pair[0].invested <= pair[1].invested);
                prop_assert!(pair[0].estimated <= pair[1].estimated);
            }

            let last = projection.chart.last().expect("chart always has a start point");
            prop_assert_eq!(last.estimated, projection.projected);
            prop_assert_eq!(last.invested, projection.total_invested);
        }
    }
}
