use super::round_half_up;
use super::types::{InvestmentProfile, InvestorType, PortfolioAllocation, RiskTolerance};

const BASE_SCORE: f64 = 50.0;
const PIVOT_AGE: f64 = 45.0;
const AGE_WEIGHT: f64 = 0.5;
const HORIZON_CAP_YEARS: f64 = 20.0;
const HORIZON_WEIGHT: f64 = 0.75;
const LOW_TOLERANCE_PENALTY: f64 = 30.0;
const HIGH_TOLERANCE_BONUS: f64 = 25.0;
const LOW_TOLERANCE_CEILING: f64 = 40.0;

pub const MIN_RISK_SCORE: u32 = 10;
pub const MAX_RISK_SCORE: u32 = 95;

const MIN_EQUITY: u32 = 15;
const MAX_EQUITY: u32 = 90;
const MIN_GOLD: u32 = 5;
const MAX_GOLD: u32 = 15;

/// Scores a profile's capacity for risk on a 10..=95 scale.
///
/// Age, horizon and savings discipline nudge the score; the stated tolerance
/// moves it further than all of those together. A `Low` tolerance also caps
/// the score at 40 so it always classifies as conservative.
pub fn calculate_risk_score(profile: &InvestmentProfile) -> u32 {
    let mut score = BASE_SCORE;

    score += (PIVOT_AGE - f64::from(profile.age)) * AGE_WEIGHT;
    score += profile.investment_horizon_years.min(HORIZON_CAP_YEARS) * HORIZON_WEIGHT;

    let savings_ratio = profile.monthly_savings_target / profile.monthly_income;
    if savings_ratio > 0.4 {
        score += 10.0;
    } else if savings_ratio > 0.2 {
        score += 5.0;
    }

    match profile.risk_tolerance {
        RiskTolerance::Low => score -= LOW_TOLERANCE_PENALTY,
        RiskTolerance::High => score += HIGH_TOLERANCE_BONUS,
        RiskTolerance::Moderate => {}
    }

    if profile.risk_tolerance == RiskTolerance::Low {
        score = score.min(LOW_TOLERANCE_CEILING);
    }

    let rounded = round_half_up(score);
    if rounded.is_nan() {
        return MIN_RISK_SCORE;
    }
    rounded.clamp(f64::from(MIN_RISK_SCORE), f64::from(MAX_RISK_SCORE)) as u32
}

pub fn determine_investor_type(score: u32) -> InvestorType {
    if score <= 40 {
        InvestorType::Conservative
    } else if score <= 70 {
        InvestorType::Moderate
    } else {
        InvestorType::Aggressive
    }
}

/// Derives an equity/debt/gold split from a risk score.
///
/// Equity tracks the score almost linearly; gold shrinks linearly from 15%
/// at score 10 to 5% at score 95; debt takes the remainder.
pub fn recommended_allocation(score: u32) -> PortfolioAllocation {
    let score = f64::from(score);

    let equity = (round_half_up(score * 0.9).max(0.0) as u32).clamp(MIN_EQUITY, MAX_EQUITY);

    let gold_raw = round_half_up(15.0 - ((score - 10.0) / 85.0) * 10.0);
    let gold = gold_raw.clamp(f64::from(MIN_GOLD), f64::from(MAX_GOLD)) as u32;

    // Floor at zero if the clamp ranges ever allow equity + gold > 100.
    let debt = 100u32.saturating_sub(equity + gold);

    PortfolioAllocation { equity, debt, gold }
}
