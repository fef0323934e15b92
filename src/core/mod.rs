mod growth;
mod risk;
mod suggestions;
mod types;

pub use growth::{
    BENCHMARK_SAVINGS_RATE, DEBT_RETURN, EQUITY_RETURN, GOLD_RETURN, INFLATION_RATE,
    blended_annual_rate, calculate_growth,
};
pub use risk::{
    MAX_RISK_SCORE, MIN_RISK_SCORE, calculate_risk_score, determine_investor_type,
    recommended_allocation,
};
pub use suggestions::{
    SuggestionTemplate, equity_suggestions, static_suggestion_lists, with_amounts,
};
pub use types::{
    AdvisorResult, EquityBreakdown, GrowthDataPoint, GrowthProjection, InvestmentProfile,
    InvestorType, PortfolioAllocation, RiskTolerance, StockRecommendation,
};

/// Rounds halves towards positive infinity, so `-2.5` becomes `-2` and
/// `2.5` becomes `3`. Every rounded figure the engine reports goes through here.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
