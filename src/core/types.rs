use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RiskTolerance {
    Low,
    Moderate,
    High,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum InvestorType {
    Conservative,
    Moderate,
    Aggressive,
}

impl InvestorType {
    pub fn as_str(self) -> &'static str {
        match self {
            InvestorType::Conservative => "Conservative",
            InvestorType::Moderate => "Moderate",
            InvestorType::Aggressive => "Aggressive",
        }
    }
}

impl std::fmt::Display for InvestorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's financial situation as submitted for planning.
///
/// Monetary fields are plain magnitudes in whatever `currency` the user
/// picked. `financial_goal` and `currency` are carried through for display
/// and never enter the numeric model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProfile {
    pub age: u32,
    pub monthly_income: f64,
    pub current_savings: f64,
    pub monthly_savings_target: f64,
    pub risk_tolerance: RiskTolerance,
    pub investment_horizon_years: f64,
    pub financial_goal: String,
    pub currency: String,
}

/// Percentage split across asset classes. The three fields sum to 100.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    pub equity: u32,
    pub debt: u32,
    pub gold: u32,
}

impl PortfolioAllocation {
    pub fn total(self) -> u32 {
        self.equity + self.debt + self.gold
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthDataPoint {
    pub year: f64,
    pub invested: f64,
    pub estimated: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub projected: f64,
    pub inflation_adjusted_corpus: f64,
    pub total_invested: f64,
    pub chart: Vec<GrowthDataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecommendation {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    /// Share of the equity portion, in percent.
    pub allocation_percent: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityBreakdown {
    pub etf: Vec<StockRecommendation>,
    pub stocks: Vec<StockRecommendation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorResult {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: InvestmentProfile,
    pub risk_score: u32,
    pub investor_type: InvestorType,
    pub allocation: PortfolioAllocation,
    pub equity_breakdown: EquityBreakdown,
    pub projected_corpus: f64,
    pub inflation_adjusted_corpus: f64,
    pub total_invested: f64,
    pub growth_chart: Vec<GrowthDataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<String>,
}
