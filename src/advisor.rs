//! Composes the deterministic engine with the optional enrichments into a
//! full advisory result.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::{
    AdvisorResult, EquityBreakdown, GrowthProjection, InvestmentProfile, InvestorType,
    PortfolioAllocation, calculate_growth, calculate_risk_score, determine_investor_type,
    equity_suggestions, recommended_allocation, with_amounts,
};
use crate::enrich::{Enrichment, SuggestionLists};
use crate::error::{AdvisorError, Result};

pub const EXPLANATION_UNAVAILABLE: &str = "AI analysis is currently unavailable. \
However, your asset allocation is based on sound financial principles.";

struct CorePlan {
    risk_score: u32,
    investor_type: InvestorType,
    allocation: PortfolioAllocation,
    monthly_equity_investment: f64,
}

fn core_plan(profile: &InvestmentProfile) -> CorePlan {
    let risk_score = calculate_risk_score(profile);
    let allocation = recommended_allocation(risk_score);
    CorePlan {
        risk_score,
        investor_type: determine_investor_type(risk_score),
        allocation,
        monthly_equity_investment: profile.monthly_savings_target
            * (f64::from(allocation.equity) / 100.0),
    }
}

fn assemble(
    profile: &InvestmentProfile,
    plan: &CorePlan,
    growth: GrowthProjection,
    equity_breakdown: EquityBreakdown,
    ai_explanation: Option<String>,
) -> AdvisorResult {
    AdvisorResult {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        profile: profile.clone(),
        risk_score: plan.risk_score,
        investor_type: plan.investor_type,
        allocation: plan.allocation,
        equity_breakdown,
        projected_corpus: growth.projected,
        inflation_adjusted_corpus: growth.inflation_adjusted_corpus,
        total_invested: growth.total_invested,
        growth_chart: growth.chart,
        ai_explanation,
    }
}

/// Builds a complete result from the deterministic engine alone: static
/// ETF/stock tables and no explanation.
pub fn build_core_plan(profile: &InvestmentProfile) -> AdvisorResult {
    let plan = core_plan(profile);
    let breakdown = equity_suggestions(
        plan.investor_type,
        plan.monthly_equity_investment,
        &profile.currency,
    );
    let growth = calculate_growth(profile, plan.allocation);
    assemble(profile, &plan, growth, breakdown, None)
}

/// Runs the full planning pipeline.
///
/// Stock picks and narration come from the injected collaborators. Either one
/// failing, timing out or returning nothing is logged and replaced by the
/// static tables or [`EXPLANATION_UNAVAILABLE`]; the numbers never depend on
/// them.
pub async fn generate_plan(
    profile: &InvestmentProfile,
    enrichment: &Enrichment,
) -> AdvisorResult {
    let plan = core_plan(profile);
    info!(
        risk_score = plan.risk_score,
        investor_type = %plan.investor_type,
        equity = plan.allocation.equity,
        debt = plan.allocation.debt,
        gold = plan.allocation.gold,
        "scored profile"
    );

    let picks = within(
        enrichment.timeout,
        enrichment.stock_picker.suggest(profile, plan.investor_type),
    )
    .await
    .and_then(non_empty_picks);

    let equity_breakdown = match picks {
        Ok(lists) => EquityBreakdown {
            etf: with_amounts(&lists.etf, plan.monthly_equity_investment),
            stocks: with_amounts(&lists.stocks, plan.monthly_equity_investment),
        },
        Err(err) => {
            warn!(error = %err, "stock suggestions unavailable, using built-in tables");
            equity_suggestions(
                plan.investor_type,
                plan.monthly_equity_investment,
                &profile.currency,
            )
        }
    };

    let growth = calculate_growth(profile, plan.allocation);

    let explanation = within(
        enrichment.timeout,
        enrichment.narrator.explain(
            profile,
            plan.allocation,
            plan.investor_type,
            growth.projected,
        ),
    )
    .await
    .and_then(non_blank_text);

    let ai_explanation = match explanation {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "explanation unavailable, using fallback text");
            EXPLANATION_UNAVAILABLE.to_string()
        }
    };

    let result = assemble(
        profile,
        &plan,
        growth,
        equity_breakdown,
        Some(ai_explanation),
    );
    debug!(id = %result.id, projected = result.projected_corpus, "plan ready");
    result
}

async fn within<T>(duration: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(duration, fut).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AdvisorError::Timeout { duration }),
    }
}

fn non_empty_picks(lists: SuggestionLists) -> Result<SuggestionLists> {
    if lists.is_empty() {
        Err(AdvisorError::InvalidSuggestions {
            reason: "no etf or stock picks".to_string(),
        })
    } else {
        Ok(lists)
    }
}

fn non_blank_text(text: String) -> Result<String> {
    if text.trim().is_empty() {
        Err(AdvisorError::EmptyResponse {
            service: "narrator".to_string(),
        })
    } else {
        Ok(text)
    }
}
