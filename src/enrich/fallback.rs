use async_trait::async_trait;

use super::{Narrator, StockPicker, SuggestionLists};
use crate::core::{InvestmentProfile, InvestorType, PortfolioAllocation, static_suggestion_lists};
use crate::error::Result;

/// Builds the explanation from the plan's own numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticNarrator;

#[async_trait]
impl Narrator for StaticNarrator {
    async fn explain(
        &self,
        profile: &InvestmentProfile,
        allocation: PortfolioAllocation,
        investor_type: InvestorType,
        projected_corpus: f64,
    ) -> Result<String> {
        Ok(static_explanation(
            profile,
            allocation,
            investor_type,
            projected_corpus,
        ))
    }
}

fn static_explanation(
    profile: &InvestmentProfile,
    allocation: PortfolioAllocation,
    investor_type: InvestorType,
    projected_corpus: f64,
) -> String {
    let currency = &profile.currency;
    let reason = match investor_type {
        InvestorType::Conservative => "you prefer steady progress over big swings",
        InvestorType::Moderate => "you can ride out some ups and downs for better growth",
        InvestorType::Aggressive => "you have time to wait out the dips while your money grows",
    };

    format!(
        "### The Simple Plan\n\
         Every month, {equity}% of your savings buys small pieces of companies, \
         {debt}% is lent out safely and {gold}% goes into gold.\n\n\
         ### Why this fits you\n\
         At {age} with {years} years to invest, {reason}. If things go as expected \
         this could grow to about {currency}{projected_corpus} for your goal: {goal}.\n\n\
         ### Your First Step\n\
         * Set up an automatic transfer of {currency}{sip} every month.",
        equity = allocation.equity,
        debt = allocation.debt,
        gold = allocation.gold,
        age = profile.age,
        years = profile.investment_horizon_years,
        goal = profile.financial_goal,
        sip = profile.monthly_savings_target,
    )
}

/// Serves the built-in ETF and stock tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticStockPicker;

#[async_trait]
impl StockPicker for StaticStockPicker {
    async fn suggest(
        &self,
        profile: &InvestmentProfile,
        investor_type: InvestorType,
    ) -> Result<SuggestionLists> {
        let (etf, stocks) = static_suggestion_lists(investor_type, &profile.currency);
        Ok(SuggestionLists { etf, stocks })
    }
}
