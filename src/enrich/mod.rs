//! Optional, non-deterministic enrichments layered on top of a plan.
//!
//! A plan is complete without any of these. The pipeline calls them through
//! trait objects so tests and offline deployments can swap in the static
//! implementations.

mod fallback;
mod llm;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::{InvestmentProfile, InvestorType, PortfolioAllocation, SuggestionTemplate};
use crate::error::Result;

pub use fallback::{StaticNarrator, StaticStockPicker};
pub use llm::{LlmClient, LlmConfig, parse_suggestion_lists};

pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(20);

/// ETF and stock picks as returned by a [`StockPicker`], before amounts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuggestionLists {
    #[serde(default)]
    pub etf: Vec<SuggestionTemplate>,
    #[serde(default)]
    pub stocks: Vec<SuggestionTemplate>,
}

impl SuggestionLists {
    pub fn is_empty(&self) -> bool {
        self.etf.is_empty() && self.stocks.is_empty()
    }
}

/// Produces a plain-language explanation of a finished plan.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn explain(
        &self,
        profile: &InvestmentProfile,
        allocation: PortfolioAllocation,
        investor_type: InvestorType,
        projected_corpus: f64,
    ) -> Result<String>;
}

/// Proposes concrete ETFs and stocks for the equity portion of a plan.
#[async_trait]
pub trait StockPicker: Send + Sync {
    async fn suggest(
        &self,
        profile: &InvestmentProfile,
        investor_type: InvestorType,
    ) -> Result<SuggestionLists>;
}

/// The collaborators a plan request may consult, and how long each may take.
#[derive(Clone)]
pub struct Enrichment {
    pub narrator: Arc<dyn Narrator>,
    pub stock_picker: Arc<dyn StockPicker>,
    pub timeout: Duration,
}

impl Enrichment {
    /// Deterministic collaborators only; never touches the network.
    pub fn offline() -> Self {
        Self {
            narrator: Arc::new(StaticNarrator),
            stock_picker: Arc::new(StaticStockPicker),
            timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    pub fn llm(client: LlmClient, timeout: Duration) -> Self {
        let client = Arc::new(client);
        Self {
            narrator: client.clone(),
            stock_picker: client,
            timeout,
        }
    }
}

impl std::fmt::Debug for Enrichment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enrichment")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
