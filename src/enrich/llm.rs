use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Narrator, StockPicker, SuggestionLists};
use crate::core::{InvestmentProfile, InvestorType, PortfolioAllocation, SuggestionTemplate};
use crate::error::{AdvisorError, Result};

const SERVICE: &str = "llm";
const PERCENT_TOLERANCE: f64 = 1.0;

const NARRATION_SYSTEM: &str = "You explain investment plans to complete beginners. \
Use short sentences and everyday words. Never use financial jargon.";

const PICKER_SYSTEM: &str = "You are a financial strategist. Reply with JSON only, \
shaped as {\"etf\": [...], \"stocks\": [...]} where every item has the string fields \
symbol, name, sector and the number field allocationPercent.";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of an Ollama-compatible server
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout: Duration::from_secs(30),
            temperature: 0.4,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    response: String,
    #[serde(default)]
    eval_count: u32,
    #[serde(default)]
    total_duration: u64,
}

/// Text-generation client for an Ollama-style `/api/generate` endpoint.
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisorError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Sends one non-streaming completion request and returns the trimmed text.
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
        format: Option<&str>,
    ) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url.trim_end_matches('/'));
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            system,
            format,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(llm_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Llm {
                service: SERVICE.to_string(),
                error: format!("HTTP {status}: {body}"),
            });
        }

        let generated: GenerateResponse = response.json().await.map_err(llm_error)?;
        info!(
            model = %generated.model,
            eval_count = generated.eval_count,
            duration_ms = generated.total_duration / 1_000_000,
            "generation finished"
        );

        let text = generated.response.trim();
        if text.is_empty() {
            return Err(AdvisorError::EmptyResponse {
                service: SERVICE.to_string(),
            });
        }
        Ok(text.to_string())
    }
}

fn llm_error(err: reqwest::Error) -> AdvisorError {
    AdvisorError::Llm {
        service: SERVICE.to_string(),
        error: err.to_string(),
    }
}

fn narration_prompt(
    profile: &InvestmentProfile,
    allocation: PortfolioAllocation,
    investor_type: InvestorType,
    projected_corpus: f64,
) -> String {
    let currency = &profile.currency;
    format!(
        "Explain this investment plan.\n\n\
         User: age {age}, goal: {goal}, {investor_type} investor.\n\
         Plan: equity {equity}%, debt {debt}%, gold {gold}%, \
         {currency}{sip} every month for {years} years, projected to reach {currency}{projected_corpus}.\n\n\
         Reply with exactly three short markdown sections, starting directly with the first header:\n\
         ### The Simple Plan\n(one sentence)\n\
         ### Why this fits you\n(one sentence)\n\
         ### Your First Step\n* (one concrete action)",
        age = profile.age,
        goal = profile.financial_goal,
        equity = allocation.equity,
        debt = allocation.debt,
        gold = allocation.gold,
        sip = profile.monthly_savings_target,
        years = profile.investment_horizon_years,
    )
}

fn picker_prompt(profile: &InvestmentProfile, investor_type: InvestorType) -> String {
    let market = if profile.currency == "₹" {
        "NSE/BSE tickers"
    } else {
        "US tickers"
    };
    format!(
        "Recommend investments for a {age} year old {investor_type} investor saving towards: {goal}.\n\
         Currency: '{currency}', so use {market}.\n\
         Give 3-4 items in 'etf' and 4-5 items in 'stocks'. \
         The allocationPercent values in each list must add up to 100.",
        age = profile.age,
        goal = profile.financial_goal,
        currency = profile.currency,
    )
}

/// Parses and checks a JSON pick list. Each non-empty list must allocate
/// 100% of the equity portion, give or take one point.
pub fn parse_suggestion_lists(text: &str) -> Result<SuggestionLists> {
    let lists: SuggestionLists = serde_json::from_str(text)?;
    if lists.is_empty() {
        return Err(AdvisorError::InvalidSuggestions {
            reason: "no etf or stock picks".to_string(),
        });
    }
    check_percent_total("etf", &lists.etf)?;
    check_percent_total("stocks", &lists.stocks)?;
    Ok(lists)
}

fn check_percent_total(label: &str, picks: &[SuggestionTemplate]) -> Result<()> {
    if picks.is_empty() {
        return Ok(());
    }
    if let Some(bad) = picks
        .iter()
        .find(|p| !p.allocation_percent.is_finite() || p.allocation_percent < 0.0)
    {
        return Err(AdvisorError::InvalidSuggestions {
            reason: format!("{label}: {} has allocation {}", bad.symbol, bad.allocation_percent),
        });
    }
    let total: f64 = picks.iter().map(|p| p.allocation_percent).sum();
    if (total - 100.0).abs() > PERCENT_TOLERANCE {
        return Err(AdvisorError::InvalidSuggestions {
            reason: format!("{label} allocations sum to {total}, expected 100"),
        });
    }
    Ok(())
}

#[async_trait]
impl Narrator for LlmClient {
    async fn explain(
        &self,
        profile: &InvestmentProfile,
        allocation: PortfolioAllocation,
        investor_type: InvestorType,
        projected_corpus: f64,
    ) -> Result<String> {
        let prompt = narration_prompt(profile, allocation, investor_type, projected_corpus);
        self.generate(&prompt, Some(NARRATION_SYSTEM), None).await
    }
}

#[async_trait]
impl StockPicker for LlmClient {
    async fn suggest(
        &self,
        profile: &InvestmentProfile,
        investor_type: InvestorType,
    ) -> Result<SuggestionLists> {
        let prompt = picker_prompt(profile, investor_type);
        let text = self
            .generate(&prompt, Some(PICKER_SYSTEM), Some("json"))
            .await?;
        parse_suggestion_lists(&text)
    }
}
