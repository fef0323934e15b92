use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::time::Duration;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::advisor::generate_plan;
use crate::core::{
    GrowthProjection, InvestmentProfile, PortfolioAllocation, RiskTolerance, blended_annual_rate,
    calculate_growth,
};
use crate::enrich::{Enrichment, LlmClient, LlmConfig};
use crate::error::{AdvisorError, Result};

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 100;
const MAX_MONETARY_VALUE: f64 = 1_000_000_000.0;
const PLAN_HORIZON_YEARS: RangeInclusive<f64> = 1.0..=50.0;
const RESIMULATION_HORIZON_YEARS: RangeInclusive<f64> = 0.5..=50.0;
const DEFAULT_GOAL: &str = "Wealth Creation";
const DEFAULT_CURRENCY: &str = "$";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliRiskTolerance {
    Low,
    Moderate,
    High,
}

impl From<CliRiskTolerance> for RiskTolerance {
    fn from(value: CliRiskTolerance) -> Self {
        match value {
            CliRiskTolerance::Low => RiskTolerance::Low,
            CliRiskTolerance::Moderate => RiskTolerance::Moderate,
            CliRiskTolerance::High => RiskTolerance::High,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
enum ApiRiskTolerance {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "moderate", alias = "MODERATE", alias = "medium", alias = "Medium")]
    Moderate,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl From<ApiRiskTolerance> for CliRiskTolerance {
    fn from(value: ApiRiskTolerance) -> Self {
        match value {
            ApiRiskTolerance::Low => CliRiskTolerance::Low,
            ApiRiskTolerance::Moderate => CliRiskTolerance::Moderate,
            ApiRiskTolerance::High => CliRiskTolerance::High,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "wealth-advisor",
    about = "Risk scoring, asset allocation and SIP growth projection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the planning HTTP API
    Serve(ServeArgs),
    /// Build a plan for one profile and print it as JSON
    Plan(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "ADVISOR_PORT", default_value_t = 8080)]
    pub port: u16,
    #[arg(
        long,
        env = "ADVISOR_LLM_URL",
        default_value = "http://localhost:11434",
        help = "Base URL of an Ollama-compatible text generation server"
    )]
    pub llm_url: String,
    #[arg(long, env = "ADVISOR_LLM_MODEL", default_value = "llama3.1")]
    pub llm_model: String,
    #[arg(
        long,
        env = "ADVISOR_LLM_TIMEOUT_SECS",
        default_value_t = 20,
        help = "Seconds to wait for each explanation or suggestion request"
    )]
    pub llm_timeout_secs: u64,
    #[arg(
        long,
        env = "ADVISOR_OFFLINE",
        help = "Use the built-in explanation and ETF/stock tables only"
    )]
    pub offline: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub age: u32,
    #[arg(long)]
    pub monthly_income: f64,
    #[arg(long, default_value_t = 0.0, help = "Lump sum already invested")]
    pub current_savings: f64,
    #[arg(long, help = "Monthly contribution (SIP)")]
    pub monthly_savings_target: f64,
    #[arg(long, value_enum, default_value_t = CliRiskTolerance::Moderate)]
    pub risk_tolerance: CliRiskTolerance,
    #[arg(long, help = "Investment horizon in years, fractions allowed")]
    pub investment_horizon_years: f64,
    #[arg(long, default_value = DEFAULT_GOAL)]
    pub financial_goal: String,
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    age: Option<u32>,
    monthly_income: Option<f64>,
    current_savings: Option<f64>,
    monthly_savings_target: Option<f64>,
    risk_tolerance: Option<ApiRiskTolerance>,
    investment_horizon_years: Option<f64>,
    financial_goal: Option<String>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GrowthPayload {
    age: Option<u32>,
    monthly_income: Option<f64>,
    current_savings: Option<f64>,
    monthly_savings_target: Option<f64>,
    risk_tolerance: Option<ApiRiskTolerance>,
    investment_horizon_years: Option<f64>,
    financial_goal: Option<String>,
    currency: Option<String>,

    equity: Option<u32>,
    debt: Option<u32>,
    gold: Option<u32>,
}

impl GrowthPayload {
    fn split(self) -> (PlanPayload, [Option<u32>; 3]) {
        let profile = PlanPayload {
            age: self.age,
            monthly_income: self.monthly_income,
            current_savings: self.current_savings,
            monthly_savings_target: self.monthly_savings_target,
            risk_tolerance: self.risk_tolerance,
            investment_horizon_years: self.investment_horizon_years,
            financial_goal: self.financial_goal,
            currency: self.currency,
        };
        (profile, [self.equity, self.debt, self.gold])
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GrowthResponse {
    allocation: PortfolioAllocation,
    expected_annual_return: f64,
    #[serde(flatten)]
    projection: GrowthProjection,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub enrichment: Enrichment,
}

fn build_profile(
    args: ProfileArgs,
    horizon_years: RangeInclusive<f64>,
) -> std::result::Result<InvestmentProfile, String> {
    if !(MIN_AGE..=MAX_AGE).contains(&args.age) {
        return Err(format!("--age must be between {MIN_AGE} and {MAX_AGE}"));
    }

    for (name, value) in [
        ("--monthly-income", args.monthly_income),
        ("--current-savings", args.current_savings),
        ("--monthly-savings-target", args.monthly_savings_target),
        ("--investment-horizon-years", args.investment_horizon_years),
    ] {
        if !value.is_finite() {
            return Err(format!("{name} must be a finite number"));
        }
    }

    if args.monthly_income <= 0.0 {
        return Err("--monthly-income must be > 0".to_string());
    }
    if args.monthly_income > MAX_MONETARY_VALUE {
        return Err(format!("--monthly-income must be <= {MAX_MONETARY_VALUE}"));
    }

    if args.current_savings < 0.0 {
        return Err("--current-savings must be >= 0".to_string());
    }
    if args.current_savings > MAX_MONETARY_VALUE {
        return Err(format!("--current-savings must be <= {MAX_MONETARY_VALUE}"));
    }

    if args.monthly_savings_target <= 0.0 {
        return Err("--monthly-savings-target must be > 0".to_string());
    }
    if args.monthly_savings_target > MAX_MONETARY_VALUE {
        return Err(format!(
            "--monthly-savings-target must be <= {MAX_MONETARY_VALUE}"
        ));
    }
    if args.monthly_savings_target > args.monthly_income {
        return Err("--monthly-savings-target cannot exceed --monthly-income".to_string());
    }

    if !horizon_years.contains(&args.investment_horizon_years) {
        return Err(format!(
            "--investment-horizon-years must be between {} and {}",
            horizon_years.start(),
            horizon_years.end()
        ));
    }

    let financial_goal = match args.financial_goal.trim() {
        "" => DEFAULT_GOAL.to_string(),
        goal => goal.to_string(),
    };
    let currency = match args.currency.trim() {
        "" => DEFAULT_CURRENCY.to_string(),
        currency => currency.to_string(),
    };

    Ok(InvestmentProfile {
        age: args.age,
        monthly_income: args.monthly_income,
        current_savings: args.current_savings,
        monthly_savings_target: args.monthly_savings_target,
        risk_tolerance: args.risk_tolerance.into(),
        investment_horizon_years: args.investment_horizon_years,
        financial_goal,
        currency,
    })
}

fn build_allocation(parts: [Option<u32>; 3]) -> std::result::Result<PortfolioAllocation, String> {
    let [Some(equity), Some(debt), Some(gold)] = parts else {
        return Err("equity, debt and gold are required".to_string());
    };
    let total = u64::from(equity) + u64::from(debt) + u64::from(gold);
    if total != 100 {
        return Err(format!("equity + debt + gold must equal 100, got {total}"));
    }
    Ok(PortfolioAllocation { equity, debt, gold })
}

fn profile_args_from_payload(payload: PlanPayload) -> std::result::Result<ProfileArgs, String> {
    fn required<T>(value: Option<T>, name: &str) -> std::result::Result<T, String> {
        value.ok_or_else(|| format!("{name} is required"))
    }

    Ok(ProfileArgs {
        age: required(payload.age, "age")?,
        monthly_income: required(payload.monthly_income, "monthlyIncome")?,
        current_savings: payload.current_savings.unwrap_or(0.0),
        monthly_savings_target: required(payload.monthly_savings_target, "monthlySavingsTarget")?,
        risk_tolerance: payload
            .risk_tolerance
            .map(Into::into)
            .unwrap_or(CliRiskTolerance::Moderate),
        investment_horizon_years: required(
            payload.investment_horizon_years,
            "investmentHorizonYears",
        )?,
        financial_goal: payload
            .financial_goal
            .unwrap_or_else(|| DEFAULT_GOAL.to_string()),
        currency: payload
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    })
}

fn plan_profile_from_payload(payload: PlanPayload) -> std::result::Result<InvestmentProfile, String> {
    build_profile(profile_args_from_payload(payload)?, PLAN_HORIZON_YEARS)
}

fn growth_request_from_payload(
    payload: GrowthPayload,
) -> std::result::Result<(InvestmentProfile, PortfolioAllocation), String> {
    let (profile, parts) = payload.split();
    let allocation = build_allocation(parts)?;
    let profile = build_profile(
        profile_args_from_payload(profile)?,
        RESIMULATION_HORIZON_YEARS,
    )?;
    Ok((profile, allocation))
}

fn build_enrichment(args: &ServeArgs) -> Result<Enrichment> {
    if args.offline {
        info!("offline mode: using built-in explanations and suggestions");
        return Ok(Enrichment::offline());
    }
    let timeout = Duration::from_secs(args.llm_timeout_secs);
    let client = LlmClient::new(LlmConfig {
        base_url: args.llm_url.clone(),
        model: args.llm_model.clone(),
        timeout,
        ..LlmConfig::default()
    })?;
    info!(
        url = %client.config().base_url,
        model = %client.config().model,
        timeout_secs = args.llm_timeout_secs,
        "using LLM enrichment"
    );
    Ok(Enrichment::llm(client, timeout))
}

/// Entry point shared by the binary: dispatches the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => {
            let enrichment = build_enrichment(&args)?;
            run_http_server(args.port, enrichment).await
        }
        Command::Plan(args) => {
            let profile =
                build_profile(args, PLAN_HORIZON_YEARS).map_err(AdvisorError::InvalidProfile)?;
            let result = generate_plan(&profile, &Enrichment::offline()).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .route(
            "/api/growth",
            get(growth_get_handler).post(growth_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

pub async fn run_http_server(port: u16, enrichment: Enrichment) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(AppState { enrichment });

    let listener = TcpListener::bind(addr).await?;
    info!("advisor HTTP API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<PlanPayload>,
) -> Response {
    plan_handler_impl(&state, payload).await
}

async fn plan_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<PlanPayload>,
) -> Response {
    plan_handler_impl(&state, payload).await
}

async fn plan_handler_impl(state: &AppState, payload: PlanPayload) -> Response {
    let profile = match plan_profile_from_payload(payload) {
        Ok(profile) => profile,
        Err(msg) => {
            debug!(error = %msg, "rejected plan request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let result = generate_plan(&profile, &state.enrichment).await;
    info!(
        id = %result.id,
        risk_score = result.risk_score,
        projected = result.projected_corpus,
        "plan generated"
    );
    json_response(StatusCode::OK, result)
}

async fn growth_get_handler(Query(payload): Query<GrowthPayload>) -> Response {
    growth_handler_impl(payload)
}

async fn growth_post_handler(Json(payload): Json<GrowthPayload>) -> Response {
    growth_handler_impl(payload)
}

fn growth_handler_impl(payload: GrowthPayload) -> Response {
    let (profile, allocation) = match growth_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            debug!(error = %msg, "rejected growth request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let response = GrowthResponse {
        allocation,
        expected_annual_return: blended_annual_rate(allocation),
        projection: calculate_growth(&profile, allocation),
    };
    json_response(StatusCode::OK, response)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    if status.is_server_error() {
        warn!(%status, error = msg, "request failed");
    }
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn plan_payload_from_json(json: &str) -> std::result::Result<PlanPayload, String> {
    serde_json::from_str::<PlanPayload>(json).map_err(|e| format!("Invalid API JSON payload: {e}"))
}
