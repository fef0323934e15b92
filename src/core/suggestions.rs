use serde::{Deserialize, Serialize};

use super::round_half_up;
use super::types::{EquityBreakdown, InvestorType, StockRecommendation};

const RUPEE: &str = "₹";

/// A pick without a currency amount attached yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionTemplate {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub allocation_percent: f64,
}

type Row = (&'static str, &'static str, &'static str, u32);

const CONSERVATIVE_INR_ETF: &[Row] = &[
    ("NIFTYBEES", "Nifty 50 ETF", "Broad Market", 70),
    ("BANKBEES", "Bank Nifty ETF", "Financials", 30),
];
const CONSERVATIVE_INR_STOCKS: &[Row] = &[
    ("HDFCBANK", "HDFC Bank", "Large Cap", 40),
    ("ITC", "ITC Ltd", "FMCG", 30),
    ("TCS", "TCS", "Tech", 30),
];
const CONSERVATIVE_GLOBAL_ETF: &[Row] = &[
    ("VOO", "Vanguard S&P 500", "Broad Market", 60),
    ("VIG", "Vanguard Div Appreciation", "Dividend", 40),
];
const CONSERVATIVE_GLOBAL_STOCKS: &[Row] = &[
    ("JNJ", "Johnson & Johnson", "Healthcare", 40),
    ("PG", "Procter & Gamble", "Consumer Staples", 30),
    ("KO", "Coca-Cola", "Consumer Staples", 30),
];

const MODERATE_INR_ETF: &[Row] = &[
    ("NIFTYBEES", "Nifty 50 ETF", "Broad Market", 50),
    ("JUNIORBEES", "Nifty Next 50", "Mid Cap", 30),
    ("GOLDBEES", "Gold ETF", "Commodity", 20),
];
const MODERATE_INR_STOCKS: &[Row] = &[
    ("RELIANCE", "Reliance Ind", "Conglomerate", 30),
    ("ICICIBANK", "ICICI Bank", "Financials", 30),
    ("INFY", "Infosys", "Technology", 20),
    ("LT", "L&T", "Infrastructure", 20),
];
const MODERATE_GLOBAL_ETF: &[Row] = &[
    ("VTI", "Total Stock Market", "Broad Market", 50),
    ("QQQ", "Invesco QQQ", "Tech Growth", 30),
    ("SCHD", "Schwab Dividend", "Dividend", 20),
];
const MODERATE_GLOBAL_STOCKS: &[Row] = &[
    ("MSFT", "Microsoft", "Technology", 30),
    ("GOOGL", "Alphabet", "Technology", 25),
    ("V", "Visa", "Financials", 25),
    ("COST", "Costco", "Retail", 20),
];

const AGGRESSIVE_INR_ETF: &[Row] = &[
    ("NIFTYBEES", "Nifty 50 ETF", "Broad Market", 30),
    ("MID150BEES", "Midcap 150", "Mid Cap", 40),
    ("SMALLCAP", "Smallcap 250", "Small Cap", 30),
];
const AGGRESSIVE_INR_STOCKS: &[Row] = &[
    ("TATAMOTORS", "Tata Motors", "Auto", 25),
    ("BAJFINANCE", "Bajaj Finance", "Financials", 25),
    ("ADANIENT", "Adani Ent", "Infra", 25),
    ("ZOMATO", "Zomato", "New Age", 25),
];
const AGGRESSIVE_GLOBAL_ETF: &[Row] = &[
    ("QQQ", "Invesco QQQ", "Tech Growth", 40),
    ("ARKK", "ARK Innovation", "Disruptive", 20),
    ("SOXX", "Semiconductor ETF", "Tech", 20),
    ("IBIT", "Bitcoin ETF", "Crypto", 20),
];
const AGGRESSIVE_GLOBAL_STOCKS: &[Row] = &[
    ("NVDA", "NVIDIA", "Semi", 30),
    ("TSLA", "Tesla", "Auto/Tech", 25),
    ("AMD", "AMD", "Semi", 25),
    ("PLTR", "Palantir", "Software", 20),
];

fn tables(investor_type: InvestorType, currency: &str) -> (&'static [Row], &'static [Row]) {
    let indian = currency == RUPEE;
    match (investor_type, indian) {
        (InvestorType::Conservative, true) => (CONSERVATIVE_INR_ETF, CONSERVATIVE_INR_STOCKS),
        (InvestorType::Conservative, false) => {
            (CONSERVATIVE_GLOBAL_ETF, CONSERVATIVE_GLOBAL_STOCKS)
        }
        (InvestorType::Moderate, true) => (MODERATE_INR_ETF, MODERATE_INR_STOCKS),
        (InvestorType::Moderate, false) => (MODERATE_GLOBAL_ETF, MODERATE_GLOBAL_STOCKS),
        (InvestorType::Aggressive, true) => (AGGRESSIVE_INR_ETF, AGGRESSIVE_INR_STOCKS),
        (InvestorType::Aggressive, false) => (AGGRESSIVE_GLOBAL_ETF, AGGRESSIVE_GLOBAL_STOCKS),
    }
}

fn templates(rows: &[Row]) -> Vec<SuggestionTemplate> {
    rows.iter()
        .map(|&(symbol, name, sector, percent)| SuggestionTemplate {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
            allocation_percent: f64::from(percent),
        })
        .collect()
}

/// The built-in ETF and stock lists for an investor type, without amounts.
/// Rupee-denominated plans get NSE tickers, everything else US tickers.
pub fn static_suggestion_lists(
    investor_type: InvestorType,
    currency: &str,
) -> (Vec<SuggestionTemplate>, Vec<SuggestionTemplate>) {
    let (etf, stocks) = tables(investor_type, currency);
    (templates(etf), templates(stocks))
}

/// Attaches the monthly amount each pick receives out of the equity budget.
pub fn with_amounts(
    picks: &[SuggestionTemplate],
    monthly_equity_investment: f64,
) -> Vec<StockRecommendation> {
    picks
        .iter()
        .map(|pick| StockRecommendation {
            symbol: pick.symbol.clone(),
            name: pick.name.clone(),
            sector: pick.sector.clone(),
            allocation_percent: pick.allocation_percent,
            amount: round_half_up(monthly_equity_investment * (pick.allocation_percent / 100.0)),
        })
        .collect()
}

pub fn equity_suggestions(
    investor_type: InvestorType,
    monthly_equity_investment: f64,
    currency: &str,
) -> EquityBreakdown {
    let (etf, stocks) = static_suggestion_lists(investor_type, currency);
    EquityBreakdown {
        etf: with_amounts(&etf, monthly_equity_investment),
        stocks: with_amounts(&stocks, monthly_equity_investment),
    }
}
