use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseSortKeyError;

/// Ranking criterion for the top-N list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Growth,
    Volume,
    MarketCap,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Growth, SortKey::Volume, SortKey::MarketCap];

    /// Wire value sent as `sort_by`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Growth => "growth",
            SortKey::Volume => "volume",
            SortKey::MarketCap => "market_cap",
        }
    }

    /// Heading used when presenting a list ranked by this key
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Growth => "6-Month Growth",
            SortKey::Volume => "Highest Volume",
            SortKey::MarketCap => "Market Cap",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "growth" => Ok(SortKey::Growth),
            "volume" => Ok(SortKey::Volume),
            "market_cap" | "market-cap" | "marketcap" => Ok(SortKey::MarketCap),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

/// One ranked entry of the top-N list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub ticker: String,
    pub company_name: String,
    pub current_price: f64,
    /// Daily change in percent
    pub daily_change: f64,
    /// 6-month growth in percent
    pub growth_6m: f64,
    pub volume: u64,
    pub market_cap: u64,
}

/// Envelope returned by the top-N endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopStocks {
    pub stocks: Vec<StockSummary>,
    #[serde(default)]
    pub sorted_by: Option<String>,
}

/// One daily closing price sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Company name plus the chronological closing price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHistory {
    pub ticker: String,
    pub company_name: String,
    #[serde(rename = "historical_data")]
    pub points: Vec<HistoryPoint>,
}

/// Judgment produced by the collaborator for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Free-form text, e.g. "Upward"
    pub trend: String,
    /// Free-form text, e.g. "Medium"
    pub risk_level: String,
    pub price_change_6m: f64,
    pub suggested_action: String,
    pub reasoning: String,
    /// Volatility index in percent
    pub volatility: f64,
}

/// Full analysis response: the result plus its disclaimer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub ticker: String,
    pub analysis: AnalysisResult,
    pub disclaimer: String,
}

/// Trim and upper-case a user supplied ticker. Returns `None` when nothing is left.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        None
    } else {
        Some(ticker.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_wire_names() {
        assert_eq!(serde_json::to_string(&SortKey::MarketCap).unwrap(), "\"market_cap\"");
        assert_eq!(SortKey::Volume.as_str(), "volume");
        assert_eq!(SortKey::default(), SortKey::Growth);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("market_cap".parse::<SortKey>().unwrap(), SortKey::MarketCap);
        assert_eq!(" Volume ".parse::<SortKey>().unwrap(), SortKey::Volume);
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_history_ignores_ohlc_fields() {
        let body = r#"{
            "ticker": "AAPL",
            "company_name": "Apple Inc.",
            "historical_data": [
                {"date": "2025-01-02", "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 10},
                {"date": "2025-01-03", "open": 1.5, "high": 2.5, "low": 1.0, "close": 2.25, "volume": 12}
            ]
        }"#;
        let history: StockHistory = serde_json::from_str(body).unwrap();
        assert_eq!(history.points.len(), 2);
        assert_eq!(history.points[1].close, 2.25);
        assert_eq!(history.points[0].date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker(" aapl "), Some("AAPL".to_string()));
        assert_eq!(normalize_ticker("   "), None);
    }
}
