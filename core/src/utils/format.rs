//! Display helpers shared by presentation layers.
//!
//! Nothing here computes financial metrics; values come from the stock-data
//! service and are only formatted or bucketed for display.

use serde::Serialize;

const TRILLION: f64 = 1_000_000_000_000.0;
const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;

/// `$2.16T`, `$567.00B`, `$950.00M`
pub fn format_market_cap(value: u64) -> String {
    let value = value as f64;
    if value >= TRILLION {
        format!("${:.2}T", value / TRILLION)
    } else if value >= BILLION {
        format!("${:.2}B", value / BILLION)
    } else {
        format!("${:.2}M", value / MILLION)
    }
}

/// Volume in millions, `95.12M`
pub fn format_volume(volume: u64) -> String {
    format!("{:.2}M", volume as f64 / MILLION)
}

/// `+1.25%` / `-0.40%`
pub fn format_signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Direction keyword found in a free-form trend description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
}

impl TrendDirection {
    pub fn classify(trend: &str) -> Self {
        let trend = trend.to_lowercase();
        if trend.contains("upward") {
            TrendDirection::Up
        } else if trend.contains("downward") {
            TrendDirection::Down
        } else {
            TrendDirection::Sideways
        }
    }
}

/// Severity keyword found in a free-form risk description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

impl RiskSeverity {
    pub fn classify(risk: &str) -> Self {
        let risk = risk.to_lowercase();
        if risk.contains("low") {
            RiskSeverity::Low
        } else if risk.contains("high") {
            RiskSeverity::High
        } else {
            RiskSeverity::Medium
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_cap_units() {
        assert_eq!(format_market_cap(2_158_000_000_000), "$2.16T");
        assert_eq!(format_market_cap(567_000_000_000), "$567.00B");
        assert_eq!(format_market_cap(950_000_000), "$950.00M");
    }

    #[test]
    fn test_volume_and_percent() {
        assert_eq!(format_volume(95_123_456), "95.12M");
        assert_eq!(format_signed_percent(1.254), "+1.25%");
        assert_eq!(format_signed_percent(0.0), "+0.00%");
        assert_eq!(format_signed_percent(-5.67), "-5.67%");
        assert_eq!(format_price(185.4), "$185.40");
    }

    #[test]
    fn test_trend_keywords() {
        assert_eq!(TrendDirection::classify("Upward"), TrendDirection::Up);
        assert_eq!(TrendDirection::classify("Strong downward momentum"), TrendDirection::Down);
        assert_eq!(TrendDirection::classify("Sideways"), TrendDirection::Sideways);
        assert_eq!(TrendDirection::classify(""), TrendDirection::Sideways);
    }

    #[test]
    fn test_risk_keywords() {
        assert_eq!(RiskSeverity::classify("Low"), RiskSeverity::Low);
        assert_eq!(RiskSeverity::classify("HIGH (volatile)"), RiskSeverity::High);
        assert_eq!(RiskSeverity::classify("Medium"), RiskSeverity::Medium);
    }
}
