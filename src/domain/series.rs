//! Per-company series types: daily prices, target-price scenarios,
//! financial ratios and news.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ratio between the current price and the base (fair) price.
pub const CURRENT_PRICE_DISCOUNT: f64 = 0.85;

/// Severity levels of the target-price sensitivity table, mildest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScenarioSeverity {
    Continues,
    Minus10,
    Minus20,
    Minus30,
}

impl ScenarioSeverity {
    pub const ALL: [ScenarioSeverity; 4] = [
        ScenarioSeverity::Continues,
        ScenarioSeverity::Minus10,
        ScenarioSeverity::Minus20,
        ScenarioSeverity::Minus30,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioSeverity::Continues => "지속시",
            ScenarioSeverity::Minus10 => "10% 감소시",
            ScenarioSeverity::Minus20 => "20% 감소시",
            ScenarioSeverity::Minus30 => "30% 감소시",
        }
    }

    /// Multiplier applied to the base price for the annual-basis column.
    pub fn annual_multiplier(&self) -> f64 {
        match self {
            ScenarioSeverity::Continues => 1.0,
            ScenarioSeverity::Minus10 => 0.9,
            ScenarioSeverity::Minus20 => 0.8,
            ScenarioSeverity::Minus30 => 0.7,
        }
    }

    /// Multiplier applied to the base price for the quarterly-basis column.
    pub fn quarterly_multiplier(&self) -> f64 {
        match self {
            ScenarioSeverity::Continues => 0.95,
            ScenarioSeverity::Minus10 => 0.85,
            ScenarioSeverity::Minus20 => 0.75,
            ScenarioSeverity::Minus30 => 0.65,
        }
    }
}

impl fmt::Display for ScenarioSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRow {
    pub severity: ScenarioSeverity,
    pub annual_value: f64,
    pub quarterly_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetPriceTable {
    pub base_price: f64,
    pub current_price: f64,
    pub rows: [ScenarioRow; 4],
}

impl TargetPriceTable {
    /// Scenario values are rounded to whole won; the current price is not.
    pub fn from_base_price(base_price: f64) -> Self {
        let rows = ScenarioSeverity::ALL.map(|severity| ScenarioRow {
            severity,
            annual_value: (base_price * severity.annual_multiplier()).round(),
            quarterly_value: (base_price * severity.quarterly_multiplier()).round(),
        });
        Self {
            base_price,
            current_price: base_price * CURRENT_PRICE_DISCOUNT,
            rows,
        }
    }

    pub fn annual_values(&self) -> [f64; 4] {
        self.rows.each_ref().map(|r| r.annual_value)
    }

    pub fn quarterly_values(&self) -> [f64; 4] {
        self.rows.each_ref().map(|r| r.quarterly_value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MetricKey {
    Eps,
    Roe,
    Roa,
    Bps,
    EvEbitda,
    Per,
    Pbr,
    DebtRatio,
}

impl MetricKey {
    /// Display order of the comparison sub-charts.
    pub const ALL: [MetricKey; 8] = [
        MetricKey::Eps,
        MetricKey::Roe,
        MetricKey::Roa,
        MetricKey::Bps,
        MetricKey::EvEbitda,
        MetricKey::Per,
        MetricKey::Pbr,
        MetricKey::DebtRatio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Eps => "EPS",
            MetricKey::Roe => "ROE",
            MetricKey::Roa => "ROA",
            MetricKey::Bps => "BPS",
            MetricKey::EvEbitda => "EV/EBITDA",
            MetricKey::Per => "PER",
            MetricKey::Pbr => "PBR",
            MetricKey::DebtRatio => "부채비율",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricKey {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_uppercase();
        match upper.as_str() {
            "EPS" => Ok(MetricKey::Eps),
            "ROE" => Ok(MetricKey::Roe),
            "ROA" => Ok(MetricKey::Roa),
            "BPS" => Ok(MetricKey::Bps),
            "EV/EBITDA" | "EV_EBITDA" => Ok(MetricKey::EvEbitda),
            "PER" => Ok(MetricKey::Per),
            "PBR" => Ok(MetricKey::Pbr),
            "DEBT_RATIO" | "부채비율" => Ok(MetricKey::DebtRatio),
            _ => Err(UnknownMetric(trimmed.to_string())),
        }
    }
}

/// Financial ratios for one company. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricRecord {
    values: HashMap<MetricKey, f64>,
}

impl MetricRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: MetricKey, value: f64) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn set(&mut self, key: MetricKey, value: f64) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: MetricKey) -> f64 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    /// Builds a record from the eight values in [`MetricKey::ALL`] order.
    pub fn from_values(values: [f64; 8]) -> Self {
        Self {
            values: MetricKey::ALL.into_iter().zip(values).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub relative_time_label: String,
    pub source: String,
    pub category: String,
    pub company_id: String,
}

/// A news item after merging, carrying its source company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedNewsItem {
    #[serde(flatten)]
    pub item: NewsItem,
    pub company_name: String,
    pub category_color: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn target_table_from_samsung_base() {
        let table = TargetPriceTable::from_base_price(75_000.0);
        assert_relative_eq!(table.current_price, 63_750.0);
        assert_eq!(table.annual_values(), [75_000.0, 67_500.0, 60_000.0, 52_500.0]);
        assert_eq!(table.quarterly_values(), [71_250.0, 63_750.0, 56_250.0, 48_750.0]);
    }

    #[test]
    fn target_table_rows_in_severity_order() {
        let table = TargetPriceTable::from_base_price(100_000.0);
        let severities: Vec<_> = table.rows.iter().map(|r| r.severity).collect();
        assert_eq!(severities, ScenarioSeverity::ALL.to_vec());
    }

    #[test]
    fn scenario_values_are_rounded() {
        let table = TargetPriceTable::from_base_price(24_001.0);
        // 24001 * 0.9 = 21600.9
        assert_eq!(table.rows[1].annual_value, 21_601.0);
    }

    #[test]
    fn metric_record_missing_key_is_zero() {
        let rec = MetricRecord::new().with(MetricKey::Eps, 5420.0);
        assert_eq!(rec.get(MetricKey::Eps), 5420.0);
        assert_eq!(rec.get(MetricKey::DebtRatio), 0.0);
    }

    #[test]
    fn metric_record_from_values_follows_display_order() {
        let rec = MetricRecord::from_values([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(rec.get(MetricKey::Bps), 4.0);
        assert_eq!(rec.get(MetricKey::DebtRatio), 8.0);
    }

    #[test]
    fn metric_key_parses_labels() {
        assert_eq!("ev/ebitda".parse::<MetricKey>().unwrap(), MetricKey::EvEbitda);
        assert_eq!("부채비율".parse::<MetricKey>().unwrap(), MetricKey::DebtRatio);
        assert!("PSR".parse::<MetricKey>().is_err());
    }
}
