//! Symbol-keyed rows served over the legacy `/stocks` and
//! `/api/financial-info` endpoints.
//!
//! Field names serialize in the capitalised form those endpoints return.

use chrono::NaiveDate;
use serde::Serialize;

/// One trading day. The moving averages and RSI are trailing values over
/// the symbol's rows up to and including this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: i64,
    #[serde(rename = "거래액")]
    pub trading_value: f64,
    #[serde(rename = "MA_5")]
    pub ma_5: Option<f64>,
    #[serde(rename = "MA_20")]
    pub ma_20: Option<f64>,
    #[serde(rename = "MA_60")]
    pub ma_60: Option<f64>,
    #[serde(rename = "RSI_14")]
    pub rsi_14: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialInfoRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "EPS")]
    pub eps: Option<f64>,
    #[serde(rename = "PER")]
    pub per: Option<f64>,
    #[serde(rename = "BPS")]
    pub bps: Option<f64>,
    #[serde(rename = "PBR")]
    pub pbr: Option<f64>,
    #[serde(rename = "ROE")]
    pub roe: Option<f64>,
    #[serde(rename = "ROA")]
    pub roa: Option<f64>,
    #[serde(rename = "EBITDA")]
    pub ebitda: Option<f64>,
    #[serde(rename = "EV")]
    pub ev: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_row_serializes_legacy_field_names() {
        let row = PriceRow {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            symbol: "AAPL".into(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 100,
            trading_value: 150.0,
            ma_5: Some(1.5),
            ..PriceRow::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Date"], "2024-03-04");
        assert_eq!(json["Close"], 1.5);
        assert_eq!(json["Volume"], 100);
        assert_eq!(json["거래액"], 150.0);
        assert_eq!(json["MA_5"], 1.5);
        assert!(json["RSI_14"].is_null());
    }

    #[test]
    fn financial_info_missing_values_serialize_as_null() {
        let row = FinancialInfoRow {
            date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            symbol: "AAPL".into(),
            name: "Apple".into(),
            eps: Some(6.1),
            per: None,
            bps: None,
            pbr: None,
            roe: None,
            roa: None,
            ebitda: None,
            ev: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["EPS"], 6.1);
        assert!(json["PER"].is_null());
    }
}
