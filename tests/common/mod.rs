#![allow(dead_code)]

use chrono::NaiveDate;
use stockboard::adapters::fixed_series_provider::FixedSeriesProvider;
use stockboard::domain::error::DashboardError;
use stockboard::domain::market_data::{FinancialInfoRow, PriceRow};
use stockboard::domain::series::{MetricKey, MetricRecord, NewsItem, SeriesPoint};
use stockboard::ports::market_data_port::MarketDataPort;
use std::collections::HashMap;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// `count` consecutive daily points starting at `start`, rising by `step`.
pub fn generate_points(start: &str, count: usize, base: f64, step: f64) -> Vec<SeriesPoint> {
    let start = date(start);
    (0..count)
        .map(|i| SeriesPoint::new(start + chrono::Days::new(i as u64), base + step * i as f64))
        .collect()
}

pub fn news(title: &str, label: &str, category: &str) -> NewsItem {
    NewsItem {
        title: title.to_string(),
        summary: format!("{title} summary"),
        relative_time_label: label.to_string(),
        source: "테스트경제".to_string(),
        category: category.to_string(),
        company_id: String::new(),
    }
}

/// Fixed tables for samsung, kia and naver with known values.
pub fn fixture_provider() -> FixedSeriesProvider {
    FixedSeriesProvider::new(100_000.0)
        .with_prices("samsung", generate_points("2024-05-01", 5, 70_000.0, 100.0))
        .with_prices("kia", generate_points("2024-05-03", 5, 95_000.0, -50.0))
        .with_prices("naver", generate_points("2024-05-01", 3, 180_000.0, 0.0))
        .with_base_price("samsung", 75_000.0)
        .with_base_price("kia", 110_000.0)
        .with_metrics(
            "samsung",
            MetricRecord::new()
                .with(MetricKey::Eps, 5_420.0)
                .with(MetricKey::Bps, 55_280.0)
                .with(MetricKey::Per, 13.2),
        )
        .with_metrics(
            "kia",
            MetricRecord::new()
                .with(MetricKey::Eps, 12_400.0)
                .with(MetricKey::Bps, 98_000.0)
                .with(MetricKey::Per, 4.5),
        )
        .with_news(
            "samsung",
            vec![
                news("HBM 공급 확대", "3시간 전", "실적"),
                news("파운드리 투자", "1일 전", "투자"),
            ],
        )
        .with_news("kia", vec![news("EV9 판매 호조", "2시간 전", "판매")])
        .with_news("naver", vec![news("AI 검색 출시", "5시간 전", "서비스")])
}

pub struct MockMarketData {
    pub prices: HashMap<String, Vec<PriceRow>>,
    pub financial_info: HashMap<String, Vec<FinancialInfoRow>>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            financial_info: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, symbol: &str, closes: &[(&str, f64)]) -> Self {
        let rows = closes
            .iter()
            .map(|(d, close)| PriceRow {
                date: date(d),
                symbol: symbol.to_string(),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: 1_000,
                trading_value: *close * 1_000.0,
                ..PriceRow::default()
            })
            .collect();
        self.prices.insert(symbol.to_string(), rows);
        self
    }

    pub fn with_eps(mut self, symbol: &str, eps: &[(&str, Option<f64>)]) -> Self {
        let rows = eps
            .iter()
            .map(|(d, eps)| FinancialInfoRow {
                date: date(d),
                symbol: symbol.to_string(),
                name: symbol.to_string(),
                eps: *eps,
                per: None,
                bps: None,
                pbr: None,
                roe: None,
                roa: None,
                ebitda: None,
                ev: None,
            })
            .collect();
        self.financial_info.insert(symbol.to_string(), rows);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    fn check(&self, symbol: &str) -> Result<(), DashboardError> {
        match self.errors.get(symbol) {
            Some(reason) => Err(DashboardError::DataSource {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl MarketDataPort for MockMarketData {
    fn financial_info(&self, symbol: &str) -> Result<Vec<FinancialInfoRow>, DashboardError> {
        self.check(symbol)?;
        Ok(self.financial_info.get(symbol).cloned().unwrap_or_default())
    }

    fn stock_prices(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceRow>, DashboardError> {
        self.check(symbol)?;
        Ok(self
            .prices
            .get(symbol)
            .map(|rows| {
                rows.iter()
                    .filter(|r| start_date.is_none_or(|s| r.date >= s))
                    .filter(|r| end_date.is_none_or(|e| r.date <= e))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
