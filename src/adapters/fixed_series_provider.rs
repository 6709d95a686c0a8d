//! Series provider over explicit in-memory tables.
//!
//! Used where output must be exactly known: tests, and dashboards whose daily
//! prices come from a price file rather than the random generator.

use crate::domain::error::DashboardError;
use crate::domain::series::{MetricRecord, NewsItem, SeriesPoint, TargetPriceTable};
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::series_port::SeriesProvider;
use std::collections::HashMap;

pub struct FixedSeriesProvider {
    prices: HashMap<String, Vec<SeriesPoint>>,
    base_prices: HashMap<String, f64>,
    metrics: HashMap<String, MetricRecord>,
    news: HashMap<String, Vec<NewsItem>>,
    fallback_base_price: f64,
}

impl FixedSeriesProvider {
    pub fn new(fallback_base_price: f64) -> Self {
        Self {
            prices: HashMap::new(),
            base_prices: HashMap::new(),
            metrics: HashMap::new(),
            news: HashMap::new(),
            fallback_base_price,
        }
    }

    pub fn with_prices(mut self, id: &str, mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        self.prices.insert(id.to_string(), points);
        self
    }

    pub fn with_base_price(mut self, id: &str, base_price: f64) -> Self {
        self.base_prices.insert(id.to_string(), base_price);
        self
    }

    pub fn with_metrics(mut self, id: &str, record: MetricRecord) -> Self {
        self.metrics.insert(id.to_string(), record);
        self
    }

    pub fn with_news(mut self, id: &str, items: Vec<NewsItem>) -> Self {
        self.news.insert(id.to_string(), items);
        self
    }

    /// Copies every lookup of `source` for `ids` into fixed tables, so later
    /// reads no longer depend on it (or on its random generator).
    pub fn snapshot<'a>(
        source: &dyn SeriesProvider,
        ids: impl IntoIterator<Item = &'a str>,
        fallback_base_price: f64,
    ) -> Self {
        ids.into_iter().fold(Self::new(fallback_base_price), |p, id| {
            p.with_prices(id, source.daily_prices(id))
                .with_base_price(id, source.target_price_scenarios(id).base_price)
                .with_metrics(id, source.financial_metrics(id))
                .with_news(id, source.news(id))
        })
    }

    /// Loads closing prices for each `(company id, ticker)` pair from a
    /// market data source. Tickers with no rows or a failed lookup are
    /// skipped with a warning and fall back to no points.
    pub fn load_closing_prices(
        mut self,
        port: &dyn MarketDataPort,
        tickers: &[(String, String)],
    ) -> Result<Self, DashboardError> {
        for (id, ticker) in tickers {
            match port.stock_prices(ticker, None, None) {
                Ok(rows) if !rows.is_empty() => {
                    let points = rows
                        .iter()
                        .map(|r| SeriesPoint::new(r.date, r.close))
                        .collect();
                    self = self.with_prices(id, points);
                }
                Ok(_) => tracing::warn!(%id, %ticker, "no price rows for company"),
                Err(DashboardError::Io(e)) => return Err(DashboardError::Io(e)),
                Err(e) => tracing::warn!(%id, %ticker, error = %e, "skipping price rows"),
            }
        }
        Ok(self)
    }
}

impl SeriesProvider for FixedSeriesProvider {
    fn daily_prices(&self, id: &str) -> Vec<SeriesPoint> {
        self.prices.get(id).cloned().unwrap_or_default()
    }

    fn target_price_scenarios(&self, id: &str) -> TargetPriceTable {
        let base = self
            .base_prices
            .get(id)
            .copied()
            .unwrap_or(self.fallback_base_price);
        TargetPriceTable::from_base_price(base)
    }

    fn financial_metrics(&self, id: &str) -> MetricRecord {
        self.metrics.get(id).cloned().unwrap_or_default()
    }

    fn news(&self, id: &str) -> Vec<NewsItem> {
        self.news.get(id).cloned().unwrap_or_default()
    }
}
