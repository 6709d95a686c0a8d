//! Per-company series lookups.

use crate::domain::series::{MetricRecord, NewsItem, SeriesPoint, TargetPriceTable};

/// Source of the raw per-company series behind every dashboard view.
///
/// Every lookup is total: an id with no record resolves to the
/// implementation's documented fallback, never to an error.
pub trait SeriesProvider {
    /// Daily price points for the trailing window, oldest first.
    fn daily_prices(&self, id: &str) -> Vec<SeriesPoint>;

    /// Four-scenario fair price table with the current-price reference.
    fn target_price_scenarios(&self, id: &str) -> TargetPriceTable;

    /// Financial ratios. Keys with no value read as zero.
    fn financial_metrics(&self, id: &str) -> MetricRecord;

    /// News items in provider order. Unknown ids have none.
    fn news(&self, id: &str) -> Vec<NewsItem>;
}
