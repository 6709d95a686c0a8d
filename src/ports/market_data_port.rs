//! Symbol-level market data behind the legacy price and EPS charts.

use crate::domain::error::DashboardError;
use crate::domain::market_data::{FinancialInfoRow, PriceRow};
use chrono::NaiveDate;

pub trait MarketDataPort {
    /// Financial-info rows for a symbol, oldest first. Unknown symbols yield
    /// an empty list.
    fn financial_info(&self, symbol: &str) -> Result<Vec<FinancialInfoRow>, DashboardError>;

    /// Daily price rows for a symbol within the inclusive date bounds.
    fn stock_prices(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceRow>, DashboardError>;
}
