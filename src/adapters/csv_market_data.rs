//! CSV-backed market data for the legacy price and financial-info endpoints.
//!
//! Price file columns: `Date,Symbol,Open,High,Low,Close,Volume`, plus an
//! optional `거래액` (trading value) that defaults to `Close * Volume`.
//! Moving averages and RSI are computed per symbol once the file is sorted.
//! Financial-info file columns: `Date,Symbol,Name,EPS,PER,BPS,PBR,ROE,ROA,EBITDA,EV`,
//! where any ratio cell may be blank. Extra columns are ignored. Both files
//! are read once at load time.

use crate::domain::error::DashboardError;
use crate::domain::indicators::attach_indicators;
use crate::domain::market_data::{FinancialInfoRow, PriceRow};
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::Path;

const TRADING_VALUE: &str = "거래액";

#[derive(Debug, Default)]
pub struct CsvMarketData {
    prices: Vec<PriceRow>,
    financial_info: Vec<FinancialInfoRow>,
}

fn source_error(reason: impl Into<String>) -> DashboardError {
    DashboardError::DataSource {
        reason: reason.into(),
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, DashboardError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| source_error(format!("missing {name} column")))
}

fn field<'r>(record: &'r StringRecord, idx: usize, name: &str) -> Result<&'r str, DashboardError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| source_error(format!("missing {name} value")))
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(value: &str) -> Result<NaiveDate, DashboardError> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| source_error(format!("invalid date {value:?}: {e}")))
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, DashboardError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| source_error(format!("invalid {name} value {value:?}: {e}")))
}

fn parse_optional(value: &str, name: &str) -> Result<Option<f64>, DashboardError> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        Ok(None)
    } else {
        parse_number(value, name).map(Some)
    }
}

impl CsvMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads whichever files are given. A missing path leaves that half empty.
    pub fn load(
        prices_csv: Option<&Path>,
        financial_info_csv: Option<&Path>,
    ) -> Result<Self, DashboardError> {
        let prices = match prices_csv {
            Some(path) => Self::read_prices(&read_file(path)?)?,
            None => Vec::new(),
        };
        let financial_info = match financial_info_csv {
            Some(path) => Self::read_financial_info(&read_file(path)?)?,
            None => Vec::new(),
        };
        tracing::info!(
            prices = prices.len(),
            financial_info = financial_info.len(),
            "loaded market data"
        );
        Ok(Self {
            prices,
            financial_info,
        })
    }

    pub fn read_prices(content: &str) -> Result<Vec<PriceRow>, DashboardError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| source_error(format!("CSV header error: {e}")))?
            .clone();
        let date_i = column_index(&headers, "Date")?;
        let symbol_i = column_index(&headers, "Symbol")?;
        let open_i = column_index(&headers, "Open")?;
        let high_i = column_index(&headers, "High")?;
        let low_i = column_index(&headers, "Low")?;
        let close_i = column_index(&headers, "Close")?;
        let volume_i = column_index(&headers, "Volume")?;
        let trading_value_i = column_index(&headers, TRADING_VALUE).ok();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| source_error(format!("CSV parse error: {e}")))?;
            let volume: f64 = parse_number(field(&record, volume_i, "Volume")?, "Volume")?;
            let close: f64 = parse_number(field(&record, close_i, "Close")?, "Close")?;
            let trading_value = match trading_value_i {
                Some(idx) => parse_optional(field(&record, idx, TRADING_VALUE)?, TRADING_VALUE)?,
                None => None,
            };
            rows.push(PriceRow {
                date: parse_date(field(&record, date_i, "Date")?)?,
                symbol: field(&record, symbol_i, "Symbol")?.to_uppercase(),
                open: parse_number(field(&record, open_i, "Open")?, "Open")?,
                high: parse_number(field(&record, high_i, "High")?, "High")?,
                low: parse_number(field(&record, low_i, "Low")?, "Low")?,
                close,
                volume: volume as i64,
                trading_value: trading_value.unwrap_or(close * volume),
                ..PriceRow::default()
            });
        }
        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol).then(a.date.cmp(&b.date)));
        attach_indicators(&mut rows);
        Ok(rows)
    }

    pub fn read_financial_info(content: &str) -> Result<Vec<FinancialInfoRow>, DashboardError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| source_error(format!("CSV header error: {e}")))?
            .clone();
        let date_i = column_index(&headers, "Date")?;
        let symbol_i = column_index(&headers, "Symbol")?;
        let name_i = column_index(&headers, "Name")?;
        let ratio_columns = ["EPS", "PER", "BPS", "PBR", "ROE", "ROA", "EBITDA", "EV"];
        let ratio_i: Vec<Option<usize>> = ratio_columns
            .iter()
            .map(|name| column_index(&headers, name).ok())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| source_error(format!("CSV parse error: {e}")))?;
            let mut ratios = [None; 8];
            for (slot, (idx, name)) in ratios.iter_mut().zip(ratio_i.iter().zip(ratio_columns)) {
                if let Some(idx) = idx {
                    *slot = parse_optional(field(&record, *idx, name)?, name)?;
                }
            }
            let [eps, per, bps, pbr, roe, roa, ebitda, ev] = ratios;
            rows.push(FinancialInfoRow {
                date: parse_date(field(&record, date_i, "Date")?)?,
                symbol: field(&record, symbol_i, "Symbol")?.to_string(),
                name: field(&record, name_i, "Name")?.to_string(),
                eps,
                per,
                bps,
                pbr,
                roe,
                roa,
                ebitda,
                ev,
            });
        }
        rows.sort_by(|a, b| a.symbol.cmp(&b.symbol).then(a.date.cmp(&b.date)));
        Ok(rows)
    }

    pub fn with_prices(mut self, rows: Vec<PriceRow>) -> Self {
        self.prices = rows;
        self
    }

    pub fn with_financial_info(mut self, rows: Vec<FinancialInfoRow>) -> Self {
        self.financial_info = rows;
        self
    }
}

fn read_file(path: &Path) -> Result<String, DashboardError> {
    fs::read_to_string(path)
        .map_err(|e| source_error(format!("failed to read {}: {}", path.display(), e)))
}

impl MarketDataPort for CsvMarketData {
    /// Symbols match exactly, as the financial-info file stores them.
    fn financial_info(&self, symbol: &str) -> Result<Vec<FinancialInfoRow>, DashboardError> {
        Ok(self
            .financial_info
            .iter()
            .filter(|r| r.symbol == symbol)
            .cloned()
            .collect())
    }

    /// Symbols match case-insensitively.
    fn stock_prices(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceRow>, DashboardError> {
        let wanted = symbol.to_uppercase();
        Ok(self
            .prices
            .iter()
            .filter(|r| r.symbol == wanted)
            .filter(|r| start_date.is_none_or(|s| r.date >= s))
            .filter(|r| end_date.is_none_or(|e| r.date <= e))
            .cloned()
            .collect())
    }
}
