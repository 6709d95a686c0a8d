//! HTTP request handlers for the web adapter.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::aggregation::{
    AggregationEngine, DashboardView, Merged, UnknownView, load_price_history, merge_eps_history,
};
use crate::domain::company::{CompanyRecord, SectorFilter};
use crate::domain::error::DashboardError;
use crate::domain::market_data::FinancialInfoRow;
use crate::domain::news_time::NewsSort;
use crate::domain::selection::parse_selection;

use super::{AppState, WebError};

#[derive(Debug, Default, Deserialize)]
pub struct CompaniesQuery {
    pub search: Option<String>,
    pub sector: Option<String>,
}

pub async fn companies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompaniesQuery>,
) -> Result<Json<Vec<CompanyRecord>>, WebError> {
    let sector = match query.sector.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<SectorFilter>()
            .map_err(|e| WebError::bad_request(e.to_string()))?,
        _ => SectorFilter::All,
    };
    let search = query.search.unwrap_or_default();
    let records = state
        .directory
        .filter(&search, sector)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(records))
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated company ids. Absent means the default selection;
    /// present but blank means nothing selected.
    pub ids: Option<String>,
    pub news_sort: Option<String>,
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, WebError> {
    let view: DashboardView = view
        .parse()
        .map_err(|e: UnknownView| WebError::not_found(e.to_string()))?;
    let selection = match query.ids.as_deref() {
        Some(raw) => parse_selection(raw).map_err(DashboardError::from)?,
        None => state.default_selection.clone(),
    };
    let news_sort = match query.news_sort.as_deref() {
        Some(raw) => raw
            .parse::<NewsSort>()
            .map_err(|e| WebError::bad_request(e.to_string()))?,
        None => state.news_sort,
    };

    let engine = AggregationEngine::new(&state.directory, state.provider.as_ref())
        .with_news_sort(news_sort);
    tracing::debug!(%view, selected = selection.len(), "dashboard request");

    Ok(Json(engine.view(view, &selection)).into_response())
}

pub async fn financial_info(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<FinancialInfoRow>>, WebError> {
    let rows = state.market_data.financial_info(&symbol)?;
    if rows.is_empty() {
        tracing::info!(%symbol, "no financial info for symbol");
    }
    Ok(Json(rows))
}

#[derive(Debug, Default, Deserialize)]
pub struct SymbolsQuery {
    pub symbols: Option<String>,
}

pub async fn financial_info_merged(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SymbolsQuery>,
) -> Response {
    let symbols: Vec<String> = query
        .symbols
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    Json(merge_eps_history(state.market_data.as_ref(), &symbols)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct PriceRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Blank or unreadable bounds are treated as absent.
fn parse_bound(name: &str, value: Option<&str>) -> Option<NaiveDate> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(%name, value = %raw, "ignoring unreadable date bound");
            None
        }
    }
}

pub async fn stock_prices(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceRangeQuery>,
) -> Result<Response, WebError> {
    let start = parse_bound("start_date", query.start_date.as_deref());
    let end = parse_bound("end_date", query.end_date.as_deref());
    match load_price_history(state.market_data.as_ref(), &symbol, start, end) {
        Merged::Ready(rows) => Ok(Json(rows).into_response()),
        Merged::Empty => Err(DashboardError::NoData { symbol }.into()),
    }
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
