//! JSON web API over the aggregation engine and the legacy market data
//! endpoints.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::csv_market_data::CsvMarketData;
use crate::domain::directory::CompanyDirectory;
use crate::domain::error::DashboardError;
use crate::domain::news_time::NewsSort;
use crate::domain::selection::Selection;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::series_port::SeriesProvider;

pub struct AppState {
    pub directory: Arc<CompanyDirectory>,
    pub provider: Arc<dyn SeriesProvider + Send + Sync>,
    pub market_data: Arc<dyn MarketDataPort + Send + Sync>,
    /// Used when a dashboard request carries no `ids` parameter.
    pub default_selection: Selection,
    pub news_sort: NewsSort,
}

impl AppState {
    pub fn new(
        directory: CompanyDirectory,
        provider: Arc<dyn SeriesProvider + Send + Sync>,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            provider,
            market_data: Arc::new(CsvMarketData::new()),
            default_selection: Selection::new(),
            news_sort: NewsSort::default(),
        }
    }

    pub fn with_market_data(mut self, market_data: Arc<dyn MarketDataPort + Send + Sync>) -> Self {
        self.market_data = market_data;
        self
    }

    pub fn with_default_selection(mut self, selection: Selection) -> Self {
        self.default_selection = selection;
        self
    }

    pub fn with_news_sort(mut self, sort: NewsSort) -> Self {
        self.news_sort = sort;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/companies", get(handlers::companies))
        .route("/api/dashboard/{view}", get(handlers::dashboard))
        .route("/api/financial-info", get(handlers::financial_info_merged))
        .route("/api/financial-info/{symbol}", get(handlers::financial_info))
        .route("/stocks/{symbol}", get(handlers::stock_prices))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

/// Binds `bind` and serves until the process is stopped.
pub async fn serve(state: AppState, bind: &str) -> Result<(), DashboardError> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
