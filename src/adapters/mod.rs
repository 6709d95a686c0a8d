//! Concrete adapter implementations for ports.

pub mod csv_market_data;
pub mod file_config_adapter;
pub mod fixed_series_provider;
pub mod mock_series_provider;
#[cfg(feature = "web")]
pub mod web;
