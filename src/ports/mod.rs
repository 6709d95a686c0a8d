//! Port traits: the seams between the dashboard core and its data sources.

pub mod config_port;
pub mod market_data_port;
pub mod series_port;
