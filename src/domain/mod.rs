//! Core domain types and logic.

pub mod aggregation;
pub mod company;
pub mod directory;
pub mod error;
pub mod format;
pub mod indicators;
pub mod market_data;
pub mod news_time;
pub mod palette;
pub mod selection;
pub mod series;
pub mod settings;
pub mod summary;
