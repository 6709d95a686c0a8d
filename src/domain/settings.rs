//! Dashboard settings, read and validated from the config file.

use crate::domain::error::DashboardError;
use crate::domain::news_time::NewsSort;
use crate::domain::selection::{parse_selection, Selection};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;

pub const DEFAULT_SELECTION: &str = "samsung,sk_hynix";
pub const DEFAULT_PRICE_WINDOW_DAYS: usize = 30;
/// Upper bound on the daily price window, about ten years.
pub const MAX_PRICE_WINDOW_DAYS: usize = 3650;
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub selection: Selection,
    pub price_window_days: usize,
    pub news_sort: NewsSort,
    pub seed: Option<u64>,
    pub as_of: Option<NaiveDate>,
    pub prices_csv: Option<PathBuf>,
    pub financial_info_csv: Option<PathBuf>,
    pub bind: String,
    pub log_level: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            selection: Selection::from_ids(DEFAULT_SELECTION.split(',')),
            price_window_days: DEFAULT_PRICE_WINDOW_DAYS,
            news_sort: NewsSort::default(),
            seed: None,
            as_of: None,
            prices_csv: None,
            financial_info_csv: None,
            bind: DEFAULT_BIND.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> DashboardError {
    DashboardError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_window(raw: &str) -> Result<usize, DashboardError> {
    let reason = format!("price_window_days must be an integer between 1 and {MAX_PRICE_WINDOW_DAYS}");
    match raw.trim().parse::<usize>() {
        Ok(days) if (1..=MAX_PRICE_WINDOW_DAYS).contains(&days) => Ok(days),
        _ => Err(invalid("dashboard", "price_window_days", reason)),
    }
}

impl DashboardSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        let selection = match config.get_string("dashboard", "selection") {
            Some(raw) => parse_selection(&raw)
                .map_err(|e| invalid("dashboard", "selection", e.to_string()))?,
            None => Selection::from_ids(DEFAULT_SELECTION.split(',')),
        };

        let window = match config.get_non_empty("dashboard", "price_window_days") {
            Some(raw) => parse_window(&raw)?,
            None => DEFAULT_PRICE_WINDOW_DAYS,
        };

        let news_sort = match config.get_non_empty("dashboard", "news_sort") {
            Some(raw) => raw
                .parse()
                .map_err(|e: crate::domain::news_time::UnknownNewsSort| {
                    invalid("dashboard", "news_sort", e.to_string())
                })?,
            None => NewsSort::default(),
        };

        let seed = match config.get_non_empty("dashboard", "seed") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| invalid("dashboard", "seed", "seed must be a non-negative integer"))?,
            ),
            None => None,
        };

        let as_of = match config.get_non_empty("dashboard", "as_of") {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                invalid("dashboard", "as_of", "invalid as_of format, expected YYYY-MM-DD")
            })?),
            None => None,
        };

        let bind = config
            .get_non_empty("server", "bind")
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        if !bind.contains(':') {
            return Err(invalid("server", "bind", "bind must be host:port"));
        }

        Ok(Self {
            selection,
            price_window_days: window,
            news_sort,
            seed,
            as_of,
            prices_csv: config.get_non_empty("data", "prices_csv").map(PathBuf::from),
            financial_info_csv: config
                .get_non_empty("data", "financial_info_csv")
                .map(PathBuf::from),
            bind,
            log_level: config
                .get_non_empty("logging", "level")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn settings(ini: &str) -> Result<DashboardSettings, DashboardError> {
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        DashboardSettings::from_config(&adapter)
    }

    #[test]
    fn empty_config_uses_defaults() {
        let s = settings("[dashboard]\n").unwrap();
        assert_eq!(s, DashboardSettings::default());
        assert_eq!(s.selection.ids(), ["samsung", "sk_hynix"]);
        assert_eq!(s.price_window_days, 30);
    }

    #[test]
    fn reads_all_keys() {
        let s = settings(
            "[dashboard]\nselection = kia,naver\nprice_window_days = 10\nnews_sort = elapsed\nseed = 7\nas_of = 2024-06-30\n\
             [data]\nprices_csv = /tmp/p.csv\n[server]\nbind = 0.0.0.0:9000\n[logging]\nlevel = debug\n",
        )
        .unwrap();
        assert_eq!(s.selection.ids(), ["kia", "naver"]);
        assert_eq!(s.price_window_days, 10);
        assert_eq!(s.news_sort, NewsSort::Elapsed);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.as_of, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(s.prices_csv, Some(PathBuf::from("/tmp/p.csv")));
        assert_eq!(s.financial_info_csv, None);
        assert_eq!(s.bind, "0.0.0.0:9000");
        assert_eq!(s.log_level, "debug");
    }

    #[test]
    fn rejects_zero_window() {
        let err = settings("[dashboard]\nprice_window_days = 0\n").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigInvalid { key, .. } if key == "price_window_days"));
    }

    #[test]
    fn rejects_non_numeric_window() {
        let err = settings("[dashboard]\nprice_window_days = abc\n").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigInvalid { key, .. } if key == "price_window_days"));
    }

    #[test]
    fn rejects_oversized_window() {
        let err = settings("[dashboard]\nprice_window_days = 100000000000\n").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigInvalid { key, .. } if key == "price_window_days"));
        let s = settings("[dashboard]\nprice_window_days = 3650\n").unwrap();
        assert_eq!(s.price_window_days, MAX_PRICE_WINDOW_DAYS);
    }

    #[test]
    fn rejects_duplicate_selection() {
        let err = settings("[dashboard]\nselection = kia,kia\n").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigInvalid { key, .. } if key == "selection"));
    }

    #[test]
    fn rejects_unknown_news_sort() {
        let err = settings("[dashboard]\nnews_sort = newest\n").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigInvalid { key, .. } if key == "news_sort"));
    }

    #[test]
    fn rejects_bad_seed_and_date() {
        assert!(settings("[dashboard]\nseed = -1\n").is_err());
        assert!(settings("[dashboard]\nas_of = 30/06/2024\n").is_err());
    }

    #[test]
    fn rejects_bind_without_port() {
        let err = settings("[server]\nbind = localhost\n").unwrap_err();
        assert!(matches!(err, DashboardError::ConfigInvalid { section, .. } if section == "server"));
    }
}
