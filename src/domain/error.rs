//! Domain error types.

/// Rejection reasons when reading a comma-separated company id list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("empty token in company list")]
    EmptyToken,

    #[error("duplicate company id: {0}")]
    DuplicateId(String),
}

/// Top-level error type for stockboard.
///
/// Series lookups never produce one of these; they fall back to defaults.
/// Errors only come from configuration, selection input and the
/// file-backed market data sources.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    InvalidSelection(#[from] SelectionError),

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) => 1,
            DashboardError::ConfigParse { .. }
            | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::DataSource { .. } => 3,
            DashboardError::InvalidSelection(_) => 4,
            DashboardError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
