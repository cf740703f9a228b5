//! Domain error types.

/// Precondition violations raised by the stock model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("unknown stock symbol: {symbol}")]
    NotFound { symbol: String },
}

impl StockError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StockError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Top-level error type for stockex.
#[derive(Debug, thiserror::Error)]
pub enum StockexError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("stock table error in {source_name}: {reason}")]
    StockData { source_name: String, reason: String },

    #[error(transparent)]
    Stock(#[from] StockError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockexError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            StockexError::Io(_) => 1,
            StockexError::ConfigParse { .. } | StockexError::ConfigInvalid { .. } => 2,
            StockexError::StockData { .. } => 3,
            StockexError::Stock(_) => 4,
        }
    }
}

impl From<&StockexError> for std::process::ExitCode {
    fn from(err: &StockexError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
