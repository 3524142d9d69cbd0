//! Domain error types.

/// Top-level error type for pairtrader.
#[derive(Debug, thiserror::Error)]
pub enum PairTraderError {
    #[error("input alignment error: {reason}")]
    InputAlignment { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PairTraderError {
    pub(crate) fn alignment(reason: impl Into<String>) -> Self {
        PairTraderError::InputAlignment {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        PairTraderError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&PairTraderError> for std::process::ExitCode {
    fn from(err: &PairTraderError) -> Self {
        let code: u8 = match err {
            PairTraderError::Io(_) => 1,
            PairTraderError::ConfigParse { .. }
            | PairTraderError::ConfigMissing { .. }
            | PairTraderError::ConfigInvalid { .. } => 2,
            PairTraderError::Data { .. } => 3,
            PairTraderError::InputAlignment { .. } => 4,
            PairTraderError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
