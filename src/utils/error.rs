use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Catalog request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Catalog responded with HTTP status {status}")]
    HttpStatusError { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid input: {message}")]
    InputError { message: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Backup format error: {message}")]
    FormatError { message: String },

    #[error("Configuration error in {field}: {reason}")]
    ConfigError { field: String, reason: String },
}

impl PlannerError {
    pub fn input<M: Into<String>>(message: M) -> Self {
        PlannerError::InputError {
            message: message.into(),
        }
    }

    pub fn not_found<W: Into<String>>(what: W) -> Self {
        PlannerError::NotFound { what: what.into() }
    }

    pub fn format<M: Into<String>>(message: M) -> Self {
        PlannerError::FormatError {
            message: message.into(),
        }
    }

    /// 網路層或遠端狀態碼造成的錯誤，是否重試交給使用者決定
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlannerError::ApiError(_) | PlannerError::HttpStatusError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
