use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorreiosError {
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error("Malformed carrier response: {message}")]
    MalformedResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 錯誤分類，供 CLI 決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Transport,
    MalformedResponse,
    Config,
}

impl CorreiosError {
    pub fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::HttpError(_) | Self::TransportError { .. } => ErrorKind::Transport,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::ConfigError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorKind::Config
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidArgument => {
                "Check the postal code (8 digits) or tracking code (e.g. SS123456789BR)"
            }
            ErrorKind::NotFound => "The carrier has no data for this query yet; try again later",
            ErrorKind::Transport => "Check network connectivity and the configured endpoints",
            ErrorKind::MalformedResponse => {
                "The carrier answered with an unexpected format; run with --verbose for details"
            }
            ErrorKind::Config => "Verify the configuration file exists and is valid TOML",
        }
    }
}

pub type Result<T> = std::result::Result<T, CorreiosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            CorreiosError::invalid_argument("cep", "bad").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(CorreiosError::not_found("nothing").kind(), ErrorKind::NotFound);
        assert_eq!(
            CorreiosError::TransportError {
                message: "timeout".to_string()
            }
            .kind(),
            ErrorKind::Transport
        );
    }

    #[test]
    fn test_display_includes_field() {
        let err = CorreiosError::invalid_argument("cep_origem", "must have 8 digits");
        assert_eq!(
            err.to_string(),
            "Invalid argument `cep_origem`: must have 8 digits"
        );
    }
}
