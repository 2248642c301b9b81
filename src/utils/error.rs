use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Corpus error: {message}")]
    CorpusError { message: String },
}

impl SearchError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            SearchError::IoError(e) => format!("Could not read the question corpus: {}", e),
            SearchError::ConfigError { message } => format!("Invalid configuration: {}", message),
            SearchError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SearchError::ValidationError { message, .. } => message.clone(),
            SearchError::CorpusError { message } => format!("Corpus problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SearchError::IoError(_) | SearchError::CorpusError { .. } => {
                "Check that the corpus root exists and contains year directories (e.g. public/2023/questions)"
            }
            SearchError::ConfigError { .. } | SearchError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            SearchError::ValidationError { .. } => "Fix the request parameters and try again",
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SearchError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
