use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlotaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Reference lookup failed: {message}")]
    ReferenceError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FlotaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FlotaError::ConfigError { .. }
            | FlotaError::ConfigValidationError { .. }
            | FlotaError::InvalidConfigValueError { .. }
            | FlotaError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FlotaError::SerializationError(_) => ErrorCategory::Input,
            FlotaError::IoError(_) | FlotaError::CsvError(_) | FlotaError::ReferenceError { .. } => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FlotaError::SerializationError(_) | FlotaError::CsvError(_) => ErrorSeverity::Medium,
            FlotaError::ConfigError { .. }
            | FlotaError::ConfigValidationError { .. }
            | FlotaError::InvalidConfigValueError { .. }
            | FlotaError::MissingConfigError { .. } => ErrorSeverity::High,
            FlotaError::IoError(_) | FlotaError::ReferenceError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FlotaError::IoError(e) => format!("Could not read or write a file: {}", e),
            FlotaError::CsvError(e) => format!("The reference file is not valid CSV: {}", e),
            FlotaError::SerializationError(e) => format!("The payload is not valid JSON: {}", e),
            FlotaError::ConfigError { message } => format!("Invalid configuration: {}", message),
            FlotaError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            FlotaError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            FlotaError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            FlotaError::ReferenceError { message } => {
                format!("Could not check referenced records: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the TOML file and command-line flags",
            ErrorCategory::Input => "Check that the input file contains the expected JSON body",
            ErrorCategory::Storage => {
                "Check that the reference CSV exists and has a 'table,id' header"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FlotaError>;
