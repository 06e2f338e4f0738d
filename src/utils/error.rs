use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("type mismatch in {operation}: expected {expected}, got {actual}")]
    TypeMismatch {
        operation: String,
        expected: String,
        actual: String,
    },

    #[error("unknown demo: {name}")]
    UnknownDemo { name: String },

    #[error("fetch failed: {reason}")]
    FetchFailed { reason: String },

    #[error("missing required config field: {field}")]
    MissingConfig { field: String },

    #[error("invalid config value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("scenario file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Type,
    Config,
    System,
}

impl SandboxError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ElementNotFound { .. } => ErrorCategory::Lookup,
            Self::TypeMismatch { .. } | Self::FetchFailed { .. } => ErrorCategory::Type,
            Self::UnknownDemo { .. }
            | Self::MissingConfig { .. }
            | Self::InvalidConfigValue { .. }
            | Self::TomlError(_) => ErrorCategory::Config,
            Self::SerializationError(_) | Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Type => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ElementNotFound { selector } => format!(
                "No element matches '{}'. The seeded page only contains the tutorial layout.",
                selector
            ),
            Self::UnknownDemo { name } => format!(
                "'{}' is not a known demo. Run with --list to see available demos.",
                name
            ),
            Self::TomlError(e) => format!("The scenario file could not be parsed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SandboxError>;
