use thiserror::Error;

/// 服務未提供 detail 或回應無法解析時顯示的訊息
pub const GENERIC_FAILURE_MESSAGE: &str = "Calculation failed";

#[derive(Error, Debug)]
pub enum DiamondError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pricing service returned {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    ServiceError { status: u16, detail: Option<String> },

    #[error("Malformed response from pricing service: {message}")]
    MalformedResponse { message: String },

    #[error("Group index {index} out of range (groups: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiamondError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DiamondError::ApiError(_) => ErrorCategory::Network,
            DiamondError::ServiceError { .. } | DiamondError::MalformedResponse { .. } => {
                ErrorCategory::Service
            }
            DiamondError::IndexOutOfRange { .. } | DiamondError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            DiamondError::InvalidConfigValueError { .. }
            | DiamondError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DiamondError::IoError(_) | DiamondError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Service | ErrorCategory::Input | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 提供給使用者的單行訊息；服務端錯誤直接回傳 detail
    pub fn user_friendly_message(&self) -> String {
        match self {
            DiamondError::ServiceError { detail, .. } => detail
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            DiamondError::MalformedResponse { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            DiamondError::ApiError(e) if e.is_timeout() => {
                format!("{}: the pricing service timed out", GENERIC_FAILURE_MESSAGE)
            }
            DiamondError::ApiError(_) => {
                format!("{}: could not reach the pricing service", GENERIC_FAILURE_MESSAGE)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        self.category().recovery_suggestion()
    }
}

impl ErrorCategory {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ErrorCategory::Network => {
                "Check that the pricing service is running and the base URL is correct"
            }
            ErrorCategory::Service => "Review the group values and submit again",
            ErrorCategory::Input => "Correct the group specification and try again",
            ErrorCategory::Configuration => "Fix the configuration file or command-line options",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, DiamondError>;
