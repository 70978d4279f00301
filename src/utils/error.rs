use crate::domain::model::PayloadParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Record store error: {message}")]
    StoreError { message: String },

    #[error("Generative provider error: {message}")]
    ProviderError { message: String },

    #[error("Premium entitlement required for user '{user_id}'")]
    EntitlementRequired { user_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    External,
    Access,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OracleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OracleError::ConfigError { .. }
            | OracleError::ConfigValidationError { .. }
            | OracleError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            OracleError::ValidationError { .. } | OracleError::SerializationError(_) => {
                ErrorCategory::Input
            }
            OracleError::StoreError { .. } | OracleError::ProviderError { .. } => {
                ErrorCategory::External
            }
            OracleError::EntitlementRequired { .. } => ErrorCategory::Access,
            OracleError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 生成式服務失敗已由 fallback 吸收
            OracleError::ProviderError { .. } => ErrorSeverity::Low,
            OracleError::StoreError { .. } | OracleError::EntitlementRequired { .. } => {
                ErrorSeverity::Medium
            }
            OracleError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            OracleError::IoError(_) => "檢查檔案路徑與讀寫權限".to_string(),
            OracleError::SerializationError(_) => "確認輸入檔案為合法的 JSON".to_string(),
            OracleError::ConfigError { .. }
            | OracleError::ConfigValidationError { .. }
            | OracleError::InvalidConfigValueError { .. } => {
                "檢查 TOML 配置檔的欄位與數值".to_string()
            }
            OracleError::ValidationError { field, .. } => {
                format!("修正請求中的 '{}' 欄位後重試", field)
            }
            OracleError::StoreError { .. } => "稍後重試，或確認資料庫連線".to_string(),
            OracleError::ProviderError { .. } => "稍後重試，系統會自動使用預設解讀".to_string(),
            OracleError::EntitlementRequired { .. } => {
                "完成付款或使用推薦獎勵解鎖進階內容".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OracleError::ValidationError { message, .. } => message.clone(),
            OracleError::EntitlementRequired { .. } => "Premium entitlement required".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<PayloadParseError> for OracleError {
    fn from(err: PayloadParseError) -> Self {
        OracleError::ValidationError {
            field: err.field.as_str().to_string(),
            message: err.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
