use crate::core::contracts::DEFAULT_MAX_KEYWORDS;
use crate::utils::error::{OracleError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const V2_ENV_FLAG: &str = "SAJU_INTERPRET_V2_ENABLED";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub interpret: InterpretConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "saju-oracle".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretConfig {
    /// 開啟後 system prompt 會帶入 grounding 區塊
    #[serde(default)]
    pub v2_enabled: bool,
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

impl Default for InterpretConfig {
    fn default() -> Self {
        Self {
            v2_enabled: false,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl OracleConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OracleError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OracleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SAJU_LOG_LEVEL})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OracleError::ConfigError {
            message: format!("invalid env pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 環境變數旗標優先於檔案設定
    pub fn apply_env_overrides(&mut self) {
        if let Ok(flag) = std::env::var(V2_ENV_FLAG) {
            self.interpret.v2_enabled = parse_flag(&flag);
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("app.name", &self.app.name)?;
        validate_positive_number("interpret.max_keywords", self.interpret.max_keywords, 1)?;
        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;
        Ok(())
    }
}

impl Validate for OracleConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// "1" / "true" / "yes" / "on"（不分大小寫）視為開啟
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
