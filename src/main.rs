use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use saju_oracle::app::{verify_payment_request, InterpretRequest, PremiumRequest};
use saju_oracle::core::entitlement::resolve_entitlement;
use saju_oracle::core::grounding::{build_grounding, GroundingInput};
use saju_oracle::utils::error::ErrorSeverity;
use saju_oracle::utils::logger;
use saju_oracle::utils::validation::{validate_range, Validate};
use saju_oracle::{
    CannedProvider, CliConfig, Command, EntitlementService, InMemoryRecordStore, InterpretService,
    OracleConfig, OracleError, Result, SexagenaryCalendar, TojeongEngine,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const CLI_USER: &str = "cli-user";

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if cli.json_logs || config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose, &config.logging.level);
    }

    tracing::debug!("CLI args: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(cli.command, &config).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                config.app.name,
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<OracleConfig> {
    let mut config = match path {
        Some(path) => OracleConfig::from_file(path)?,
        None => OracleConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

async fn run(command: Command, config: &OracleConfig) -> Result<String> {
    match command {
        Command::Tojeong {
            birth_date,
            target_year,
        } => {
            let birth = NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d").map_err(|e| {
                OracleError::ValidationError {
                    field: "birth_date".to_string(),
                    message: format!("birth date must be YYYY-MM-DD: {}", e),
                }
            })?;
            let target_year = target_year.unwrap_or_else(|| Local::now().year());
            validate_range("target_year", target_year, 1, 9999)?;

            let engine = TojeongEngine::new(SexagenaryCalendar::new());
            let result = engine.compute(birth.year(), birth.month(), birth.day(), target_year);
            tracing::info!("🔮 Tojeong code {} for {}", result.code, target_year);
            to_json(&result)
        }
        Command::Grounding { input } => {
            let chart: GroundingInput = read_json(&input)?;
            to_json(&build_grounding(&chart))
        }
        Command::Interpret { input, response } => {
            let request: InterpretRequest = read_json(&input)?;
            let service = InterpretService::new(canned(response)?, config.interpret.clone());
            to_json(&service.interpret(&request).await)
        }
        Command::Premium {
            input,
            response,
            latest_payment_at,
            credits,
        } => {
            let request: PremiumRequest = read_json(&input)?;

            let store = InMemoryRecordStore::new();
            if let Some(ts) = latest_payment_at.as_deref() {
                store.record_payment(CLI_USER, ts).await;
            }
            store.set_raw_credits(CLI_USER, loose_value(&credits)).await;
            let entitlement = EntitlementService::new(store)
                .entitlement_for_user(CLI_USER)
                .await?;

            let service = InterpretService::new(canned(response)?, config.interpret.clone());
            to_json(&service.premium(CLI_USER, &request, &entitlement).await?)
        }
        Command::Entitlement {
            latest_payment_at,
            credits,
        } => to_json(&resolve_entitlement(
            latest_payment_at.as_deref(),
            &loose_value(&credits),
        )),
        Command::VerifyPayment { payload } => {
            let body: Value = serde_json::from_str(&payload)?;
            to_json(&verify_payment_request(&body)?)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// 沒有回應檔時模擬空回應
fn canned(response: Option<PathBuf>) -> Result<CannedProvider> {
    match response {
        Some(path) => Ok(CannedProvider::respond(std::fs::read_to_string(path)?)),
        None => Ok(CannedProvider::Empty),
    }
}

/// 可解析成 JSON 就用 JSON，否則當作字串
fn loose_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
