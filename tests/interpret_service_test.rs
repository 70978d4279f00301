use anyhow::Result;
use saju_oracle::app::{InterpretRequest, PremiumRequest};
use saju_oracle::config::InterpretConfig;
use saju_oracle::core::entitlement::resolve_entitlement;
use saju_oracle::domain::model::ContractMode;
use saju_oracle::utils::error::OracleError;
use saju_oracle::{CannedProvider, InterpretService};
use serde_json::json;

fn request() -> InterpretRequest {
    serde_json::from_value(json!({
        "birthDate": "1991-08-14 07:30",
        "gender": "female",
        "dayMaster": { "hanja": "庚", "name": "Metal" },
        "fiveElements": { "scores": { "wood": 2, "fire": 1, "earth": 3, "metal": 6, "water": 2 } },
        "daewoon": { "cycles": [ { "startAge": 3, "endAge": 12, "ganZhi": "丁未", "tenGod": "Officer" } ] }
    }))
    .unwrap()
}

fn premium_request() -> PremiumRequest {
    serde_json::from_value(json!({
        "summary": "Career transition year.",
        "keywords": ["career", "move", "savings", "health"],
        "dayMaster": "庚"
    }))
    .unwrap()
}

fn service(provider: CannedProvider) -> InterpretService<CannedProvider> {
    InterpretService::new(
        provider,
        InterpretConfig {
            v2_enabled: true,
            ..Default::default()
        },
    )
}

/// 測試服務回傳完整 JSON 時為 strict
#[tokio::test]
async fn test_valid_provider_response_is_strict() {
    let body = json!({
        "headline": "Sharpen and commit",
        "threeLineSummary": ["One", "Two", "Three"],
        "personality": "Precise.",
        "career": "Own a domain.",
        "relationship": "Be direct.",
        "health": "Stretch daily.",
        "yearFortune2026": "Solid gains.",
        "luckyItems": { "color": "White", "number": 4, "direction": "West" },
        "advice": "Plan quarterly."
    });

    let result = service(CannedProvider::respond(body.to_string()))
        .interpret(&request())
        .await;

    assert_eq!(result.mode, ContractMode::Strict);
    assert_eq!(result.value.headline, "Sharpen and commit");
    assert_eq!(
        result.value.daewoon_analysis.as_deref(),
        Some("Cycle focus -> 3-12:丁未/Officer")
    );
}

/// 測試服務沒有回應時使用 grounding 產生的 fallback
#[tokio::test]
async fn test_empty_provider_response_falls_back() {
    let result = service(CannedProvider::Empty).interpret(&request()).await;

    assert_eq!(result.mode, ContractMode::Fallback);
    assert_eq!(result.issues, vec!["empty_response"]);
    assert!(result.value.headline.starts_with("庚 Metal"));
    assert_eq!(result.value.three_line_summary[0], "Strength flows from metal.");
    assert_eq!(
        result.value.three_line_summary[1],
        "Stability improves when fire is supplemented."
    );
}

/// 測試服務失敗不會往外拋錯
#[tokio::test]
async fn test_provider_failure_is_absorbed() {
    let result = service(CannedProvider::Fail("upstream timeout".to_string()))
        .interpret(&request())
        .await;

    assert_eq!(result.mode, ContractMode::Fallback);
    assert_eq!(result.value.lucky_items.color, "Blue");
}

/// 測試非 JSON 文字回應
#[tokio::test]
async fn test_prose_response_is_invalid_json() {
    let result = service(CannedProvider::respond("Here is your reading: ..."))
        .interpret(&request())
        .await;

    assert_eq!(result.mode, ContractMode::Fallback);
    assert_eq!(result.issues, vec!["invalid_json"]);
}

/// 測試非會員請求進階解讀被拒絕
#[tokio::test]
async fn test_premium_requires_entitlement() {
    let entitlement = resolve_entitlement(None, &json!(0));
    let result = service(CannedProvider::Empty)
        .premium("user-9", &premium_request(), &entitlement)
        .await;

    match result {
        Err(OracleError::EntitlementRequired { user_id }) => assert_eq!(user_id, "user-9"),
        other => panic!("expected EntitlementRequired, got {:?}", other),
    }
}

/// 測試會員的進階解讀：部分欄位由 fallback 補齊，關鍵字數量受設定限制
#[tokio::test]
async fn test_premium_partial_response_is_normalized() -> Result<()> {
    let entitlement = resolve_entitlement(Some("2026-02-01T00:00:00.000Z"), &json!(0));
    let provider = CannedProvider::respond(r#"{"yearFlow": "Move in two phases."}"#);

    let result = service(provider)
        .premium("user-1", &premium_request(), &entitlement)
        .await?;

    assert_eq!(result.mode, ContractMode::Normalized);
    assert_eq!(result.issues, vec!["relationshipDeepDive_missing"]);
    assert_eq!(result.value.year_flow, "Move in two phases.");
    assert!(result
        .value
        .relationship_deep_dive
        .ends_with("Career transition year."));
    Ok(())
}

/// 測試進階 fallback 只使用前幾個關鍵字
#[tokio::test]
async fn test_premium_fallback_uses_limited_keywords() -> Result<()> {
    let entitlement = resolve_entitlement(None, &json!(1));
    let result = service(CannedProvider::Empty)
        .premium("user-2", &premium_request(), &entitlement)
        .await?;

    assert_eq!(result.mode, ContractMode::Fallback);
    assert!(result.value.year_flow.starts_with("庚 should run 2026"));
    assert!(result.value.year_flow.contains("career, move, savings as"));
    assert!(!result.value.year_flow.contains("health"));
    Ok(())
}
