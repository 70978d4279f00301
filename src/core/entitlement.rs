use crate::domain::model::EntitlementState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 從資料庫讀出的原始值，型別未經驗證
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementInput {
    #[serde(default)]
    pub latest_payment_at: Option<String>,
    #[serde(default)]
    pub free_premium_remaining: Value,
}

/// 額度轉成非負整數：非數字、負數、NaN 一律為 0，小數無條件捨去
pub fn coerce_credit_count(value: &Value) -> u32 {
    let number = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };

    if number.is_nan() || number <= 0.0 {
        0
    } else {
        // `as` 對超出範圍的值會飽和到 u32::MAX
        number.floor() as u32
    }
}

pub fn resolve(input: &EntitlementInput) -> EntitlementState {
    resolve_entitlement(
        input.latest_payment_at.as_deref(),
        &input.free_premium_remaining,
    )
}

pub fn resolve_entitlement(
    latest_payment_at: Option<&str>,
    free_premium_remaining: &Value,
) -> EntitlementState {
    let remaining = coerce_credit_count(free_premium_remaining);
    let latest_payment_at = latest_payment_at
        .filter(|ts| !ts.is_empty())
        .map(str::to_string);

    EntitlementState {
        is_premium: latest_payment_at.is_some() || remaining > 0,
        free_premium_remaining: remaining,
        latest_payment_at,
    }
}

/// 使用一次推薦額度；沒有額度時回傳 None
pub fn claim_free_premium(state: &EntitlementState) -> Option<EntitlementState> {
    if state.free_premium_remaining == 0 {
        return None;
    }

    let remaining = state.free_premium_remaining - 1;
    Some(EntitlementState {
        is_premium: state.latest_payment_at.is_some() || remaining > 0,
        free_premium_remaining: remaining,
        latest_payment_at: state.latest_payment_at.clone(),
    })
}
