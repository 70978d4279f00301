use crate::domain::model::{PayloadParseError, PaymentField, PaymentVerificationPayload};
use serde_json::Value;

fn fail(field: PaymentField, message: &str) -> PayloadParseError {
    PayloadParseError {
        field,
        message: message.to_string(),
    }
}

fn trimmed_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// 數值轉換：數字原樣，字串去空白後解析（空字串為 0），布林為 0/1，其他為 NaN。
/// 陣列與物件一律拒絕，刻意比 JavaScript 的 `Number([5]) == 5` 嚴格
fn numeric_value(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) if s.trim().is_empty() => 0.0,
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// 依序檢查 paymentKey → orderId → amount，遇到第一個錯誤即回傳
pub fn parse_payment_payload(
    input: &Value,
) -> std::result::Result<PaymentVerificationPayload, PayloadParseError> {
    let payload = match input {
        Value::Object(payload) => payload,
        _ => {
            return Err(fail(
                PaymentField::PaymentKey,
                "Request body must be a JSON object",
            ))
        }
    };

    let payment_key = trimmed_string(payload.get("paymentKey"))
        .ok_or_else(|| fail(PaymentField::PaymentKey, "paymentKey is required"))?;
    let order_id = trimmed_string(payload.get("orderId"))
        .ok_or_else(|| fail(PaymentField::OrderId, "orderId is required"))?;

    let amount = numeric_value(payload.get("amount"));
    if !amount.is_finite() || amount <= 0.0 {
        return Err(fail(PaymentField::Amount, "amount must be a positive number"));
    }

    Ok(PaymentVerificationPayload {
        payment_key,
        order_id,
        amount,
    })
}
