use crate::core::payment::parse_payment_payload;
use crate::domain::model::PaymentVerificationPayload;
use crate::utils::error::Result;
use serde_json::Value;

/// 付款確認請求的入口檢查；解析錯誤轉成 ValidationError 交給呼叫端決定回應
pub fn verify_payment_request(body: &Value) -> Result<PaymentVerificationPayload> {
    match parse_payment_payload(body) {
        Ok(payload) => {
            tracing::info!(
                "💳 Payment payload accepted: order {} ({})",
                payload.order_id,
                payload.amount
            );
            Ok(payload)
        }
        Err(err) => {
            tracing::warn!(
                "❌ Payment payload rejected on {}: {}",
                err.field.as_str(),
                err.message
            );
            Err(err.into())
        }
    }
}
