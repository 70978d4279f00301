use crate::core::entitlement::{claim_free_premium, resolve_entitlement};
use crate::domain::ports::RecordStore;
use crate::utils::error::{OracleError, Result};
use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Records {
    payments: HashMap<String, Vec<String>>,
    credits: HashMap<String, Value>,
}

/// 記憶體內的 RecordStore，供 CLI 與測試使用
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Records>>,
    unavailable: bool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次讀寫都回傳 StoreError
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// 記錄一筆完成的付款 (RFC 3339 時間字串)
    pub async fn record_payment(&self, user_id: &str, created_at: &str) {
        let mut records = self.records.write().await;
        records
            .payments
            .entry(user_id.to_string())
            .or_default()
            .push(created_at.to_string());
    }

    pub async fn set_raw_credits(&self, user_id: &str, value: Value) {
        let mut records = self.records.write().await;
        records.credits.insert(user_id.to_string(), value);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(OracleError::StoreError {
                message: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn latest_payment_at(&self, user_id: &str) -> Result<Option<String>> {
        self.check_available()?;
        let records = self.records.read().await;
        // 無法解析的時間排在最前面
        Ok(records.payments.get(user_id).and_then(|payments| {
            payments
                .iter()
                .max_by_key(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .cloned()
        }))
    }

    async fn free_premium_remaining(&self, user_id: &str) -> Result<Value> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.credits.get(user_id).cloned().unwrap_or(Value::Null))
    }

    async fn consume_free_premium(&self, user_id: &str) -> Result<Option<u32>> {
        self.check_available()?;
        // 讀取與寫回在同一個寫鎖內完成
        let mut records = self.records.write().await;
        let raw = records.credits.get(user_id).cloned().unwrap_or(Value::Null);

        match claim_free_premium(&resolve_entitlement(None, &raw)) {
            Some(next) => {
                records.credits.insert(
                    user_id.to_string(),
                    Value::from(next.free_premium_remaining),
                );
                Ok(Some(next.free_premium_remaining))
            }
            None => Ok(None),
        }
    }
}
