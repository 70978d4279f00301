use crate::core::entitlement::resolve_entitlement;
use crate::core::{EntitlementState, RecordStore, Result};

pub struct EntitlementService<R: RecordStore> {
    store: R,
}

impl<R: RecordStore> EntitlementService<R> {
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// 兩個讀取同時發出；任一失敗即回傳 StoreError
    pub async fn entitlement_for_user(&self, user_id: &str) -> Result<EntitlementState> {
        if user_id.trim().is_empty() {
            tracing::debug!("No user id, returning non-premium entitlement");
            return Ok(EntitlementState::default());
        }

        let (payment, credits) = tokio::join!(
            self.store.latest_payment_at(user_id),
            self.store.free_premium_remaining(user_id)
        );
        let state = resolve_entitlement(payment?.as_deref(), &credits?);

        tracing::debug!(
            "Entitlement for {}: premium={}, credits={}, paid={}",
            user_id,
            state.is_premium,
            state.free_premium_remaining,
            state.latest_payment_at.is_some()
        );
        Ok(state)
    }

    /// 使用一次推薦額度；沒有額度時回傳 false，不寫入
    pub async fn claim_free_premium(&self, user_id: &str) -> Result<bool> {
        match self.store.consume_free_premium(user_id).await? {
            Some(remaining) => {
                tracing::info!(
                    "🎁 {} claimed a free premium credit ({} left)",
                    user_id,
                    remaining
                );
                Ok(true)
            }
            None => {
                tracing::debug!("{} has no free premium credit to claim", user_id);
                Ok(false)
            }
        }
    }
}
