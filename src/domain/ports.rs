use crate::utils::error::Result;
use async_trait::async_trait;

/// 依干支紀年回傳天干 (0-9) 與地支 (0-11) 索引
pub trait CalendarIndexProvider: Send + Sync {
    fn year_gan_index(&self, year: i32) -> u32;
    fn year_zhi_index(&self, year: i32) -> u32;
}

/// 付款與推薦額度的讀寫介面；兩個讀取互不相依
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn latest_payment_at(&self, user_id: &str) -> Result<Option<String>>;

    /// 原始儲存值，型別不保證（可能是數字、字串或 null）
    async fn free_premium_remaining(&self, user_id: &str) -> Result<serde_json::Value>;

    /// 原子地扣除一次額度並回傳剩餘數；沒有額度時回傳 None，不寫入
    async fn consume_free_premium(&self, user_id: &str) -> Result<Option<u32>>;
}

/// 生成式文字服務；回傳 None 表示空回應
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Option<String>>;
}
