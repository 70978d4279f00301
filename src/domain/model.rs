use serde::{Deserialize, Serialize};
use std::fmt;

/// 五行，順序固定為 wood → fire → earth → metal → water
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ORDER: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// 大小寫不拘，前後空白忽略
    pub fn parse(value: &str) -> Option<Element> {
        let value = value.trim();
        Element::ORDER
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(value))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 五行分數；缺少的元素在排序時視為 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wood: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
}

impl ElementScores {
    pub fn new(wood: f64, fire: f64, earth: f64, metal: f64, water: f64) -> Self {
        Self {
            wood: Some(wood),
            fire: Some(fire),
            earth: Some(earth),
            metal: Some(metal),
            water: Some(water),
        }
    }

    pub fn get(&self, element: Element) -> Option<f64> {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub fn is_empty(&self) -> bool {
        Element::ORDER.iter().all(|e| self.get(*e).is_none())
    }

    /// 取分數，非有限值或負值一律當作 0
    pub fn score(&self, element: Element) -> f64 {
        match self.get(element) {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaewoonCycle {
    #[serde(default)]
    pub start_age: Option<i64>,
    #[serde(default)]
    pub end_age: Option<i64>,
    #[serde(default)]
    pub gan_zhi: Option<String>,
    #[serde(default)]
    pub ten_god: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingFact {
    pub day_master: String,
    pub dominant_element: String,
    pub weak_element: String,
    pub five_element_summary: String,
    pub daewoon_summary: String,
    pub grounding_block: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TojeongMeaning {
    pub sang: String,
    pub joong: String,
    pub ha: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFortune {
    pub month: u32,
    pub month_name: String,
    pub fortune: String,
    pub rating: u8,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TojeongResult {
    pub code: String,
    pub sang: u8,
    pub joong: u8,
    pub ha: u8,
    pub meaning: TojeongMeaning,
    pub monthly: Vec<MonthlyFortune>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractMode {
    Strict,
    Normalized,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractResult<T> {
    pub mode: ContractMode,
    pub value: T,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckyItems {
    pub color: String,
    pub number: serde_json::Number,
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretResponse {
    pub headline: String,
    pub three_line_summary: Vec<String>,
    pub personality: String,
    pub career: String,
    pub relationship: String,
    pub health: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daewoon_analysis: Option<String>,
    #[serde(rename = "yearFortune2026")]
    pub year_fortune_2026: String,
    pub lucky_items: LuckyItems,
    pub advice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_fortune: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumResponse {
    pub year_flow: String,
    pub relationship_deep_dive: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementState {
    pub is_premium: bool,
    pub free_premium_remaining: u32,
    pub latest_payment_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerificationPayload {
    pub payment_key: String,
    pub order_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentField {
    #[serde(rename = "paymentKey")]
    PaymentKey,
    #[serde(rename = "orderId")]
    OrderId,
    #[serde(rename = "amount")]
    Amount,
}

impl PaymentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentField::PaymentKey => "paymentKey",
            PaymentField::OrderId => "orderId",
            PaymentField::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct PayloadParseError {
    pub field: PaymentField,
    pub message: String,
}
