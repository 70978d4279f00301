//! 生成式回應的契約正規化。
//!
//! 外部模型回傳的 JSON 不可信任：每個欄位都經過檢查，不合格的欄位以
//! 決定性的 fallback 補上。結果分三種模式：
//!
//! - `strict`：物件且所有必要欄位合格
//! - `normalized`：物件，部分欄位由 fallback 補上
//! - `fallback`：不是物件、無法解析，或沒有任何可用欄位
//!   (進階回應的 issue 為 `premium_fields_missing`)

use crate::core::grounding::UNKNOWN_ELEMENT;
use crate::domain::model::{
    ContractMode, ContractResult, GroundingFact, InterpretResponse, LuckyItems, PremiumResponse,
};
use serde_json::{Map, Value};

pub const HEADLINE_MAX: usize = 160;
pub const SUMMARY_LINE_MAX: usize = 300;
pub const PERSONALITY_MAX: usize = 1800;
pub const CAREER_MAX: usize = 1800;
pub const RELATIONSHIP_MAX: usize = 1500;
pub const HEALTH_MAX: usize = 1200;
pub const DAEWOON_ANALYSIS_MAX: usize = 1500;
pub const YEAR_FORTUNE_MAX: usize = 1500;
pub const ADVICE_MAX: usize = 1200;
pub const OVERALL_FORTUNE_MAX: usize = 1200;
pub const LUCKY_LABEL_MAX: usize = 40;
pub const PREMIUM_FIELD_MAX: usize = 2200;

pub const SUMMARY_LINES: usize = 3;
pub const DEFAULT_MAX_KEYWORDS: usize = 3;
const DEFAULT_PREMIUM_KEYWORDS: &str = "timing, rhythm, boundary management";

/// 依字元截斷後去除前後空白
pub fn clamp_text(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect::<String>().trim().to_string()
}

fn clean_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 逐欄位讀取原始物件，記錄修補過的欄位與可用欄位數
pub struct FieldReader<'a> {
    raw: &'a Map<String, Value>,
    issues: Vec<String>,
    usable: usize,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a Map<String, Value>) -> Self {
        Self {
            raw,
            issues: Vec::new(),
            usable: 0,
        }
    }

    /// 必要字串欄位
    pub fn text(&mut self, key: &str, fallback: &str, max_chars: usize) -> String {
        match clean_string(self.raw.get(key)) {
            Some(value) => {
                self.usable += 1;
                clamp_text(&value, max_chars)
            }
            None => {
                self.issues.push(format!("{}_missing", key));
                fallback.to_string()
            }
        }
    }

    /// 選填字串欄位；缺少時沿用 fallback，不算修補
    pub fn optional_text(
        &mut self,
        key: &str,
        fallback: Option<&str>,
        max_chars: usize,
    ) -> Option<String> {
        clean_string(self.raw.get(key))
            .map(|value| clamp_text(&value, max_chars))
            .or_else(|| non_blank(fallback).map(|value| clamp_text(value, max_chars)))
    }

    /// 摘要：至少一行非空字串，最多保留三行，不足的位置由 fallback 對應行補上
    pub fn summary(&mut self, key: &str, fallback: &[String]) -> Vec<String> {
        let raw = self.raw;
        let items = match raw.get(key) {
            Some(Value::Array(items)) => items,
            _ => {
                self.issues.push(format!("{}_missing", key));
                return fallback.to_vec();
            }
        };

        let mut lines: Vec<String> = items
            .iter()
            .filter_map(|item| clean_string(Some(item)))
            .take(SUMMARY_LINES)
            .map(|line| clamp_text(&line, SUMMARY_LINE_MAX))
            .collect();

        if lines.is_empty() {
            self.issues.push(format!("{}_empty", key));
            return fallback.to_vec();
        }

        while lines.len() < SUMMARY_LINES {
            match fallback.get(lines.len()).or_else(|| fallback.first()) {
                Some(line) => lines.push(line.clone()),
                None => break,
            }
        }
        self.usable += 1;
        lines
    }

    pub fn lucky_items(&mut self, key: &str, fallback: &LuckyItems) -> LuckyItems {
        let raw = self.raw;
        let lucky = match raw.get(key) {
            Some(Value::Object(lucky)) => lucky,
            _ => {
                self.issues.push(format!("{}_missing", key));
                return fallback.clone();
            }
        };

        let mut valid = 0;
        let mut label = |field: &str, fallback_value: &str, issues: &mut Vec<String>| {
            match clean_string(lucky.get(field)) {
                Some(value) => {
                    valid += 1;
                    clamp_text(&value, LUCKY_LABEL_MAX)
                }
                None => {
                    issues.push(format!("{}.{}_missing", key, field));
                    fallback_value.to_string()
                }
            }
        };
        let color = label("color", fallback.color.as_str(), &mut self.issues);
        let direction = label("direction", fallback.direction.as_str(), &mut self.issues);

        let number = match lucky.get("number") {
            Some(Value::Number(n)) if n.as_f64().is_some_and(f64::is_finite) => {
                valid += 1;
                n.clone()
            }
            _ => {
                self.issues.push(format!("{}.number_missing", key));
                fallback.number.clone()
            }
        };

        if valid > 0 {
            self.usable += 1;
        }
        LuckyItems {
            color,
            number,
            direction,
        }
    }
}

/// 一種輸出 schema：由 reader 逐欄位組出完整的值
pub trait ResponseContract: Clone {
    fn read(reader: &mut FieldReader<'_>, fallback: &Self) -> Self;

    /// 物件中沒有任何可用欄位時回報的 issue
    fn unusable_issues(field_issues: Vec<String>) -> Vec<String> {
        let mut issues = vec!["payload_without_usable_fields".to_string()];
        issues.extend(field_issues);
        issues
    }
}

impl ResponseContract for InterpretResponse {
    fn read(r: &mut FieldReader<'_>, fb: &Self) -> Self {
        InterpretResponse {
            headline: r.text("headline", &fb.headline, HEADLINE_MAX),
            three_line_summary: r.summary("threeLineSummary", &fb.three_line_summary),
            personality: r.text("personality", &fb.personality, PERSONALITY_MAX),
            career: r.text("career", &fb.career, CAREER_MAX),
            relationship: r.text("relationship", &fb.relationship, RELATIONSHIP_MAX),
            health: r.text("health", &fb.health, HEALTH_MAX),
            daewoon_analysis: r.optional_text(
                "daewoonAnalysis",
                fb.daewoon_analysis.as_deref(),
                DAEWOON_ANALYSIS_MAX,
            ),
            year_fortune_2026: r.text("yearFortune2026", &fb.year_fortune_2026, YEAR_FORTUNE_MAX),
            lucky_items: r.lucky_items("luckyItems", &fb.lucky_items),
            advice: r.text("advice", &fb.advice, ADVICE_MAX),
            overall_fortune: r.optional_text(
                "overallFortune",
                fb.overall_fortune.as_deref(),
                OVERALL_FORTUNE_MAX,
            ),
        }
    }
}

impl ResponseContract for PremiumResponse {
    fn read(r: &mut FieldReader<'_>, fb: &Self) -> Self {
        PremiumResponse {
            year_flow: r.text("yearFlow", &fb.year_flow, PREMIUM_FIELD_MAX),
            relationship_deep_dive: r.text(
                "relationshipDeepDive",
                &fb.relationship_deep_dive,
                PREMIUM_FIELD_MAX,
            ),
        }
    }

    fn unusable_issues(_field_issues: Vec<String>) -> Vec<String> {
        vec!["premium_fields_missing".to_string()]
    }
}

fn fallback_result<T: Clone>(fallback: &T, issues: Vec<String>) -> ContractResult<T> {
    ContractResult {
        mode: ContractMode::Fallback,
        value: fallback.clone(),
        issues,
    }
}

pub fn normalize<T: ResponseContract>(payload: &Value, fallback: &T) -> ContractResult<T> {
    let raw = match payload {
        Value::Object(raw) => raw,
        _ => return fallback_result(fallback, vec!["payload_not_object".to_string()]),
    };

    let mut reader = FieldReader::new(raw);
    let value = T::read(&mut reader, fallback);

    if reader.usable == 0 {
        return fallback_result(fallback, T::unusable_issues(reader.issues));
    }

    let mode = if reader.issues.is_empty() {
        ContractMode::Strict
    } else {
        ContractMode::Normalized
    };
    ContractResult {
        mode,
        value,
        issues: reader.issues,
    }
}

/// 原始文字版本：空回應或無法解析的 JSON 直接走 fallback
pub fn normalize_text<T: ResponseContract>(raw: Option<&str>, fallback: &T) -> ContractResult<T> {
    let text = match non_blank(raw) {
        Some(text) => text,
        None => return fallback_result(fallback, vec!["empty_response".to_string()]),
    };

    match serde_json::from_str::<Value>(text) {
        Ok(payload) => normalize(&payload, fallback),
        Err(_) => fallback_result(fallback, vec!["invalid_json".to_string()]),
    }
}

pub fn normalize_interpret_response(
    payload: &Value,
    fallback: &InterpretResponse,
) -> ContractResult<InterpretResponse> {
    normalize(payload, fallback)
}

pub fn normalize_premium_response(
    payload: &Value,
    fallback: &PremiumResponse,
) -> ContractResult<PremiumResponse> {
    normalize(payload, fallback)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpretFallbackSeed {
    pub day_master: Option<String>,
    pub dominant_element: Option<String>,
    pub weak_element: Option<String>,
    pub daewoon_summary: Option<String>,
}

impl From<&GroundingFact> for InterpretFallbackSeed {
    fn from(grounding: &GroundingFact) -> Self {
        Self {
            day_master: Some(grounding.day_master.clone()),
            dominant_element: Some(grounding.dominant_element.clone()),
            weak_element: Some(grounding.weak_element.clone()),
            daewoon_summary: Some(grounding.daewoon_summary.clone()),
        }
    }
}

pub fn build_deterministic_interpret_fallback(seed: &InterpretFallbackSeed) -> InterpretResponse {
    let day_master = non_blank(seed.day_master.as_deref()).unwrap_or("Day Master");
    let dominant = non_blank(seed.dominant_element.as_deref()).unwrap_or(UNKNOWN_ELEMENT);
    let weak = non_blank(seed.weak_element.as_deref()).unwrap_or(UNKNOWN_ELEMENT);
    let daewoon = non_blank(seed.daewoon_summary.as_deref())
        .unwrap_or("No major cycle signal available.");

    InterpretResponse {
        headline: clamp_text(
            &format!("{} needs balanced execution this season.", day_master),
            HEADLINE_MAX,
        ),
        three_line_summary: vec![
            clamp_text(&format!("Strength flows from {}.", dominant), SUMMARY_LINE_MAX),
            clamp_text(
                &format!("Stability improves when {} is supplemented.", weak),
                SUMMARY_LINE_MAX,
            ),
            "Use steady routines over impulsive changes.".to_string(),
        ],
        personality: clamp_text(
            &format!(
                "{} tends to perform best with clear structure and selective commitments. \
                 Preserve momentum through repeatable daily actions.",
                day_master
            ),
            PERSONALITY_MAX,
        ),
        career: clamp_text(
            &format!(
                "Leverage your {} tendency in work decisions, and reduce overreaction risk \
                 by validating assumptions before major moves.",
                dominant
            ),
            CAREER_MAX,
        ),
        relationship: "Communication quality decides outcomes this cycle. Keep boundaries \
                       explicit and avoid delayed feedback loops."
            .to_string(),
        health: clamp_text(
            &format!(
                "Watch signs of imbalance linked to {}. Prioritize sleep rhythm, hydration, \
                 and moderate training intensity.",
                weak
            ),
            HEALTH_MAX,
        ),
        daewoon_analysis: Some(clamp_text(daewoon, DAEWOON_ANALYSIS_MAX)),
        year_fortune_2026: "2026 favors disciplined execution and staged decisions over all-in bets."
            .to_string(),
        lucky_items: LuckyItems {
            color: "Blue".to_string(),
            number: serde_json::Number::from(7),
            direction: "East".to_string(),
        },
        advice: "Run small experiments, measure outcomes, and compound what works.".to_string(),
        overall_fortune: Some("Measured progress beats short-term intensity.".to_string()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PremiumFallbackSeed {
    pub day_master: Option<String>,
    pub summary: Option<String>,
    pub keywords: Vec<String>,
}

pub fn build_deterministic_premium_fallback(
    seed: &PremiumFallbackSeed,
    max_keywords: usize,
) -> PremiumResponse {
    let keywords: Vec<&str> = seed
        .keywords
        .iter()
        .filter_map(|k| non_blank(Some(k.as_str())))
        .take(max_keywords.max(1))
        .collect();
    let keyword_text = if keywords.is_empty() {
        DEFAULT_PREMIUM_KEYWORDS.to_string()
    } else {
        keywords.join(", ")
    };
    let day_master = non_blank(seed.day_master.as_deref()).unwrap_or("This profile");
    let summary = non_blank(seed.summary.as_deref()).unwrap_or("");

    PremiumResponse {
        year_flow: clamp_text(
            &format!(
                "{} should run 2026 in phased cycles. Use {} as the main checkpoint themes \
                 and avoid overcommitting in one step.",
                day_master, keyword_text
            ),
            PREMIUM_FIELD_MAX,
        ),
        relationship_deep_dive: clamp_text(
            &format!(
                "Keep conversations concise and explicit. The pattern in this phase rewards \
                 early clarification over delayed emotional reactions. {}",
                summary
            ),
            PREMIUM_FIELD_MAX,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clamp_text_counts_characters() {
        assert_eq!(clamp_text("갑을병정", 2), "갑을");
        assert_eq!(clamp_text("  padded  ", 40), "padded");
        assert_eq!(clamp_text("ab   cd", 4), "ab");
    }

    #[test]
    fn test_summary_pads_missing_lines_from_fallback() {
        let fallback = build_deterministic_interpret_fallback(&InterpretFallbackSeed::default());
        let raw = json!({"threeLineSummary": ["", 42, " only line "]});
        let raw = raw.as_object().unwrap();

        let mut reader = FieldReader::new(raw);
        let lines = reader.summary("threeLineSummary", &fallback.three_line_summary);

        assert_eq!(lines[0], "only line");
        assert_eq!(lines[1], fallback.three_line_summary[1]);
        assert_eq!(lines[2], fallback.three_line_summary[2]);
        assert!(reader.issues.is_empty());
        assert_eq!(reader.usable, 1);
    }

    #[test]
    fn test_lucky_items_repaired_per_field() {
        let fallback = build_deterministic_interpret_fallback(&InterpretFallbackSeed::default());
        let raw = json!({"luckyItems": {"color": "Green", "number": "8", "direction": " "}});
        let raw = raw.as_object().unwrap();

        let mut reader = FieldReader::new(raw);
        let lucky = reader.lucky_items("luckyItems", &fallback.lucky_items);

        assert_eq!(lucky.color, "Green");
        assert_eq!(lucky.number, fallback.lucky_items.number);
        assert_eq!(lucky.direction, "East");
        assert_eq!(
            reader.issues,
            vec!["luckyItems.direction_missing", "luckyItems.number_missing"]
        );
        assert_eq!(reader.usable, 1);
    }

    #[test]
    fn test_fallback_seed_blank_values_use_defaults() {
        let seed = InterpretFallbackSeed {
            day_master: Some("  ".to_string()),
            ..Default::default()
        };
        let fallback = build_deterministic_interpret_fallback(&seed);
        assert!(fallback.headline.starts_with("Day Master"));
        assert_eq!(fallback.three_line_summary[0], "Strength flows from unknown.");
        assert_eq!(
            fallback.daewoon_analysis.as_deref(),
            Some("No major cycle signal available.")
        );
    }

    #[test]
    fn test_premium_fallback_keyword_limit() {
        let seed = PremiumFallbackSeed {
            day_master: Some("丁".to_string()),
            summary: None,
            keywords: vec!["focus".into(), "timing".into(), "".into(), "rest".into()],
        };
        let fallback = build_deterministic_premium_fallback(&seed, 2);
        assert!(fallback.year_flow.contains("Use focus, timing as"));
        assert!(fallback.relationship_deep_dive.ends_with("emotional reactions."));
    }
}
