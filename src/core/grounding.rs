use crate::domain::model::{DaewoonCycle, Element, ElementScores, GroundingFact};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_DAY_MASTER: &str = "Unknown Day Master";
pub const UNKNOWN_ELEMENT: &str = "unknown";
const NO_SCORES_SUMMARY: &str = "No five-element score provided";

/// 日主可能是字串，也可能是 `{ hanja, name, element }` 物件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayMasterInput {
    Text(String),
    Detailed {
        #[serde(default)]
        hanja: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        element: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiveElementsInput {
    #[serde(default)]
    pub dominant: Option<String>,
    #[serde(default)]
    pub lacking: Option<String>,
    #[serde(default)]
    pub scores: Option<ElementScores>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaewoonInput {
    #[serde(default)]
    /// 起運年齡；僅在沒有大運列表時寫入 grounding 區塊
    pub start_age: Option<i64>,
    #[serde(default)]
    pub cycles: Vec<DaewoonCycle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingInput {
    #[serde(default)]
    pub day_master: Option<DayMasterInput>,
    #[serde(default)]
    pub five_elements: Option<FiveElementsInput>,
    #[serde(default)]
    pub daewoon: Option<DaewoonInput>,
}

pub fn build_grounding(input: &GroundingInput) -> GroundingFact {
    let day_master = resolve_day_master(input.day_master.as_ref());
    let (dominant_element, weak_element, five_element_summary) =
        derive_elements(input.five_elements.as_ref());
    let daewoon_summary = summarize_daewoon(input.daewoon.as_ref());

    let daewoon_line = if !daewoon_summary.is_empty() {
        daewoon_summary.clone()
    } else {
        // 沒有大運列表時只剩起運年齡可用
        match input.daewoon.as_ref().and_then(|d| d.start_age) {
            Some(age) if age > 0 => format!("major cycle starts around age {}", age),
            _ => "none".to_string(),
        }
    };
    let grounding_block = [
        "[Grounding]".to_string(),
        format!("Day Master: {}", day_master),
        format!("Five Elements: {}", five_element_summary),
        format!("Dominant Element: {}", dominant_element),
        format!("Weak Element: {}", weak_element),
        format!("Daewoon: {}", daewoon_line),
    ]
    .join("\n");

    GroundingFact {
        day_master,
        dominant_element,
        weak_element,
        five_element_summary,
        daewoon_summary,
        grounding_block,
    }
}

fn resolve_day_master(day_master: Option<&DayMasterInput>) -> String {
    let trimmed = |s: &Option<String>| s.as_deref().map(str::trim).unwrap_or("").to_string();

    match day_master {
        Some(DayMasterInput::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Some(DayMasterInput::Detailed { hanja, name, .. }) => {
            match (trimmed(hanja), trimmed(name)) {
                (h, n) if !h.is_empty() && !n.is_empty() => format!("{} {}", h, n),
                (h, _) if !h.is_empty() => h,
                (_, n) if !n.is_empty() => n,
                _ => UNKNOWN_DAY_MASTER.to_string(),
            }
        }
        _ => UNKNOWN_DAY_MASTER.to_string(),
    }
}

/// 最強/最弱元素；同分時依 wood, fire, earth, metal, water 順序取先出現者
pub fn rank_elements(scores: &ElementScores) -> Option<(Element, Element)> {
    if scores.is_empty() {
        return None;
    }

    let mut dominant = Element::Wood;
    let mut weak = Element::Wood;
    for element in Element::ORDER.iter().copied().skip(1) {
        if scores.score(element) > scores.score(dominant) {
            dominant = element;
        }
        if scores.score(element) < scores.score(weak) {
            weak = element;
        }
    }
    Some((dominant, weak))
}

fn derive_elements(input: Option<&FiveElementsInput>) -> (String, String, String) {
    // 只接受五行名稱本身，其他字串忽略
    let explicit = |s: Option<&String>| {
        s.and_then(|v| Element::parse(v)).map(|e| e.to_string())
    };
    let explicit_dominant = explicit(input.and_then(|i| i.dominant.as_ref()));
    let explicit_weak = explicit(input.and_then(|i| i.lacking.as_ref()));

    let ranked = input
        .and_then(|i| i.scores.as_ref())
        .and_then(|scores| rank_elements(scores).map(|pair| (scores, pair)));

    match ranked {
        Some((scores, (dominant, weak))) => {
            let mut ordered: Vec<Element> = Element::ORDER.to_vec();
            // sort_by 為穩定排序，同分保持五行順序
            ordered.sort_by(|a, b| scores.score(*b).total_cmp(&scores.score(*a)));
            let summary = ordered
                .iter()
                .map(|e| format!("{}:{:.1}", e, scores.score(*e)))
                .collect::<Vec<_>>()
                .join(", ");

            (
                explicit_dominant.unwrap_or_else(|| dominant.to_string()),
                explicit_weak.unwrap_or_else(|| weak.to_string()),
                summary,
            )
        }
        None => (
            explicit_dominant.unwrap_or_else(|| UNKNOWN_ELEMENT.to_string()),
            explicit_weak.unwrap_or_else(|| UNKNOWN_ELEMENT.to_string()),
            NO_SCORES_SUMMARY.to_string(),
        ),
    }
}

fn summarize_daewoon(daewoon: Option<&DaewoonInput>) -> String {
    let cycles = match daewoon {
        Some(d) if !d.cycles.is_empty() => &d.cycles,
        _ => return String::new(),
    };

    let label = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_ELEMENT)
            .to_string()
    };

    let chunks: Vec<String> = cycles
        .iter()
        .map(|cycle| {
            format!(
                "{}-{}:{}/{}",
                cycle.start_age.unwrap_or(0),
                cycle.end_age.unwrap_or(0),
                label(&cycle.gan_zhi),
                label(&cycle.ten_god)
            )
        })
        .collect();

    format!("Cycle focus -> {}", chunks.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_master_object_forms() {
        let both = DayMasterInput::Detailed {
            hanja: Some("甲".to_string()),
            name: Some("Wood".to_string()),
            element: None,
        };
        assert_eq!(resolve_day_master(Some(&both)), "甲 Wood");

        let hanja_only = DayMasterInput::Detailed {
            hanja: Some(" 乙 ".to_string()),
            name: None,
            element: Some("wood".to_string()),
        };
        assert_eq!(resolve_day_master(Some(&hanja_only)), "乙");

        let blank = DayMasterInput::Text("   ".to_string());
        assert_eq!(resolve_day_master(Some(&blank)), UNKNOWN_DAY_MASTER);
    }

    #[test]
    fn test_day_master_deserializes_from_string_or_object() {
        let text: DayMasterInput = serde_json::from_value(serde_json::json!("丙")).unwrap();
        assert_eq!(text, DayMasterInput::Text("丙".to_string()));

        let obj: DayMasterInput =
            serde_json::from_value(serde_json::json!({"hanja": "丁", "name": "Fire"})).unwrap();
        assert_eq!(resolve_day_master(Some(&obj)), "丁 Fire");
    }

    #[test]
    fn test_weak_element_tie_prefers_earlier_element() {
        let scores = ElementScores::new(3.0, 1.0, 2.0, 1.0, 4.0);
        let (dominant, weak) = rank_elements(&scores).unwrap();
        assert_eq!(dominant, Element::Water);
        assert_eq!(weak, Element::Fire);
    }

    #[test]
    fn test_missing_scores_count_as_zero() {
        let scores = ElementScores {
            fire: Some(2.0),
            ..Default::default()
        };
        let (dominant, weak) = rank_elements(&scores).unwrap();
        assert_eq!(dominant, Element::Fire);
        assert_eq!(weak, Element::Wood);
    }

    #[test]
    fn test_explicit_labels_override_computed_ranking() {
        let input = FiveElementsInput {
            dominant: Some(" Metal ".to_string()),
            lacking: Some("not-an-element".to_string()),
            scores: Some(ElementScores::new(5.0, 1.0, 1.0, 1.0, 0.0)),
        };
        let (dominant, weak, _) = derive_elements(Some(&input));
        assert_eq!(dominant, "metal");
        assert_eq!(weak, "water");
    }

    #[test]
    fn test_cycle_with_missing_fields_uses_placeholders() {
        let input = DaewoonInput {
            start_age: Some(3),
            cycles: vec![DaewoonCycle {
                start_age: Some(3),
                ..Default::default()
            }],
        };
        assert_eq!(
            summarize_daewoon(Some(&input)),
            "Cycle focus -> 3-0:unknown/unknown"
        );
    }
}
