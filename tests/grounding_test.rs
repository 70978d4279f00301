use saju_oracle::core::grounding::{
    build_grounding, rank_elements, DaewoonInput, DayMasterInput, FiveElementsInput,
    GroundingInput,
};
use saju_oracle::domain::model::{DaewoonCycle, Element, ElementScores};

fn chart(scores: ElementScores) -> GroundingInput {
    GroundingInput {
        day_master: Some(DayMasterInput::Text("甲".to_string())),
        five_elements: Some(FiveElementsInput {
            scores: Some(scores),
            ..Default::default()
        }),
        daewoon: None,
    }
}

/// 測試完整命盤：最強/最弱元素與大運摘要
#[test]
fn test_builds_grounding_from_full_chart() {
    let input: GroundingInput = serde_json::from_value(serde_json::json!({
        "dayMaster": { "hanja": "甲", "name": "Wood" },
        "fiveElements": {
            "scores": { "wood": 6, "fire": 3, "earth": 2, "metal": 1, "water": 0 }
        },
        "daewoon": {
            "startAge": 8,
            "cycles": [
                { "startAge": 8, "endAge": 17, "ganZhi": "甲子", "tenGod": "Friend" },
                { "startAge": 18, "endAge": 27, "ganZhi": "乙丑", "tenGod": "Wealth" }
            ]
        }
    }))
    .unwrap();

    let result = build_grounding(&input);

    assert_eq!(result.day_master, "甲 Wood");
    assert_eq!(result.dominant_element, "wood");
    assert_eq!(result.weak_element, "water");
    assert_eq!(
        result.daewoon_summary,
        "Cycle focus -> 8-17:甲子/Friend | 18-27:乙丑/Wealth"
    );
    assert_eq!(
        result.five_element_summary,
        "wood:6.0, fire:3.0, earth:2.0, metal:1.0, water:0.0"
    );
}

/// 測試分數互不相同時取最大與最小
#[test]
fn test_distinct_scores_pick_max_and_min() {
    let cases = [
        (ElementScores::new(1.0, 5.0, 3.0, 2.0, 4.0), "fire", "wood"),
        (ElementScores::new(9.0, 2.0, 7.0, 0.5, 4.0), "wood", "metal"),
        (ElementScores::new(0.0, 1.0, 2.0, 3.0, 4.0), "water", "wood"),
        (ElementScores::new(3.0, 4.0, 8.0, 6.0, 1.0), "earth", "water"),
    ];

    for (scores, dominant, weak) in cases {
        let result = build_grounding(&chart(scores));
        assert_eq!(result.dominant_element, dominant);
        assert_eq!(result.weak_element, weak);
    }
}

/// 測試同分時依五行順序取先出現者，且重複呼叫結果一致
#[test]
fn test_tie_break_prefers_earlier_element() {
    let scores = ElementScores::new(1.0, 4.0, 2.0, 4.0, 1.0);

    for _ in 0..5 {
        let result = build_grounding(&chart(scores.clone()));
        assert_eq!(result.dominant_element, "fire");
        assert_eq!(result.weak_element, "wood");
    }

    let all_equal = ElementScores::new(2.0, 2.0, 2.0, 2.0, 2.0);
    assert_eq!(
        rank_elements(&all_equal),
        Some((Element::Wood, Element::Wood))
    );
}

/// 測試缺少輸入時回傳安全預設值
#[test]
fn test_sparse_input_uses_safe_defaults() {
    let result = build_grounding(&GroundingInput::default());

    assert_eq!(result.day_master, "Unknown Day Master");
    assert_eq!(result.dominant_element, "unknown");
    assert_eq!(result.weak_element, "unknown");
    assert_eq!(result.daewoon_summary, "");
    assert!(result.grounding_block.contains("Daewoon: none"));
}

/// 測試空的分數物件視同未提供
#[test]
fn test_empty_score_object_is_unknown() {
    let result = build_grounding(&chart(ElementScores::default()));
    assert_eq!(result.dominant_element, "unknown");
    assert_eq!(result.weak_element, "unknown");
    assert_eq!(result.five_element_summary, "No five-element score provided");
}

/// 測試空的大運列表產生空摘要而非錯誤
#[test]
fn test_empty_cycle_list_gives_empty_summary() {
    let mut input = chart(ElementScores::new(1.0, 2.0, 3.0, 4.0, 5.0));
    input.daewoon = Some(DaewoonInput {
        start_age: Some(5),
        cycles: Vec::<DaewoonCycle>::new(),
    });

    assert_eq!(build_grounding(&input).daewoon_summary, "");
}

/// 測試 grounding 區塊包含每個元素分數與最強/最弱標籤
#[test]
fn test_grounding_block_lists_every_element() {
    let result = build_grounding(&chart(ElementScores::new(2.0, 7.5, 1.0, 3.0, 0.0)));

    for label in ["wood:2.0", "fire:7.5", "earth:1.0", "metal:3.0", "water:0.0"] {
        assert!(result.grounding_block.contains(label), "missing {}", label);
    }
    assert!(result.grounding_block.contains("Dominant Element: fire"));
    assert!(result.grounding_block.contains("Weak Element: water"));
    assert!(result.grounding_block.starts_with("[Grounding]"));

    let again = build_grounding(&chart(ElementScores::new(2.0, 7.5, 1.0, 3.0, 0.0)));
    assert_eq!(result, again);
}

/// 測試沒有大運列表時，grounding 區塊改寫起運年齡
#[test]
fn test_start_age_fills_block_without_cycles() {
    let mut input = chart(ElementScores::new(1.0, 2.0, 3.0, 4.0, 5.0));
    input.daewoon = Some(DaewoonInput {
        start_age: Some(7),
        cycles: Vec::new(),
    });

    let result = build_grounding(&input);
    assert_eq!(result.daewoon_summary, "");
    assert!(result
        .grounding_block
        .contains("Daewoon: major cycle starts around age 7"));

    input.daewoon = Some(DaewoonInput {
        start_age: Some(0),
        cycles: Vec::new(),
    });
    assert!(build_grounding(&input)
        .grounding_block
        .contains("Daewoon: none"));
}
