use crate::config::InterpretConfig;
use crate::core::contracts::{
    build_deterministic_interpret_fallback, build_deterministic_premium_fallback, normalize_text,
    InterpretFallbackSeed, PremiumFallbackSeed,
};
use crate::core::grounding::{build_grounding, GroundingInput, UNKNOWN_DAY_MASTER};
use crate::core::{ContractResult, EntitlementState, GenerativeProvider, GroundingFact, Result};
use crate::domain::model::{InterpretResponse, PremiumResponse};
use crate::utils::error::OracleError;
use serde::{Deserialize, Serialize};

const INTERPRET_OUTPUT_CONTRACT: &str = r#"Return strictly valid JSON with this shape:
{
  "headline": "string",
  "threeLineSummary": ["string", "string", "string"],
  "personality": "string",
  "career": "string",
  "relationship": "string",
  "health": "string",
  "daewoonAnalysis": "string",
  "yearFortune2026": "string",
  "luckyItems": { "color": "string", "number": 7, "direction": "string" },
  "advice": "string"
}"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretRequest {
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(flatten)]
    pub chart: GroundingInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumRequest {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(flatten)]
    pub chart: GroundingInput,
}

/// 解讀流程：grounding → 決定性 fallback → 生成式服務 → 契約正規化
pub struct InterpretService<P: GenerativeProvider> {
    provider: P,
    config: InterpretConfig,
}

impl<P: GenerativeProvider> InterpretService<P> {
    pub fn new(provider: P, config: InterpretConfig) -> Self {
        Self { provider, config }
    }

    /// 服務失敗一律吸收成 fallback，不回傳錯誤
    pub async fn interpret(&self, request: &InterpretRequest) -> ContractResult<InterpretResponse> {
        let grounding = build_grounding(&request.chart);
        let fallback =
            build_deterministic_interpret_fallback(&InterpretFallbackSeed::from(&grounding));

        let system_prompt = self.interpret_system_prompt(&grounding);
        let user_prompt = interpret_user_prompt(request, &grounding);
        let raw = self.fetch("interpret", &system_prompt, &user_prompt).await;

        let result = normalize_text(raw.as_deref(), &fallback);
        tracing::info!(
            mode = ?result.mode,
            issues = ?result.issues,
            v2 = self.config.v2_enabled,
            "interpret.normalization"
        );
        result
    }

    pub async fn premium(
        &self,
        user_id: &str,
        request: &PremiumRequest,
        entitlement: &EntitlementState,
    ) -> Result<ContractResult<PremiumResponse>> {
        if !entitlement.is_premium {
            tracing::warn!("🔒 Premium interpretation denied for {}", user_id);
            return Err(OracleError::EntitlementRequired {
                user_id: user_id.to_string(),
            });
        }

        let grounding = build_grounding(&request.chart);
        let seed = PremiumFallbackSeed {
            day_master: Some(grounding.day_master.clone())
                .filter(|dm| dm.as_str() != UNKNOWN_DAY_MASTER),
            summary: request.summary.clone(),
            keywords: request.keywords.clone(),
        };
        let fallback = build_deterministic_premium_fallback(&seed, self.config.max_keywords);

        let system_prompt = "You are a premium Saju report analyst. Output strict JSON only.";
        let user_prompt = self.premium_user_prompt(request, &grounding);
        let raw = self.fetch("interpret_premium", system_prompt, &user_prompt).await;

        let result = normalize_text(raw.as_deref(), &fallback);
        tracing::info!(
            mode = ?result.mode,
            issues = ?result.issues,
            v2 = self.config.v2_enabled,
            "interpret_premium.normalization"
        );
        Ok(result)
    }

    async fn fetch(&self, label: &str, system_prompt: &str, user_prompt: &str) -> Option<String> {
        match self.provider.complete(system_prompt, user_prompt).await {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                tracing::warn!("{}.empty_provider_response", label);
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "{}.provider_failed", label);
                None
            }
        }
    }

    fn interpret_system_prompt(&self, grounding: &GroundingFact) -> String {
        if !self.config.v2_enabled {
            return [
                "You are a precise Saju analyst.",
                "Focus on actionable, grounded interpretation and avoid mystical overclaiming.",
                INTERPRET_OUTPUT_CONTRACT,
            ]
            .join("\n");
        }

        [
            "You are a senior Saju analyst producing grounded, internally consistent insight.",
            "Use the provided grounding block as hard context. Do not contradict it.",
            grounding.grounding_block.as_str(),
            INTERPRET_OUTPUT_CONTRACT,
        ]
        .join("\n")
    }

    fn premium_user_prompt(&self, request: &PremiumRequest, grounding: &GroundingFact) -> String {
        let objective = if self.config.v2_enabled {
            "Create a premium response grounded in the supplied structure and avoid generic fluff."
        } else {
            "Create a concise premium response."
        };
        let keywords: Vec<&str> = request
            .keywords
            .iter()
            .take(self.config.max_keywords)
            .map(String::as_str)
            .collect();

        [
            objective.to_string(),
            grounding.grounding_block.clone(),
            "Return strict JSON with fields: yearFlow, relationshipDeepDive.".to_string(),
            format!(
                "Input summary: {}",
                request.summary.as_deref().unwrap_or("none")
            ),
            format!("Input keywords: {}", keywords.join(", ")),
        ]
        .join("\n")
    }
}

fn interpret_user_prompt(request: &InterpretRequest, grounding: &GroundingFact) -> String {
    let five_elements = request
        .chart
        .five_elements
        .as_ref()
        .and_then(|fe| serde_json::to_string(fe).ok())
        .unwrap_or_else(|| "null".to_string());

    [
        "Interpret this chart using the given metadata:".to_string(),
        format!(
            "Birth date/time: {}",
            request.birth_date.as_deref().unwrap_or("unknown")
        ),
        format!("Gender: {}", request.gender.as_deref().unwrap_or("unknown")),
        format!("Day Master: {}", grounding.day_master),
        format!("Daewoon: {}", non_empty_or(&grounding.daewoon_summary, "none")),
        format!("Five Elements: {}", five_elements),
    ]
    .join("\n")
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
