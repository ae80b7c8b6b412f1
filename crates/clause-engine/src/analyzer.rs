//! Per-clause analysis: rules verdict fused with the external verdict
//!
//! The rules verdict is always computed. The external verdict comes from one
//! scheduler submission; when that fails, or the answer has no usable
//! structure, a verdict is synthesized from the rules so the caller always
//! receives a [`ClauseAnalysis`].

use shared_types::{ClauseAnalysis, ClauseUnit, DocumentType, ExternalVerdict, RulesVerdict};
use tracing::{debug, instrument, warn};

use crate::prompts::clause_prompt;
use crate::reasoner::{truncate_chars, PromptKind, ReasonerResponse};
use crate::rules::score_clause;
use crate::scheduler::Scheduler;
use crate::templates::{fallback_explanation, fallback_reason};

/// Longest explanation kept from an unstructured reasoner answer
const MAX_UNSTRUCTURED_EXPLANATION_CHARS: usize = 600;

#[derive(Debug, Clone)]
pub struct ClauseAnalyzer {
    scheduler: Scheduler,
}

impl ClauseAnalyzer {
    pub fn new(scheduler: Scheduler) -> Self {
        Self { scheduler }
    }

    #[instrument(skip(self, unit), fields(words = unit.word_count))]
    pub async fn analyze(
        &self,
        unit: &ClauseUnit,
        page: u32,
        document_type: DocumentType,
    ) -> ClauseAnalysis {
        let rules = score_clause(&unit.text);
        debug!(
            score = rules.risk_score,
            level = %rules.risk_level,
            "Rules verdict computed"
        );

        let external = match self
            .scheduler
            .submit(
                PromptKind::ClauseAnalysis,
                clause_prompt(&unit.text, document_type),
            )
            .await
        {
            Ok(response) => verdict_from_response(&response, &rules),
            Err(err) => {
                warn!(error = %err, page, "External clause analysis unavailable, using rules fallback");
                fallback_verdict(&rules)
            }
        };

        ClauseAnalysis::fuse(page, &unit.text, rules, external)
    }
}

/// Verdict synthesized purely from the rules
pub fn fallback_verdict(rules: &RulesVerdict) -> ExternalVerdict {
    ExternalVerdict {
        explanation: fallback_explanation(rules.risk_level, &rules.matched_keywords),
        risk_level: rules.risk_level,
        reason: fallback_reason(rules.risk_level, rules.risk_score, &rules.matched_keywords),
        important_terms: rules.matched_keywords.clone(),
    }
}

/// Convert a reasoner answer, filling any missing field from the rules
pub fn verdict_from_response(response: &ReasonerResponse, rules: &RulesVerdict) -> ExternalVerdict {
    let fallback = fallback_verdict(rules);

    match response {
        ReasonerResponse::Structured(_) => {
            let risk_level = response
                .string_field(&["riskLevel", "risk_level", "risk"])
                .and_then(|raw| shared_types::RiskLevel::parse(&raw))
                .unwrap_or(fallback.risk_level);

            ExternalVerdict {
                explanation: response
                    .string_field(&["explanation", "plainEnglish"])
                    .unwrap_or(fallback.explanation),
                risk_level,
                reason: response
                    .string_field(&["reason"])
                    .unwrap_or(fallback.reason),
                important_terms: response
                    .string_list_field(&["importantTerms", "important_terms", "terms"])
                    .filter(|terms| !terms.is_empty())
                    .unwrap_or(fallback.important_terms),
            }
        }
        ReasonerResponse::Unstructured(raw) if !raw.trim().is_empty() => {
            debug!("Reasoner answer had no JSON object, keeping truncated text");
            ExternalVerdict {
                explanation: truncate_chars(raw.trim(), MAX_UNSTRUCTURED_EXPLANATION_CHARS),
                ..fallback
            }
        }
        ReasonerResponse::Unstructured(_) => fallback,
    }
}
