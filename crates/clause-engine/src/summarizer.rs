//! Document-level aggregation of clause analyses

use shared_types::{ClauseAnalysis, DocumentType, RiskDistribution, RiskLevel};
use tracing::{debug, instrument, warn};

use crate::config::SummarizerConfig;
use crate::prompts::summary_prompt;
use crate::reasoner::{truncate_chars, PromptKind, ReasonerResponse};
use crate::scheduler::Scheduler;
use crate::templates::{fallback_findings, fallback_recommendations};

/// Aggregated view of a document's clauses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub risk_distribution: RiskDistribution,
    pub overall_risk: RiskLevel,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DocumentSummarizer {
    scheduler: Scheduler,
    config: SummarizerConfig,
}

impl DocumentSummarizer {
    pub fn new(scheduler: Scheduler, config: SummarizerConfig) -> Self {
        Self { scheduler, config }
    }

    #[instrument(skip(self, clauses), fields(clauses = clauses.len()))]
    pub async fn summarize(
        &self,
        clauses: &[ClauseAnalysis],
        document_type: DocumentType,
    ) -> DocumentSummary {
        let risk_distribution = RiskDistribution::from_clauses(clauses);
        let overall_risk = risk_distribution.overall_risk();

        let excerpt = build_excerpt(clauses, self.config.excerpt_char_budget);
        let payload = summary_prompt(&excerpt, document_type, &risk_distribution);

        let (key_findings, recommendations) =
            match self.scheduler.submit(PromptKind::DocumentSummary, payload).await {
                Ok(response) => self.parse_summary(&response, &risk_distribution, overall_risk),
                Err(err) => {
                    warn!(error = %err, "External summary unavailable, using rules fallback");
                    (
                        fallback_findings(&risk_distribution),
                        fallback_recommendations(overall_risk),
                    )
                }
            };

        DocumentSummary {
            risk_distribution,
            overall_risk,
            key_findings,
            recommendations,
        }
    }

    fn parse_summary(
        &self,
        response: &ReasonerResponse,
        distribution: &RiskDistribution,
        overall: RiskLevel,
    ) -> (Vec<String>, Vec<String>) {
        let (findings, recommendations) = match response {
            ReasonerResponse::Structured(_) => (
                response.string_list_field(&["keyFindings", "key_findings", "findings"]),
                response.string_list_field(&["recommendations"]),
            ),
            ReasonerResponse::Unstructured(raw) => {
                debug!("Summary answer had no JSON object, using its lines as findings");
                (Some(lines_as_findings(raw, self.config.max_findings)), None)
            }
        };

        let findings = findings
            .map(|mut list| {
                list.truncate(self.config.max_findings);
                list
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| fallback_findings(distribution));
        let recommendations = recommendations
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| fallback_recommendations(overall));

        (findings, recommendations)
    }
}

/// Concatenated clause text, cut to the character budget
pub fn build_excerpt(clauses: &[ClauseAnalysis], char_budget: usize) -> String {
    let joined = clauses
        .iter()
        .map(|c| c.clause_text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    truncate_chars(&joined, char_budget)
}

fn lines_as_findings(raw: &str, max: usize) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|line| !line.is_empty())
        .take(max)
        .map(|line| truncate_chars(line, 300))
        .collect()
}
