//! Deterministic text used when the external reasoner gives no usable answer

use shared_types::{RiskDistribution, RiskLevel};

pub const NO_INDICATORS_EXPLANATION: &str =
    "This appears to be a standard clause with no notable risk indicators.";

/// Plain-language explanation built from the rules verdict
pub fn fallback_explanation(level: RiskLevel, keywords: &[String]) -> String {
    if keywords.is_empty() {
        return NO_INDICATORS_EXPLANATION.to_string();
    }

    let terms = keywords.join(", ");
    match level {
        RiskLevel::High => format!(
            "This clause contains high-risk terms ({terms}) that could significantly affect your rights or finances. Review it carefully before signing."
        ),
        RiskLevel::Medium => format!(
            "This clause includes terms ({terms}) that deserve attention. Make sure you understand the obligations they create."
        ),
        RiskLevel::Low => format!(
            "This clause covers routine matters ({terms}) and appears to follow standard terms."
        ),
    }
}

/// One-sentence reason built from the rules verdict
pub fn fallback_reason(level: RiskLevel, score: u32, keywords: &[String]) -> String {
    if keywords.is_empty() {
        return "No risk keywords were found in this clause.".to_string();
    }
    format!(
        "Rules-based assessment rated this clause {} risk (score {}) based on: {}.",
        level.as_str().to_lowercase(),
        score,
        keywords.join(", ")
    )
}

/// Key findings enumerating clause and per-level counts
pub fn fallback_findings(distribution: &RiskDistribution) -> Vec<String> {
    vec![
        format!("The document contains {} clauses.", distribution.total()),
        format!("{} clause(s) were rated high risk.", distribution.high),
        format!("{} clause(s) were rated medium risk.", distribution.medium),
        format!("{} clause(s) were rated low risk.", distribution.low),
    ]
}

const HIGH_RISK_RECOMMENDATIONS: &[&str] = &[
    "Have a qualified lawyer review this document before signing.",
    "Negotiate or remove the high-risk clauses, especially penalties and guarantees.",
    "Do not sign until every high-risk obligation is clearly understood.",
];

const MEDIUM_RISK_RECOMMENDATIONS: &[&str] = &[
    "Review the medium-risk clauses carefully before signing.",
    "Ask the other party to clarify ambiguous obligations in writing.",
    "Consider seeking legal advice on termination and fee terms.",
];

const LOW_RISK_RECOMMENDATIONS: &[&str] = &[
    "The document appears to follow standard terms.",
    "Keep a signed copy for your records.",
];

/// Recommendation set for the document's overall risk
pub fn fallback_recommendations(overall: RiskLevel) -> Vec<String> {
    let set = match overall {
        RiskLevel::High => HIGH_RISK_RECOMMENDATIONS,
        RiskLevel::Medium => MEDIUM_RISK_RECOMMENDATIONS,
        RiskLevel::Low => LOW_RISK_RECOMMENDATIONS,
    };
    set.iter().map(|s| s.to_string()).collect()
}
