// Payload builders for the external reasoner
use shared_types::{DocumentType, RiskDistribution};

pub fn clause_prompt(clause_text: &str, document_type: DocumentType) -> String {
    format!(
        "You are reviewing a clause from a {doc}.\n\
         Explain it in plain language for a non-lawyer, rate its risk, and list the legal terms a reader should know.\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"explanation\": string, \"riskLevel\": \"Low\" | \"Medium\" | \"High\", \"reason\": one sentence, \"importantTerms\": [string]}}\n\n\
         Clause:\n{clause_text}",
        doc = document_type.label(),
    )
}

pub fn summary_prompt(
    excerpt: &str,
    document_type: DocumentType,
    distribution: &RiskDistribution,
) -> String {
    format!(
        "You are summarizing a {doc} with {total} clauses ({high} high, {medium} medium, {low} low risk).\n\
         List the most important findings and practical recommendations for the person signing it.\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"keyFindings\": [string], \"recommendations\": [string]}}\n\n\
         Document excerpt:\n{excerpt}",
        doc = document_type.label(),
        total = distribution.total(),
        high = distribution.high,
        medium = distribution.medium,
        low = distribution.low,
    )
}
