use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal risk category; ordering is `Low < Medium < High`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parse a level from free text ("high", "HIGH risk", "Medium")
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with("high") {
            Some(RiskLevel::High)
        } else if lower.starts_with("medium") || lower.starts_with("moderate") {
            Some(RiskLevel::Medium)
        } else if lower.starts_with("low") {
            Some(RiskLevel::Low)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of contract the extracted text came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    RentalAgreement,
    EmploymentContract,
    NonDisclosureAgreement,
    ServiceAgreement,
    LoanAgreement,
    #[default]
    Other,
}

impl DocumentType {
    /// Map a tag such as `"rental_agreement"` or `"Rental Agreement"`; unknown tags become `Other`
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "rental_agreement" | "rental" | "lease" | "lease_agreement" => {
                DocumentType::RentalAgreement
            }
            "employment_contract" | "employment" => DocumentType::EmploymentContract,
            "non_disclosure_agreement" | "nda" => DocumentType::NonDisclosureAgreement,
            "service_agreement" | "services" => DocumentType::ServiceAgreement,
            "loan_agreement" | "loan" => DocumentType::LoanAgreement,
            _ => DocumentType::Other,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::RentalAgreement => "rental agreement",
            DocumentType::EmploymentContract => "employment contract",
            DocumentType::NonDisclosureAgreement => "non-disclosure agreement",
            DocumentType::ServiceAgreement => "service agreement",
            DocumentType::LoanAgreement => "loan agreement",
            DocumentType::Other => "contract",
        }
    }
}

/// A clause-sized slice of extracted document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseUnit {
    pub text: String,
    pub word_count: usize,
    pub estimated_token_count: usize,
}

/// Keyword-based risk verdict for one clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesVerdict {
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub matched_keywords: Vec<String>, // Deduplicated, sorted
}

/// Verdict returned by the external reasoner (or synthesized from the rules)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalVerdict {
    pub explanation: String,
    pub risk_level: RiskLevel,
    pub reason: String,
    pub important_terms: Vec<String>,
}

/// Fused analysis of a single clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseAnalysis {
    pub page: u32,
    pub clause_text: String,
    pub explanation: String,
    pub risk_from_rules: RiskLevel,
    pub risk_from_external: RiskLevel,
    pub final_risk: RiskLevel,
    pub reason: String,
    pub keywords: Vec<String>,
    pub important_terms: Vec<String>,
}

impl ClauseAnalysis {
    /// Fuse both verdicts; the final risk escalates and never downgrades
    pub fn fuse(page: u32, clause_text: &str, rules: RulesVerdict, external: ExternalVerdict) -> Self {
        Self {
            page,
            clause_text: clause_text.to_string(),
            explanation: external.explanation,
            risk_from_rules: rules.risk_level,
            risk_from_external: external.risk_level,
            final_risk: rules.risk_level.max(external.risk_level),
            reason: external.reason,
            keywords: rules.matched_keywords,
            important_terms: external.important_terms,
        }
    }

    /// Placeholder used when neither signal could be computed
    pub fn failed(page: u32, clause_text: &str) -> Self {
        Self {
            page,
            clause_text: clause_text.to_string(),
            explanation: "Analysis failed for this clause. Please review it manually.".to_string(),
            risk_from_rules: RiskLevel::Medium,
            risk_from_external: RiskLevel::Medium,
            final_risk: RiskLevel::Medium,
            reason: "Analysis failed".to_string(),
            keywords: Vec::new(),
            important_terms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    Financial,
    Legal,
    Property,
    Obligation,
    Termination,
    Party,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryEntry {
    pub term: String,
    pub meaning: String,
    pub category: TermCategory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskDistribution {
    pub fn from_clauses(clauses: &[ClauseAnalysis]) -> Self {
        let mut dist = Self::default();
        for clause in clauses {
            match clause.final_risk {
                RiskLevel::Low => dist.low += 1,
                RiskLevel::Medium => dist.medium += 1,
                RiskLevel::High => dist.high += 1,
            }
        }
        dist
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    /// High if any clause is High; else Medium if medium outnumbers low; else Low
    pub fn overall_risk(&self) -> RiskLevel {
        if self.high > 0 {
            RiskLevel::High
        } else if self.medium > self.low {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Result of analyzing one source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub document_type: DocumentType,
    pub clauses: Vec<ClauseAnalysis>,
    pub glossary: Vec<GlossaryEntry>,
    pub risk_distribution: RiskDistribution,
    pub overall_risk: RiskLevel,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub analyzed_at: u64,
}

impl DocumentAnalysis {
    /// Concatenated clause text, in document order
    pub fn full_text(&self) -> String {
        self.clauses
            .iter()
            .map(|c| c.clause_text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One side of a comparison entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseSummary {
    pub page: u32,
    pub clause_text: String,
    pub explanation: String,
    pub final_risk: RiskLevel,
}

impl From<&ClauseAnalysis> for ClauseSummary {
    fn from(clause: &ClauseAnalysis) -> Self {
        Self {
            page: clause.page,
            clause_text: clause.clause_text.clone(),
            explanation: clause.explanation.clone(),
            final_risk: clause.final_risk,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub clause_type: String,
    pub side_a: Option<ClauseSummary>,
    pub side_b: Option<ClauseSummary>,
    pub difference_text: String,
    pub overall_risk: RiskLevel,
    pub plain_english: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSnapshot {
    pub overall_risk: RiskLevel,
    pub distribution: RiskDistribution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskComparison {
    pub document_a: RiskSnapshot,
    pub document_b: RiskSnapshot,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseCount {
    pub document_a: usize,
    pub document_b: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub clause_by_clause_comparison: Vec<ComparisonEntry>,
    pub detailed_similarities: Vec<String>,
    pub risk_comparison: RiskComparison,
    pub clause_count: ClauseCount,
}
