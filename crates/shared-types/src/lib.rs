//! Data model shared by the clause engine and its callers
//!
//! Every record serializes with serde so an outer transport layer can emit it
//! as JSON without the engine depending on that format.

pub mod types;

pub use types::{
    ClauseAnalysis, ClauseCount, ClauseSummary, ClauseUnit, ComparisonEntry, ComparisonReport,
    DocumentAnalysis, DocumentType, ExternalVerdict, GlossaryEntry, RiskComparison,
    RiskDistribution, RiskLevel, RiskSnapshot, RulesVerdict, TermCategory,
};
