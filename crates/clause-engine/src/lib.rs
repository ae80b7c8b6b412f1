//! Clause-level risk analysis and comparison for legal contracts
//!
//! A document is split into clause units, each clause is scored by a
//! deterministic keyword rule set and, when available, by an external
//! reasoning service. The two verdicts are fused so that the rules can only
//! escalate risk, never hide it. All external calls go through a single
//! rate-limited [`Scheduler`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use clause_engine::{ContractAnalyzer, EngineConfig, OfflineReasoner};
//! use shared_types::DocumentType;
//!
//! # async fn run() {
//! let config = EngineConfig::default();
//! let analyzer = ContractAnalyzer::with_reasoner(Arc::new(OfflineReasoner), &config);
//! let analysis = analyzer
//!     .analyze("1. Rent is Rs. 15,000 per month.", DocumentType::RentalAgreement)
//!     .await;
//! println!("{}", analysis.overall_risk);
//! # }
//! ```

pub mod analyzer;
pub mod comparison;
pub mod config;
pub mod error;
pub mod extractors;
pub mod glossary;
pub mod patterns;
pub mod pipeline;
pub mod prompts;
pub mod reasoner;
pub mod rules;
pub mod scheduler;
pub mod segmenter;
pub mod summarizer;
pub mod templates;

pub use analyzer::ClauseAnalyzer;
pub use comparison::ComparisonEngine;
pub use config::{
    ComparisonConfig, EngineConfig, SchedulerConfig, SegmenterConfig, SummarizerConfig,
};
pub use error::{ConfigError, ExternalError};
pub use glossary::build_glossary;
pub use pipeline::ContractAnalyzer;
pub use reasoner::{OfflineReasoner, PromptKind, Reasoner, ReasonerResponse};
pub use rules::score_clause;
pub use scheduler::{Scheduler, SchedulerStats};
pub use segmenter::ClauseSegmenter;
pub use summarizer::{DocumentSummarizer, DocumentSummary};
