//! End-to-end analysis of one document
//!
//! Segmenter -> clause analyzer (one task per clause) -> glossary + summary.
//! Clause tasks run concurrently; their external calls still go through the
//! single shared scheduler, one at a time.

use std::sync::Arc;

use shared_types::{ClauseAnalysis, DocumentAnalysis, DocumentType};
use tracing::{info, instrument, warn};

use crate::analyzer::ClauseAnalyzer;
use crate::config::EngineConfig;
use crate::glossary::build_glossary;
use crate::reasoner::Reasoner;
use crate::scheduler::Scheduler;
use crate::segmenter::ClauseSegmenter;
use crate::summarizer::DocumentSummarizer;

#[derive(Debug, Clone)]
pub struct ContractAnalyzer {
    segmenter: ClauseSegmenter,
    clause_analyzer: ClauseAnalyzer,
    summarizer: DocumentSummarizer,
    scheduler: Scheduler,
    clauses_per_page: usize,
}

impl ContractAnalyzer {
    /// Build the pipeline around an existing scheduler handle
    pub fn new(scheduler: Scheduler, config: &EngineConfig) -> Self {
        Self {
            segmenter: ClauseSegmenter::new(config.segmenter.target_tokens),
            clause_analyzer: ClauseAnalyzer::new(scheduler.clone()),
            summarizer: DocumentSummarizer::new(scheduler.clone(), config.summarizer.clone()),
            scheduler,
            clauses_per_page: config.segmenter.clauses_per_page.max(1),
        }
    }

    /// Spawn a scheduler for `reasoner` and build the pipeline on it
    pub fn with_reasoner(reasoner: Arc<dyn Reasoner>, config: &EngineConfig) -> Self {
        let scheduler = Scheduler::spawn(reasoner, config.scheduler.clone());
        Self::new(scheduler, config)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn analyze(&self, text: &str, document_type: DocumentType) -> DocumentAnalysis {
        let units = self.segmenter.segment(text);
        info!(clauses = units.len(), "Analyzing document");

        let tasks: Vec<_> = units
            .iter()
            .enumerate()
            .map(|(index, unit)| {
                let analyzer = self.clause_analyzer.clone();
                let unit = unit.clone();
                let page = self.page_for(index);
                tokio::spawn(async move { analyzer.analyze(&unit, page, document_type).await })
            })
            .collect();

        let mut clauses = Vec::with_capacity(tasks.len());
        for ((index, unit), task) in units.iter().enumerate().zip(tasks) {
            match task.await {
                Ok(analysis) => clauses.push(analysis),
                Err(err) => {
                    warn!(clause = index, error = %err, "Clause analysis task failed");
                    clauses.push(ClauseAnalysis::failed(self.page_for(index), &unit.text));
                }
            }
        }

        let glossary = build_glossary(&clauses);
        let summary = self.summarizer.summarize(&clauses, document_type).await;

        info!(
            overall_risk = %summary.overall_risk,
            high = summary.risk_distribution.high,
            glossary_terms = glossary.len(),
            "Document analysis complete"
        );

        DocumentAnalysis {
            document_type,
            clauses,
            glossary,
            risk_distribution: summary.risk_distribution,
            overall_risk: summary.overall_risk,
            key_findings: summary.key_findings,
            recommendations: summary.recommendations,
            analyzed_at: chrono::Utc::now().timestamp() as u64,
        }
    }

    /// 1-based page inferred from the clause's position in the document
    fn page_for(&self, index: usize) -> u32 {
        (index / self.clauses_per_page + 1) as u32
    }
}
