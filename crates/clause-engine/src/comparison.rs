//! Clause-type-aware comparison of two analyzed documents
//!
//! Clauses are paired by semantic type (rent, deposit, notice, ...) using the
//! ordered keyword groups in [`crate::patterns::CLAUSE_TYPE_GROUPS`]. Each
//! clause is consumed by at most one type; anything left over becomes a
//! one-sided residual entry, so every clause of both documents shows up in
//! exactly one [`ComparisonEntry`].
//!
//! For paired clauses the salient number (amount, notice period, term) is
//! extracted from both sides and diffed. When no number can be compared the
//! entry falls back to text equality, then to the risk difference, then to a
//! generic sentence.

use shared_types::{
    ClauseAnalysis, ClauseCount, ClauseSummary, ComparisonEntry, ComparisonReport,
    DocumentAnalysis, RiskComparison, RiskSnapshot,
};
use tracing::{debug, instrument};

use crate::config::ComparisonConfig;
use crate::extractors::{extract_amount, extract_notice_period, extract_term_length};
use crate::patterns::{contains_any, ClauseType, CLAUSE_TYPE_GROUPS, SHARED_VOCABULARY};

/// Clause type label used for residual entries
pub const RESIDUAL_CLAUSE_TYPE: &str = "Other";

/// Maximum clause-count gap still reported as comparable
const COMPARABLE_CLAUSE_COUNT_GAP: usize = 2;

/// Which document a side belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

impl Side {
    fn number(self) -> u8 {
        match self {
            Side::A => 1,
            Side::B => 2,
        }
    }

    fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// A comparable quantity pulled out of clause text
#[derive(Debug, Clone, PartialEq)]
struct Fact {
    value: f64,
    display: String,
}

impl Fact {
    fn differs_from(&self, other: &Fact) -> bool {
        (self.value - other.value).abs() > f64::EPSILON
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactKind {
    Rent,
    Deposit,
    Notice,
    Term,
}

impl FactKind {
    fn for_clause_type(clause_type: ClauseType) -> Option<Self> {
        match clause_type {
            ClauseType::Rent => Some(FactKind::Rent),
            ClauseType::Deposit => Some(FactKind::Deposit),
            ClauseType::Notice => Some(FactKind::Notice),
            ClauseType::Duration => Some(FactKind::Term),
            _ => None,
        }
    }

    fn difference_text(self, a: &Fact, b: &Fact) -> String {
        let (subject, verb) = match self {
            FactKind::Rent => ("Rent", "specifies"),
            FactKind::Deposit => ("Security deposit", "requires"),
            FactKind::Notice => ("Notice period", "requires"),
            FactKind::Term => ("Lease duration", "runs for"),
        };
        format!(
            "{subject} differs: Document 1 {verb} {} while Document 2 {verb} {}.",
            a.display, b.display
        )
    }

    /// Comparative sentence from the reader's point of view
    fn plain_english(self, a: &Fact, b: &Fact) -> String {
        let (low_side, low, high) = if a.value < b.value {
            (Side::A, a, b)
        } else {
            (Side::B, b, a)
        };
        let high_side = low_side.other();

        match self {
            FactKind::Rent => format!(
                "Document {} is cheaper, with rent of {} compared to Document {} at {}.",
                low_side.number(),
                low.display,
                high_side.number(),
                high.display
            ),
            FactKind::Deposit => format!(
                "Document {} asks for a smaller security deposit ({}) compared to Document {} ({}).",
                low_side.number(),
                low.display,
                high_side.number(),
                high.display
            ),
            FactKind::Notice => format!(
                "Document {} gives you more time, with a notice period of {} compared to Document {} at {}.",
                high_side.number(),
                high.display,
                low_side.number(),
                low.display
            ),
            FactKind::Term => format!(
                "Document {} offers a longer term of {} compared to Document {} at {}.",
                high_side.number(),
                high.display,
                low_side.number(),
                low.display
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: ComparisonConfig,
}

impl ComparisonEngine {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// Compare two analyzed documents; document A is "Document 1"
    #[instrument(skip_all, fields(clauses_a = a.clauses.len(), clauses_b = b.clauses.len()))]
    pub fn compare(&self, a: &DocumentAnalysis, b: &DocumentAnalysis) -> ComparisonReport {
        let entries = self.clause_by_clause(&a.clauses, &b.clauses);
        debug!(entries = entries.len(), "Built clause comparison");

        ComparisonReport {
            clause_by_clause_comparison: entries,
            detailed_similarities: detect_similarities(a, b),
            risk_comparison: compare_risk(a, b),
            clause_count: ClauseCount {
                document_a: a.clauses.len(),
                document_b: b.clauses.len(),
            },
        }
    }

    fn clause_by_clause(
        &self,
        a: &[ClauseAnalysis],
        b: &[ClauseAnalysis],
    ) -> Vec<ComparisonEntry> {
        let lowered_a: Vec<String> = a.iter().map(|c| c.clause_text.to_lowercase()).collect();
        let lowered_b: Vec<String> = b.iter().map(|c| c.clause_text.to_lowercase()).collect();
        let mut used_a = vec![false; a.len()];
        let mut used_b = vec![false; b.len()];
        let mut entries = Vec::new();

        for (clause_type, keywords) in CLAUSE_TYPE_GROUPS {
            let index_a = first_unused_match(&lowered_a, &used_a, keywords);
            let index_b = first_unused_match(&lowered_b, &used_b, keywords);

            let entry = match (index_a, index_b) {
                (Some(i), Some(j)) => self.paired_entry(*clause_type, &a[i], &b[j]),
                (Some(i), None) => one_sided_entry(clause_type.label(), &a[i], Side::A),
                (None, Some(j)) => one_sided_entry(clause_type.label(), &b[j], Side::B),
                (None, None) => continue,
            };

            if let Some(i) = index_a {
                used_a[i] = true;
            }
            if let Some(j) = index_b {
                used_b[j] = true;
            }
            entries.push(entry);
        }

        let residual_a = a
            .iter()
            .zip(&used_a)
            .filter(|(_, used)| !**used)
            .map(|(clause, _)| one_sided_entry(RESIDUAL_CLAUSE_TYPE, clause, Side::A));
        let residual_b = b
            .iter()
            .zip(&used_b)
            .filter(|(_, used)| !**used)
            .map(|(clause, _)| one_sided_entry(RESIDUAL_CLAUSE_TYPE, clause, Side::B));
        entries.extend(residual_a.chain(residual_b));

        entries
    }

    fn paired_entry(
        &self,
        clause_type: ClauseType,
        a: &ClauseAnalysis,
        b: &ClauseAnalysis,
    ) -> ComparisonEntry {
        let label = clause_type.label();
        let differing_facts = FactKind::for_clause_type(clause_type).and_then(|kind| {
            let fact_a = self.extract_fact(kind, &a.clause_text)?;
            let fact_b = self.extract_fact(kind, &b.clause_text)?;
            fact_a.differs_from(&fact_b).then_some((kind, fact_a, fact_b))
        });
        let risk_differs = a.final_risk != b.final_risk;

        let difference_text = if let Some((kind, fact_a, fact_b)) = &differing_facts {
            kind.difference_text(fact_a, fact_b)
        } else if same_wording(&a.clause_text, &b.clause_text) {
            "Both documents use identical wording for this clause.".to_string()
        } else if risk_differs {
            format!(
                "Document 1 rates this clause {} risk while Document 2 rates it {} risk.",
                a.final_risk, b.final_risk
            )
        } else {
            format!(
                "Both documents have similar {} clauses with minor variations.",
                label.to_lowercase()
            )
        };

        let plain_english = if let Some((kind, fact_a, fact_b)) = &differing_facts {
            kind.plain_english(fact_a, fact_b)
        } else if risk_differs {
            let (riskier, safer) = if a.final_risk > b.final_risk {
                ((Side::A, a.final_risk), (Side::B, b.final_risk))
            } else {
                ((Side::B, b.final_risk), (Side::A, a.final_risk))
            };
            format!(
                "The {} clause in Document {} carries more risk ({}) than in Document {} ({}).",
                label.to_lowercase(),
                riskier.0.number(),
                riskier.1,
                safer.0.number(),
                safer.1
            )
        } else {
            format!("Both documents have similar {} terms.", label.to_lowercase())
        };

        ComparisonEntry {
            clause_type: label.to_string(),
            side_a: Some(ClauseSummary::from(a)),
            side_b: Some(ClauseSummary::from(b)),
            difference_text,
            overall_risk: a.final_risk.max(b.final_risk),
            plain_english,
        }
    }

    fn extract_fact(&self, kind: FactKind, text: &str) -> Option<Fact> {
        match kind {
            FactKind::Rent | FactKind::Deposit => {
                extract_amount(text, self.config.permissive_amount_fallback).map(|amount| Fact {
                    value: amount.value,
                    display: amount.display,
                })
            }
            FactKind::Notice => extract_notice_period(text).map(|period| Fact {
                value: f64::from(period.days),
                display: period.display,
            }),
            FactKind::Term => extract_term_length(text).map(|period| Fact {
                value: f64::from(period.days),
                display: period.display,
            }),
        }
    }
}

fn first_unused_match(lowered: &[String], used: &[bool], keywords: &[&str]) -> Option<usize> {
    lowered
        .iter()
        .zip(used)
        .position(|(text, used)| !*used && contains_any(text, keywords))
}

fn same_wording(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

fn one_sided_entry(clause_type: &str, clause: &ClauseAnalysis, side: Side) -> ComparisonEntry {
    let summary = Some(ClauseSummary::from(clause));
    let (side_a, side_b) = match side {
        Side::A => (summary, None),
        Side::B => (None, summary),
    };
    let plain_english = if clause_type == RESIDUAL_CLAUSE_TYPE {
        format!("This clause appears only in Document {}.", side.number())
    } else {
        format!(
            "Only Document {} has a {} clause.",
            side.number(),
            clause_type.to_lowercase()
        )
    };

    ComparisonEntry {
        clause_type: clause_type.to_string(),
        side_a,
        side_b,
        difference_text: format!("Only present in Document {}", side.number()),
        overall_risk: clause.final_risk,
        plain_english,
    }
}

/// Sentence-level similarities between the two documents
pub fn detect_similarities(a: &DocumentAnalysis, b: &DocumentAnalysis) -> Vec<String> {
    let mut similarities = Vec::new();

    if a.document_type == b.document_type {
        similarities.push(format!("Both documents are {}s.", a.document_type.label()));
    }

    if a.overall_risk == b.overall_risk {
        similarities.push(format!(
            "Both documents have an overall {} risk rating.",
            a.overall_risk.as_str().to_lowercase()
        ));
    }

    let text_a = a.full_text().to_lowercase();
    let text_b = b.full_text().to_lowercase();
    for term in SHARED_VOCABULARY {
        if text_a.contains(term) && text_b.contains(term) {
            similarities.push(format!("Both documents address {term}."));
        }
    }

    if a.clauses.len().abs_diff(b.clauses.len()) <= COMPARABLE_CLAUSE_COUNT_GAP {
        similarities.push(format!(
            "Both documents have a comparable number of clauses ({} and {}).",
            a.clauses.len(),
            b.clauses.len()
        ));
    }

    if similarities.is_empty() {
        similarities.push(
            "Both documents are legal agreements, but their specific terms differ.".to_string(),
        );
    }

    similarities
}

fn compare_risk(a: &DocumentAnalysis, b: &DocumentAnalysis) -> RiskComparison {
    let summary = match a.overall_risk.cmp(&b.overall_risk) {
        std::cmp::Ordering::Greater => format!(
            "Document 1 carries higher overall risk ({}) than Document 2 ({}).",
            a.overall_risk, b.overall_risk
        ),
        std::cmp::Ordering::Less => format!(
            "Document 2 carries higher overall risk ({}) than Document 1 ({}).",
            b.overall_risk, a.overall_risk
        ),
        std::cmp::Ordering::Equal => format!(
            "Both documents carry {} overall risk.",
            a.overall_risk.as_str().to_lowercase()
        ),
    };

    RiskComparison {
        document_a: snapshot(a),
        document_b: snapshot(b),
        summary,
    }
}

fn snapshot(doc: &DocumentAnalysis) -> RiskSnapshot {
    RiskSnapshot {
        overall_risk: doc.overall_risk,
        distribution: doc.risk_distribution,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::{DocumentType, RiskDistribution, RiskLevel};

    fn clause(text: &str, risk: RiskLevel) -> ClauseAnalysis {
        ClauseAnalysis {
            page: 1,
            clause_text: text.to_string(),
            explanation: String::new(),
            risk_from_rules: risk,
            risk_from_external: risk,
            final_risk: risk,
            reason: String::new(),
            keywords: Vec::new(),
            important_terms: Vec::new(),
        }
    }

    fn document(clauses: Vec<ClauseAnalysis>) -> DocumentAnalysis {
        let risk_distribution = RiskDistribution::from_clauses(&clauses);
        DocumentAnalysis {
            document_type: DocumentType::RentalAgreement,
            overall_risk: risk_distribution.overall_risk(),
            risk_distribution,
            clauses,
            glossary: Vec::new(),
            key_findings: Vec::new(),
            recommendations: Vec::new(),
            analyzed_at: 0,
        }
    }

    /// Higher of two optional risks
    fn entry_risk(a: Option<RiskLevel>, b: Option<RiskLevel>) -> Option<RiskLevel> {
        a.into_iter().chain(b).max()
    }

    fn engine() -> ComparisonEngine {
        ComparisonEngine::default()
    }

    #[test]
    fn test_rent_amount_difference() {
        let a = document(vec![clause("Monthly rent is ₹15,000.", RiskLevel::Low)]);
        let b = document(vec![clause("Monthly rent is ₹18,000.", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);

        let rent = &report.clause_by_clause_comparison[0];
        assert_eq!(rent.clause_type, "Rent");
        assert!(rent.difference_text.contains("₹15,000"));
        assert!(rent.difference_text.contains("₹18,000"));
        assert!(rent.plain_english.starts_with("Document 1 is cheaper"));
        assert!(rent.plain_english.contains("compared to Document 2"));
    }

    #[test]
    fn test_notice_period_difference() {
        let a = document(vec![clause("Notice period is 1 month.", RiskLevel::Low)]);
        let b = document(vec![clause("Either party gives 2 months notice.", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);

        let notice = &report.clause_by_clause_comparison[0];
        assert_eq!(notice.clause_type, "Notice");
        assert_eq!(
            notice.difference_text,
            "Notice period differs: Document 1 requires 1 month while Document 2 requires 2 months."
        );
        assert!(notice.plain_english.starts_with("Document 2 gives you more time"));
    }

    #[test]
    fn test_deposit_difference() {
        let a = document(vec![clause("Security deposit of Rs. 50,000.", RiskLevel::Low)]);
        let b = document(vec![clause("A deposit of Rs. 30,000 is payable.", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);

        let deposit = &report.clause_by_clause_comparison[0];
        assert_eq!(deposit.clause_type, "Deposit");
        assert!(deposit
            .plain_english
            .starts_with("Document 2 asks for a smaller security deposit"));
    }

    #[test]
    fn test_identical_wording() {
        let a = document(vec![clause("Tenant handles  minor repairs.", RiskLevel::Low)]);
        let b = document(vec![clause("Tenant handles minor repairs.", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);

        let entry = &report.clause_by_clause_comparison[0];
        assert_eq!(entry.clause_type, "Maintenance");
        assert_eq!(
            entry.difference_text,
            "Both documents use identical wording for this clause."
        );
        assert_eq!(entry.plain_english, "Both documents have similar maintenance terms.");
    }

    #[test]
    fn test_risk_difference_fallback() {
        let a = document(vec![clause("No pets are allowed.", RiskLevel::Low)]);
        let b = document(vec![clause(
            "Pets incur a penalty at the landlord's sole discretion.",
            RiskLevel::High,
        )]);
        let report = engine().compare(&a, &b);

        let entry = &report.clause_by_clause_comparison[0];
        assert_eq!(entry.clause_type, "Pets");
        assert_eq!(entry.overall_risk, RiskLevel::High);
        assert_eq!(
            entry.difference_text,
            "Document 1 rates this clause Low risk while Document 2 rates it High risk."
        );
        assert_eq!(
            entry.plain_english,
            "The pets clause in Document 2 carries more risk (High) than in Document 1 (Low)."
        );
    }

    #[test]
    fn test_same_amount_falls_through_to_generic() {
        let a = document(vec![clause("Rent is ₹15,000 due on the 1st.", RiskLevel::Low)]);
        let b = document(vec![clause("Rent of ₹15,000 is due by the 5th.", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);

        let entry = &report.clause_by_clause_comparison[0];
        assert_eq!(
            entry.difference_text,
            "Both documents have similar rent clauses with minor variations."
        );
    }

    #[test]
    fn test_residual_and_one_sided_entries() {
        let a = document(vec![
            clause("Rent is ₹15,000.", RiskLevel::Low),
            clause("Parking is provided for one car.", RiskLevel::Medium),
        ]);
        let b = document(vec![clause("Rent is ₹15,000.", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);

        assert_eq!(report.clause_by_clause_comparison.len(), 2);
        let residual = &report.clause_by_clause_comparison[1];
        assert_eq!(residual.clause_type, RESIDUAL_CLAUSE_TYPE);
        assert_eq!(residual.difference_text, "Only present in Document 1");
        assert!(residual.side_b.is_none());
        assert_eq!(residual.overall_risk, RiskLevel::Medium);
    }

    #[test]
    fn test_type_found_only_in_one_document() {
        let a = document(vec![clause("Rent is ₹15,000.", RiskLevel::Low)]);
        let b = document(vec![
            clause("Rent is ₹15,000.", RiskLevel::Low),
            clause("Utilities are paid by the tenant.", RiskLevel::Low),
        ]);
        let report = engine().compare(&a, &b);

        let utilities = report
            .clause_by_clause_comparison
            .iter()
            .find(|e| e.clause_type == "Utilities")
            .unwrap();
        assert!(utilities.side_a.is_none());
        assert_eq!(utilities.difference_text, "Only present in Document 2");
    }

    #[test]
    fn test_empty_document_degrades_to_residuals() {
        let a = document(Vec::new());
        let b = document(vec![
            clause("Rent is ₹15,000.", RiskLevel::Low),
            clause("Signed by both parties.", RiskLevel::Low),
        ]);
        let report = engine().compare(&a, &b);

        assert_eq!(report.clause_by_clause_comparison.len(), 2);
        assert!(report
            .clause_by_clause_comparison
            .iter()
            .all(|e| e.side_a.is_none() && e.difference_text == "Only present in Document 2"));
        assert_eq!(report.clause_count.document_a, 0);
    }

    #[test]
    fn test_similarities() {
        let a = document(vec![clause("The landlord and tenant agree.", RiskLevel::Low)]);
        let b = document(vec![clause("Tenant pays the Landlord.", RiskLevel::Low)]);
        let similarities = detect_similarities(&a, &b);

        assert!(similarities.contains(&"Both documents are rental agreements.".to_string()));
        assert!(similarities.contains(&"Both documents have an overall low risk rating.".to_string()));
        assert!(similarities.contains(&"Both documents address landlord.".to_string()));
        assert!(similarities.contains(&"Both documents address tenant.".to_string()));
        assert!(similarities
            .iter()
            .any(|s| s.starts_with("Both documents have a comparable number of clauses")));
    }

    #[test]
    fn test_similarity_catch_all() {
        let mut a = document(vec![clause("x", RiskLevel::High)]);
        a.document_type = DocumentType::LoanAgreement;
        let b = document((0..5).map(|i| clause(&format!("y{i}"), RiskLevel::Low)).collect());
        assert_eq!(
            detect_similarities(&a, &b),
            vec!["Both documents are legal agreements, but their specific terms differ."]
        );
    }

    #[test]
    fn test_substring_keyword_routes_to_rent_first() {
        // "current" contains "rent"; Rent is tried before Deposit
        let a = document(vec![clause(
            "The deposit of Rs. 40,000 covers the current term.",
            RiskLevel::Low,
        )]);
        let b = document(vec![clause("A deposit of Rs. 20,000 applies.", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);

        let types: Vec<&str> = report
            .clause_by_clause_comparison
            .iter()
            .map(|e| e.clause_type.as_str())
            .collect();
        assert_eq!(types, vec!["Rent", "Deposit"]);
        assert_eq!(
            report.clause_by_clause_comparison[0].difference_text,
            "Only present in Document 1"
        );
    }

    #[test]
    fn test_risk_comparison_summary() {
        let a = document(vec![clause("x", RiskLevel::High)]);
        let b = document(vec![clause("y", RiskLevel::Low)]);
        let report = engine().compare(&a, &b);
        assert_eq!(
            report.risk_comparison.summary,
            "Document 1 carries higher overall risk (High) than Document 2 (Low)."
        );
    }

    #[test]
    fn test_entry_risk() {
        assert_eq!(entry_risk(Some(RiskLevel::Low), Some(RiskLevel::High)), Some(RiskLevel::High));
        assert_eq!(entry_risk(None, Some(RiskLevel::Medium)), Some(RiskLevel::Medium));
        assert_eq!(entry_risk(None, None), None);
    }

    const SNIPPETS: &[&str] = &[
        "rent is ₹15,000",
        "deposit of Rs. 40,000",
        "2 months notice",
        "maintenance by tenant",
        "utilities extra",
        "no pets",
        "sublet forbidden",
        "duration of 11 months",
        "renewal by consent",
        "signatures",
    ];

    fn arb_document() -> impl Strategy<Value = DocumentAnalysis> {
        proptest::collection::vec((0..SNIPPETS.len(), 0..3u8), 0..12).prop_map(|picks| {
            let clauses = picks
                .into_iter()
                .enumerate()
                .map(|(i, (snippet, risk))| {
                    let risk = match risk {
                        0 => RiskLevel::Low,
                        1 => RiskLevel::Medium,
                        _ => RiskLevel::High,
                    };
                    clause(&format!("{} #{i}", SNIPPETS[snippet]), risk)
                })
                .collect();
            document(clauses)
        })
    }

    proptest! {
        /// Every clause of both documents lands in exactly one entry
        #[test]
        fn every_clause_appears_once(a in arb_document(), b in arb_document()) {
            let report = engine().compare(&a, &b);

            let mut seen_a: Vec<&str> = report
                .clause_by_clause_comparison
                .iter()
                .filter_map(|e| e.side_a.as_ref().map(|s| s.clause_text.as_str()))
                .collect();
            let mut seen_b: Vec<&str> = report
                .clause_by_clause_comparison
                .iter()
                .filter_map(|e| e.side_b.as_ref().map(|s| s.clause_text.as_str()))
                .collect();
            let mut expected_a: Vec<&str> = a.clauses.iter().map(|c| c.clause_text.as_str()).collect();
            let mut expected_b: Vec<&str> = b.clauses.iter().map(|c| c.clause_text.as_str()).collect();
            seen_a.sort();
            seen_b.sort();
            expected_a.sort();
            expected_b.sort();
            prop_assert_eq!(seen_a, expected_a);
            prop_assert_eq!(seen_b, expected_b);
        }

        /// Entry risk is the higher of the sides present
        #[test]
        fn entry_risk_is_max_of_sides(a in arb_document(), b in arb_document()) {
            let report = engine().compare(&a, &b);
            for entry in &report.clause_by_clause_comparison {
                let expected = entry_risk(
                    entry.side_a.as_ref().map(|s| s.final_risk),
                    entry.side_b.as_ref().map(|s| s.final_risk),
                );
                prop_assert_eq!(Some(entry.overall_risk), expected);
            }
        }
    }
}
