//! Glossary of defined terms referenced by analyzed clauses
//!
//! The dictionary is curated: candidates that are not in it are skipped.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use shared_types::{ClauseAnalysis, GlossaryEntry, TermCategory};

/// (term, meaning, category)
const DEFINITIONS: &[(&str, &str, TermCategory)] = &[
    ("Arbitration", "Settling a dispute through a private arbitrator instead of a court.", TermCategory::Legal),
    ("Breach", "Failure by a party to do what the contract requires.", TermCategory::Legal),
    ("Compensation", "Money paid to make up for a loss or for services.", TermCategory::Financial),
    ("Default", "Failure to meet a contractual obligation, typically a payment.", TermCategory::Legal),
    ("Deposit", "Money held by the landlord as security against damage or unpaid rent.", TermCategory::Financial),
    ("Escalation", "A scheduled increase in rent or fees during the contract.", TermCategory::Financial),
    ("Eviction", "Legal removal of a tenant from the premises.", TermCategory::Termination),
    ("Evict", "To legally remove a tenant from the premises.", TermCategory::Termination),
    ("Forfeit", "To lose a right or money as a consequence of breaking the contract.", TermCategory::Financial),
    ("Indemnify", "To compensate another party for losses they suffer.", TermCategory::Legal),
    ("Indemnification", "An obligation to cover another party's losses or legal costs.", TermCategory::Legal),
    ("Irrevocable", "Cannot be cancelled or withdrawn once given.", TermCategory::Legal),
    ("Joint and Several", "Each signer can be held responsible for the full obligation.", TermCategory::Obligation),
    ("Jurisdiction", "The courts or region whose law governs disputes.", TermCategory::Legal),
    ("Landlord", "The owner who rents out the property.", TermCategory::Party),
    ("Late Fee", "A charge added when a payment is made after its due date.", TermCategory::Financial),
    ("Liability", "Legal responsibility for losses, damages or debts.", TermCategory::Legal),
    ("Liquidated Damages", "A fixed amount agreed in advance as compensation for a breach.", TermCategory::Financial),
    ("Lock-in", "A period during which the contract cannot be ended without penalty.", TermCategory::Termination),
    ("Maintenance", "Upkeep and repair of the property and its fixtures.", TermCategory::Property),
    ("Notice", "Formal written communication required before an action takes effect.", TermCategory::Termination),
    ("Non-refundable", "Money that will not be returned under any circumstances.", TermCategory::Financial),
    ("Penalty", "A charge imposed for breaking a term of the contract.", TermCategory::Financial),
    ("Personal Guarantee", "A promise to pay personally if the main party does not.", TermCategory::Obligation),
    ("Premises", "The property or part of a property covered by the contract.", TermCategory::Property),
    ("Renewal", "Extending the contract for a further period.", TermCategory::Termination),
    ("Rent", "Periodic payment made for the use of the property.", TermCategory::Financial),
    ("Sole Discretion", "One party may decide alone, without needing the other's agreement.", TermCategory::Obligation),
    ("Sublet", "Renting all or part of the property to another person.", TermCategory::Property),
    ("Tenant", "The person who rents and occupies the property.", TermCategory::Party),
    ("Termination", "Ending the contract before or at the end of its term.", TermCategory::Termination),
    ("Utilities", "Services such as electricity, water and gas.", TermCategory::Property),
    ("Waive", "To voluntarily give up a right.", TermCategory::Legal),
];

lazy_static! {
    /// Lowercased term -> entry
    pub static ref DICTIONARY: HashMap<String, GlossaryEntry> = DEFINITIONS
        .iter()
        .map(|(term, meaning, category)| {
            (
                term.to_lowercase(),
                GlossaryEntry {
                    term: term.to_string(),
                    meaning: meaning.to_string(),
                    category: *category,
                },
            )
        })
        .collect();
}

/// Look up a term case-insensitively
pub fn lookup(term: &str) -> Option<&'static GlossaryEntry> {
    DICTIONARY.get(&term.trim().to_lowercase())
}

/// Collect dictionary entries for every term the clauses reference
///
/// Each clause contributes its important terms first, then its matched
/// keywords. The first occurrence of a term wins; output is sorted by term.
pub fn build_glossary(clauses: &[ClauseAnalysis]) -> Vec<GlossaryEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    let candidates = clauses
        .iter()
        .flat_map(|clause| clause.important_terms.iter().chain(clause.keywords.iter()));

    for candidate in candidates {
        if let Some(entry) = lookup(candidate) {
            if seen.insert(entry.term.to_lowercase()) {
                entries.push(entry.clone());
            }
        }
    }

    entries.sort_by(|a, b| a.term.to_lowercase().cmp(&b.term.to_lowercase()));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::RiskLevel;

    fn clause(important_terms: &[&str], keywords: &[&str]) -> ClauseAnalysis {
        ClauseAnalysis {
            page: 1,
            clause_text: String::new(),
            explanation: String::new(),
            risk_from_rules: RiskLevel::Low,
            risk_from_external: RiskLevel::Low,
            final_risk: RiskLevel::Low,
            reason: String::new(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            important_terms: important_terms.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("PERSONAL guarantee").unwrap().term, "Personal Guarantee");
        assert!(lookup("spaceship").is_none());
    }

    #[test]
    fn test_build_glossary_dedupes_and_sorts() {
        let clauses = vec![
            clause(&["Rent", "Quantum Clause"], &["rent", "penalty"]),
            clause(&["DEPOSIT"], &["penalty", "tenant"]),
        ];
        let terms: Vec<String> = build_glossary(&clauses)
            .into_iter()
            .map(|e| e.term)
            .collect();
        assert_eq!(terms, vec!["Deposit", "Penalty", "Rent", "Tenant"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_glossary(&[]).is_empty());
    }

    #[test]
    fn test_every_rules_keyword_with_definition_resolves() {
        for keyword in ["penalty", "personal guarantee", "late fee", "lock-in", "waive"] {
            assert!(lookup(keyword).is_some(), "{keyword} should be defined");
        }
    }

    proptest! {
        #[test]
        fn glossary_terms_unique_and_sorted(
            picks in proptest::collection::vec(0usize..40, 0..30),
            upper in any::<bool>(),
        ) {
            let names: Vec<String> = picks
                .iter()
                .map(|i| {
                    let term = DEFINITIONS.get(*i).map(|d| d.0).unwrap_or("unknown term");
                    if upper { term.to_uppercase() } else { term.to_string() }
                })
                .collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let glossary = build_glossary(&[clause(&refs, &refs)]);

            let lowered: Vec<String> = glossary.iter().map(|e| e.term.to_lowercase()).collect();
            let mut expected = lowered.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(lowered, expected);
        }
    }
}
