// Keyword-weighted risk scoring of a single clause
use std::collections::BTreeSet;

use crate::patterns::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, WEIGHTED_KEYWORD_TABLES};
use shared_types::{RiskLevel, RulesVerdict};

/// Score a clause against the weighted keyword tables
///
/// Every distinct keyword found in the lowercased text adds its table weight
/// once. A score of 6 or more is High, 3 or more is Medium, anything else Low.
pub fn score_clause(text: &str) -> RulesVerdict {
    let text_lower = text.to_lowercase();
    let mut score = 0;
    let mut matched = BTreeSet::new();

    for (keywords, weight) in WEIGHTED_KEYWORD_TABLES {
        for keyword in keywords.iter() {
            if text_lower.contains(keyword) && matched.insert(keyword.to_string()) {
                score += weight;
            }
        }
    }

    RulesVerdict {
        risk_level: level_for_score(score),
        risk_score: score,
        matched_keywords: matched.into_iter().collect(),
    }
}

/// Map a cumulative score onto a risk level
pub fn level_for_score(score: u32) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
