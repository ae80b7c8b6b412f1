//! Keyword tables for risk scoring, clause-type matching and similarity detection
//!
//! All matching against these tables is case-insensitive substring matching
//! on lowercased clause text, so every entry here is lowercase.

/// Terms that signal a potentially severe obligation or loss of rights (weight 3)
pub const HIGH_RISK_KEYWORDS: &[&str] = &[
    "penalty",
    "penalties",
    "personal guarantee",
    "indemnify",
    "indemnification",
    "forfeit",
    "liquidated damages",
    "unlimited liability",
    "waive",
    "non-refundable",
    "without notice",
    "sole discretion",
    "irrevocable",
    "joint and several",
    "evict",
];

/// Terms that deserve careful reading (weight 2)
pub const MEDIUM_RISK_KEYWORDS: &[&str] = &[
    "late fee",
    "interest",
    "termination",
    "terminate",
    "lock-in",
    "automatic renewal",
    "auto-renew",
    "escalation",
    "increase",
    "arbitration",
    "jurisdiction",
    "liability",
    "damages",
    "breach",
    "default",
    "deduct",
    "compensation",
    "exclusive",
];

/// Ordinary contractual vocabulary (weight 1)
pub const LOW_RISK_KEYWORDS: &[&str] = &[
    "rent",
    "deposit",
    "maintenance",
    "utilities",
    "payment",
    "notice",
    "renewal",
    "premises",
    "landlord",
    "tenant",
    "month",
];

pub const HIGH_RISK_WEIGHT: u32 = 3;
pub const MEDIUM_RISK_WEIGHT: u32 = 2;
pub const LOW_RISK_WEIGHT: u32 = 1;

/// Score at or above which a clause is High risk
pub const HIGH_RISK_THRESHOLD: u32 = 6;
/// Score at or above which a clause is Medium risk
pub const MEDIUM_RISK_THRESHOLD: u32 = 3;

/// Risk keyword tables paired with their weights, strongest first
pub const WEIGHTED_KEYWORD_TABLES: &[(&[&str], u32)] = &[
    (HIGH_RISK_KEYWORDS, HIGH_RISK_WEIGHT),
    (MEDIUM_RISK_KEYWORDS, MEDIUM_RISK_WEIGHT),
    (LOW_RISK_KEYWORDS, LOW_RISK_WEIGHT),
];

/// Semantic clause types used to pair clauses across two documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseType {
    Rent,
    Deposit,
    Notice,
    Maintenance,
    Utilities,
    Pets,
    Subletting,
    Duration,
    Renewal,
}

impl ClauseType {
    pub fn label(&self) -> &'static str {
        match self {
            ClauseType::Rent => "Rent",
            ClauseType::Deposit => "Deposit",
            ClauseType::Notice => "Notice",
            ClauseType::Maintenance => "Maintenance",
            ClauseType::Utilities => "Utilities",
            ClauseType::Pets => "Pets",
            ClauseType::Subletting => "Subletting",
            ClauseType::Duration => "Duration",
            ClauseType::Renewal => "Renewal",
        }
    }
}

/// Clause-type keyword groups in matching priority order
pub const CLAUSE_TYPE_GROUPS: &[(ClauseType, &[&str])] = &[
    (ClauseType::Rent, &["rent", "rental", "monthly payment"]),
    (ClauseType::Deposit, &["deposit", "security amount"]),
    (ClauseType::Notice, &["notice", "vacate"]),
    (ClauseType::Maintenance, &["maintenance", "repair", "upkeep"]),
    (
        ClauseType::Utilities,
        &["utilities", "utility", "electricity", "water", "gas"],
    ),
    (ClauseType::Pets, &["pet", "animal"]),
    (
        ClauseType::Subletting,
        &["sublet", "sub-let", "sublease", "assign"],
    ),
    (ClauseType::Duration, &["duration", "term of", "period of", "months from"]),
    (ClauseType::Renewal, &["renew", "renewal", "extension"]),
];

/// Named terms whose presence in both documents counts as a similarity
pub const SHARED_VOCABULARY: &[&str] = &[
    "landlord",
    "tenant",
    "renewal",
    "maintenance",
    "utilities",
    "parking",
];

/// Check whether lowercased text contains any keyword of a group
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text_lower.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_lowercase() {
        let all = HIGH_RISK_KEYWORDS
            .iter()
            .chain(MEDIUM_RISK_KEYWORDS)
            .chain(LOW_RISK_KEYWORDS)
            .chain(SHARED_VOCABULARY)
            .chain(CLAUSE_TYPE_GROUPS.iter().flat_map(|(_, group)| group.iter()));
        for keyword in all {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
    }

    #[test]
    fn test_thresholds_are_ordered() {
        assert!(MEDIUM_RISK_THRESHOLD < HIGH_RISK_THRESHOLD);
        assert_eq!(HIGH_RISK_WEIGHT * 2, HIGH_RISK_THRESHOLD);
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("monthly rent is due", &["rent"]));
        assert!(!contains_any("pets are allowed", &["sublet", "assign"]));
    }
}
