//! Deterministic, keyword-driven clause rules

pub mod risk;

pub use risk::score_clause;
