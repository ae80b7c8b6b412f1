//! Best-effort extraction of structured facts from unstructured text

pub mod json;
pub mod numeric;

pub use json::extract_json_object;
pub use numeric::{extract_amount, extract_notice_period, extract_term_length, Amount, Period};
