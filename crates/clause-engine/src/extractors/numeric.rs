// Numeric fact extraction from clause prose
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Amount marked with a currency symbol: "₹15,000", "$ 1,200.50"
    static ref CURRENCY_SYMBOL_AMOUNT: Regex =
        Regex::new(r"[₹$€£]\s*(\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?)").unwrap();
    /// Amount marked with rupee abbreviations: "Rs. 15,000", "INR 20000"
    static ref RUPEE_MARKED_AMOUNT: Regex =
        Regex::new(r"(?i)\b(?:rs\.?|inr)\s*(\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?)").unwrap();
    /// Bare run of four or more digits, optionally with thousands separators
    static ref BARE_AMOUNT: Regex =
        Regex::new(r"\b(\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d{4,}(?:\.\d+)?)\b").unwrap();
    /// "2 months notice", "30 days' written notice"
    static ref PERIOD_BEFORE_NOTICE: Regex = Regex::new(
        r"(?i)(\d+)\s*(months?|days?|weeks?)(?:'s?)?\s+(?:(?:prior|advance|written)\s+)*notice"
    )
    .unwrap();
    /// "notice period is 1 month", "notice of 30 days"
    static ref NOTICE_BEFORE_PERIOD: Regex = Regex::new(
        r"(?i)notice(?:\s+period)?\s+(?:(?:of|is|shall\s+be|will\s+be)\s+)*(\d+)\s*(months?|days?|weeks?)"
    )
    .unwrap();
    /// "11 months", "2 years"
    static ref TERM_LENGTH: Regex = Regex::new(r"(?i)(\d+)\s*(months?|years?)").unwrap();
}

/// A money amount found in text, keeping the wording it was written with
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub display: String,
}

/// A length of time found in text, normalized to days for comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub days: u32,
    pub display: String,
}

/// Extract the first money amount, trying the most specific pattern first
///
/// Precedence: currency symbol, then "Rs."/"INR", then (when `permissive`)
/// a bare digit run that does not look like a calendar year.
pub fn extract_amount(text: &str, permissive: bool) -> Option<Amount> {
    if let Some(amount) = first_amount(&CURRENCY_SYMBOL_AMOUNT, text) {
        return Some(amount);
    }
    if let Some(amount) = first_amount(&RUPEE_MARKED_AMOUNT, text) {
        return Some(amount);
    }
    if !permissive {
        return None;
    }

    BARE_AMOUNT.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let value = parse_number(caps.get(1)?.as_str())?;
        if looks_like_year(whole.as_str(), value) {
            return None;
        }
        Some(Amount {
            value,
            display: whole.as_str().to_string(),
        })
    })
}

/// Extract a notice period such as "1 month" or "30 days"
pub fn extract_notice_period(text: &str) -> Option<Period> {
    [&*PERIOD_BEFORE_NOTICE, &*NOTICE_BEFORE_PERIOD]
        .iter()
        .find_map(|re| {
            let caps = re.captures(text)?;
            period_from(caps.get(1)?.as_str(), caps.get(2)?.as_str())
        })
}

/// Extract a contract term length such as "11 months" or "2 years"
pub fn extract_term_length(text: &str) -> Option<Period> {
    let caps = TERM_LENGTH.captures(text)?;
    period_from(caps.get(1)?.as_str(), caps.get(2)?.as_str())
}

fn first_amount(re: &Regex, text: &str) -> Option<Amount> {
    re.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        Some(Amount {
            value: parse_number(caps.get(1)?.as_str())?,
            display: whole.as_str().trim().to_string(),
        })
    })
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

fn looks_like_year(raw: &str, value: f64) -> bool {
    raw.len() == 4 && !raw.contains(',') && (1900.0..=2099.0).contains(&value)
}

fn period_from(count: &str, unit: &str) -> Option<Period> {
    let count: u32 = count.parse().ok()?;
    let unit_lower = unit.to_lowercase();
    let days_per_unit = if unit_lower.starts_with("year") {
        365
    } else if unit_lower.starts_with("month") {
        30
    } else if unit_lower.starts_with("week") {
        7
    } else {
        1
    };

    Some(Period {
        days: count.saturating_mul(days_per_unit),
        display: format!("{} {}", count, unit_lower),
    })
}
