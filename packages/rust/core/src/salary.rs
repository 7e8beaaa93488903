//! Salary-string scanning for the high-salary rule.

use std::sync::LazyLock;

use regex::Regex;

/// Annual amount at or above which a job is flagged "high salary".
pub const HIGH_SALARY_THRESHOLD: u64 = 100_000;

/// The job-type value appended by the high-salary rule.
pub const HIGH_SALARY_TYPE: &str = "high salary";

// An amount worth reading: either thousand-separated ("120,000") or a bare
// run of five or more digits ("120000"). Short bare numbers are ignored so
// "€90" or hourly rates never trip the flag.
const AMOUNT: &str = r"\d{1,3}(?:,\d{3})+|\d{5,}";
const CURRENCY: &str = r"USD|EUR|GBP|\$|€|£";

static CURRENCY_THEN_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({CURRENCY})\s*({AMOUNT})")).unwrap()
});

static AMOUNT_THEN_CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({AMOUNT})\s*({CURRENCY})")).unwrap()
});

/// Scan a normalized salary string for the first amount in a recognized
/// currency (USD, EUR, GBP — symbol or code). Returns the numeric amount,
/// or `None` when no parseable amount in a recognized currency is present.
///
/// Only the first match is read; in a range like "$120,000–$150,000" that
/// is the lower bound, which is the conservative side for thresholding.
pub fn first_amount(salary: &str) -> Option<u64> {
    let (currency, amount) = if let Some(caps) = CURRENCY_THEN_AMOUNT.captures(salary) {
        (caps.get(1)?.as_str(), caps.get(2)?.as_str())
    } else if let Some(caps) = AMOUNT_THEN_CURRENCY.captures(salary) {
        (caps.get(2)?.as_str(), caps.get(1)?.as_str())
    } else {
        return None;
    };

    if !recognized_currency(currency) {
        return None;
    }

    amount.replace(',', "").parse().ok()
}

fn recognized_currency(token: &str) -> bool {
    matches!(
        token.to_uppercase().as_str(),
        "$" | "€" | "£" | "USD" | "EUR" | "GBP"
    )
}

/// True when the salary string should flag the job as high-salary.
pub fn is_high_salary(salary: &str) -> bool {
    first_amount(salary).is_some_and(|amount| amount >= HIGH_SALARY_THRESHOLD)
}
