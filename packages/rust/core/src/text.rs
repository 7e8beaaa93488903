//! Markup stripping and whitespace normalization for free-text fields.

use scraper::Html;

/// Strip HTML markup from a text field and collapse runs of whitespace
/// (including newlines and non-breaking spaces from markup) to single
/// spaces. Plain text passes through with only whitespace normalization.
pub fn strip_markup(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(text);
    let extracted: String = fragment
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");

    collapse_whitespace(&extracted)
}

/// Collapse any run of Unicode whitespace to a single ASCII space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
