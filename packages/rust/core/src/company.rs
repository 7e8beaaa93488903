//! Company-name plausibility checks and shape normalization.

/// Suffixes that betray a sentence fragment rather than a company name
/// ("Acme is", "We are hiring", ...). Checked case-insensitively.
const FRAGMENT_ENDINGS: &[&str] = &[
    " are", " is", " we", " hiring", " expanding", " growing", ":", ";",
];

/// Maximum plausible length for a company name, in characters.
const MAX_NAME_CHARS: usize = 100;

/// True when the candidate looks like an actual company name: non-empty,
/// within length bounds, contains at least one ASCII letter, and does not
/// end in a sentence-fragment suffix.
pub fn is_plausible_name(candidate: &str) -> bool {
    let name = candidate.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return false;
    }
    if !name.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    let lowered = name.to_lowercase();
    !FRAGMENT_ENDINGS
        .iter()
        .any(|ending| lowered.ends_with(ending))
}

/// Normalize spelled-out dots ("acme-dot-io", "acme dot io") to real dots
/// and uppercase the first character. Idempotent on already-clean names.
pub fn normalize_shape(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }

    let dotted = name
        .replace("-dot-", ".")
        .replace(" dot ", ".")
        .replace(" dot-", ".");

    let mut chars = dotted.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(is_plausible_name("Acme"));
        assert!(is_plausible_name("Fish & Chips Ltd."));
        assert!(is_plausible_name("37signals"));
    }

    #[test]
    fn rejects_sentence_fragments() {
        assert!(!is_plausible_name("Acme is"));
        assert!(!is_plausible_name("At Acme we"));
        assert!(!is_plausible_name("We are hiring"));
        assert!(!is_plausible_name("Join our team:"));
        assert!(!is_plausible_name("ACME IS"));
    }

    #[test]
    fn rejects_empty_letterless_and_overlong() {
        assert!(!is_plausible_name(""));
        assert!(!is_plausible_name("   "));
        assert!(!is_plausible_name("12345 ---"));
        assert!(!is_plausible_name(&"x".repeat(101)));
        assert!(is_plausible_name(&"x".repeat(100)));
    }

    #[test]
    fn normalizes_spelled_out_dots() {
        assert_eq!(normalize_shape("acme-dot-io"), "Acme.io");
        assert_eq!(normalize_shape("acme dot io"), "Acme.io");
        assert_eq!(normalize_shape("acme dot-io"), "Acme.io");
    }

    #[test]
    fn uppercases_first_char_only() {
        assert_eq!(normalize_shape("acme corp"), "Acme corp");
        assert_eq!(normalize_shape("Acme Corp"), "Acme Corp");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_shape("acme-dot-io");
        assert_eq!(normalize_shape(&once), once);
        assert_eq!(normalize_shape(""), "");
    }
}
