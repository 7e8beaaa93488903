//! Stage 4: derive the experience level from range-marker tags.
//!
//! Tags like "1-3 years" are classification markers, not skills; this stage
//! removes them from the tag list and folds them into a single experience
//! level. Markers are matched tolerantly (spacing, dash variants, "yrs",
//! an "of experience" trailer) while everything else passes through.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::state::PipelineState;

/// Experience levels in seniority order; when several markers appear the
/// most senior one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExperienceLevel {
    Junior,
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::MidLevel => "mid-level",
            Self::Senior => "senior",
        }
    }
}

// Trailing "of experience" / "of exp" / "experience" wording.
static TRAILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:of\s+)?(?:experience|exp)\.?$").unwrap());

// Trailing "years" / "year" / "yrs" / "yr".
static YEARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*(?:years?|yrs?)$").unwrap());

// "N-M" with any dash variant and optional spacing, anchored.
static RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s*[-–—]\s*(\d+)$").unwrap());

// "N+" with optional spacing, anchored.
static OPEN_ENDED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s*\+$").unwrap());

/// Classify one tag as an experience marker, or `None` when it is an
/// ordinary tag. Matching is case-insensitive and whitespace-tolerant;
/// only the three known ranges count — "2-4 years" is not a marker.
pub fn marker_level(tag: &str) -> Option<ExperienceLevel> {
    let lowered = tag.trim().to_lowercase();
    let stripped = TRAILER.replace(&lowered, "");
    let stripped = YEARS.replace(stripped.trim_end(), "");
    let core = stripped.trim();

    if let Some(caps) = RANGE.captures(core) {
        return match (&caps[1], &caps[2]) {
            ("1", "3") => Some(ExperienceLevel::Junior),
            ("3", "5") => Some(ExperienceLevel::MidLevel),
            _ => None,
        };
    }

    if let Some(caps) = OPEN_ENDED.captures(core) {
        if &caps[1] == "5" {
            return Some(ExperienceLevel::Senior);
        }
    }

    None
}

/// Partition tags into ordinary tags (order preserved) and the most senior
/// experience level found, as its output string ("" when no marker).
pub fn split_tags_and_level(tags: &[String]) -> (Vec<String>, String) {
    let mut best: Option<ExperienceLevel> = None;
    let mut kept = Vec::with_capacity(tags.len());

    for tag in tags {
        match marker_level(tag) {
            Some(level) => best = best.max(Some(level)),
            None => kept.push(tag.clone()),
        }
    }

    let level = best.map(|l| l.as_str().to_string()).unwrap_or_default();
    (kept, level)
}

/// Apply the derivation to the validated tag list in place.
pub fn run(state: &mut PipelineState) {
    let (kept, level) = split_tags_and_level(&state.validated.job_tags);
    if !level.is_empty() {
        debug!(%level, "experience level derived from tags");
    }
    state.validated.job_tags = kept;
    state.experience_level = level;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn canonical_markers_classify() {
        assert_eq!(marker_level("1-3 years"), Some(ExperienceLevel::Junior));
        assert_eq!(marker_level("3-5 years"), Some(ExperienceLevel::MidLevel));
        assert_eq!(marker_level("5+ years"), Some(ExperienceLevel::Senior));
    }

    #[test]
    fn variants_classify() {
        assert_eq!(marker_level(" 1 - 3 Years "), Some(ExperienceLevel::Junior));
        assert_eq!(marker_level("3–5 yrs"), Some(ExperienceLevel::MidLevel));
        assert_eq!(marker_level("5 + YEARS"), Some(ExperienceLevel::Senior));
        assert_eq!(
            marker_level("3-5 years of experience"),
            Some(ExperienceLevel::MidLevel)
        );
        assert_eq!(marker_level("5+ yrs of exp"), Some(ExperienceLevel::Senior));
    }

    #[test]
    fn near_misses_are_ordinary_tags() {
        assert_eq!(marker_level("2-4 years"), None);
        assert_eq!(marker_level("iso 27001-2013"), None);
        assert_eq!(marker_level("Python"), None);
        assert_eq!(marker_level("years"), None);
        assert_eq!(marker_level(""), None);
    }

    #[test]
    fn split_removes_markers_and_takes_most_senior() {
        let (kept, level) =
            split_tags_and_level(&tags(&["Python", " 1 - 3 Years ", "3–5 yrs", "Remote"]));
        assert_eq!(kept, tags(&["Python", "Remote"]));
        assert_eq!(level, "mid-level");
    }

    #[test]
    fn senior_wins_over_everything() {
        let (kept, level) =
            split_tags_and_level(&tags(&["5 + YEARS", "python", "iso 27001-2013", "1-3 years"]));
        assert_eq!(kept, tags(&["python", "iso 27001-2013"]));
        assert_eq!(level, "senior");
    }

    #[test]
    fn no_marker_yields_empty_level() {
        let (kept, level) = split_tags_and_level(&tags(&["Rust", "docker"]));
        assert_eq!(kept, tags(&["Rust", "docker"]));
        assert_eq!(level, "");
    }
}
