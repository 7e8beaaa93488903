//! Wire types for the normalization pipeline.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// StringOrList
// ---------------------------------------------------------------------------

/// A hint field that upstream feeds send either as a plain string or as a
/// list of strings (`"Europe"` vs `["Europe", "UK"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// Flatten to a single comma+space-joined string; empty items dropped.
    pub fn join_comma(&self) -> String {
        match self {
            Self::One(s) => s.trim().to_string(),
            Self::Many(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl Default for StringOrList {
    fn default() -> Self {
        Self::One(String::new())
    }
}

// ---------------------------------------------------------------------------
// JobInput
// ---------------------------------------------------------------------------

/// A raw job-posting record as received from the caller.
///
/// Only `job_description` is required; everything else is an optional hint.
/// Immutable once received — the pipeline never writes back into it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobInput {
    /// Free-text description, possibly containing HTML markup.
    pub job_description: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
    #[serde(default)]
    pub company_linkedin: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Region hint; some feeds send a list here.
    #[serde(default)]
    pub job_region: Option<StringOrList>,
    #[serde(default)]
    pub job_tags: Option<String>,
    /// Employment-type hint; some feeds send a list here.
    #[serde(default)]
    pub job_type: Option<StringOrList>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub job_category: Option<String>,
    #[serde(default)]
    pub focus_keyword: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub published_within_5_days: Option<String>,
}

// ---------------------------------------------------------------------------
// ExtractionPayload
// ---------------------------------------------------------------------------

/// Cleaned, flat payload handed to the generative extraction service.
///
/// Produced by the preprocess stage; every field is a plain string with
/// markup stripped and list hints flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionPayload {
    pub title: String,
    pub description: String,
    pub salary_field: String,
    pub job_region_hint: String,
    pub job_type_hint: String,
    pub provided_company_field: String,
}

// ---------------------------------------------------------------------------
// ExtractedFields
// ---------------------------------------------------------------------------

/// Structured guess returned by a generative service call.
///
/// Every field is advisory; nothing here is trusted until the validate stage
/// clamps it against the closed vocabularies. `Default` (all empty) doubles
/// as the last-resort floor when both service calls fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(default)]
    pub company_name: String,
    /// Filled only when the website is explicitly present in the text.
    #[serde(default)]
    pub company_website: String,
    #[serde(default)]
    pub job_category: String,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub benefits: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub job_tags: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub job_type: Vec<String>,
    #[serde(default, deserialize_with = "string_or_seq")]
    pub job_region: Vec<String>,
    #[serde(default)]
    pub salary: String,
}

/// Deserialize a field the model sometimes returns as a bare string instead
/// of a list. A non-empty string becomes a one-element list.
fn string_or_seq<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Many(Vec<String>),
        One(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Many(items) => Ok(items),
        Raw::One(s) if s.trim().is_empty() => Ok(vec![]),
        Raw::One(s) => Ok(vec![s.trim().to_string()]),
    }
}

// ---------------------------------------------------------------------------
// NormalizedJob
// ---------------------------------------------------------------------------

/// The public output shape produced by the finalize stage.
///
/// All values are strings (possibly empty); list-like fields are
/// comma+space-joined. `error` is set only on total pipeline failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedJob {
    pub company_name: String,
    pub company_website: String,
    pub job_category: String,
    pub job_tags: String,
    pub benefits: String,
    pub job_type: String,
    pub job_region: String,
    pub salary: String,
    pub experience_level: String,
    /// Failure description when the pipeline degraded; omitted otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NormalizedJob {
    /// Build the minimal degraded record for total pipeline failure:
    /// best-effort echo of the supplied company name, everything else empty,
    /// plus the error description.
    pub fn degraded(input: &JobInput, error: impl std::fmt::Display) -> Self {
        Self {
            company_name: input
                .company_name
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}
