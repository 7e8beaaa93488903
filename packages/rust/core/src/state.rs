//! Mutable working state threaded through the pipeline stages.

use jobnorm_shared::{ExtractedFields, ExtractionPayload, JobInput, NormalizedJob};

/// Whitelisted field values as individual strings, before joining.
///
/// List-like fields are held as already-validated vectors here; the finalize
/// stage joins them with `", "` for the output record.
#[derive(Debug, Clone, Default)]
pub struct ValidatedFields {
    pub company_name: String,
    pub job_category: String,
    pub job_tags: Vec<String>,
    pub benefits: Vec<String>,
    pub job_type: Vec<String>,
    pub job_region: Vec<String>,
    pub salary: String,
}

/// Everything a single job accumulates on its way through the stages.
///
/// The input record is immutable; each stage only fills in its own section.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    /// The record as received. Never written after construction.
    pub job: JobInput,
    /// Output of the preprocess stage.
    pub payload: ExtractionPayload,
    /// Raw primary-call result, if the call succeeded.
    pub primary: Option<ExtractedFields>,
    /// Raw fallback-call result, if the call was made and succeeded.
    pub fallback: Option<ExtractedFields>,
    /// Per-field merge of primary and fallback (or the all-empty floor).
    pub merged: ExtractedFields,
    /// Output of the validate stage.
    pub validated: ValidatedFields,
    /// Website chosen so far: extracted value, then provided value, then
    /// (after the lookup stage) the directory's answer. Empty means unknown.
    pub company_website: String,
    /// Set by the validate stage when no website source produced a value.
    pub needs_website_lookup: bool,
    /// Derived experience level, or empty when no marker tag was present.
    pub experience_level: String,
}

impl PipelineState {
    pub fn new(job: JobInput) -> Self {
        Self {
            job,
            ..Self::default()
        }
    }

    /// Project the accumulated state into the output record.
    pub fn into_normalized(self) -> NormalizedJob {
        NormalizedJob {
            company_name: self.validated.company_name,
            company_website: self.company_website,
            job_category: self.validated.job_category,
            job_tags: self.validated.job_tags.join(", "),
            benefits: self.validated.benefits.join(", "),
            job_type: self.validated.job_type.join(", "),
            job_region: self.validated.job_region.join(", "),
            salary: self.validated.salary,
            experience_level: self.experience_level,
            error: None,
        }
    }
}
