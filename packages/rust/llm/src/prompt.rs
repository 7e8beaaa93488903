//! Prompt construction for the extraction call.
//!
//! The system prompt pins the model to the closed vocabularies; the user
//! message carries the payload JSON plus the controlled lists rendered
//! verbatim, so whitelist phrasing reaches the model exactly as validated.

use jobnorm_shared::{ExtractionPayload, Result};
use serde_json::json;

/// System instructions for the structured extraction call.
pub const SYSTEM_PROMPT: &str = "\
You extract structured job info and classify into CLOSED SETS. \
Return ONLY valid JSON for the provided schema.
Guidelines:
- company_name: exact employer/brand (plain text, no URL). If unknown, return empty string.
- company_website: if explicitly present in the text, return it as a URL, else empty string.
- job_category: choose ONE from Job Categories or empty string if unclear (title has priority).
- job_tags: choose ONLY items that EXACTLY match the Job Tags whitelist (verbatim strings).
- benefits: choose ONLY items that EXACTLY match the Job Benefits whitelist (verbatim strings).

Benefits mapping (map common phrases to the EXACT whitelist string):
- remote-first, fully remote, distributed, work from anywhere -> 'work from anywhere policy'
- flexible hours, flexible schedule -> 'Flexible Schedule'
- PTO, paid time off, vacation days -> 'Unlimited Time Off'
- health/dental/vision coverage, medical insurance -> 'Health insurance'
- parental/maternity/paternity leave -> 'parental leave'
- equity, stock options, RSUs -> 'Equity / Stocks'
- learning/training budget, professional development -> 'professional development allowance'
- mental health, therapy support -> 'mental health support'
- coworking stipend -> 'coworking budget'
- home office stipend/equipment budget -> 'home-office budget'

- job_type: choose ONLY items from the Job Types whitelist; map synonyms from hints/description \
(e.g., 'Full time'/'FT' -> 'full-time'). Include multiple if explicitly present.
- job_region: choose ONE OR MORE from Job Regions if explicitly mentioned in hints or text; otherwise empty.
- salary: return a normalized string based on the text: \
convert 'k' to full numbers with thousand separators (e.g., '90k' -> '90,000'); \
keep the currency symbol/code; \
ranges as '£90,000–£120,000'; \
lower bounds (e.g., 'from £90k') as '£90,000+'; \
drop non-monetary add-ons like '+ bonus' or 'plus benefits'. If unknown, return empty string.
Return JSON with keys: company_name, company_website, job_category, benefits[], job_tags[], job_type[], job_region[], salary.";

/// Build the user message: payload JSON followed by the controlled lists.
pub fn user_prompt(payload: &ExtractionPayload) -> Result<String> {
    let job_json = serde_json::to_string(payload)?;

    Ok(format!(
        "INPUT (free text + hints):\n{job_json}\n\n\
         CONTROLLED LISTS\n\
         - Job Categories: {categories}\n\
         - Job Types: {types}\n\
         - Job Tags: {tags}\n\
         - Job Benefits: {benefits}\n\
         - Job Regions: {regions}\n",
        categories = serde_json::to_string(jobnorm_vocab::JOB_CATEGORIES)?,
        types = serde_json::to_string(jobnorm_vocab::JOB_TYPES)?,
        tags = serde_json::to_string(jobnorm_vocab::JOB_TAGS)?,
        benefits = serde_json::to_string(jobnorm_vocab::BENEFITS)?,
        regions = serde_json::to_string(jobnorm_vocab::JOB_REGIONS)?,
    ))
}

/// Strict JSON schema for the response format, matching [`jobnorm_shared::ExtractedFields`].
pub fn response_schema() -> serde_json::Value {
    let string_field = json!({ "type": "string" });
    let list_field = json!({ "type": "array", "items": { "type": "string" } });

    json!({
        "type": "object",
        "properties": {
            "company_name": string_field,
            "company_website": string_field,
            "job_category": string_field,
            "benefits": list_field,
            "job_tags": list_field,
            "job_type": list_field,
            "job_region": list_field,
            "salary": string_field,
        },
        "required": [
            "company_name", "company_website", "job_category", "benefits",
            "job_tags", "job_type", "job_region", "salary"
        ],
        "additionalProperties": false
    })
}
