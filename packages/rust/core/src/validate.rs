//! Stage 3: clamp the merged guess to the closed vocabularies.
//!
//! Nothing from the model is trusted: every classification field is filtered
//! to exact whitelist membership, the company name is checked for
//! plausibility (falling back to the caller-provided name), and the salary
//! string drives the high-salary rule. Out-of-vocabulary values are dropped
//! silently — filtering is the normal case, not an error.

use tracing::debug;

use jobnorm_vocab::{
    BENEFITS, JOB_CATEGORIES, JOB_REGIONS, JOB_TAGS, JOB_TYPES, validate_many, validate_one,
};

use crate::company;
use crate::salary;
use crate::state::{PipelineState, ValidatedFields};

pub fn run(state: &mut PipelineState) {
    let merged = &state.merged;

    // Company: extracted name must look like an actual name, otherwise use
    // whatever the caller provided. Either way the shape gets normalized.
    let provided = state
        .job
        .company_name
        .as_deref()
        .unwrap_or_default()
        .trim();
    let candidate = merged.company_name.trim();
    let chosen = if company::is_plausible_name(candidate) {
        candidate
    } else {
        if !candidate.is_empty() {
            debug!(%candidate, "extracted company name rejected, using provided");
        }
        provided
    };
    let company_name = company::normalize_shape(chosen);

    let job_category = validate_one(merged.job_category.trim(), JOB_CATEGORIES);
    let benefits = validate_many(merged.benefits.iter().cloned(), BENEFITS);
    let job_tags = validate_many(merged.job_tags.iter().cloned(), JOB_TAGS);
    let mut job_type = validate_many(merged.job_type.iter().cloned(), JOB_TYPES);
    let job_region = validate_many(merged.job_region.iter().cloned(), JOB_REGIONS);

    // Salary passes through as text; the only interpretation is the
    // high-salary flag, appended at most once.
    let salary_text = merged.salary.trim().to_string();
    if salary::is_high_salary(&salary_text)
        && !job_type.iter().any(|t| t == salary::HIGH_SALARY_TYPE)
    {
        job_type.push(salary::HIGH_SALARY_TYPE.to_string());
    }

    state.validated = ValidatedFields {
        company_name,
        job_category,
        job_tags,
        benefits,
        job_type,
        job_region,
        salary: salary_text,
    };

    // Website preference: extracted value, then the caller-provided one.
    // Only when both are empty does the lookup stage get involved.
    let extracted_site = merged.company_website.trim();
    let provided_site = state
        .job
        .company_website
        .as_deref()
        .unwrap_or_default()
        .trim();
    state.company_website = if !extracted_site.is_empty() {
        extracted_site.to_string()
    } else {
        provided_site.to_string()
    };
    state.needs_website_lookup = state.company_website.is_empty();
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobnorm_shared::{ExtractedFields, JobInput};

    fn state_with(merged: ExtractedFields, job: JobInput) -> PipelineState {
        let mut state = PipelineState::new(job);
        state.merged = merged;
        state
    }

    #[test]
    fn whitelists_clamp_every_list_field() {
        let merged = ExtractedFields {
            company_name: "Acme".into(),
            job_category: "Engineering".into(),
            benefits: vec!["Health insurance".into(), "Free snacks".into()],
            job_tags: vec!["Rust".into(), "Cobol".into(), "Rust".into()],
            job_type: vec!["full-time".into(), "permanent".into()],
            job_region: vec!["Europe".into(), "Mars".into()],
            ..ExtractedFields::default()
        };
        let mut state = state_with(merged, JobInput::default());
        run(&mut state);

        assert_eq!(state.validated.job_category, "Engineering");
        assert_eq!(state.validated.benefits, vec!["Health insurance"]);
        assert_eq!(state.validated.job_tags, vec!["Rust"]);
        assert_eq!(state.validated.job_type, vec!["full-time"]);
        assert_eq!(state.validated.job_region, vec!["Europe"]);
    }

    #[test]
    fn out_of_vocabulary_category_is_dropped() {
        let merged = ExtractedFields {
            job_category: "Rocket Science".into(),
            ..ExtractedFields::default()
        };
        let mut state = state_with(merged, JobInput::default());
        run(&mut state);
        assert_eq!(state.validated.job_category, "");
    }

    #[test]
    fn fragment_company_name_falls_back_to_provided() {
        let merged = ExtractedFields {
            company_name: "Acme is".into(),
            ..ExtractedFields::default()
        };
        let job = JobInput {
            company_name: Some("acme-dot-io".into()),
            ..JobInput::default()
        };
        let mut state = state_with(merged, job);
        run(&mut state);
        assert_eq!(state.validated.company_name, "Acme.io");
    }

    #[test]
    fn plausible_extracted_name_wins_over_provided() {
        let merged = ExtractedFields {
            company_name: "Acme GmbH".into(),
            ..ExtractedFields::default()
        };
        let job = JobInput {
            company_name: Some("Old Name".into()),
            ..JobInput::default()
        };
        let mut state = state_with(merged, job);
        run(&mut state);
        assert_eq!(state.validated.company_name, "Acme GmbH");
    }

    #[test]
    fn high_salary_appends_type_once() {
        let merged = ExtractedFields {
            salary: "$120,000–$150,000".into(),
            job_type: vec!["full-time".into(), "high salary".into()],
            ..ExtractedFields::default()
        };
        let mut state = state_with(merged, JobInput::default());
        run(&mut state);
        assert_eq!(state.validated.job_type, vec!["full-time", "high salary"]);
    }

    #[test]
    fn below_threshold_salary_does_not_flag() {
        let merged = ExtractedFields {
            salary: "€90,000+".into(),
            job_type: vec!["full-time".into()],
            ..ExtractedFields::default()
        };
        let mut state = state_with(merged, JobInput::default());
        run(&mut state);
        assert_eq!(state.validated.job_type, vec!["full-time"]);
        assert_eq!(state.validated.salary, "€90,000+");
    }

    #[test]
    fn website_preference_and_lookup_gate() {
        // Extracted website wins.
        let merged = ExtractedFields {
            company_website: "https://acme.io".into(),
            ..ExtractedFields::default()
        };
        let job = JobInput {
            company_website: Some("https://old.example".into()),
            ..JobInput::default()
        };
        let mut state = state_with(merged, job);
        run(&mut state);
        assert_eq!(state.company_website, "https://acme.io");
        assert!(!state.needs_website_lookup);

        // No website anywhere: lookup requested.
        let mut state = state_with(ExtractedFields::default(), JobInput::default());
        run(&mut state);
        assert_eq!(state.company_website, "");
        assert!(state.needs_website_lookup);
    }

    #[test]
    fn validation_is_idempotent() {
        let merged = ExtractedFields {
            company_name: "Acme".into(),
            job_category: "Data".into(),
            job_tags: vec!["Python".into(), "made-up".into()],
            job_type: vec!["full-time".into()],
            salary: "£110,000".into(),
            ..ExtractedFields::default()
        };
        let mut state = state_with(merged, JobInput::default());
        run(&mut state);
        let first = state.validated.clone();

        // Feed the validated output back through as if it were a fresh guess.
        let again = ExtractedFields {
            company_name: first.company_name.clone(),
            job_category: first.job_category.clone(),
            benefits: first.benefits.clone(),
            job_tags: first.job_tags.clone(),
            job_type: first.job_type.clone(),
            job_region: first.job_region.clone(),
            salary: first.salary.clone(),
            company_website: String::new(),
        };
        let mut state = state_with(again, JobInput::default());
        run(&mut state);

        assert_eq!(state.validated.job_tags, first.job_tags);
        assert_eq!(state.validated.job_type, first.job_type);
        assert_eq!(state.validated.job_category, first.job_category);
        assert_eq!(state.validated.salary, first.salary);
    }
}
