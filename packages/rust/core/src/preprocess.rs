//! Stage 1: clean the raw record into a flat extraction payload.

use jobnorm_shared::ExtractionPayload;
use tracing::debug;

use crate::state::PipelineState;
use crate::text::strip_markup;

/// Build the extraction payload from the raw record: strip markup from the
/// description, trim the scalar hints, and flatten list-valued hints to
/// comma-joined strings. Missing fields become empty strings.
pub fn run(state: &mut PipelineState) {
    let job = &state.job;

    let opt = |value: &Option<String>| -> String {
        value.as_deref().unwrap_or_default().trim().to_string()
    };

    state.payload = ExtractionPayload {
        title: opt(&job.job_title),
        description: strip_markup(&job.job_description),
        salary_field: opt(&job.salary),
        job_region_hint: job
            .job_region
            .as_ref()
            .map(|r| r.join_comma())
            .unwrap_or_default(),
        job_type_hint: job
            .job_type
            .as_ref()
            .map(|t| t.join_comma())
            .unwrap_or_default(),
        provided_company_field: opt(&job.company_name),
    };

    debug!(
        description_len = state.payload.description.len(),
        has_company = !state.payload.provided_company_field.is_empty(),
        "payload prepared"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobnorm_shared::{JobInput, StringOrList};

    #[test]
    fn builds_payload_from_full_input() {
        let mut state = PipelineState::new(JobInput {
            job_description: "<p>Build <b>things</b></p>".into(),
            job_title: Some("  Engineer  ".into()),
            company_name: Some(" Acme ".into()),
            salary: Some("€90k".into()),
            job_region: Some(StringOrList::Many(vec!["Europe".into(), "UK".into()])),
            job_type: Some(StringOrList::One("full-time".into())),
            ..JobInput::default()
        });
        run(&mut state);

        assert_eq!(state.payload.title, "Engineer");
        assert_eq!(state.payload.description, "Build things");
        assert_eq!(state.payload.provided_company_field, "Acme");
        assert_eq!(state.payload.job_region_hint, "Europe, UK");
        assert_eq!(state.payload.job_type_hint, "full-time");
        assert_eq!(state.payload.salary_field, "€90k");
    }

    #[test]
    fn missing_fields_become_empty_strings() {
        let mut state = PipelineState::new(JobInput {
            job_description: "plain text".into(),
            ..JobInput::default()
        });
        run(&mut state);

        assert_eq!(state.payload.description, "plain text");
        assert_eq!(state.payload.title, "");
        assert_eq!(state.payload.job_region_hint, "");
        assert_eq!(state.payload.provided_company_field, "");
    }
}
