//! Stage 2: generative extraction with primary/fallback degradation.
//!
//! The primary model is asked first. The fallback model is consulted when
//! the primary call fails outright or leaves key fields empty; results are
//! then merged per field with the primary taking precedence. When both
//! calls fail, the stage still succeeds with the all-empty floor — a failed
//! model call is routine, not a pipeline error.
//!
//! A retry loop with exponential backoff wraps the whole attempt, but only
//! for plumbing errors. Model-call failures are absorbed by the degradation
//! ladder and never trigger a retry; deterministic plumbing faults (bad
//! config, serialization bugs) fail fast on the first attempt.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use tracing::{debug, instrument, warn};

use jobnorm_llm::JobExtractor;
use jobnorm_shared::{ExtractedFields, ExtractionPayload, JobNormError, Result};

/// Initial backoff delay between plumbing-error retries; doubles each time.
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// What the extraction stage produced.
#[derive(Debug, Clone, Default)]
pub struct ExtractOutcome {
    pub primary: Option<ExtractedFields>,
    pub fallback: Option<ExtractedFields>,
    pub merged: ExtractedFields,
}

/// True when any of the fields worth a second opinion is still empty.
pub fn has_gaps(fields: &ExtractedFields) -> bool {
    fields.company_name.trim().is_empty()
        || fields.job_category.trim().is_empty()
        || fields.salary.trim().is_empty()
        || fields.benefits.is_empty()
        || fields.job_tags.is_empty()
        || fields.job_type.is_empty()
        || fields.job_region.is_empty()
}

/// Merge two structured guesses per field, primary winning.
///
/// Scalars take the first non-empty trimmed value; list fields are taken
/// wholesale from the first non-empty list (never interleaved, so each list
/// stays internally consistent with the model that produced it).
pub fn merge_fields(primary: &ExtractedFields, fallback: &ExtractedFields) -> ExtractedFields {
    let scalar = |a: &str, b: &str| -> String {
        let a = a.trim();
        if a.is_empty() { b.trim().to_string() } else { a.to_string() }
    };
    let list = |a: &[String], b: &[String]| -> Vec<String> {
        if a.is_empty() { b.to_vec() } else { a.to_vec() }
    };

    ExtractedFields {
        company_name: scalar(&primary.company_name, &fallback.company_name),
        company_website: scalar(&primary.company_website, &fallback.company_website),
        job_category: scalar(&primary.job_category, &fallback.job_category),
        benefits: list(&primary.benefits, &fallback.benefits),
        job_tags: list(&primary.job_tags, &fallback.job_tags),
        job_type: list(&primary.job_type, &fallback.job_type),
        job_region: list(&primary.job_region, &fallback.job_region),
        salary: scalar(&primary.salary, &fallback.salary),
    }
}

/// A failure of the model call itself, absorbed by the degradation ladder.
/// Anything else propagates to the retry wrapper and ultimately degrades
/// the whole record.
fn is_call_failure(error: &JobNormError) -> bool {
    matches!(error, JobNormError::Llm(_) | JobNormError::Network(_))
}

/// Deterministic faults that cannot succeed on retry.
fn is_permanent(error: &JobNormError) -> bool {
    matches!(
        error,
        JobNormError::Config { .. } | JobNormError::Serialization(_)
    )
}

/// Run the extraction stage once: primary call, gap check, optional
/// fallback call, merge.
async fn extract_once<E: JobExtractor>(
    primary_client: &E,
    fallback_client: &E,
    payload: &ExtractionPayload,
) -> Result<ExtractOutcome> {
    let primary = match primary_client.extract(payload).await {
        Ok(fields) => Some(fields),
        Err(e) if is_call_failure(&e) => {
            warn!(error = %e, "primary extraction failed");
            None
        }
        Err(e) => return Err(e),
    };

    let needs_fallback = match &primary {
        Some(fields) => has_gaps(fields),
        None => true,
    };

    let fallback = if needs_fallback {
        match fallback_client.extract(payload).await {
            Ok(fields) => Some(fields),
            Err(e) if is_call_failure(&e) => {
                warn!(error = %e, "fallback extraction failed");
                None
            }
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let merged = match (&primary, &fallback) {
        (Some(p), Some(f)) => merge_fields(p, f),
        (Some(p), None) => p.clone(),
        (None, Some(f)) => f.clone(),
        // Both calls failed: all-empty floor, still a success.
        (None, None) => ExtractedFields::default(),
    };

    debug!(
        primary_ok = primary.is_some(),
        fallback_used = fallback.is_some(),
        "extraction stage complete"
    );

    Ok(ExtractOutcome {
        primary,
        fallback,
        merged,
    })
}

/// Run the extraction stage, retrying plumbing errors up to `max_attempts`
/// total attempts with exponential backoff.
#[instrument(skip_all)]
pub async fn run<E: JobExtractor>(
    primary_client: &E,
    fallback_client: &E,
    payload: &ExtractionPayload,
    max_attempts: u32,
) -> Result<ExtractOutcome> {
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(INITIAL_RETRY_DELAY)
        .with_multiplier(2.0)
        .with_max_elapsed_time(None)
        .build();

    let attempts = AtomicU32::new(0);

    backoff::future::retry(policy, || async {
        let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
        extract_once(primary_client, fallback_client, payload)
            .await
            .map_err(|e| {
                if is_permanent(&e) || attempt >= max_attempts.max(1) {
                    backoff::Error::permanent(e)
                } else {
                    warn!(attempt, error = %e, "extraction attempt failed, retrying");
                    backoff::Error::transient(e)
                }
            })
    })
    .await
}
