//! The end-to-end normalization pipeline.
//!
//! Stages run in a fixed order: preprocess, extract, validate, derive
//! experience, optional website lookup, finalize. `normalize` never fails —
//! any error that escapes the stages becomes a degraded record with the
//! failure description in its `error` field.

use tracing::{debug, error, instrument, warn};

use jobnorm_directory::CompanyDirectory;
use jobnorm_llm::JobExtractor;
use jobnorm_shared::{JobInput, NormalizedJob, Result};

use crate::state::PipelineState;
use crate::{experience, extract, preprocess, validate};

/// Default total attempts for the extraction stage's retry wrapper.
const DEFAULT_EXTRACT_ATTEMPTS: u32 = 3;

/// The pipeline driver, generic over its two external seams.
///
/// Stateless between jobs: one instance can serve concurrent `normalize`
/// calls, each carrying its own [`PipelineState`].
#[derive(Debug, Clone)]
pub struct Pipeline<E, D> {
    primary: E,
    fallback: E,
    directory: D,
    max_extract_attempts: u32,
}

impl<E, D> Pipeline<E, D>
where
    E: JobExtractor,
    D: CompanyDirectory,
{
    pub fn new(primary: E, fallback: E, directory: D) -> Self {
        Self {
            primary,
            fallback,
            directory,
            max_extract_attempts: DEFAULT_EXTRACT_ATTEMPTS,
        }
    }

    /// Override the extraction retry budget (total attempts, minimum 1).
    pub fn with_max_extract_attempts(mut self, attempts: u32) -> Self {
        self.max_extract_attempts = attempts.max(1);
        self
    }

    /// Normalize one job record. Infallible by contract: failures come back
    /// as a degraded record, never as an `Err` or a panic.
    #[instrument(skip_all, fields(company = %job.company_name.as_deref().unwrap_or("?")))]
    pub async fn normalize(&self, job: &JobInput) -> NormalizedJob {
        match self.run(job.clone()).await {
            Ok(normalized) => normalized,
            Err(e) => {
                error!(error = %e, "pipeline failed, emitting degraded record");
                NormalizedJob::degraded(job, e)
            }
        }
    }

    async fn run(&self, job: JobInput) -> Result<NormalizedJob> {
        let mut state = PipelineState::new(job);

        preprocess::run(&mut state);

        let outcome = extract::run(
            &self.primary,
            &self.fallback,
            &state.payload,
            self.max_extract_attempts,
        )
        .await?;
        state.primary = outcome.primary;
        state.fallback = outcome.fallback;
        state.merged = outcome.merged;

        validate::run(&mut state);
        experience::run(&mut state);

        if state.needs_website_lookup {
            self.lookup_website(&mut state).await;
        }

        Ok(state.into_normalized())
    }

    /// Best-effort directory lookup; failure leaves the website empty.
    async fn lookup_website(&self, state: &mut PipelineState) {
        match self
            .directory
            .website_for(&state.validated.company_name)
            .await
        {
            Ok(Some(website)) if !website.trim().is_empty() => {
                state.company_website = website.trim().to_string();
            }
            Ok(_) => debug!("no directory match for company"),
            Err(e) => warn!(error = %e, "website lookup failed"),
        }
    }
}
