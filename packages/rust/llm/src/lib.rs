//! Generative extraction service client.
//!
//! Turns a cleaned [`ExtractionPayload`] into a structured [`ExtractedFields`]
//! guess by calling an OpenAI-style chat-completions endpoint with a strict
//! JSON-schema response format. Two clients are built from the same config —
//! one per model — for the primary/fallback degradation pattern; the client
//! itself never retries (the pipeline owns retry and fallback policy).

mod client;
mod prompt;

use std::future::Future;

use jobnorm_shared::{ExtractedFields, ExtractionPayload, Result};

pub use client::ExtractionClient;
pub use prompt::{SYSTEM_PROMPT, response_schema, user_prompt};

/// A single-shot structured extraction capability.
///
/// The pipeline is generic over this seam so tests can substitute scripted
/// extractors for the real HTTP client.
pub trait JobExtractor: Send + Sync {
    /// Request one structured guess for the payload. May fail or time out;
    /// the caller decides what a failure means.
    fn extract(
        &self,
        payload: &ExtractionPayload,
    ) -> impl Future<Output = Result<ExtractedFields>> + Send;
}
