//! Job-posting normalization pipeline.
//!
//! Turns messy scraped job records into clean records with every
//! classification field clamped to a closed vocabulary. The pipeline is a
//! fixed sequence of stages over a per-job [`PipelineState`]:
//!
//! 1. [`preprocess`] — strip markup, flatten hints into a flat payload
//! 2. [`extract`] — primary/fallback generative extraction with merge
//! 3. [`validate`] — whitelist clamping, company checks, high-salary rule
//! 4. [`experience`] — fold range-marker tags into an experience level
//! 5. website lookup — directory query, only when no website is known
//! 6. finalize — join lists and project the output record
//!
//! [`Pipeline::normalize`] never fails: total breakdowns come back as a
//! degraded record carrying an `error` description.

pub mod company;
pub mod experience;
pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod salary;
pub mod state;
pub mod text;
pub mod validate;

pub use pipeline::Pipeline;
pub use state::{PipelineState, ValidatedFields};
