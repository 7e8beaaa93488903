//! Shared types, error model, and configuration for the job normalizer.
//!
//! This crate is the foundation depended on by all other jobnorm crates.
//! It provides:
//! - [`JobNormError`] — the unified error type
//! - Wire types ([`JobInput`], [`ExtractionPayload`], [`ExtractedFields`], [`NormalizedJob`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DirectoryConfig, ExtractionConfig, ServerConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, validate_api_keys,
};
pub use error::{JobNormError, Result};
pub use types::{ExtractedFields, ExtractionPayload, JobInput, NormalizedJob, StringOrList};
