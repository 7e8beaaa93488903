//! Router construction and request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use jobnorm_core::Pipeline;
use jobnorm_directory::CompanyDirectory;
use jobnorm_llm::JobExtractor;
use jobnorm_shared::{JobInput, NormalizedJob};

/// Build the application router around a shared pipeline.
///
/// The pipeline is stateless per job, so one instance serves every request.
pub fn router<E, D>(pipeline: Arc<Pipeline<E, D>>) -> Router
where
    E: JobExtractor + Send + Sync + 'static,
    D: CompanyDirectory + Send + Sync + 'static,
{
    Router::new()
        .route("/normalize-job", post(normalize_batch::<E, D>))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

/// Normalize a batch of job records.
///
/// Records are processed in order and the response preserves input order.
/// Individual failures surface as degraded records inside the batch, so the
/// endpoint itself always answers 200 for a well-formed request.
async fn normalize_batch<E, D>(
    State(pipeline): State<Arc<Pipeline<E, D>>>,
    Json(jobs): Json<Vec<JobInput>>,
) -> Json<Vec<NormalizedJob>>
where
    E: JobExtractor + Send + Sync + 'static,
    D: CompanyDirectory + Send + Sync + 'static,
{
    let batch_id = Uuid::now_v7();
    let started = Instant::now();
    info!(%batch_id, jobs = jobs.len(), "normalization batch received");

    let mut results = Vec::with_capacity(jobs.len());
    for job in &jobs {
        results.push(pipeline.normalize(job).await);
    }

    let degraded = results.iter().filter(|r| r.error.is_some()).count();
    info!(
        %batch_id,
        jobs = results.len(),
        degraded,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "normalization batch complete"
    );

    Json(results)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
