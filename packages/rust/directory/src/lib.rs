//! Company-directory lookup client.
//!
//! Best-effort enrichment: given a validated company name, query the
//! directory service's `companies` table for a website — exact match first,
//! then a partial (`ilike`) match. An empty result is not an error; the
//! pipeline treats any failure here as "no website found".

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use jobnorm_shared::config::DirectoryConfig;
use jobnorm_shared::{JobNormError, Result};

/// A name → website lookup capability.
///
/// The pipeline is generic over this seam so tests can script lookups.
pub trait CompanyDirectory: Send + Sync {
    /// Resolve a company name to a website, or `None` when no match exists.
    fn website_for(&self, company_name: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// One row of the `companies` table projection we request.
#[derive(Debug, Deserialize)]
struct CompanyRow {
    #[serde(default)]
    company_website: String,
}

/// Production directory client against a PostgREST-style endpoint.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectoryClient {
    /// Create a client against an explicit endpoint.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jobnorm/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| JobNormError::Network(format!("client build: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from config, reading the service key from the
    /// configured env var (empty key allowed for unauthenticated endpoints).
    pub fn from_config(config: &DirectoryConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(JobNormError::config("directory base_url is not configured"));
        }
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        Self::new(
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Run one `companies` query with the given name filter, returning the
    /// first non-empty website.
    async fn query(&self, name_filter: &str) -> Result<Option<String>> {
        let response = self
            .http
            .get(format!("{}/companies", self.base_url))
            .query(&[
                ("select", "company_website"),
                ("company_name", name_filter),
                ("limit", "1"),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| JobNormError::Network(format!("directory query: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobNormError::directory(format!("HTTP {status}")));
        }

        let rows: Vec<CompanyRow> = response
            .json()
            .await
            .map_err(|e| JobNormError::directory(format!("invalid response body: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| r.company_website)
            .find(|w| !w.trim().is_empty()))
    }
}

impl CompanyDirectory for DirectoryClient {
    #[instrument(skip(self))]
    async fn website_for(&self, company_name: &str) -> Result<Option<String>> {
        let name = company_name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        // Exact match first.
        if let Some(website) = self.query(&format!("eq.{name}")).await? {
            debug!(%name, "exact directory match");
            return Ok(Some(website));
        }

        // Partial match fallback.
        let website = self.query(&format!("ilike.*{name}*")).await?;
        if website.is_some() {
            debug!(%name, "partial directory match");
        }
        Ok(website)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> DirectoryClient {
        DirectoryClient::new(server.uri(), "test-key", Duration::from_secs(5))
            .expect("build client")
    }

    #[tokio::test]
    async fn exact_match_wins() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies"))
            .and(query_param("company_name", "eq.Acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "company_website": "https://acme.io" }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let website = client.website_for("Acme").await.expect("lookup");
        assert_eq!(website.as_deref(), Some("https://acme.io"));
    }

    #[tokio::test]
    async fn falls_back_to_partial_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies"))
            .and(query_param("company_name", "eq.Acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/companies"))
            .and(query_param("company_name", "ilike.*Acme*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "company_website": "https://acme.example" }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let website = client.website_for("Acme").await.expect("lookup");
        assert_eq!(website.as_deref(), Some("https://acme.example"));
    }

    #[tokio::test]
    async fn no_match_is_none_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let website = client.website_for("Nobody Knows Ltd").await.expect("lookup");
        assert!(website.is_none());
    }

    #[tokio::test]
    async fn empty_website_rows_are_skipped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "company_website": "  " }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let website = client.website_for("Acme").await.expect("lookup");
        assert!(website.is_none());
    }

    #[tokio::test]
    async fn empty_name_short_circuits() {
        let server = MockServer::start().await;
        // No mock mounted — any request would 404 and fail the lookup.
        let client = client_for(&server).await;
        let website = client.website_for("   ").await.expect("lookup");
        assert!(website.is_none());
    }

    #[tokio::test]
    async fn server_error_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.website_for("Acme").await.expect_err("should fail");
        assert!(matches!(err, JobNormError::Directory(_)), "got {err:?}");
    }
}
