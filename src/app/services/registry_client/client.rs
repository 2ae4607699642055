//! HTTP transport for registry lookups

use super::schema;
use crate::app::models::RegistryRecord;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Lookup seam for the batch pipeline
///
/// The production implementation is [`RegistryClient`]; tests drive the
/// pipeline with in-memory implementations instead of a live endpoint.
#[allow(async_fn_in_trait)]
pub trait RegistryLookup {
    /// Fetch and validate the record for one normalized identifier
    async fn lookup(&self, cnpj: &str) -> Result<RegistryRecord>;
}

/// HTTP client for the registry lookup endpoint
///
/// Holds a shared connection pool; no other state is retained between
/// calls. Each invocation performs exactly one outbound request.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Build a client from the run configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl RegistryLookup for RegistryClient {
    async fn lookup(&self, cnpj: &str) -> Result<RegistryRecord> {
        let url = format!("{}/{}", self.base_url, cnpj);
        debug!("Requesting registry record: GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            let message = format!("request to {url} failed: {e}");
            Error::lookup(cnpj, message, Some(e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::lookup(
                cnpj,
                format!("registry returned HTTP {status}"),
                None,
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            let message = format!("response body is not valid JSON: {e}");
            Error::lookup(cnpj, message, Some(e))
        })?;

        let violations = schema::validate(&body);
        if !violations.is_empty() {
            return Err(Error::schema_validation(cnpj, violations));
        }

        // The schema check guarantees this cannot fail for shape reasons
        serde_json::from_value(body)
            .map_err(|e| Error::lookup(cnpj, format!("failed to decode response: {e}"), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_strips_trailing_slash_from_base_url() {
        let config = Config::default().with_base_url("https://registry.test/api/cnpj/v1/");
        let client = RegistryClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://registry.test/api/cnpj/v1");
    }

    #[test]
    fn test_validated_payload_decodes_into_record() {
        let payload = schema::tests::valid_payload();
        assert!(schema::validate(&payload).is_empty());

        let record: RegistryRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.cnpj, "11222333000181");
        assert_eq!(record.qsa.len(), 2);
    }

    #[test]
    fn test_schema_failure_names_identifier_and_fields() {
        let mut payload = schema::tests::valid_payload();
        payload.as_object_mut().unwrap().remove("razao_social");

        let violations = schema::validate(&payload);
        let error = Error::schema_validation("11222333000181", violations);

        let message = error.to_string();
        assert!(message.contains("11222333000181"));
        assert!(message.contains("razao_social"));
        assert!(message.contains("required field is missing"));
    }
}
