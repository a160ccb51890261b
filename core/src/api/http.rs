//! HTTP client for the remote environments/simulations API

use super::client::ConsoleApi;
use super::models::{from_keyed, Environment, Simulation};
use crate::config::ConsoleConfig;
use crate::error::{ApiError, ConfigError, Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Body of a rejected request
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`ConsoleApi`] over HTTP with reqwest
pub struct HttpConsoleApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpConsoleApi {
    /// Create a new client from resolved console config
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: config.api_url.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: config.api_url.clone(),
                message: "URL cannot be used as a base".to_string(),
            }
            .into());
        }

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                ConfigError::InvalidValue {
                    field: "headers".to_string(),
                    value: key.clone(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidValue {
                field: format!("headers.{}", key),
                value: value.clone(),
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The API base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        resource: &str,
        id: Option<&str>,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let response = check_status(response, resource, id).await?;
        Ok(response.json().await?)
    }

    async fn put_json<T: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &T,
        resource: &str,
        id: &str,
    ) -> Result<()> {
        let url = self.endpoint(segments)?;
        debug!("PUT {}", url);
        let response = self.client.put(url).json(body).send().await?;
        check_status(response, resource, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, segments: &[&str], resource: &str, id: &str) -> Result<()> {
        let url = self.endpoint(segments)?;
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        check_status(response, resource, Some(id)).await?;
        Ok(())
    }
}

/// Map non-success responses onto [`ApiError`]
async fn check_status(response: Response, resource: &str, id: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(ApiError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
        .into());
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);

    let error = if status == StatusCode::BAD_REQUEST {
        ApiError::Rejected { message }
    } else {
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    };
    Err(Error::Api(error))
}

/// Longest plain-text body kept as an error message
const MAX_MESSAGE_LEN: usize = 200;

/// The message to report for a failed request. Markup and empty bodies
/// fall back to the canonical reason of the status.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<ErrorBody>(body) {
        return error.error;
    }

    let body = body.trim();
    if body.is_empty() || body.starts_with('<') {
        return status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string();
    }

    let line = body.lines().next().unwrap_or_default().trim();
    if line.chars().count() > MAX_MESSAGE_LEN {
        let truncated: String = line.chars().take(MAX_MESSAGE_LEN).collect();
        format!("{}...", truncated)
    } else {
        line.to_string()
    }
}

fn require_id(id: &str) -> Result<&str> {
    if id.trim().is_empty() {
        return Err(ApiError::MissingField {
            field: "id".to_string(),
        }
        .into());
    }
    Ok(id)
}

#[async_trait]
impl ConsoleApi for HttpConsoleApi {
    async fn list_environments(&self) -> Result<Vec<Environment>> {
        let keyed: BTreeMap<String, Environment> =
            self.get_json(&["environments"], "environments", None).await?;
        Ok(from_keyed(keyed, |e| &mut e.id))
    }

    async fn get_environment(&self, id: &str) -> Result<Environment> {
        let mut environment: Environment = self
            .get_json(&["environment", id], "environment", Some(id))
            .await?;
        if environment.id.is_empty() {
            environment.id = id.to_string();
        }
        Ok(environment)
    }

    async fn create_environment(&self, environment: &Environment) -> Result<()> {
        let id = require_id(&environment.id)?;
        self.put_json(&["environment", id], environment, "environment", id)
            .await
    }

    async fn delete_environment(&self, id: &str) -> Result<()> {
        let id = require_id(id)?;
        self.delete(&["environment", id], "environment", id).await
    }

    async fn list_simulations(&self) -> Result<Vec<Simulation>> {
        let keyed: BTreeMap<String, Simulation> =
            self.get_json(&["simulations"], "simulations", None).await?;
        Ok(from_keyed(keyed, |s| &mut s.id))
    }

    async fn get_simulation(&self, id: &str) -> Result<Simulation> {
        let mut simulation: Simulation = self
            .get_json(&["simulation", id], "simulation", Some(id))
            .await?;
        if simulation.id.is_empty() {
            simulation.id = id.to_string();
        }
        Ok(simulation)
    }

    async fn create_simulation(&self, simulation: &Simulation) -> Result<()> {
        let id = require_id(&simulation.id)?;
        self.put_json(&["simulation", id], simulation, "simulation", id)
            .await
    }

    async fn delete_simulation(&self, id: &str) -> Result<()> {
        let id = require_id(id)?;
        self.delete(&["simulation", id], "simulation", id).await
    }

    fn backend_name(&self) -> &str {
        self.base_url().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = HttpConsoleApi::new(&ConsoleConfig::default().with_api_url("http://host/api/"))
            .unwrap();
        let url = api.endpoint(&["environment", "a b"]).unwrap();
        assert_eq!(url.as_str(), "http://host/api/environment/a%20b");
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error": "ID exists already"}"#),
            "ID exists already"
        );
        assert_eq!(error_message(StatusCode::BAD_REQUEST, "Invalid type\n"), "Invalid type");
        assert_eq!(
            error_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                "<!DOCTYPE HTML>\n<title>500 Internal Server Error</title>"
            ),
            "Internal Server Error"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "  "), "Bad Gateway");

        let long = "x".repeat(500);
        let message = error_message(StatusCode::INTERNAL_SERVER_ERROR, &long);
        assert_eq!(message.len(), MAX_MESSAGE_LEN + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_backend_name_is_the_base_url() {
        let api = HttpConsoleApi::new(&ConsoleConfig::default().with_api_url("http://host:5000"))
            .unwrap();
        assert_eq!(api.backend_name(), "http://host:5000/");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let mut headers = std::collections::HashMap::new();
        headers.insert("bad header".to_string(), "x".to_string());
        let config = ConsoleConfig::default().with_headers(headers);
        assert!(matches!(
            HttpConsoleApi::new(&config),
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
