//! Shared request plumbing for the service clients.

use std::time::Duration;

use reqwest::Client;

use crate::error::ClientError;
use crate::types::ApiErrorResponse;

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 10).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
        }
    }
}

impl ClientOptions {
    /// Create options with the given timeout.
    #[must_use]
    pub fn with_timeout(timeout_seconds: u64) -> Self {
        Self { timeout_seconds }
    }
}

pub(crate) fn build_http_client(options: &ClientOptions) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(Duration::from_secs(options.timeout_seconds))
        .build()
        .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))
}

pub(crate) fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

fn detail(details: Option<&serde_json::Value>, key: &str) -> i64 {
    details
        .and_then(|d| d.get(key))
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(0)
}

/// Handle an API response and convert errors.
pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let error_body: Result<ApiErrorResponse, _> = response.json().await;

    match error_body {
        Ok(api_error) => {
            let body = api_error.error;
            match body.code.as_str() {
                "insufficient_funds" => Err(ClientError::InsufficientFunds {
                    balance: detail(body.details.as_ref(), "balance"),
                    required: detail(body.details.as_ref(), "required"),
                }),
                "not_found" => Err(ClientError::NotFound(body.message)),
                "forbidden" => Err(ClientError::Forbidden(body.message)),
                "bad_request" => Err(ClientError::BadRequest(body.message)),
                _ => Err(ClientError::Api {
                    code: body.code,
                    message: body.message,
                    status: status.as_u16(),
                }),
            }
        }
        Err(_) => Err(ClientError::Api {
            code: "unknown".to_string(),
            message: format!("HTTP {status}"),
            status: status.as_u16(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/"),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8080"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn missing_details_default_to_zero() {
        let details = serde_json::json!({ "balance": 60 });
        assert_eq!(detail(Some(&details), "balance"), 60);
        assert_eq!(detail(Some(&details), "required"), 0);
        assert_eq!(detail(None, "balance"), 0);
    }
}
