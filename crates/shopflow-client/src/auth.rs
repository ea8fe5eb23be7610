//! Client for the auth service's verify endpoint.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use shopflow_auth::{TokenVerifier, Verified, VerifyError, VerifyResponse};
use shopflow_core::TokenPair;

use crate::error::ClientError;
use crate::response::{build_http_client, handle_response, normalize_base_url, ClientOptions};

/// Remote token verification against the auth service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client for the auth service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, &ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: &ClientOptions,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(options)?,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Call `POST /verify` with the pair in the `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the pair.
    pub async fn verify(&self, pair: &TokenPair) -> Result<VerifyResponse, ClientError> {
        let url = format!("{}/verify", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, pair.authorization_value())
            .send()
            .await?;

        handle_response(response).await
    }
}

#[async_trait]
impl TokenVerifier for AuthClient {
    async fn verify(&self, pair: &TokenPair) -> Result<Verified, VerifyError> {
        match AuthClient::verify(self, pair).await {
            Ok(body) => Ok(body.into_verified(pair)),
            Err(ClientError::Http(err)) => Err(VerifyError::Unavailable(err.to_string())),
            Err(err) => Err(VerifyError::Rejected(err.status().unwrap_or(502))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = AuthClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn verify_forwards_the_pair() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify"))
            .and(header("authorization", "Bearer acc;ref"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "maria",
                "email": "maria@example.com",
                "access": "acc",
                "refresh": "ref"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri()).unwrap();
        let verified = TokenVerifier::verify(&client, &TokenPair::new("acc", "ref"))
            .await
            .unwrap();

        assert_eq!(verified.identity.login, "maria");
        assert!(!verified.rotated);
    }

    #[tokio::test]
    async fn rotated_pair_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "maria",
                "email": "maria@example.com",
                "access": "acc2",
                "refresh": "ref2"
            })))
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri()).unwrap();
        let verified = TokenVerifier::verify(&client, &TokenPair::new("acc", "ref"))
            .await
            .unwrap();

        assert!(verified.rotated);
        assert_eq!(verified.tokens, TokenPair::new("acc2", "ref2"));
    }

    #[tokio::test]
    async fn forbidden_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": "forbidden", "message": "authentication failed" }
            })))
            .mount(&server)
            .await;

        let client = AuthClient::new(server.uri()).unwrap();
        let err = TokenVerifier::verify(&client, &TokenPair::new("acc", "ref"))
            .await
            .unwrap_err();

        assert!(matches!(err, VerifyError::Rejected(403)));
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        let client = AuthClient::new("http://127.0.0.1:1").unwrap();
        let err = TokenVerifier::verify(&client, &TokenPair::new("acc", "ref"))
            .await
            .unwrap_err();

        assert!(matches!(err, VerifyError::Unavailable(_)));
    }
}
