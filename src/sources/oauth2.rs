use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::cache::token::AccessToken;
use crate::config::settings::AuthConfig;
use crate::helpers::time::get_instant;
use crate::observability::metrics::{get_metrics, FETCH_ERROR, FETCH_OK};
use crate::relay::error::RelayError;
use crate::utils::constants::GRANT_TYPE_PASSWORD;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// OAuth2 resource owner password grant against the configured token endpoint.
#[derive(Debug, Clone)]
pub struct PasswordGrantSource {
    pub client: Client,
}

impl PasswordGrantSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Exchange the configured credentials for an access token.
    ///
    /// Fails before any network call when a credential is missing. Non-2xx
    /// answers and transport errors are returned as-is, without retry.
    pub async fn fetch_token(&self, auth: &AuthConfig) -> Result<AccessToken, RelayError> {
        let creds = auth.credentials().ok_or_else(|| {
            let missing = auth.missing();
            error!(?missing, "Missing one or more required auth settings");
            RelayError::MissingCredentials { missing }
        })?;

        let form = [
            ("grant_type", GRANT_TYPE_PASSWORD),
            ("client_id", creds.client_id),
            ("client_secret", creds.client_secret),
            ("username", creds.username),
            ("password", creds.password),
        ];

        let metrics = get_metrics().await;
        let start = get_instant();
        let result = self.request_token(creds.oauth_url, &form).await;
        metrics.token_fetch_duration.observe(start.elapsed().as_secs_f64());
        metrics
            .token_fetches
            .with_label_values(&[if result.is_ok() { FETCH_OK } else { FETCH_ERROR }])
            .inc();
        result
    }

    async fn request_token(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<AccessToken, RelayError> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RelayError::TokenEndpoint { status, body });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(RelayError::InvalidTokenResponse)?;
        let value = parsed.access_token.ok_or(RelayError::MissingAccessToken)?;
        debug!(expires_in = ?parsed.expires_in, "access token issued");
        Ok(AccessToken::new(value, parsed.expires_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn auth(oauth_url: String) -> AuthConfig {
        AuthConfig {
            client_id: Some("web-client".into()),
            client_secret: Some("s3cret".into()),
            oauth_url: Some(oauth_url),
            username: Some("relay@example.com".into()),
            password: Some("p@ss word".into()),
        }
    }

    #[tokio::test]
    async fn password_grant_sends_form_and_reads_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth/token")
                    .header("accept", "application/json")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .form_urlencoded_tuple("grant_type", "password")
                    .form_urlencoded_tuple("client_id", "web-client")
                    .form_urlencoded_tuple("client_secret", "s3cret")
                    .form_urlencoded_tuple("username", "relay@example.com")
                    .form_urlencoded_tuple("password", "p@ss word");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "token_type": "Bearer",
                        "expires_in": 3600,
                        "access_token": "tok-123"
                    }));
            })
            .await;

        let source = PasswordGrantSource::new(Client::new());
        let token = source.fetch_token(&auth(server.url("/oauth/token"))).await.unwrap();

        mock.assert_async().await;
        assert_eq!(token.value, "tok-123");
        assert_eq!(token.expires_in, Some(3600));
        assert_eq!(token.bearer(), "Bearer tok-123");
    }

    #[tokio::test]
    async fn missing_credentials_skip_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({"access_token": "never"}));
            })
            .await;

        let mut cfg = auth(server.url("/oauth/token"));
        cfg.username = None;

        let err = PasswordGrantSource::new(Client::new())
            .fetch_token(&cfg)
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::MissingCredentials { ref missing } if missing == &vec!["username"]));
        mock.assert_calls_async(0).await;
    }

    #[tokio::test]
    async fn non_success_status_is_token_endpoint_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token");
                then.status(401).json_body(json!({"error": "invalid_grant"}));
            })
            .await;

        let err = PasswordGrantSource::new(Client::new())
            .fetch_token(&auth(server.url("/oauth/token")))
            .await
            .unwrap_err();

        match err {
            RelayError::TokenEndpoint { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn response_without_access_token_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth/token");
                then.status(200).json_body(json!({"token_type": "Bearer"}));
            })
            .await;

        let err = PasswordGrantSource::new(Client::new())
            .fetch_token(&auth(server.url("/oauth/token")))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::MissingAccessToken));
    }
}
