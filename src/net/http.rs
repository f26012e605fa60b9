//! Native `AuthApi` over reqwest.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};

use super::api::{self, ApiError, AuthApi};
use super::types::{AuthResponse, LoginRequest, RegisterRequest, User, UserEnvelope};
use crate::config::AuthConfig;

#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    config: AuthConfig,
}

impl HttpAuthApi {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if `config.base_url` is not an absolute
    /// URL (the browser-relative `/api` default cannot be resolved natively)
    /// or the TLS backend cannot be initialized.
    pub fn new(config: AuthConfig) -> Result<Self, ApiError> {
        if let Err(e) = reqwest::Url::parse(&config.base_url) {
            return Err(ApiError::Transport(format!(
                "base url must be absolute for native requests, got {:?}: {e}",
                config.base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn send(&self, request: reqwest::RequestBuilder, token: Option<&str>) -> Result<String, ApiError> {
        let mut request = request.header(ACCEPT, "application/json");
        if let Some(value) = api::bearer_header(token) {
            request = request.header(AUTHORIZATION, value);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(api::status_error(status.as_u16(), &body));
        }
        Ok(body)
    }
}

impl AuthApi for HttpAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let url = self.config.endpoint(api::REGISTER_PATH);
        let body = self.send(self.client.post(url).json(request), None).await?;
        api::decode_body(&body)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.config.endpoint(api::LOGIN_PATH);
        let body = self.send(self.client.post(url).json(request), None).await?;
        api::decode_body(&body)
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let url = self.config.endpoint(api::LOGOUT_PATH);
        self.send(self.client.post(url), token).await?;
        Ok(())
    }

    async fn fetch_user(&self, token: Option<&str>) -> Result<User, ApiError> {
        let url = self.config.endpoint(api::USER_PATH);
        let body = self.send(self.client.get(url), token).await?;
        api::decode_body::<UserEnvelope>(&body).map(|envelope| envelope.user)
    }
}
