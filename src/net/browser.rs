//! Browser `AuthApi` over `gloo-net` (hydrate only).

use gloo_net::http::{RequestBuilder, Response};

use super::api::{self, ApiError, AuthApi};
use super::types::{AuthResponse, LoginRequest, RegisterRequest, User, UserEnvelope};
use crate::config::AuthConfig;

#[derive(Debug, Clone)]
pub struct BrowserAuthApi {
    config: AuthConfig,
}

impl BrowserAuthApi {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    fn request(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match api::bearer_header(token) {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    async fn read(resp: Response) -> Result<String, ApiError> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(api::status_error(status, &body));
        }
        Ok(body)
    }

    async fn post_json<T: serde::Serialize>(&self, path: &str, payload: &T) -> Result<String, ApiError> {
        let url = self.config.endpoint(path);
        let resp = self
            .request(gloo_net::http::Request::post(&url), None)
            .json(payload)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::read(resp).await
    }
}

impl AuthApi for BrowserAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let body = self.post_json(api::REGISTER_PATH, request).await?;
        api::decode_body(&body)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let body = self.post_json(api::LOGIN_PATH, request).await?;
        api::decode_body(&body)
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let url = self.config.endpoint(api::LOGOUT_PATH);
        let resp = self
            .request(gloo_net::http::Request::post(&url), token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::read(resp).await?;
        Ok(())
    }

    async fn fetch_user(&self, token: Option<&str>) -> Result<User, ApiError> {
        let url = self.config.endpoint(api::USER_PATH);
        let resp = self
            .request(gloo_net::http::Request::get(&url), token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = Self::read(resp).await?;
        api::decode_body::<UserEnvelope>(&body).map(|envelope| envelope.user)
    }
}
