//! Auth client configuration.
//!
//! Defaults mirror the SPA deployment: same-origin `/api` backend and the
//! `auth_token` / `user` storage keys the rest of the frontend already reads.

/// Same-origin path; native clients must override it with an absolute URL.
pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";
pub const DEFAULT_USER_KEY: &str = "user";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Messages surfaced in `Session::error` when the server gives no reason.
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Storage keys under which the session is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub user: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { token: DEFAULT_TOKEN_KEY.to_owned(), user: DEFAULT_USER_KEY.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// API root without a trailing slash, e.g. `https://app.test/api`.
    pub base_url: String,
    pub keys: StorageKeys,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            keys: StorageKeys::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl AuthConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `AUTH_API_BASE_URL`: default `/api`
    /// - `AUTH_TOKEN_KEY`: default `auth_token`
    /// - `AUTH_USER_KEY`: default `user`
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// In the browser there is no process environment, so every value
    /// resolves to its default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("AUTH_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let keys = StorageKeys {
            token: env_non_empty("AUTH_TOKEN_KEY").unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_owned()),
            user: env_non_empty("AUTH_USER_KEY").unwrap_or_else(|| DEFAULT_USER_KEY.to_owned()),
        };
        Self {
            base_url: normalize_base_url(&base_url),
            keys,
            request_timeout_secs: env_parse_u64("AUTH_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: env_parse_u64("AUTH_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Replace the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Absolute URL for an API path such as `/login`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_non_empty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        Ok(_) | Err(std::env::VarError::NotPresent) => None,
        Err(e) => {
            log::warn!("ignoring {key}: {e}");
            None
        }
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    let Some(raw) = env_non_empty(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(v) => v,
        Err(e) => {
            log::warn!("ignoring {key}={raw:?}: {e}; using {default}");
            default
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
