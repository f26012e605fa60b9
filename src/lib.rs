//! # auth-session
//!
//! Client-side authentication state for the single-page frontend.
//!
//! Holds the current session (token + user profile) in a Leptos signal,
//! mirrors it into browser `localStorage`, and wraps the four auth REST calls
//! (register, login, logout, current user). The browser transport is compiled
//! with the `hydrate` feature; native builds use reqwest via `native`.

pub mod config;
pub mod net;
pub mod state;
pub mod storage;
pub mod util;

pub use config::AuthConfig;
pub use net::api::{ApiError, AuthApi};
pub use net::types::{AuthResponse, User, UserId};
pub use state::session::Session;
pub use state::store::AuthStore;
pub use storage::{MemoryStorage, SessionStorage};

#[cfg(feature = "hydrate")]
pub use net::browser::BrowserAuthApi;
#[cfg(feature = "native")]
pub use net::http::HttpAuthApi;
#[cfg(feature = "hydrate")]
pub use storage::LocalStorage;

/// Store backed by `localStorage` and the browser fetch API.
#[cfg(feature = "hydrate")]
pub fn browser_store(config: &AuthConfig) -> AuthStore<BrowserAuthApi, LocalStorage> {
    AuthStore::new(BrowserAuthApi::new(config.clone()), LocalStorage, config)
}

/// Store backed by reqwest and process memory.
///
/// The session lives only as long as the store: nothing survives a process
/// restart. Use [`native_store_with`] to supply durable storage.
///
/// # Errors
///
/// Returns `ApiError::Transport` if the HTTP client cannot be built or
/// `config.base_url` is not an absolute URL.
#[cfg(feature = "native")]
pub fn native_store(config: &AuthConfig) -> Result<AuthStore<HttpAuthApi, MemoryStorage>, ApiError> {
    native_store_with(config, MemoryStorage::new())
}

/// Store backed by reqwest and a caller-supplied storage.
///
/// The session is restored from `storage` on construction.
///
/// # Errors
///
/// Same as [`native_store`].
#[cfg(feature = "native")]
pub fn native_store_with<S: SessionStorage>(
    config: &AuthConfig,
    storage: S,
) -> Result<AuthStore<HttpAuthApi, S>, ApiError> {
    Ok(AuthStore::new(HttpAuthApi::new(config.clone())?, storage, config))
}

/// Install the browser console logger and panic hook.
///
/// Call once from the WASM entry point before mounting the app. Native
/// builds leave logger selection to the host binary, so this is a no-op there.
pub fn init_logging() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            log::debug!("console logger already installed: {e}");
        }
    }
}
