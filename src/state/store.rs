//! Reactive auth store: session signal plus the four auth actions.
//!
//! ARCHITECTURE
//! ============
//! `AuthStore` is a cheap cloneable handle. Every clone shares one
//! `ArcRwSignal<Session>`, so a component that calls `login` and a header
//! that renders the user name observe the same state. The transport and the
//! persistence backend are injected, which keeps the actions testable
//! without a browser.
//!
//! ERROR HANDLING
//! ==============
//! `register` and `login` record a display message in `Session::error` and
//! also hand the `ApiError` back to the caller. `logout` and `fetch_user`
//! only log: logout must always leave the client signed out, and a failed
//! profile refresh keeps whatever profile is already shown.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::config::{AuthConfig, LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE, StorageKeys};
use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::state::session::Session;
use crate::storage::{self, SessionStorage};

pub struct AuthStore<A, S> {
    state: ArcRwSignal<Session>,
    api: Arc<A>,
    storage: Arc<S>,
    keys: StorageKeys,
}

impl<A, S> Clone for AuthStore<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            api: Arc::clone(&self.api),
            storage: Arc::clone(&self.storage),
            keys: self.keys.clone(),
        }
    }
}

/// Resets `loading` when an auth request finishes, including when the
/// awaiting future is dropped mid-flight.
struct LoadingGuard {
    state: ArcRwSignal<Session>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.update(|s| s.loading = false);
    }
}

impl<A: AuthApi, S: SessionStorage> AuthStore<A, S> {
    /// Create the store, seeding state from whatever a previous page load
    /// persisted.
    pub fn new(api: A, storage: S, config: &AuthConfig) -> Self {
        let session = storage::load_session(&storage, &config.keys);
        if session.is_authenticated() {
            log::debug!("restored persisted session");
        }
        Self {
            state: ArcRwSignal::new(session),
            api: Arc::new(api),
            storage: Arc::new(storage),
            keys: config.keys.clone(),
        }
    }

    /// Create an account and sign in with the returned token.
    ///
    /// # Errors
    ///
    /// Returns the transport error; `Session::error` is set to the server's
    /// message or `"Registration failed"`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<AuthResponse, ApiError> {
        let request = RegisterRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            password_confirmation: password_confirmation.to_owned(),
        };
        log::debug!("register requested");
        let _loading = self.begin_request();
        let result = self.api.register(&request).await;
        self.complete_sign_in(result, REGISTER_FAILED_MESSAGE)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the transport error; `Session::error` is set to the server's
    /// message or `"Login failed"`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        log::debug!("login requested");
        let _loading = self.begin_request();
        let result = self.api.login(&request).await;
        self.complete_sign_in(result, LOGIN_FAILED_MESSAGE)
    }

    /// Revoke the token server-side (best effort) and clear the session.
    pub async fn logout(&self) {
        let token = self.state.with_untracked(|s| s.token.clone());
        if let Err(e) = self.api.logout(token.as_deref()).await {
            log::error!("logout request failed: {e}");
        }
        self.state.update(Session::sign_out);
        storage::clear_session(&*self.storage, &self.keys);
        log::info!("signed out");
    }

    /// Refresh the current user's profile.
    ///
    /// Returns the fresh profile, or `None` when the request failed and the
    /// previous profile was kept. A profile that arrives after the token
    /// changed (logout or a new sign-in) is discarded.
    pub async fn fetch_user(&self) -> Option<User> {
        let token = self.state.with_untracked(|s| s.token.clone());
        match self.api.fetch_user(token.as_deref()).await {
            Ok(user) => {
                if self.state.with_untracked(|s| s.token != token) {
                    log::warn!("discarding user profile fetched for a previous session");
                    return None;
                }
                storage::persist_user(&*self.storage, &self.keys, &user);
                self.state.update(|s| s.user = Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                log::error!("fetch user failed: {e}");
                None
            }
        }
    }

    /// Dismiss the last register/login error.
    pub fn clear_error(&self) {
        self.state.update(|s| s.error = None);
    }

    fn begin_request(&self) -> LoadingGuard {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
        LoadingGuard { state: self.state.clone() }
    }

    fn complete_sign_in(
        &self,
        result: Result<AuthResponse, ApiError>,
        fallback: &str,
    ) -> Result<AuthResponse, ApiError> {
        match result {
            Ok(resp) => {
                self.state.update(|s| s.sign_in(resp.access_token.clone(), resp.user.clone()));
                storage::persist_session(&*self.storage, &self.keys, &resp.access_token, &resp.user);
                match &resp.user.id {
                    Some(id) => log::info!("signed in as user {id}"),
                    None => log::info!("signed in as user without id"),
                }
                Ok(resp)
            }
            Err(e) => {
                let message = e.server_message().unwrap_or(fallback).to_owned();
                log::warn!("{fallback}: {e}");
                self.state.update(|s| s.error = Some(message));
                Err(e)
            }
        }
    }
}

impl<A, S> AuthStore<A, S> {
    /// Read-only reactive handle to the session.
    pub fn signal(&self) -> ArcReadSignal<Session> {
        self.state.read_only()
    }

    /// Untracked snapshot of the session.
    pub fn session(&self) -> Session {
        self.state.get_untracked()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Session::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.state.with(Session::is_admin)
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }
}
