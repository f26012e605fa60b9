//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app root provides one `AuthStore` through context; route components
//! look it up and apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::Session;
use crate::state::store::AuthStore;

/// Path unauthenticated users are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Make `store` available to descendants via `use_auth_store`.
pub fn provide_auth_store<A, S>(store: AuthStore<A, S>)
where
    A: Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    provide_context(store);
}

/// Look up the store provided by an ancestor.
pub fn use_auth_store<A, S>() -> Option<AuthStore<A, S>>
where
    A: Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    use_context::<AuthStore<A, S>>()
}

/// True once no auth request is pending and there is no token.
pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.loading && !session.is_authenticated()
}

/// Redirect to `/login` whenever the session settles unauthenticated.
pub fn install_unauth_redirect<F>(session: ArcReadSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if session.with(should_redirect_unauth) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}
