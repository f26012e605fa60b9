//! Auth-session record for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Held inside the store's signal and read by route guards and
//! identity-aware components. `token` and `user` move together: both are
//! set by a successful register/login and both are cleared on logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    /// Bearer token replayed on authenticated requests.
    pub token: Option<String>,
    pub user: Option<User>,
    /// True while a register/login request is in flight.
    pub loading: bool,
    /// Message from the most recent failed register/login.
    pub error: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub(crate) fn sign_in(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
    }

    pub(crate) fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }
}
