//! Leptos glue for wiring the auth store into an app.

pub mod auth;
