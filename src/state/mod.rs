//! Client auth state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` is the plain record components render from; `store` owns the
//! reactive signal and the actions that mutate it.

pub mod session;
pub mod store;
