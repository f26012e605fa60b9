//! Networking for the auth REST endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the transport seam and error model, `types` the wire schema.
//! `http` (native) and `browser` (hydrate) are the two concrete transports.

pub mod api;
#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(feature = "native")]
pub mod http;
pub mod types;
