//! Networking modules for the remote finance REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` sends raw HTTP, `client` adds authorization and 401 handling,
//! `api` exposes one typed method per endpoint, and `types` defines the
//! shared wire schema.

pub mod api;
pub mod client;
#[cfg(test)]
pub(crate) mod scripted_transport;
pub mod transport;
pub mod types;
