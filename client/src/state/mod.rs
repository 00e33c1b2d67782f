//! Client-side state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` wraps these in `RwSignal`s and provides them through context. The
//! session store is the only writer of auth state; pages own their own data
//! state for the lifetime of the route.

pub mod auth;
pub mod cell;
pub mod dashboard;
pub mod session;
pub mod toast;
