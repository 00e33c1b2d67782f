//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and cross-route surfaces while reading shared
//! state from Leptos context providers.

pub mod route_guard;
pub mod sidebar;
pub mod toaster;
