//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render route guards and portal chrome while reading the shared
//! auth session from Leptos context.

pub mod dashboard_redirect;
pub mod protected_route;
pub mod public_only;
pub mod sidebar;
