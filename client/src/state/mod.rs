//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so components depend on small focused models.
//! Only the auth session is process-wide; page data stays component-local.

pub mod auth;
