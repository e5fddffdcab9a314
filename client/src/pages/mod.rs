//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates guarding and
//! chrome to `components`.

pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod register;
pub mod section;
pub mod unauthorized;
