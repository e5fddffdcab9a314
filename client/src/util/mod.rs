//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and routing decisions
//! from page and component logic to improve reuse and testability.

pub mod auth;
pub mod credential_store;
pub mod nav;
