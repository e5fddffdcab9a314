//! Networking modules for the college portal REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls, `token` turns an issued bearer token into
//! a user identity, and `types` defines the shared wire/storage schema.

pub mod api;
pub mod token;
pub mod types;
