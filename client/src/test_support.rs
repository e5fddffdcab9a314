//! Fixtures shared by the session-level tests.

use std::collections::BTreeSet;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::net::types::{Role, User};
use crate::state::auth::Session;
use crate::util::credential_store::CredentialStore;

pub const TEST_EMAIL: &str = "u@college.edu";

/// Unsigned `header.payload.signature` token carrying `sub` and `roles`.
pub fn issue_token(sub: &str, roles: &[Role]) -> String {
    let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
    let payload = serde_json::json!({ "sub": sub, "roles": names });
    format!("eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl", URL_SAFE_NO_PAD.encode(payload.to_string()))
}

pub fn user_with(email: &str, roles: &[Role]) -> User {
    User { email: email.to_owned(), roles: roles.iter().copied().collect::<BTreeSet<_>>() }
}

/// Store holding a decodable token and its matching user record.
pub fn signed_in_store(email: &str, roles: &[Role]) -> CredentialStore {
    let store = CredentialStore::in_memory();
    store.save(&issue_token(email, roles), &user_with(email, roles)).unwrap();
    store
}

/// Session restored from [`signed_in_store`].
pub fn session_with(roles: &[Role]) -> Session {
    Session::restore(&signed_in_store(TEST_EMAIL, roles))
}
