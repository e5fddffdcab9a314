use std::sync::Arc;

use super::*;
use crate::test_support::{issue_token, signed_in_store};
use crate::util::credential_store::{MemoryStorage, StorageBackend, StoredCredentials, TOKEN_KEY, USER_KEY};

const EMAIL: &str = "someone@college.edu";

fn user_with(roles: &[Role]) -> User {
    crate::test_support::user_with(EMAIL, roles)
}

fn signed_in(roles: &[Role]) -> (CredentialStore, Session) {
    let store = signed_in_store(EMAIL, roles);
    let session = Session::restore(&store);
    (store, session)
}

fn assert_consistent(session: &Session) {
    assert_eq!(session.token().is_some(), session.user().is_some());
}

/// Drive a future that completes without ever pending.
#[cfg(not(feature = "hydrate"))]
fn block_on_ready<F: std::future::Future>(fut: F) -> F::Output {
    use std::task::{Context, Poll, Waker};
    let mut fut = std::pin::pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    match fut.as_mut().poll(&mut cx) {
        Poll::Ready(out) => out,
        Poll::Pending => panic!("future unexpectedly pending"),
    }
}

// =============================================================
// Initial restore
// =============================================================

#[test]
fn default_session_is_initializing() {
    let session = Session::default();
    assert_eq!(session.phase(), AuthPhase::Initializing);
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
    assert_consistent(&session);
}

#[test]
fn restore_with_complete_store_authenticates() {
    let (_, session) = signed_in(&[Role::Student]);
    assert_eq!(session.phase(), AuthPhase::Authenticated);
    assert_eq!(session.token(), Some(issue_token(EMAIL, &[Role::Student]).as_str()));
    assert_eq!(session.user(), Some(&user_with(&[Role::Student])));
    assert!(!session.is_loading());
}

#[test]
fn restore_with_empty_store_is_anonymous() {
    let session = Session::restore(&CredentialStore::in_memory());
    assert_eq!(session.phase(), AuthPhase::Anonymous);
    assert_consistent(&session);
}

#[test]
fn restore_with_corrupt_user_is_anonymous_and_clears_store() {
    let backend = Arc::new(MemoryStorage::default());
    backend.set_item(TOKEN_KEY, &issue_token(EMAIL, &[Role::Admin])).unwrap();
    backend.set_item(USER_KEY, "definitely { not json").unwrap();
    let store = CredentialStore::from_shared(backend.clone());

    let session = Session::restore(&store);

    assert_eq!(session.phase(), AuthPhase::Anonymous);
    assert_eq!(backend.get_item(TOKEN_KEY), None);
    assert_eq!(backend.get_item(USER_KEY), None);
}

#[test]
fn restore_with_user_but_no_token_is_anonymous() {
    let backend = Arc::new(MemoryStorage::default());
    backend.set_item(USER_KEY, r#"{"email":"a@b.edu","roles":["ADMIN"]}"#).unwrap();
    let session = Session::restore(&CredentialStore::from_shared(backend));
    assert_eq!(session.phase(), AuthPhase::Anonymous);
    assert!(!session.has_role(Role::Admin));
}

#[test]
fn restore_with_undecodable_token_is_anonymous() {
    let backend = Arc::new(MemoryStorage::default());
    let store = CredentialStore::from_shared(backend.clone());
    store.save("garbage-not-a-jwt", &user_with(&[Role::Admin])).unwrap();

    let session = Session::restore(&store);

    assert_eq!(session.phase(), AuthPhase::Anonymous);
    assert!(!session.has_role(Role::Admin));
    assert_eq!(backend.get_item(TOKEN_KEY), None);
    assert_eq!(backend.get_item(USER_KEY), None);
}

#[test]
fn restore_with_token_for_another_user_is_anonymous() {
    let store = CredentialStore::in_memory();
    let token = issue_token("intruder@college.edu", &[Role::Student]);
    store.save(&token, &user_with(&[Role::Admin])).unwrap();

    let session = Session::restore(&store);

    assert_eq!(session.phase(), AuthPhase::Anonymous);
    assert_eq!(store.load(), StoredCredentials::default());
}

// =============================================================
// Login transition
// =============================================================

#[test]
fn establish_decodes_persists_and_authenticates() {
    let store = CredentialStore::in_memory();
    let token = issue_token("hod@college.edu", &[Role::Faculty]);

    let session = Session::establish(token.clone(), &store).unwrap();

    assert_eq!(session.phase(), AuthPhase::Authenticated);
    assert_eq!(session.user().map(|u| u.email.as_str()), Some("hod@college.edu"));
    let stored = store.load().complete().unwrap();
    assert_eq!(stored.0, token);
    assert_eq!(Some(&stored.1), session.user());
}

#[test]
fn establish_with_malformed_token_writes_nothing() {
    let store = CredentialStore::in_memory();
    let err = Session::establish("not-a-jwt".to_owned(), &store).unwrap_err();
    assert_eq!(err, MalformedTokenError::SegmentCount(1));
    assert_eq!(store.load(), StoredCredentials::default());
}

#[test]
fn establish_survives_a_store_that_refuses_writes() {
    struct ReadOnly;
    impl StorageBackend for ReadOnly {
        fn get_item(&self, _: &str) -> Option<String> {
            None
        }
        fn set_item(&self, key: &str, _: &str) -> Result<(), crate::util::credential_store::StorageError> {
            Err(crate::util::credential_store::StorageError::new(key, "SecurityError"))
        }
        fn remove_item(&self, _: &str) {}
    }
    let store = CredentialStore::new(ReadOnly);

    let session = Session::establish(issue_token(EMAIL, &[Role::Student]), &store).unwrap();

    assert_eq!(session.phase(), AuthPhase::Authenticated);
    assert_eq!(store.load(), StoredCredentials::default());
}

// =============================================================
// Logout / forced logout
// =============================================================

#[test]
fn logout_clears_session_and_store() {
    let (store, mut session) = signed_in(&[Role::Admin]);
    session.logout(&store);
    assert_eq!(session, Session::anonymous());
    assert_eq!(store.load(), StoredCredentials::default());
}

#[test]
fn logout_is_idempotent() {
    let (store, mut session) = signed_in(&[Role::Faculty]);
    session.logout(&store);
    let once = session.clone();
    session.logout(&store);
    assert_eq!(session, once);
    assert_consistent(&session);
}

#[test]
fn logout_when_already_anonymous_is_safe() {
    let store = CredentialStore::in_memory();
    let mut session = Session::anonymous();
    session.logout(&store);
    assert_eq!(session.phase(), AuthPhase::Anonymous);
}

// =============================================================
// Role queries
// =============================================================

#[test]
fn role_queries_on_anonymous_session_are_false() {
    let session = Session::anonymous();
    for role in Role::ALL {
        assert!(!session.has_role(role));
    }
    assert!(!session.has_any_role(&Role::ALL));
}

#[test]
fn has_any_role_requires_an_overlap() {
    let (_, session) = signed_in(&[Role::Student]);
    assert!(session.has_any_role(&[Role::Student, Role::Faculty]));
    assert!(!session.has_any_role(&[Role::Admin]));
    assert!(!session.has_any_role(&[]));
}

#[test]
fn dashboard_route_prefers_admin_regardless_of_order() {
    let (_, session) = signed_in(&[Role::Student, Role::Admin]);
    assert_eq!(session.dashboard_route(), "/dashboard?role=admin");
}

#[test]
fn dashboard_route_faculty_over_student() {
    let (_, session) = signed_in(&[Role::Faculty, Role::Student]);
    assert_eq!(session.dashboard_route(), "/dashboard?role=faculty");
}

#[test]
fn dashboard_route_student_only() {
    let (_, session) = signed_in(&[Role::Student]);
    assert_eq!(session.dashboard_route(), "/dashboard?role=student");
}

#[test]
fn dashboard_route_without_roles_is_untagged() {
    let (_, session) = signed_in(&[]);
    assert_eq!(session.dashboard_route(), "/dashboard");
    assert_eq!(Session::anonymous().dashboard_route(), "/dashboard");
}

// =============================================================
// AuthError normalization
// =============================================================

#[test]
fn auth_error_uses_server_message() {
    let api = ApiError::from_response(401, "Invalid credentials");
    assert_eq!(AuthError::from_api(&api, "Login failed").to_string(), "Invalid credentials");
}

#[test]
fn auth_error_falls_back_when_body_is_blank() {
    let api = ApiError::from_response(500, "");
    assert_eq!(AuthError::from_api(&api, "Registration failed").to_string(), "Registration failed");
}

#[test]
fn auth_error_network_failure_is_generic() {
    let api = ApiError::Network("TypeError: Failed to fetch".to_owned());
    assert_eq!(AuthError::from_api(&api, "Login failed"), AuthError::Network("Login failed".to_owned()));
}

// =============================================================
// AuthContext
// =============================================================

#[test]
fn context_starts_initializing_and_restores_once() {
    let store = signed_in_store(EMAIL, &[Role::Faculty]);
    let auth = AuthContext::new(store.clone());
    assert_eq!(auth.get().phase(), AuthPhase::Initializing);

    auth.restore();
    assert!(auth.is_authenticated());
    assert!(auth.has_role(Role::Faculty));

    // A second restore must not resurrect a session that has since ended.
    auth.logout();
    store.save(&issue_token(EMAIL, &[Role::Faculty]), &user_with(&[Role::Faculty])).unwrap();
    auth.restore();
    assert!(!auth.is_authenticated());
}

#[test]
fn context_forced_logout_clears_store_and_leaves_notice() {
    let store = signed_in_store(EMAIL, &[Role::Student]);
    let auth = AuthContext::new(store.clone());
    auth.restore();

    auth.observe(&ApiError::from_response(401, ""));

    assert_eq!(auth.get().phase(), AuthPhase::Anonymous);
    assert_eq!(store.load(), StoredCredentials::default());
    assert_eq!(auth.notice(), Some(AuthError::Authorization.to_string()));
    auth.dismiss_notice();
    assert_eq!(auth.notice(), None);
}

#[test]
fn context_ignores_non_authorization_failures() {
    let store = signed_in_store(EMAIL, &[Role::Student]);
    let auth = AuthContext::new(store);
    auth.restore();

    auth.observe(&ApiError::from_response(403, "Forbidden"));
    auth.observe(&ApiError::Network("offline".to_owned()));

    assert!(auth.is_authenticated());
    assert_eq!(auth.notice(), None);
}

#[test]
fn context_apply_token_signs_in_and_clears_notice() {
    let store = signed_in_store(EMAIL, &[Role::Student]);
    let auth = AuthContext::new(store.clone());
    auth.restore();
    auth.expire();
    assert!(auth.notice().is_some());

    let token = issue_token("dean@college.edu", &[Role::Admin, Role::Faculty]);
    auth.apply_token(token.clone()).unwrap();

    let session = auth.get();
    assert_eq!(session.phase(), AuthPhase::Authenticated);
    assert_eq!(session.token(), Some(token.as_str()));
    assert_eq!(session.user().map(|u| u.email.as_str()), Some("dean@college.edu"));
    assert_eq!(auth.dashboard_route(), "/dashboard?role=admin");
    assert_eq!(auth.notice(), None);
    assert_eq!(store.load().complete(), Some((token, session.user().cloned().unwrap())));
}

#[test]
fn context_apply_malformed_token_is_a_login_failure() {
    let store = CredentialStore::in_memory();
    let auth = AuthContext::new(store.clone());
    auth.restore();

    let err = auth.apply_token("not-a-jwt".to_owned()).unwrap_err();

    assert_eq!(err, AuthError::MalformedToken(MalformedTokenError::SegmentCount(1)));
    assert_eq!(err.to_string(), "Login failed: the server issued an unreadable token");
    assert_eq!(auth.get(), Session::anonymous());
    assert_eq!(store.load(), StoredCredentials::default());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn context_failed_login_leaves_session_untouched() {
    let auth = AuthContext::new(CredentialStore::in_memory());
    auth.restore();
    let creds = Credentials { email: "a@b.edu".to_owned(), password: "secret".to_owned() };

    let result = block_on_ready(auth.login(creds));

    assert_eq!(result, Err(AuthError::Network("Login failed".to_owned())));
    assert_eq!(auth.get(), Session::anonymous());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn context_register_failure_does_not_touch_session() {
    let auth = AuthContext::new(CredentialStore::in_memory());
    auth.restore();
    let request = RegisterRequest {
        name: "Ravi".to_owned(),
        email: "ravi@college.edu".to_owned(),
        password: "secret1".to_owned(),
        role: Role::Student,
    };

    let result = block_on_ready(auth.register(request));

    assert_eq!(result, Err(AuthError::Network("Registration failed".to_owned())));
    assert_eq!(auth.get().phase(), AuthPhase::Anonymous);
}
