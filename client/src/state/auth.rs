//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards, the dashboard redirect and role-aware components to
//! coordinate login redirects and identity-dependent rendering.
//!
//! DESIGN
//! ======
//! [`Session`] is the pure state machine
//! (`Initializing -> {Anonymous, Authenticated}`, then toggling between the
//! two). Its fields are private and every constructor sets `token` and `user`
//! together, so a token without a user cannot be built. [`AuthContext`] is the
//! reactive handle the app creates once at the root and injects via context;
//! it performs the network calls and applies each transition in a single
//! signal write.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use serde::de::DeserializeOwned;

use crate::net::api::{self, ApiError};
use crate::net::token::{self, MalformedTokenError};
use crate::net::types::{Credentials, RegisterRequest, Role, User};
use crate::util::credential_store::CredentialStore;

/// Route every role-tagged dashboard link is built on.
pub const DASHBOARD_PATH: &str = "/dashboard";

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";

/// Coarse lifecycle phase derived from a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Initializing,
    Anonymous,
    Authenticated,
}

/// Failure surfaced by `login`/`register`. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Login failed: the server issued an unreadable token")]
    MalformedToken(#[from] MalformedTokenError),
    #[error("{0}")]
    Authentication(String),
    #[error("Your session has expired. Please sign in again.")]
    Authorization,
    #[error("{0}")]
    Network(String),
}

impl AuthError {
    /// Normalize an API failure, using `fallback` when the server sent no text.
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => {
                Self::Authentication(message.clone().unwrap_or_else(|| fallback.to_owned()))
            }
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Unavailable => Self::Network(fallback.to_owned()),
        }
    }
}

/// Process-wide authentication state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::initializing()
    }
}

impl Session {
    /// Startup state, before the credential store has been read.
    pub fn initializing() -> Self {
        Self { token: None, user: None, loading: true }
    }

    pub fn anonymous() -> Self {
        Self { token: None, user: None, loading: false }
    }

    fn authenticated(token: String, user: User) -> Self {
        Self { token: Some(token), user: Some(user), loading: false }
    }

    /// Leave `Initializing` using whatever the store holds.
    ///
    /// The stored token must still decode, and its subject must be the stored
    /// user. A lone key, an unreadable user record, an undecodable token or a
    /// subject mismatch restores as anonymous, and the leftovers are cleared
    /// so the store mirrors the session again.
    pub fn restore(store: &CredentialStore) -> Self {
        let stored = store.load();
        let present = stored.token.is_some() || stored.user.is_some();
        let restored = stored.complete().and_then(|(token, user)| match token::decode(&token) {
            Ok(claims) if claims.email == user.email => Some(Self::authenticated(token, user)),
            Ok(claims) => {
                leptos::logging::warn!("auth: stored token is for {}, not {}", claims.email, user.email);
                None
            }
            Err(e) => {
                leptos::logging::warn!("auth: stored token unreadable: {e}");
                None
            }
        });
        match restored {
            Some(session) => session,
            None => {
                if present {
                    store.clear();
                }
                Self::anonymous()
            }
        }
    }

    /// Build the authenticated session for a freshly issued token and persist
    /// it. Nothing is written when the token cannot be decoded.
    ///
    /// A storage failure does not fail the login: the session holds for this
    /// page and the store is left empty, so a reload signs the user out.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTokenError`] when the token payload is unreadable.
    pub fn establish(token: String, store: &CredentialStore) -> Result<Self, MalformedTokenError> {
        let user = token::decode(&token)?;
        if let Err(e) = store.save(&token, &user) {
            leptos::logging::warn!("auth: session not persisted: {e}");
        }
        Ok(Self::authenticated(token, user))
    }

    /// Clear the session and the store. Safe to repeat.
    pub fn logout(&mut self, store: &CredentialStore) {
        store.clear();
        *self = Self::anonymous();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Initializing
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user.as_ref().is_some_and(|u| u.roles.contains(&role))
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }

    /// Landing route for the highest-priority role held
    /// (`ADMIN > FACULTY > STUDENT`), or the untagged dashboard.
    pub fn dashboard_route(&self) -> String {
        match self.user.as_ref().and_then(User::primary_role) {
            Some(role) => format!("{DASHBOARD_PATH}?role={}", role.dashboard_tag()),
            None => DASHBOARD_PATH.to_owned(),
        }
    }
}

/// Reactive session service shared through Leptos context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    notice: RwSignal<Option<AuthError>>,
    store: StoredValue<CredentialStore>,
}

impl AuthContext {
    /// Create the service in the `Initializing` phase.
    pub fn new(store: CredentialStore) -> Self {
        Self {
            session: RwSignal::new(Session::initializing()),
            notice: RwSignal::new(None),
            store: StoredValue::new(store),
        }
    }

    /// Create the service and provide it to the component tree.
    pub fn provide(store: CredentialStore) -> Self {
        let auth = Self::new(store);
        provide_context(auth);
        auth
    }

    /// Read the credential store and leave `Initializing`. Later calls are ignored.
    pub fn restore(&self) {
        if !self.session.with_untracked(Session::is_loading) {
            return;
        }
        let restored = self.store.with_value(Session::restore);
        leptos::logging::log!("auth: restored session ({:?})", restored.phase());
        self.session.set(restored);
    }

    /// Tracked read of the current session.
    pub fn with<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.session.with(f)
    }

    pub fn with_untracked<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        self.session.with_untracked(f)
    }

    pub fn get(&self) -> Session {
        self.session.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.with(Session::is_authenticated)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.with(|s| s.has_role(role))
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.with(|s| s.has_any_role(roles))
    }

    pub fn dashboard_route(&self) -> String {
        self.with(Session::dashboard_route)
    }

    /// Sign in. The session changes only when the issued token decodes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] for rejected credentials, transport failures or an
    /// undecodable token; the session is left untouched in every case.
    pub async fn login(&self, credentials: Credentials) -> Result<(), AuthError> {
        let token = api::login(&credentials).await.map_err(|e| {
            leptos::logging::warn!("auth: login rejected: {e}");
            AuthError::from_api(&e, LOGIN_FALLBACK)
        })?;
        self.apply_token(token)
    }

    /// Install a token the API just issued: decode, persist, then swap the
    /// session in one write and clear any forced-logout notice.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] and leaves the session untouched
    /// when the token cannot be decoded.
    pub fn apply_token(&self, token: String) -> Result<(), AuthError> {
        let session = self.store.with_value(|store| Session::establish(token, store)).map_err(|e| {
            leptos::logging::warn!("auth: issued token unreadable: {e}");
            AuthError::from(e)
        })?;
        leptos::logging::log!("auth: signed in");
        self.session.set(session);
        self.notice.set(None);
        Ok(())
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] carrying the server's message or a generic fallback.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), AuthError> {
        api::register(&request).await.map_err(|e| {
            leptos::logging::warn!("auth: registration rejected: {e}");
            AuthError::from_api(&e, REGISTER_FALLBACK)
        })
    }

    /// Sign out. Idempotent.
    pub fn logout(&self) {
        self.store.with_value(|store| self.session.update(|s| s.logout(store)));
        leptos::logging::log!("auth: signed out");
    }

    /// Forced logout after the API rejected the token mid-session.
    pub fn expire(&self) {
        if self.session.with_untracked(Session::is_authenticated) {
            leptos::logging::warn!("auth: token rejected by API, ending session");
            self.notice.set(Some(AuthError::Authorization));
        }
        self.logout();
    }

    /// Informational message left by a forced logout, shown on the login page.
    pub fn notice(&self) -> Option<String> {
        self.notice.with(|n| n.as_ref().map(ToString::to_string))
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    /// Route an API failure through the session: 401 ends the session.
    pub fn observe(&self, err: &ApiError) {
        if err.is_unauthorized() {
            self.expire();
        }
    }

    /// Authorized `GET` of a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`]; on 401 the session has already
    /// been cleared when this returns.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.session.with_untracked(|s| s.token().map(str::to_owned));
        let result = api::get_json::<T>(path, token.as_deref()).await;
        if let Err(err) = &result {
            self.observe(err);
        }
        result
    }
}

/// The [`AuthContext`] provided by the root `App`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
