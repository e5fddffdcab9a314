//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components must apply identical redirect behavior, so the decisions
//! live here as pure functions of the session. Components only perform the
//! navigation the decision names, always replacing the history entry so the
//! back button cannot bounce between a guard and its target.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos_router::NavigateOptions;

use crate::net::types::Role;
use crate::state::auth::Session;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// What a guarded route should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still restoring; render nothing and wait.
    Pending,
    Render,
    RedirectToLogin,
    RedirectToUnauthorized,
}

impl GuardDecision {
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            Self::Pending | Self::Render => None,
        }
    }
}

/// Decide a guarded route. An empty `required` slice means any signed-in user.
pub fn guard_decision(session: &Session, required: &[Role]) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Pending
    } else if !session.is_authenticated() {
        GuardDecision::RedirectToLogin
    } else if !required.is_empty() && !session.has_any_role(required) {
        GuardDecision::RedirectToUnauthorized
    } else {
        GuardDecision::Render
    }
}

/// Where the bare entry routes send the user, or `None` while restoring.
pub fn dashboard_redirect_target(session: &Session) -> Option<String> {
    if session.is_loading() {
        None
    } else if session.is_authenticated() {
        Some(session.dashboard_route())
    } else {
        Some(LOGIN_PATH.to_owned())
    }
}

/// Navigation options for guard redirects.
pub fn replace_history() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}
