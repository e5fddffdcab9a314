//! Route guard wrapper for authenticated and role-restricted screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps a route's view. The decision is recomputed whenever the session
//! signal changes, so a forced logout on an open page redirects at once.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::auth::use_auth;
use crate::util::auth::{GuardDecision, guard_decision, replace_history};

/// Render `children` only when the session passes the guard.
#[component]
pub fn ProtectedRoute(
    /// Roles allowed in; empty admits any signed-in user.
    #[prop(optional)]
    roles: Vec<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let decision = Memo::new(move |_| auth.with(|s| guard_decision(s, &roles)));

    Effect::new(move || {
        if let Some(path) = decision.get().redirect_path() {
            navigate(path, replace_history());
        }
    });

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=move || {
                view! {
                    <Show when=move || decision.get() == GuardDecision::Pending>
                        <div class="loading">"Loading application..."</div>
                    </Show>
                }
            }
        >
            {children()}
        </Show>
    }
}
