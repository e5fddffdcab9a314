//! Entry-route redirect to the role-appropriate dashboard.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;
use crate::util::auth::{dashboard_redirect_target, replace_history};

/// Renders nothing; replaces the current entry with the user's dashboard, or
/// with `/login` when signed out.
///
/// Mount only on entry routes. The targets it produces all live under
/// `/dashboard`, which never mounts this component.
#[component]
pub fn DashboardRedirect() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(target) = auth.with(dashboard_redirect_target) {
            navigate(&target, replace_history());
        }
    });
}
