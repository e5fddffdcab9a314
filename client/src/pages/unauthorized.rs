//! Shown when a signed-in user opens a section their roles do not cover.

use leptos::prelude::*;

use crate::state::auth::use_auth;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="error-page">
            <h1>"Access denied"</h1>
            <p>"Your role does not have permission to view this page."</p>
            <a class="login-button" href=move || auth.dashboard_route()>
                "Go to Dashboard"
            </a>
        </div>
    }
}
