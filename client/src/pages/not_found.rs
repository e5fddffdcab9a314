//! Router fallback.

use leptos::prelude::*;

use crate::state::auth::DASHBOARD_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="error-page">
            <span class="error-page__code">"404"</span>
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <a class="login-button" href=DASHBOARD_PATH>
                "Go to Dashboard"
            </a>
        </div>
    }
}
