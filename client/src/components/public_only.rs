//! Wrapper for the sign-in and sign-up screens.

use leptos::prelude::*;

use crate::components::dashboard_redirect::DashboardRedirect;
use crate::state::auth::{AuthPhase, use_auth};

/// Show `children` to signed-out visitors; send signed-in users to their dashboard.
#[component]
pub fn PublicOnly(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let phase = Memo::new(move |_| auth.with(|s| s.phase()));

    view! {
        {move || match phase.get() {
            AuthPhase::Initializing => view! { <div class="loading">"Loading application..."</div> }.into_any(),
            AuthPhase::Authenticated => view! { <DashboardRedirect/> }.into_any(),
            AuthPhase::Anonymous => children().into_any(),
        }}
    }
}
