//! Role-tagged dashboard landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The entry redirect lands here as `/dashboard?role=<tag>`. The tag only
//! selects which of the user's own roles to greet as; a tag for a role the
//! user does not hold falls back to their highest-priority role.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::net::types::Role;
use crate::state::auth::{Session, use_auth};
use crate::util::nav::visible_sections;

/// Role the dashboard presents for this session and `?role=` tag.
pub(crate) fn active_role(session: &Session, tag: Option<&str>) -> Option<Role> {
    let user = session.user()?;
    tag.and_then(|t| t.parse::<Role>().ok())
        .filter(|r| user.roles.contains(r))
        .or_else(|| user.primary_role())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();

    let email = move || auth.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());
    let heading = move || {
        let tag = query.with(|q| q.get("role"));
        match auth.with(|s| active_role(s, tag.as_deref())) {
            Some(role) => format!("{} Dashboard", role.label()),
            None => "Dashboard".to_owned(),
        }
    };
    let sections = move || auth.with(visible_sections);

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{heading}</h1>
                <p class="dashboard-page__welcome">"Welcome, " {email}</p>
            </header>
            <Show
                when=move || !sections().is_empty()
                fallback=|| {
                    view! {
                        <p class="dashboard-page__empty">
                            "Your account has no portal role yet. Contact an administrator."
                        </p>
                    }
                }
            >
                <div class="dashboard-page__grid">
                    <For each=sections key=|section| *section let:section>
                        <a class="dashboard-card" href=section.href()>
                            <h2>{section.label()}</h2>
                            <p>{section.description()}</p>
                        </a>
                    </For>
                </div>
            </Show>
        </div>
    }
}
