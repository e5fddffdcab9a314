//! Navigation sidebar with the signed-in identity and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists only the sections the route guard would render for this session,
//! and wraps every authenticated page through [`Shell`].

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::User;
use crate::state::auth::{DASHBOARD_PATH, use_auth};
use crate::util::auth::{LOGIN_PATH, replace_history};
use crate::util::nav::visible_sections;

fn role_names(user: &User) -> String {
    user.roles.iter().rev().map(|r| r.label()).collect::<Vec<_>>().join(", ")
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let email = move || auth.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());
    let initial = move || email().chars().next().map(|c| c.to_ascii_uppercase().to_string()).unwrap_or_default();
    let roles = move || auth.with(|s| s.user().map(role_names).unwrap_or_default());
    let sections = move || auth.with(visible_sections);

    let on_logout = move |_| {
        auth.logout();
        navigate(LOGIN_PATH, replace_history());
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar__brand">"SikshaSetu"</div>
            <div class="sidebar__user">
                <span class="sidebar__avatar">{initial}</span>
                <div class="sidebar__identity">
                    <p class="sidebar__email">{email}</p>
                    <p class="sidebar__roles">{roles}</p>
                </div>
            </div>
            <nav class="sidebar__nav">
                <ul>
                    <li>
                        <a href=DASHBOARD_PATH>"Dashboard"</a>
                    </li>
                    <For each=sections key=|section| *section let:section>
                        <li>
                            <a href=section.href()>{section.label()}</a>
                        </li>
                    </For>
                </ul>
            </nav>
            <button class="sidebar__logout" on:click=on_logout>
                "Logout"
            </button>
        </aside>
    }
}

/// Page chrome for authenticated screens.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="portal">
            <Sidebar/>
            <main class="portal__main">{children()}</main>
        </div>
    }
}
