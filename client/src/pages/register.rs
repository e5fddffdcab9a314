//! Registration page for new portal accounts.
//!
//! Registering never signs the user in; on success the page points them back
//! to the login screen.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::net::types::{RegisterRequest, Role};
use crate::state::auth::use_auth;
use crate::util::auth::LOGIN_PATH;

const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=50;
const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 6..=100;

pub(crate) const REGISTERED_MESSAGE: &str = "Registration successful! Please login.";

/// Check the form against the API's account constraints before sending it.
pub(crate) fn validate_register_input(
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<RegisterRequest, &'static str> {
    let name = name.trim();
    if !NAME_LEN.contains(&name.chars().count()) {
        return Err("Name must be between 2 and 50 characters.");
    }
    let email = email.trim();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err("Enter a valid email address.");
    }
    if !PASSWORD_LEN.contains(&password.chars().count()) {
        return Err("Password must be between 6 and 100 characters.");
    }
    let role = role.parse::<Role>().map_err(|_| "Choose a role.")?;
    Ok(RegisterRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned(), role })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student.as_str().to_owned());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let registered = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_register_input(&name.get(), &email.get(), &password.get(), &role.get()) {
            Ok(request) => request,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match auth.register(request).await {
                Ok(()) => {
                    password.set(String::new());
                    registered.set(true);
                    info.set(REGISTERED_MESSAGE.to_owned());
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, auth, registered);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@college.edu"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password (min 6 characters)"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <select
                        class="login-input"
                        prop:value=move || role.get()
                        on:change=move |ev| role.set(event_target_value(&ev))
                    >
                        {Role::ALL
                            .into_iter()
                            .rev()
                            .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                            .collect_view()}
                    </select>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Register"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    {move || if registered.get() { "Ready to go? " } else { "Already registered? " }}
                    <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
