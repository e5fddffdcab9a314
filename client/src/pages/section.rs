//! Read-only list view for a portal section.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads the section's REST collection through the auth context, so a 401
//! here ends the session and the surrounding guard redirects to login.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::net::api::ApiError;
use crate::state::auth::{AuthError, use_auth};
use crate::util::nav::Section;

const SUMMARY_FIELDS: [&str; 5] = ["name", "title", "email", "subject", "message"];

#[derive(Clone, Debug, PartialEq)]
enum Listing {
    Unsupported,
    Loading,
    Loaded(Vec<String>),
    Failed(String),
}

/// Records in a collection response: a bare array or a page's `content`.
pub(crate) fn records_of(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("content") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// One-line label for a record: first non-empty descriptive field, then `id`.
pub(crate) fn record_summary(record: &Value) -> String {
    SUMMARY_FIELDS
        .iter()
        .find_map(|field| record.get(*field).and_then(Value::as_str).filter(|s| !s.trim().is_empty()))
        .map(str::to_owned)
        .or_else(|| record.get("id").map(|id| format!("#{}", id.as_str().map_or_else(|| id.to_string(), str::to_owned))))
        .unwrap_or_else(|| "(untitled)".to_owned())
}

pub(crate) fn failure_message(section: Section, err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { .. } => AuthError::Authorization.to_string(),
        ApiError::Status { status: 403, .. } => "You do not have access to this list.".to_owned(),
        _ => err
            .message()
            .map_or_else(|| format!("Could not load {}.", section.label().to_lowercase()), str::to_owned),
    }
}

#[component]
pub fn SectionPage(section: Section) -> impl IntoView {
    let auth = use_auth();
    let api_path = auth.with_untracked(|s| section.api_path(s));
    let listing = RwSignal::new(if api_path.is_some() { Listing::Loading } else { Listing::Unsupported });

    #[cfg(feature = "hydrate")]
    if let Some(path) = api_path {
        leptos::task::spawn_local(async move {
            let next = match auth.fetch_json::<Value>(path).await {
                Ok(body) => Listing::Loaded(records_of(body).iter().map(record_summary).collect()),
                Err(e) => {
                    leptos::logging::warn!("{} list failed: {e}", section.label());
                    Listing::Failed(failure_message(section, &e))
                }
            };
            listing.set(next);
        });
    }

    view! {
        <div class="section-page">
            <h1>{section.label()}</h1>
            <p class="section-page__description">{section.description()}</p>
            {move || match listing.get() {
                Listing::Unsupported => ().into_any(),
                Listing::Loading => view! { <p class="section-page__status">"Loading..."</p> }.into_any(),
                Listing::Failed(msg) => view! { <p class="section-page__error">{msg}</p> }.into_any(),
                Listing::Loaded(rows) if rows.is_empty() => {
                    view! { <p class="section-page__status">"Nothing here yet."</p> }.into_any()
                }
                Listing::Loaded(rows) => {
                    view! {
                        <ul class="section-page__list">
                            {rows.into_iter().map(|row| view! { <li>{row}</li> }).collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
