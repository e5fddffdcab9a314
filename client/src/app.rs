//! Root application component with routing and the auth context provider.
//!
//! Every signed-in route, the not-found fallback included, is wrapped in
//! `ProtectedRoute`, so the route table below is also the role table. Guards gate per route rather than around
//! `<Routes>`, keeping the full route list visible to SSR route generation.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{
    dashboard_redirect::DashboardRedirect, protected_route::ProtectedRoute, public_only::PublicOnly, sidebar::Shell,
};
use crate::pages::{
    dashboard::DashboardPage, login::LoginPage, not_found::NotFoundPage, register::RegisterPage,
    section::SectionPage, unauthorized::UnauthorizedPage,
};
use crate::state::auth::AuthContext;
use crate::util::credential_store::CredentialStore;
use crate::util::nav::Section;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Guarded, chrome-wrapped view for one portal section.
fn section_view(section: Section) -> impl IntoView {
    view! {
        <ProtectedRoute roles=section.required_roles().to_vec()>
            <Shell>
                <SectionPage section=section/>
            </Shell>
        </ProtectedRoute>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::provide(CredentialStore::browser());
    // Effects only run in the browser, so SSR and hydration both start Initializing.
    Effect::new(move || auth.restore());

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="SikshaSetu Portal"/>

        <Router>
            <Routes fallback=|| {
                view! {
                    <ProtectedRoute>
                        <Shell>
                            <NotFoundPage/>
                        </Shell>
                    </ProtectedRoute>
                }
            }>
                <Route path=StaticSegment("") view=DashboardRedirect/>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicOnly><LoginPage/></PublicOnly> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <PublicOnly><RegisterPage/></PublicOnly> }
                />
                <Route
                    path=StaticSegment("dashboard")
                    view=|| {
                        view! {
                            <ProtectedRoute>
                                <Shell>
                                    <DashboardPage/>
                                </Shell>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route
                    path=StaticSegment("unauthorized")
                    view=|| {
                        view! {
                            <ProtectedRoute>
                                <Shell>
                                    <UnauthorizedPage/>
                                </Shell>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route path=StaticSegment("users") view=|| section_view(Section::Users)/>
                <Route path=StaticSegment("students") view=|| section_view(Section::Students)/>
                <Route path=StaticSegment("faculty") view=|| section_view(Section::Faculty)/>
                <Route path=StaticSegment("branches") view=|| section_view(Section::Branches)/>
                <Route path=StaticSegment("attendance") view=|| section_view(Section::Attendance)/>
                <Route path=StaticSegment("results") view=|| section_view(Section::Results)/>
                <Route path=StaticSegment("events") view=|| section_view(Section::Events)/>
                <Route path=StaticSegment("notes") view=|| section_view(Section::Notes)/>
                <Route path=StaticSegment("notifications") view=|| section_view(Section::Notifications)/>
                <Route path=StaticSegment("chatbot") view=|| section_view(Section::Chatbot)/>
                <Route path=StaticSegment("virtual-classroom") view=|| section_view(Section::VirtualClassroom)/>
                <Route path=StaticSegment("join") view=|| section_view(Section::JoinClassroom)/>
            </Routes>
        </Router>
    }
}
