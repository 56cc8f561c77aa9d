use desktop_app_contract::ApplicationId;
use desktop_runtime::{use_desktop_runtime, DesktopAction, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Desktop" />
        <Meta name="description" content="A windowed desktop environment in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider>
            <DesktopShell />
            <OpenFromQuery />
        </DesktopProvider>
    }
}

/// App slug requested with `?open=<app-id>`, if it is a valid id.
fn requested_app(raw: Option<&String>) -> Option<ApplicationId> {
    raw.and_then(|value| ApplicationId::new(value.trim()).ok())
}

/// Opens the app named by `?open=` once the desktop has mounted.
#[component]
fn OpenFromQuery() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = use_query_map();

    if let Some(app_id) = query.with_untracked(|map| requested_app(map.get("open"))) {
        runtime.dispatch_action(DesktopAction::ActivateApp { app_id });
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Nothing here"</h1>
            <A href="/">"Back to the desktop"</A>
        </section>
    }
}
