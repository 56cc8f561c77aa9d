//! Placeholder content for the built-in apps. Real app contents live outside the window manager.

use desktop_app_contract::AppMountContext;
use leptos::*;

pub(super) fn mount_readme_app(_: AppMountContext) -> View {
    view! {
        <div class="app-shell app-readme">
            <h1>"Read Me First"</h1>
            <p>"This desktop is a personal workspace: part notebook, part playground."</p>
            <ul>
                <li>"A single click on an icon opens its app."</li>
                <li>"Drag icons anywhere. Desktop Icons > Clean Up Icons tidies them back into a grid."</li>
                <li>"Drag a window by its title bar, resize it from any edge or corner."</li>
            </ul>
        </div>
    }
    .into_view()
}

pub(super) fn mount_portfolio_app(context: AppMountContext) -> View {
    view! {
        <div class="app-shell app-portfolio">
            <h1>{context.title}</h1>
            <p>"Experience, projects and contact details render here."</p>
        </div>
    }
    .into_view()
}

pub(super) fn mount_settings_app(_: AppMountContext) -> View {
    view! {
        <div class="app-shell app-settings">
            <p><strong>"Settings"</strong></p>
            <p>"Appearance and wallpaper options are managed by the theme layer."</p>
        </div>
    }
    .into_view()
}

pub(super) fn mount_browser_app(context: AppMountContext) -> View {
    let address = create_rw_signal(String::from("about:blank"));
    view! {
        <div class="app-shell app-browser">
            <div class="app-toolbar" role="group" aria-label="Browser controls">
                <input
                    type="text"
                    aria-label="Address"
                    prop:value=move || address.get()
                    on:change=move |ev| address.set(event_target_value(&ev))
                />
            </div>
            <iframe
                class="app-browser-frame"
                title=context.window_id
                src=move || address.get()
            ></iframe>
        </div>
    }
    .into_view()
}
