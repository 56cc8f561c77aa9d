use desktop_app_contract::ApplicationId;

use super::*;
use crate::{apps, icon_layout::IconLayoutBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopBarMenu {
    Windows,
    Icons,
}

/// Bounds for "Clean Up Icons": the full viewport minus the top bar.
fn clean_up_bounds(viewport: Size) -> IconLayoutBounds {
    IconLayoutBounds {
        width: viewport.width,
        height: viewport.height,
        top_offset: TOP_BAR_HEIGHT_PX,
    }
}

fn desktop_icon_ids() -> Vec<ApplicationId> {
    apps::desktop_icon_apps()
        .into_iter()
        .map(|app| app.app_id.clone())
        .collect()
}

#[component]
pub(super) fn TopBar(viewport: ReadSignal<Size>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let open_menu = create_rw_signal(None::<TopBarMenu>);

    let outside_click = window_event_listener(ev::click, move |_| open_menu.set(None));
    on_cleanup(move || outside_click.remove());

    let toggle_menu = move |menu: TopBarMenu| {
        open_menu.update(|open| {
            *open = if *open == Some(menu) { None } else { Some(menu) };
        })
    };
    let run = move |action: DesktopAction| {
        open_menu.set(None);
        runtime.dispatch_action(action);
    };
    let active_title = move || {
        state.with(|desktop| {
            desktop
                .windows
                .active_window_id()
                .and_then(|id| desktop.windows.window(id))
                .map(|win| win.title.clone())
                .unwrap_or_else(|| "Desktop".to_string())
        })
    };

    view! {
        <nav
            class="top-bar"
            data-ui-kind="top-bar"
            style=format!(
                "position:fixed;top:0;left:0;right:0;height:{}px;z-index:2147483000;",
                TOP_BAR_HEIGHT_PX
            )
            on:click=move |ev| ev.stop_propagation()
        >
            <div class="top-bar-menu">
                <button
                    type="button"
                    class="top-bar-button"
                    aria-haspopup="menu"
                    aria-expanded=move || (open_menu.get() == Some(TopBarMenu::Windows)).to_string()
                    on:click=move |_| toggle_menu(TopBarMenu::Windows)
                >
                    {active_title}
                </button>
                <Show when=move || open_menu.get() == Some(TopBarMenu::Windows) fallback=|| ()>
                    <div class="top-bar-dropdown" role="menu" aria-label="Windows">
                        <button
                            type="button"
                            role="menuitem"
                            on:click=move |_| run(DesktopAction::ShowDesktop)
                        >
                            "Show Desktop"
                        </button>
                        <button
                            type="button"
                            role="menuitem"
                            on:click=move |_| run(DesktopAction::CloseAllWindows)
                        >
                            "Close All Apps"
                        </button>
                        <hr />
                        {move || {
                            let (windows, active) = state.with(|desktop| {
                                (
                                    desktop.windows.windows().to_vec(),
                                    desktop.windows.active_window_id().cloned(),
                                )
                            });
                            if windows.is_empty() {
                                return view! { <p class="top-bar-empty">"No apps open"</p> }
                                    .into_view();
                            }
                            windows
                                .into_iter()
                                .map(|win| {
                                    let is_active = active.as_ref() == Some(&win.id);
                                    let window_id = win.id.clone();
                                    view! {
                                        <button
                                            type="button"
                                            role="menuitem"
                                            class=if is_active { "active" } else { "" }
                                            on:click=move |_| {
                                                run(DesktopAction::FocusWindow {
                                                    window_id: window_id.clone(),
                                                })
                                            }
                                        >
                                            {win.title}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
            <div class="top-bar-menu">
                <button
                    type="button"
                    class="top-bar-button"
                    aria-haspopup="menu"
                    aria-expanded=move || (open_menu.get() == Some(TopBarMenu::Icons)).to_string()
                    on:click=move |_| toggle_menu(TopBarMenu::Icons)
                >
                    "Desktop Icons"
                </button>
                <Show when=move || open_menu.get() == Some(TopBarMenu::Icons) fallback=|| ()>
                    <div class="top-bar-dropdown" role="menu" aria-label="Desktop Icons">
                        <button
                            type="button"
                            role="menuitem"
                            on:click=move |_| {
                                run(DesktopAction::CleanUpIcons {
                                    app_ids: desktop_icon_ids(),
                                    bounds: clean_up_bounds(viewport.get_untracked()),
                                })
                            }
                        >
                            "Clean Up Icons"
                        </button>
                        <button
                            type="button"
                            role="menuitem"
                            on:click=move |_| run(DesktopAction::ResetIconPositions)
                        >
                            "Reset Icon Positions"
                        </button>
                    </div>
                </Show>
            </div>
        </nav>
    }
}
