use desktop_app_contract::AppMountContext;

use super::*;
use crate::{
    apps,
    interaction::ResizeEdge,
    model::{WindowId, WindowRect},
};

const TITLEBAR_STYLE: &str = "touch-action:none;";

/// Frame placement. Touch panning is disabled so pointer captures survive touch drags.
fn frame_css(rect: WindowRect, z_index: u32) -> String {
    format!(
        "position:absolute;pointer-events:auto;touch-action:none;left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        rect.x, rect.y, rect.w, rect.h, z_index
    )
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId, viewport: Signal<Size>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_id = store_value(window_id);

    let window = Signal::derive(move || {
        runtime
            .state
            .with(|desktop| window_id.with_value(|id| desktop.windows.window(id).cloned()))
    });
    let is_active = Signal::derive(move || {
        runtime.state.with(|desktop| {
            window_id.with_value(|id| desktop.windows.active_window_id() == Some(id))
        })
    });

    let focus = move |_: web_sys::PointerEvent| {
        if !is_active.get_untracked() {
            runtime.dispatch_action(DesktopAction::FocusWindow {
                window_id: window_id.get_value(),
            });
        }
    };
    let minimize = move || {
        runtime.dispatch_action(DesktopAction::MinimizeWindow {
            window_id: window_id.get_value(),
        })
    };
    let close = move || {
        runtime.dispatch_action(DesktopAction::CloseWindow {
            window_id: window_id.get_value(),
        })
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::ToggleMaximize {
            window_id: window_id.get_value(),
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id: window_id.get_value(),
            pointer_id: ev.pointer_id(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        toggle_maximize();
    };
    let swallow_pointerdown = move |ev: web_sys::PointerEvent| ev.stop_propagation();

    let frame_style = move || {
        window.with(|win| {
            win.as_ref()
                .map(|win| frame_css(win.rendered_rect(viewport.get()), win.z_index))
                .unwrap_or_default()
        })
    };
    let frame_class = move || {
        let (minimized, maximized) = window.with(|win| {
            win.as_ref()
                .map(|win| (win.is_minimized, win.is_maximized))
                .unwrap_or_default()
        });
        format!(
            "desktop-window{}{}{}",
            if is_active.get() { " focused" } else { "" },
            if minimized { " minimized" } else { "" },
            if maximized { " maximized" } else { "" }
        )
    };
    let is_minimized = move || window.with(|win| win.as_ref().is_some_and(|w| w.is_minimized));
    let is_maximized = move || window.with(|win| win.as_ref().is_some_and(|w| w.is_maximized));
    let title = move || {
        window.with(|win| win.as_ref().map(|w| w.title.clone()).unwrap_or_default())
    };
    let show_handles = move || {
        window.with(|win| {
            win.as_ref()
                .is_some_and(|w| apps::is_resizable(&w.app_id) && !w.is_maximized)
        })
    };

    view! {
        <Show when=move || window.with(Option::is_some) fallback=|| ()>
            <section
                class=frame_class
                style=frame_style
                hidden=is_minimized
                data-window-id=move || window_id.get_value().to_string()
                on:pointerdown=focus
                role="dialog"
                aria-label=title
            >
                <header
                    class="titlebar"
                    style=TITLEBAR_STYLE
                    on:pointerdown=begin_move
                    on:dblclick=titlebar_double_click
                >
                    <div class="titlebar-title">
                        <span>{title}</span>
                    </div>
                    <div class="titlebar-controls">
                        <button
                            type="button"
                            aria-label="Minimize window"
                            on:pointerdown=swallow_pointerdown
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                minimize();
                            }
                        >
                            "_"
                        </button>
                        <button
                            type="button"
                            aria-label=move || {
                                if is_maximized() { "Restore window" } else { "Maximize window" }
                            }
                            on:pointerdown=swallow_pointerdown
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                toggle_maximize();
                            }
                        >
                            {move || if is_maximized() { "❐" } else { "□" }}
                        </button>
                        <button
                            type="button"
                            aria-label="Close window"
                            on:pointerdown=swallow_pointerdown
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                close();
                            }
                        >
                            "×"
                        </button>
                    </div>
                </header>
                <div class="window-body">
                    <WindowBody window_id=window_id.get_value() />
                </div>
                <Show when=show_handles fallback=|| ()>
                    {ResizeEdge::ALL
                        .into_iter()
                        .map(|edge| {
                            view! { <WindowResizeHandle window_id=window_id.get_value() edge=edge /> }
                        })
                        .collect_view()}
                </Show>
            </section>
        </Show>
    }
}

const RESIZE_HANDLE_PX: i32 = 6;

/// Absolute placement of a handle along its edge or corner of the frame.
fn handle_style(edge: ResizeEdge) -> String {
    let thickness = format!("{RESIZE_HANDLE_PX}px");
    let outset = format!("-{}px", RESIZE_HANDLE_PX / 2);
    let span = |near: bool, far: bool| match (near, far) {
        (true, _) | (_, true) => thickness.clone(),
        _ => format!("calc(100% - {}px)", RESIZE_HANDLE_PX * 2),
    };
    let vertical = if edge.has_north() {
        format!("top:{outset};")
    } else if edge.has_south() {
        format!("bottom:{outset};")
    } else {
        format!("top:{RESIZE_HANDLE_PX}px;")
    };
    let horizontal = if edge.has_west() {
        format!("left:{outset};")
    } else if edge.has_east() {
        format!("right:{outset};")
    } else {
        format!("left:{RESIZE_HANDLE_PX}px;")
    };
    format!(
        "position:absolute;touch-action:none;{vertical}{horizontal}width:{};height:{};cursor:{};",
        span(edge.has_west(), edge.has_east()),
        span(edge.has_north(), edge.has_south()),
        edge.css_cursor()
    )
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_id = store_value(window_id);
    let class_name = format!("window-resize-handle {}", edge.css_class());

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id: window_id.get_value(),
            edge,
            pointer_id: ev.pointer_id(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=class_name
            style=handle_style(edge)
            data-edge=edge.token()
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = runtime
        .state
        .with_untracked(|desktop| desktop.windows.window(&window_id).cloned())
        .and_then(|window| {
            apps::app_descriptor(&window.app_id).map(|descriptor| {
                descriptor.module.mount(AppMountContext {
                    app_id: window.app_id.clone(),
                    window_id: window.id.to_string(),
                    title: window.title.clone(),
                })
            })
        })
        .unwrap_or_else(|| view! { <p>"Unknown application"</p> }.into_view());

    view! {
        <div class="window-body-content">
            {contents}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn edge_handles_span_the_side() {
        assert_eq!(
            handle_style(ResizeEdge::West),
            "position:absolute;touch-action:none;top:6px;left:-3px;width:6px;height:calc(100% - 12px);cursor:w-resize;"
        );
    }

    #[test]
    fn frame_and_title_bar_opt_out_of_touch_panning() {
        let style = frame_css(
            WindowRect {
                x: 50,
                y: 60,
                w: 900,
                h: 600,
            },
            101,
        );
        assert!(style.contains("touch-action:none;"));
        assert!(style.contains("left:50px;top:60px;width:900px;height:600px;z-index:101;"));
        assert_eq!(TITLEBAR_STYLE, "touch-action:none;");
        for edge in ResizeEdge::ALL {
            assert!(handle_style(edge).contains("touch-action:none;"), "{edge:?}");
        }
    }

    #[test]
    fn corner_handles_are_square() {
        assert_eq!(
            handle_style(ResizeEdge::SouthEast),
            "position:absolute;touch-action:none;bottom:-3px;right:-3px;width:6px;height:6px;cursor:se-resize;"
        );
    }
}
