//! Desktop shell UI composition and pointer routing.
//!
//! Components only translate DOM events into [`DesktopAction`] values. Pointer moves, ups and
//! cancels are caught once at the shell root and forwarded with their pointer id; the capture state
//! machines decide which gesture, if any, they belong to.

mod desktop_icons;
mod top_bar;
mod window;

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use self::{desktop_icons::DesktopIcons, top_bar::TopBar, window::DesktopWindow};
use crate::{
    desktop::TOP_BAR_HEIGHT_PX,
    geometry::{PointerPosition, Size},
    interaction::InteractionState,
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Primary mouse button, or the primary touch/pen contact.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Area below the top bar that windows are laid out in.
fn window_area(viewport: Size) -> Size {
    Size::new(viewport.width, (viewport.height - TOP_BAR_HEIGHT_PX).max(0.0))
}

#[component]
/// Renders the full desktop shell UI.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let interaction = runtime.interaction;
    let viewport = create_rw_signal(runtime.host.get_value().desktop_viewport());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(runtime.host.get_value().desktop_viewport());
    });
    on_cleanup(move || resize_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if !interaction.with_untracked(InteractionState::has_capture) {
            return;
        }
        runtime.dispatch_action(DesktopAction::PointerMove {
            pointer_id: ev.pointer_id(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        if interaction.with_untracked(InteractionState::has_capture) {
            runtime.dispatch_action(DesktopAction::PointerUp {
                pointer_id: ev.pointer_id(),
            });
        }
    };
    let on_pointer_cancel = move |ev: web_sys::PointerEvent| {
        if interaction.with_untracked(InteractionState::has_capture) {
            runtime.dispatch_action(DesktopAction::PointerCancel {
                pointer_id: ev.pointer_id(),
            });
        }
    };
    let window_viewport = Signal::derive(move || window_area(viewport.get()));

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-ui-kind="desktop-root"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            <TopBar viewport=viewport.read_only() />
            <div
                class="desktop-surface"
                data-ui-kind="desktop-backdrop"
                style=format!("position:fixed;top:{}px;left:0;right:0;bottom:0;", TOP_BAR_HEIGHT_PX)
            >
                <DesktopIcons />
                <div
                    class="desktop-window-layer"
                    data-ui-kind="desktop-window-layer"
                    style="position:absolute;inset:0;pointer-events:none;"
                >
                    <For
                        each=move || state.with(|desktop| desktop.windows.windows().to_vec())
                        key=|win| win.id.clone()
                        let:win
                    >
                        <DesktopWindow window_id=win.id viewport=window_viewport />
                    </For>
                </div>
            </div>
            <Show
                when=move || interaction.with(InteractionState::resize_overlay_active)
                fallback=|| ()
            >
                <div
                    class="resize-overlay"
                    aria-hidden="true"
                    style=move || {
                        let cursor = interaction
                            .with(|ui| ui.resize_overlay_cursor())
                            .unwrap_or("default");
                        format!("position:fixed;inset:0;z-index:2147483647;cursor:{cursor};")
                    }
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn window_area_excludes_top_bar() {
        assert_eq!(
            window_area(Size::new(1280.0, 800.0)),
            Size::new(1280.0, 768.0)
        );
        assert_eq!(window_area(Size::new(300.0, 10.0)), Size::new(300.0, 0.0));
    }

    #[test]
    fn idle_interaction_has_no_capture() {
        assert!(!InteractionState::default().has_capture());
    }
}
