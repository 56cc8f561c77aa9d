use std::collections::BTreeMap;

use desktop_app_contract::{AppDescriptor, ApplicationId};

use super::*;
use crate::{
    apps,
    desktop::{default_icon_positions, is_activation_key, resolve_icon_position, DesktopMetrics},
    icon_layout::{ICON_HEIGHT_PX, ICON_WIDTH_PX},
    model::IconPosition,
};

fn measure_container(container: NodeRef<html::Div>) -> Size {
    container
        .get_untracked()
        .map(|element| {
            let rect = element.get_bounding_client_rect();
            Size::new(rect.width(), rect.height())
        })
        .unwrap_or_default()
}

#[component]
pub(super) fn DesktopIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let container = create_node_ref::<html::Div>();
    let metrics = create_rw_signal(DesktopMetrics::from_measurement(
        Size::default(),
        runtime.host.get_value().window_inner_size(),
    ));

    let measure = move || {
        metrics.set(DesktopMetrics::from_measurement(
            measure_container(container),
            runtime.host.get_value().window_inner_size(),
        ));
    };
    container.on_load(move |_| measure());
    let resize_listener = window_event_listener(ev::resize, move |_| measure());
    on_cleanup(move || resize_listener.remove());

    let icon_apps = apps::desktop_icon_apps();
    let app_ids: Vec<ApplicationId> = icon_apps.iter().map(|app| app.app_id.clone()).collect();
    let defaults = create_memo(move |_| default_icon_positions(&app_ids, metrics.get()));

    view! {
        <div
            class="desktop-icon-layer"
            data-ui-kind="desktop-icon-grid"
            style="position:absolute;inset:0;"
            node_ref=container
        >
            {icon_apps
                .into_iter()
                .map(|app| view! { <DesktopIcon app=app defaults=defaults metrics=metrics /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn DesktopIcon(
    app: &'static AppDescriptor,
    defaults: Memo<BTreeMap<ApplicationId, IconPosition>>,
    metrics: RwSignal<DesktopMetrics>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app.app_id.clone());

    let position = Signal::derive(move || {
        runtime.state.with(|desktop| {
            defaults.with(|defaults| {
                app_id.with_value(|id| resolve_icon_position(id, desktop.icons.positions(), defaults))
            })
        })
    });
    let dragging = Signal::derive(move || {
        runtime
            .interaction
            .with(|ui| app_id.with_value(|id| ui.dragging_icon() == Some(id)))
    });

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginIconPress {
            app_id: app_id.get_value(),
            pointer_id: ev.pointer_id(),
            pointer: pointer_from_pointer_event(&ev),
            origin: position.get_untracked(),
            container: metrics.get_untracked().layout_bounds(),
        });
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if is_activation_key(&ev.key()) {
            ev.prevent_default();
            runtime.dispatch_action(DesktopAction::ActivateApp {
                app_id: app_id.get_value(),
            });
        }
    };

    let glyph = app.title.chars().next().unwrap_or('?').to_string();

    view! {
        <button
            type="button"
            class=move || {
                if dragging.get() { "desktop-icon dragging" } else { "desktop-icon" }
            }
            data-ui-kind="desktop-icon-button"
            data-app-id=app.app_id.to_string()
            aria-label=app.title
            title=app.title
            style=move || {
                let IconPosition { x, y } = position.get();
                format!(
                    "position:absolute;left:{x}px;top:{y}px;width:{ICON_WIDTH_PX}px;height:{ICON_HEIGHT_PX}px;touch-action:none;"
                )
            }
            on:pointerdown=on_pointerdown
            on:keydown=on_keydown
        >
            <span class="desktop-icon-glyph" aria-hidden="true">{glyph}</span>
            <span class="desktop-icon-label">{app.title}</span>
        </button>
    }
}
