use desktop_app_contract::ApplicationId;
use leptos::logging;

use crate::{
    apps, geometry::Size, reducer::DesktopAction, runtime_context::DesktopRuntimeContext,
};

const FALLBACK_VIEWPORT: Size = Size::new(1024.0, 768.0);

/// Opens `app_id` with its registry title, or raises its existing window.
pub(super) fn activate_app(runtime: DesktopRuntimeContext, app_id: ApplicationId) {
    let Some(title) = apps::app_title(&app_id) else {
        logging::warn!("activate ignored for unregistered app `{app_id}`");
        return;
    };
    runtime.dispatch_action(DesktopAction::OpenWindow {
        app_id,
        title: title.to_string(),
        viewport: desktop_viewport(),
    });
}

pub(super) fn desktop_viewport() -> Size {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(FALLBACK_VIEWPORT.width);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(FALLBACK_VIEWPORT.height);
            return Size::new(width, height);
        }
    }

    FALLBACK_VIEWPORT
}

pub(super) fn window_inner_size() -> Option<Size> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some(Size::new(width, height))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
