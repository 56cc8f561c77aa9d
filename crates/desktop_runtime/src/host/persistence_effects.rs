use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_icon_layout(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let positions = runtime.state.get_untracked().icons.positions().clone();
    spawn_local(async move {
        let prefs = host.prefs_store();
        if let Err(err) = persistence::persist_icon_positions(prefs.as_ref(), &positions).await {
            logging::warn!("persist icon layout failed: {err}");
        }
    });
}

pub(super) fn mark_welcome_shown(host: DesktopHostContext) {
    spawn_local(async move {
        let prefs = host.prefs_store();
        if let Err(err) = persistence::mark_welcome_shown(prefs.as_ref()).await {
            logging::warn!("persist welcome flag failed: {err}");
        }
    });
}
