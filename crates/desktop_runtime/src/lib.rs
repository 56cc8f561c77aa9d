//! Browser desktop runtime: window manager, desktop icon layout, pointer interaction, and the
//! Leptos shell that renders them.

pub mod apps;
pub mod components;
pub mod desktop;
mod effect_executor;
pub mod geometry;
pub mod host;
pub mod icon_layout;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use icon_layout::{IconLayoutBounds, IconLayoutStore};
pub use interaction::InteractionState;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, DesktopState, RuntimeEffect};
pub use window_manager::WindowStore;
