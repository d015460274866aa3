//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::routes::{self, Route};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current route - read
    pub route: ReadSignal<Route>,
    /// Current route - write
    set_route: WriteSignal<Route>,
    /// Bumped after mutations so views re-fetch - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped after mutations so views re-fetch - write
    set_reload_trigger: WriteSignal<u32>,
    /// Drag activation distance in pixels
    pub drag_threshold_px: i32,
}

impl AppContext {
    pub fn new(
        route: (ReadSignal<Route>, WriteSignal<Route>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        config: &AppConfig,
    ) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            drag_threshold_px: config.drag_threshold_px,
        }
    }

    /// Navigate with a new history entry
    pub fn navigate(&self, route: Route) {
        if self.route.get_untracked() != route {
            routes::push_history(&route);
            self.set_route.set(route);
        }
    }

    /// Navigate replacing the current history entry
    pub fn redirect(&self, route: Route) {
        routes::replace_history(&route);
        self.set_route.set(route);
    }

    /// Re-sync from the location after back/forward
    pub fn sync_from_location(&self) {
        self.set_route.set(Route::parse(&routes::current_path()));
    }

    /// Trigger a reload of view data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Shared API client
pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}
