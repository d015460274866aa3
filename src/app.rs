//! Project Desk App
//!
//! Root component: builds the API client, store and context, guards
//! protected routes, and switches between login, admin and client portals.

use std::sync::Arc;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{AdminLayout, ClientPortal, LoginPage};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::UserRole;
use crate::routes::{self, Route};
use crate::session::{BrowserTokenStore, SessionEvent, SessionEvents};
use crate::store::{refresh_user, store_sign_out, AppState, AppStateStoreFields};

/// Which shell renders the current route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Portal {
    Login,
    Admin,
    Client,
}

fn portal_for(route: &Route) -> Portal {
    match route {
        Route::Login => Portal::Login,
        r if r.is_client_portal() => Portal::Client,
        _ => Portal::Admin,
    }
}

/// Where a signed-in user belongs when their role and portal disagree
fn home_for(role: Option<UserRole>, route: &Route) -> Option<Route> {
    match (role, portal_for(route)) {
        (Some(UserRole::Client), Portal::Admin | Portal::Login) => Some(Route::ClientHome),
        (Some(UserRole::Admin | UserRole::Dev), Portal::Client | Portal::Login) => Some(Route::Dashboard),
        _ => None,
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let session = SessionEvents::new();
    let api = ApiClient::new(&config, Arc::new(BrowserTokenStore::new(config.token_key.clone())), session.clone());
    let store = Store::new(AppState::default());

    let initial = Route::parse(&routes::current_path());
    let ctx = AppContext::new(signal(initial), signal(0u32), &config);

    provide_context(api.clone());
    provide_context(store);
    provide_context(ctx);

    // Token rejected or user signed out: back to login
    session.subscribe(move |event| {
        log::info!("session event: {:?}", event);
        store_sign_out(&store);
        match event {
            SessionEvent::Expired => {
                if ctx.route.get_untracked() != Route::Login {
                    ctx.redirect(Route::Login);
                }
            }
            SessionEvent::SignedOut => ctx.navigate(Route::Login),
        }
    });

    let popstate = window_event_listener(ev::popstate, move |_| ctx.sync_from_location());
    on_cleanup(move || popstate.remove());

    // `/` is the dashboard; show it under its canonical path
    if routes::current_path() == "/" {
        routes::replace_history(&Route::Dashboard);
    }

    // Auth guard: protected routes need a token and a valid session
    Effect::new(move |_| {
        let route = ctx.route.get();
        if !route.requires_session() {
            return;
        }
        if !api.has_token() {
            ctx.redirect(Route::Login);
            return;
        }
        if let Some(user) = store.user().get_untracked() {
            if let Some(home) = home_for(user.role, &route) {
                ctx.redirect(home);
            }
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            if !refresh_user(&api, store).await {
                ctx.redirect(Route::Login);
                return;
            }
            let role = store.user().get_untracked().and_then(|u| u.role);
            if let Some(home) = home_for(role, &ctx.route.get_untracked()) {
                ctx.redirect(home);
            }
        });
    });

    let portal = Memo::new(move |_| portal_for(&ctx.route.get()));

    view! {
        {move || match portal.get() {
            Portal::Login => view! { <LoginPage /> }.into_any(),
            Portal::Admin => view! { <AdminLayout /> }.into_any(),
            Portal::Client => view! { <ClientPortal /> }.into_any(),
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_for_routes() {
        assert_eq!(portal_for(&Route::Login), Portal::Login);
        assert_eq!(portal_for(&Route::ProjectDetail("p1".into())), Portal::Admin);
        assert_eq!(portal_for(&Route::ClientProjects), Portal::Client);
    }

    #[test]
    fn test_home_for_role() {
        assert_eq!(home_for(Some(UserRole::Client), &Route::Finance), Some(Route::ClientHome));
        assert_eq!(home_for(Some(UserRole::Client), &Route::ClientProjects), None);
        assert_eq!(home_for(Some(UserRole::Dev), &Route::ClientHome), Some(Route::Dashboard));
        assert_eq!(home_for(Some(UserRole::Admin), &Route::Calendar), None);
        assert_eq!(home_for(None, &Route::Calendar), None);
    }
}
