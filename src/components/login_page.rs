//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_api, use_app_context};
use crate::models::UserRole;
use crate::routes::Route;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::components::ErrorBanner;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let (login_id, set_login_id) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = login_id.get().trim().to_string();
        let secret = password.get();
        if id.is_empty() || secret.is_empty() {
            set_error.set(Some("Enter your account and password".to_string()));
            return;
        }
        let api = api.clone();
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api.login(&id, &secret).await {
                Ok(user) => {
                    let home = match user.role {
                        Some(UserRole::Client) => Route::ClientHome,
                        _ => Route::Dashboard,
                    };
                    store.user().set(Some(user));
                    set_password.set(String::new());
                    ctx.navigate(home);
                }
                Err(err) => {
                    log::warn!("login failed: {}", err);
                    set_error.set(Some(err.user_message()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="auth-layout">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Project Desk"</h1>
                <p class="muted">"Sign in to continue"</p>
                <ErrorBanner message=error />
                <label>
                    "Account"
                    <input
                        type="text"
                        autocomplete="username"
                        placeholder="Employee ID, username or email"
                        prop:value=move || login_id.get()
                        on:input=move |ev| set_login_id.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
