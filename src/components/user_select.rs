//! User Pickers
//!
//! Assignee and team selection backed by the user directory.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_api;
use crate::store::{refresh_users, use_app_store, AppStateStoreFields};

/// Load the directory once if nothing is cached yet
fn ensure_users_loaded() {
    let api = use_api();
    let store = use_app_store();
    if store.users().with_untracked(|u| u.is_empty()) {
        spawn_local(async move {
            refresh_users(&api, store).await;
        });
    }
}

/// Single user dropdown; empty selection means unassigned
#[component]
pub fn UserSelect(selected: RwSignal<String>) -> impl IntoView {
    let store = use_app_store();
    ensure_users_loaded();

    view! {
        <select on:change=move |ev| selected.set(event_target_value(&ev))>
            <option value="" selected=move || selected.with(|s| s.is_empty())>"Unassigned"</option>
            <For
                each=move || store.users().get()
                key=|u| u.id.clone()
                children=move |user| {
                    let id = user.id.clone();
                    view! {
                        <option value=user.id.clone() selected=move || selected.with(|s| *s == id)>
                            {user.name.clone()}
                        </option>
                    }
                }
            />
        </select>
    }
}

/// Checkbox list of users
#[component]
pub fn UserMultiSelect(selected: RwSignal<Vec<String>>) -> impl IntoView {
    let store = use_app_store();
    ensure_users_loaded();

    view! {
        <div class="user-multi-select">
            <For
                each=move || store.users().get()
                key=|u| u.id.clone()
                children=move |user| {
                    let id = user.id.clone();
                    let check_id = id.clone();
                    view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || selected.with(|s| s.contains(&check_id))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    let id = id.clone();
                                    selected.update(|s| {
                                        s.retain(|x| *x != id);
                                        if checked {
                                            s.push(id);
                                        }
                                    });
                                }
                            />
                            {user.name.clone()}
                        </label>
                    }
                }
            />
        </div>
    }
}
