//! Dashboard
//!
//! Project counts by status and the next few events.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::calendar::{today, upcoming};
use crate::context::{use_api, use_app_context};
use crate::models::count_by_status;
use crate::routes::Route;
use crate::store::{refresh_events, refresh_projects, use_app_store, AppStateStoreFields};

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = api.clone();
        spawn_local(async move {
            refresh_projects(&api, store).await;
            refresh_events(&api, store).await;
        });
    });

    let counts = move || count_by_status(&store.projects().get());
    let next_events = move || upcoming(&store.events().get(), today());
    let greeting = move || store.user().get().map(|u| format!("Welcome back, {}", u.name)).unwrap_or_default();

    view! {
        <div class="dashboard">
            <h1>{greeting}</h1>

            <section class="stat-grid">
                <div class="stat-card">
                    <span class="stat-label">"Projects"</span>
                    <span class="stat-value">{move || store.projects().get().len()}</span>
                </div>
                {move || {
                    counts()
                        .into_iter()
                        .map(|(status, count)| {
                            view! {
                                <div class=format!("stat-card tone-{}", status.tone())>
                                    <span class="stat-label">{status.label()}</span>
                                    <span class="stat-value">{count}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </section>

            <section class="panel">
                <div class="panel-header">
                    <h2>"Upcoming events"</h2>
                    <button class="link-btn" on:click=move |_| ctx.navigate(Route::Calendar)>"Open calendar"</button>
                </div>
                {move || {
                    let events = next_events();
                    if events.is_empty() {
                        view! { <p class="muted">"Nothing scheduled"</p> }.into_any()
                    } else {
                        view! {
                            <ul class="event-list">
                                {events
                                    .into_iter()
                                    .map(|e| {
                                        view! {
                                            <li class=format!("event-item priority-{}", e.priority.as_str().to_lowercase())>
                                                <span class="event-date">{e.start_date.format("%m/%d %H:%M").to_string()}</span>
                                                <span class="event-title">{e.title}</span>
                                                <span class="chip">{e.category}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}
