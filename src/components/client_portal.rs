//! Client Portal
//!
//! Signed-in clients see their projects and progress.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::display_date;
use crate::components::ErrorBanner;
use crate::context::{use_api, use_app_context};
use crate::routes::Route;
use crate::session::SessionEvent;
use crate::store::{refresh_projects, use_app_store, AppStateStoreFields};

#[component]
pub fn ClientPortal() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    {
        let api = api.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let api = api.clone();
            spawn_local(async move {
                refresh_projects(&api, store).await;
            });
        });
    }

    let logout = move |_| {
        api.logout();
        api.session().publish(SessionEvent::SignedOut);
    };

    let name = move || store.user().get().map(|u| u.name).unwrap_or_default();
    let tab_class = move |route: Route| {
        move || if ctx.route.get() == route { "nav-item active" } else { "nav-item" }
    };

    view! {
        <div class="client-portal">
            <header class="topbar">
                <div class="brand">"Project Desk"</div>
                <nav>
                    <button class=tab_class(Route::ClientHome) on:click=move |_| ctx.navigate(Route::ClientHome)>"Home"</button>
                    <button class=tab_class(Route::ClientProjects) on:click=move |_| ctx.navigate(Route::ClientProjects)>
                        "My projects"
                    </button>
                </nav>
                <span class="user-name">{name}</span>
                <button class="link-btn" on:click=logout>"Sign out"</button>
            </header>
            <main class="page">
                <ErrorBanner message=Signal::derive(move || store.last_error().get()) />
                {move || match ctx.route.get() {
                    Route::ClientProjects => view! { <ClientProjects /> }.into_any(),
                    _ => view! {
                        <section class="panel">
                            <h1>{move || format!("Welcome, {}", name())}</h1>
                            <p class="muted">
                                {move || format!("You have {} projects with us.", store.projects().with(|p| p.len()))}
                            </p>
                            <button class="primary-btn" on:click=move |_| ctx.navigate(Route::ClientProjects)>
                                "View projects"
                            </button>
                        </section>
                    }
                        .into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
fn ClientProjects() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="card-grid">
            <For
                each=move || store.projects().get()
                key=|p| (p.id.clone(), p.progress, p.status)
                children=|project| {
                    view! {
                        <article class="project-card">
                            <header>
                                <h3>{project.title.clone()}</h3>
                                <span class=format!("badge tone-{}", project.status.tone())>{project.status.label()}</span>
                            </header>
                            <div class="progress">
                                <div class="progress-bar" style=format!("width: {}%", project.progress.clamp(0, 100))></div>
                            </div>
                            <p class="muted">{format!("{}% complete", project.progress)}</p>
                            <p class="muted">
                                {format!("{} ~ {}", display_date(project.start_date), display_date(project.end_date))}
                            </p>
                            {project.description.clone().map(|d| view! { <p>{d}</p> })}
                        </article>
                    }
                }
            />
        </div>
    }
}
