//! Project List
//!
//! Searchable project cards with create, edit and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::display_date;
use crate::components::{DeleteConfirmButton, ErrorBanner, ProjectFormModal};
use crate::context::{use_api, use_app_context};
use crate::ledger::format_currency;
use crate::models::Project;
use crate::routes::Route;
use crate::store::{refresh_projects, store_remove_project, store_update_project, use_app_store, AppStateStoreFields};

/// Which project the form modal is open for
#[derive(Clone)]
enum FormTarget {
    New,
    Edit(Project),
}

#[component]
pub fn ProjectList() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let (query, set_query) = signal(String::new());
    let (form, set_form) = signal::<Option<FormTarget>>(None);

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

    let visible = Memo::new(move |_| {
        let q = query.get();
        store.projects().with(|projects| projects.iter().filter(|p| p.matches(&q)).cloned().collect::<Vec<_>>())
    });

    let on_saved = move |saved: Project| {
        let exists = store.projects().with_untracked(|ps| ps.iter().any(|p| p.id == saved.id));
        if exists {
            store_update_project(&store, saved);
        } else {
            store.projects().write().push(saved);
        }
        set_form.set(None);
    };

    let delete_project = Callback::new(move |id: String| {
        let api = api.clone();
        spawn_local(async move {
            match api.delete_project(&id).await {
                Ok(()) => {
                    log::info!("deleted project {}", id);
                    store_remove_project(&store, &id);
                }
                Err(err) => store.last_error().set(Some(err.user_message())),
            }
        });
    });

    view! {
        <div class="project-list">
            <div class="page-header">
                <h1>"Projects"</h1>
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search by name or client"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button class="primary-btn" on:click=move |_| set_form.set(Some(FormTarget::New))>
                    "+ New project"
                </button>
            </div>

            <ErrorBanner message=Signal::derive(move || store.last_error().get()) />

            <Show
                when=move || !visible.get().is_empty()
                fallback=move || {
                    let text = if store.loading().get() { "Loading..." } else { "No projects found" };
                    view! { <p class="muted empty-state">{text}</p> }
                }
            >
                <div class="card-grid">
                    <For
                        each=move || visible.get()
                        key=|p| (p.id.clone(), p.title.clone(), p.status, p.budget.to_bits(), p.progress)
                        children=move |project| {
                            let id = project.id.clone();
                            let open_id = id.clone();
                            let delete_id = id.clone();
                            let edit_project = project.clone();
                            view! {
                                <article
                                    class="project-card"
                                    on:click=move |_| ctx.navigate(Route::ProjectDetail(open_id.clone()))
                                >
                                    <header>
                                        <h3>{project.title.clone()}</h3>
                                        <span class=format!("badge tone-{}", project.status.tone())>
                                            {project.status.label()}
                                        </span>
                                    </header>
                                    <p class="muted">{project.client.clone()}</p>
                                    <div class="progress">
                                        <div class="progress-bar" style=format!("width: {}%", project.progress.clamp(0, 100))></div>
                                    </div>
                                    <dl class="project-meta">
                                        <dt>"Budget"</dt>
                                        <dd>{format_currency(project.budget)}</dd>
                                        <dt>"Dates"</dt>
                                        <dd>
                                            {format!(
                                                "{} ~ {}",
                                                display_date(project.start_date),
                                                display_date(project.end_date),
                                            )}
                                        </dd>
                                        <dt>"Team"</dt>
                                        <dd>{project.team.len()}</dd>
                                    </dl>
                                    <footer class="card-actions">
                                        <button
                                            class="link-btn"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                set_form.set(Some(FormTarget::Edit(edit_project.clone())));
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <DeleteConfirmButton
                                            button_class="link-btn danger"
                                            label="Delete"
                                            on_confirm=move |_| delete_project.run(delete_id.clone())
                                        />
                                    </footer>
                                </article>
                            }
                        }
                    />
                </div>
            </Show>

            {move || {
                form.get()
                    .map(|target| {
                        let project = match target {
                            FormTarget::New => None,
                            FormTarget::Edit(p) => Some(p),
                        };
                        view! {
                            <ProjectFormModal project=project on_saved=on_saved on_close=move |_| set_form.set(None) />
                        }
                    })
            }}
        </div>
    }
}
