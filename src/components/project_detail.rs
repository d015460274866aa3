//! Project Detail
//!
//! Header plus the Board / Finance / Team / GitHub / Files tabs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::display_date;
use crate::components::{ErrorBanner, GitHubPanel, KanbanBoard, ProjectFiles, ProjectFinance, ProjectTeam};
use crate::context::{use_api, use_app_context};
use crate::ledger::format_currency;
use crate::models::Project;
use crate::routes::{ProjectTab, Route};
use crate::store::{store_update_project, use_app_store};

#[component]
pub fn ProjectDetail(project_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let project = RwSignal::new(None::<Project>);
    let (tab, set_tab) = signal(ProjectTab::default());
    let (error, set_error) = signal::<Option<String>>(None);

    {
        let project_id = project_id.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let api = api.clone();
            let id = project_id.clone();
            spawn_local(async move {
                match api.get_project(&id).await {
                    Ok(loaded) => {
                        store_update_project(&store, loaded.clone());
                        project.set(Some(loaded));
                        set_error.set(None);
                    }
                    Err(err) => {
                        log::error!("failed to load project {}: {}", id, err);
                        set_error.set(Some(err.user_message()));
                    }
                }
            });
        });
    }

    // Tabs write back project changes (team, repository link)
    let on_project_changed = Callback::new(move |updated: Project| {
        store_update_project(&store, updated.clone());
        project.set(Some(updated));
    });

    view! {
        <div class="project-detail">
            <button class="link-btn back" on:click=move |_| ctx.navigate(Route::Projects)>"← Projects"</button>
            <ErrorBanner message=error />

            {move || {
                project
                    .get()
                    .map(|p| {
                        view! {
                            <header class="detail-header">
                                <div>
                                    <h1>{p.title.clone()}</h1>
                                    <p class="muted">{p.client.clone()}</p>
                                </div>
                                <span class=format!("badge tone-{}", p.status.tone())>{p.status.label()}</span>
                                <dl class="project-meta">
                                    <dt>"Budget"</dt>
                                    <dd>{format_currency(p.budget)}</dd>
                                    <dt>"Dates"</dt>
                                    <dd>{format!("{} ~ {}", display_date(p.start_date), display_date(p.end_date))}</dd>
                                    <dt>"Progress"</dt>
                                    <dd>{format!("{}%", p.progress)}</dd>
                                </dl>
                            </header>
                        }
                    })
            }}

            <nav class="tab-bar">
                {ProjectTab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                class=move || if tab.get() == t { "tab active" } else { "tab" }
                                on:click=move |_| set_tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            {move || {
                let Some(p) = project.get() else {
                    return view! { <p class="muted">"Loading..."</p> }.into_any();
                };
                match tab.get() {
                    ProjectTab::Board => view! { <KanbanBoard project_id=p.id.clone() /> }.into_any(),
                    ProjectTab::Finance => view! { <ProjectFinance project=p /> }.into_any(),
                    ProjectTab::Team => view! { <ProjectTeam project=p on_changed=on_project_changed /> }.into_any(),
                    ProjectTab::GitHub => view! { <GitHubPanel project=p on_changed=on_project_changed /> }.into_any(),
                    ProjectTab::Files => view! { <ProjectFiles project=p /> }.into_any(),
                }
            }}
        </div>
    }
}
