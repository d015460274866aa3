//! Project Form Modal
//!
//! Create or edit a project, including team members and the optional
//! GitHub repository creation on create.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::fields::{format_date, non_empty, parse_date};
use crate::components::{ErrorBanner, Modal, UserMultiSelect};
use crate::context::use_api;
use crate::models::{Project, ProjectRequest, ProjectStatus};

#[component]
pub fn ProjectFormModal(
    /// Project being edited; None creates a new one
    project: Option<Project>,
    #[prop(into)] on_saved: Callback<Project>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let editing_id = project.as_ref().map(|p| p.id.clone());
    let is_new = editing_id.is_none();
    let initial = project.as_ref().map(ProjectRequest::from_project).unwrap_or_default();

    let form = RwSignal::new(initial);
    let (budget_text, set_budget_text) = signal(
        project.as_ref().map(|p| p.budget.to_string()).unwrap_or_default(),
    );
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let team_ids = RwSignal::new(form.get_untracked().team_ids.clone());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut request = form.get();
        request.title = request.title.trim().to_string();
        if request.title.is_empty() {
            set_error.set(Some("Project name is required".to_string()));
            return;
        }
        request.budget = match budget_text.get().trim() {
            "" => 0.0,
            text => match text.parse::<f64>() {
                Ok(value) if value >= 0.0 => value,
                _ => {
                    set_error.set(Some("Budget must be a number".to_string()));
                    return;
                }
            },
        };
        request.team_ids = team_ids.get();
        if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
            if end < start {
                set_error.set(Some("End date is before start date".to_string()));
                return;
            }
        }

        let api = api.clone();
        let editing_id = editing_id.clone();
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_project(&id, &request).await,
                None => api.create_project(&request).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    log::info!("saved project {}", saved.id);
                    on_saved.run(saved);
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    let title = if is_new { "New project" } else { "Edit project" };

    view! {
        <Modal title=title on_close=on_close>
            <form class="form" on:submit=on_submit>
                <ErrorBanner message=error />
                <label>
                    "Project name"
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.title.clone())
                        on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Client"
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.client.clone())
                        on:input=move |ev| form.update(|f| f.client = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Status"
                    <select on:change=move |ev| {
                        if let Some(status) = ProjectStatus::parse(&event_target_value(&ev)) {
                            form.update(|f| f.status = status);
                        }
                    }>
                        {ProjectStatus::ALL
                            .into_iter()
                            .map(|status| {
                                view! {
                                    <option
                                        value=status.as_str()
                                        selected=move || form.with(|f| f.status == status)
                                    >
                                        {status.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <div class="form-row">
                    <label>
                        "Start date"
                        <input
                            type="date"
                            prop:value=move || format_date(form.with(|f| f.start_date))
                            on:change=move |ev| form.update(|f| f.start_date = parse_date(&event_target_value(&ev)))
                        />
                    </label>
                    <label>
                        "End date"
                        <input
                            type="date"
                            prop:value=move || format_date(form.with(|f| f.end_date))
                            on:change=move |ev| form.update(|f| f.end_date = parse_date(&event_target_value(&ev)))
                        />
                    </label>
                </div>
                <label>
                    "Budget"
                    <input
                        type="number"
                        min="0"
                        prop:value=move || budget_text.get()
                        on:input=move |ev| set_budget_text.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Team members"
                    <UserMultiSelect selected=team_ids />
                </label>
                <label>
                    "Description"
                    <textarea
                        rows="4"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                </label>

                <Show when=move || is_new>
                    <fieldset class="github-create">
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.create_github_repo == Some(true))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    form.update(|f| f.create_github_repo = checked.then_some(true));
                                }
                            />
                            "Create a GitHub repository"
                        </label>
                        <Show when=move || form.with(|f| f.create_github_repo == Some(true))>
                            <label>
                                "Access token"
                                <input
                                    type="password"
                                    on:input=move |ev| form.update(|f| f.github_token = non_empty(event_target_value(&ev)))
                                />
                            </label>
                            <label>
                                "Repository description"
                                <input
                                    type="text"
                                    on:input=move |ev| {
                                        form.update(|f| f.github_repo_description = non_empty(event_target_value(&ev)))
                                    }
                                />
                            </label>
                            <label class="checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || form.with(|f| f.github_private.unwrap_or(true))
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        form.update(|f| f.github_private = Some(checked));
                                    }
                                />
                                "Private"
                            </label>
                        </Show>
                    </fieldset>
                </Show>

                <div class="form-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                        {if is_new { "Create" } else { "Save" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
