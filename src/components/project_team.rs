//! Project Team Tab
//!
//! Members of a project; adding or removing one saves the project's team
//! id list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DeleteConfirmButton, ErrorBanner};
use crate::context::use_api;
use crate::models::{Project, ProjectRequest};
use crate::store::{refresh_users, use_app_store, AppStateStoreFields};

#[component]
pub fn ProjectTeam(project: Project, #[prop(into)] on_changed: Callback<Project>) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let (selected, set_selected) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let members = RwSignal::new(project.team.clone());

    {
        let api = api.clone();
        let project_id = project.id.clone();
        spawn_local(async move {
            match api.project_members(&project_id).await {
                Ok(list) => members.set(list),
                Err(err) => log::warn!("failed to load members of {}: {}", project_id, err),
            }
            refresh_users(&api, store).await;
        });
    }

    let team_ids = move || members.with(|m| m.iter().map(|m| m.id.clone()).collect::<Vec<_>>());

    // Saves a new team list through the regular project update
    let save_team = {
        let project = project.clone();
        Callback::new(move |ids: Vec<String>| {
            let mut request = ProjectRequest::from_project(&project);
            request.team_ids = ids;
            let api = api.clone();
            let id = project.id.clone();
            set_busy.set(true);
            set_error.set(None);
            spawn_local(async move {
                let result = api.update_project(&id, &request).await;
                set_busy.set(false);
                match result {
                    Ok(updated) => on_changed.run(updated),
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        })
    };

    let add_member = move |_| {
        let user_id = selected.get();
        if user_id.is_empty() {
            return;
        }
        let mut ids = team_ids();
        if ids.contains(&user_id) {
            set_error.set(Some("Already a member of this team".to_string()));
            return;
        }
        ids.push(user_id);
        set_selected.set(String::new());
        save_team.run(ids);
    };

    let available = move || {
        let ids = team_ids();
        store
            .users()
            .get()
            .into_iter()
            .filter(|u| !ids.contains(&u.id))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="project-team">
            <ErrorBanner message=error />
            <div class="inline-form">
                <select on:change=move |ev| set_selected.set(event_target_value(&ev))>
                    <option value="" selected=move || selected.with(|s| s.is_empty())>"Select a user"</option>
                    {move || {
                        available()
                            .into_iter()
                            .map(|u| view! { <option value=u.id.clone()>{u.name.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <button class="primary-btn" on:click=add_member disabled=move || busy.get()>"Add member"</button>
            </div>

            <Show
                when=move || !members.with(|m| m.is_empty())
                fallback=|| view! { <p class="muted empty-state">"No team members yet"</p> }
            >
                <ul class="member-list">
                    <For
                        each=move || members.get()
                        key=|m| m.id.clone()
                        children=move |member| {
                            let member_id = member.id.clone();
                            view! {
                                <li class="member">
                                    <span class="avatar">{member.initial()}</span>
                                    <div class="member-info">
                                        <span class="member-name">{member.name.clone()}</span>
                                        <span class="muted">{member.email.clone().unwrap_or_default()}</span>
                                    </div>
                                    <span class="chip">{member.role.map(|r| r.label()).unwrap_or_default()}</span>
                                    <DeleteConfirmButton
                                        button_class="link-btn danger"
                                        label="Remove"
                                        on_confirm=move |_| {
                                            let remaining = team_ids().into_iter().filter(|id| *id != member_id).collect();
                                            save_team.run(remaining);
                                        }
                                    />
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
