//! Task Detail Modal
//!
//! Edit title, status, assignee, deadline and description; delete after a
//! browser confirm.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::components::fields::{format_datetime, parse_datetime};
use crate::components::{ErrorBanner, Modal, UserSelect};
use crate::context::use_api;
use crate::kanban::{self, TaskDraft};
use crate::models::{Task, TaskStatus};

#[component]
pub fn TaskDetailModal(
    task: Task,
    #[prop(into)] on_saved: Callback<Task>,
    #[prop(into)] on_deleted: Callback<String>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let task_id = task.id.clone();
    let draft = RwSignal::new(TaskDraft::from_task(&task));
    let assignee = RwSignal::new(draft.get_untracked().assignee_id.clone());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let save = {
        let api = api.clone();
        let id = task_id.clone();
        move |_| {
            let mut current = draft.get();
            current.assignee_id = assignee.get();
            let api = api.clone();
            let id = id.clone();
            set_busy.set(true);
            spawn_local(async move {
                let result = kanban::save_detail(&api, &id, &current).await;
                set_busy.set(false);
                match result {
                    Ok(saved) => on_saved.run(saved),
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let delete = move |_| {
        let confirmed = browser::confirm("Delete this task?");
        let api = api.clone();
        let id = task_id.clone();
        spawn_local(async move {
            match kanban::delete_task(&api, &id, confirmed).await {
                Ok(true) => on_deleted.run(id),
                Ok(false) => {}
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <Modal title="Task" on_close=on_close>
            <div class="form">
                <ErrorBanner message=error />
                <label>
                    "Title"
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                </label>
                <div class="form-row">
                    <label>
                        "Status"
                        <select on:change=move |ev| {
                            if let Some(status) = TaskStatus::parse(&event_target_value(&ev)) {
                                draft.update(|d| d.status = status);
                            }
                        }>
                            {TaskStatus::ALL
                                .into_iter()
                                .map(|status| {
                                    view! {
                                        <option value=status.as_str() selected=move || draft.with(|d| d.status == status)>
                                            {status.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Assignee"
                        <UserSelect selected=assignee />
                    </label>
                </div>
                <label>
                    "Deadline"
                    <input
                        type="datetime-local"
                        prop:value=move || format_datetime(draft.with(|d| d.deadline))
                        on:change=move |ev| draft.update(|d| d.deadline = parse_datetime(&event_target_value(&ev)))
                    />
                </label>
                <label>
                    "Description"
                    <textarea
                        rows="5"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="form-actions">
                    <button class="danger-btn" on:click=delete disabled=move || busy.get()>"Delete"</button>
                    <button on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="primary-btn" on:click=save disabled=move || busy.get()>"Save"</button>
                </div>
            </div>
        </Modal>
    }
}
