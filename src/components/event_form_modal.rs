//! Event Form Modal
//!
//! Create, edit or delete a calendar event.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::calendar::EventDraft;
use crate::components::fields::{format_date, format_time, parse_date, parse_time};
use crate::components::{ErrorBanner, Modal};
use crate::context::use_api;
use crate::models::{CalendarEvent, Priority, RepeatType};
use crate::store::{store_remove_event, use_app_store};

const EVENT_CATEGORIES: [&str; 4] = ["Company", "Meeting", "Deadline", "Personal"];

#[component]
pub fn EventFormModal(
    /// Event being edited; None creates one on `date`
    event: Option<CalendarEvent>,
    date: NaiveDate,
    #[prop(into)] on_saved: Callback<CalendarEvent>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let editing_id = event.as_ref().map(|e| e.id.clone());
    let is_new = editing_id.is_none();
    let draft = RwSignal::new(match &event {
        Some(e) => EventDraft::from_event(e),
        None => EventDraft::new(date),
    });
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let submit = {
        let api = api.clone();
        let editing_id = editing_id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(request) = draft.with(|d| d.request()) else {
                set_error.set(Some("Title is required".to_string()));
                return;
            };
            let api = api.clone();
            let editing_id = editing_id.clone();
            set_busy.set(true);
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => api.update_event(&id, &request).await,
                    None => api.create_event(&request).await,
                };
                set_busy.set(false);
                match result {
                    Ok(saved) => on_saved.run(saved),
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let delete = move |_| {
        let Some(id) = editing_id.clone() else { return };
        if !browser::confirm("Delete this event?") {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            match api.delete_event(&id).await {
                Ok(()) => {
                    store_remove_event(&store, &id);
                    on_close.run(());
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <Modal title={if is_new { "New event" } else { "Edit event" }} on_close=on_close>
            <form class="form" on:submit=submit>
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
                        "Date"
                        <input
                            type="date"
                            prop:value=move || format_date(Some(draft.with(|d| d.date)))
                            on:change=move |ev| {
                                if let Some(date) = parse_date(&event_target_value(&ev)) {
                                    draft.update(|d| d.date = date);
                                }
                            }
                        />
                    </label>
                    <label>
                        "Time"
                        <input
                            type="time"
                            prop:value=move || format_time(draft.with(|d| d.time))
                            on:change=move |ev| {
                                if let Some(time) = parse_time(&event_target_value(&ev)) {
                                    draft.update(|d| d.time = time);
                                }
                            }
                        />
                    </label>
                </div>
                <div class="form-row">
                    <label>
                        "Category"
                        <input
                            type="text"
                            list="event-categories"
                            prop:value=move || draft.with(|d| d.category.clone())
                            on:input=move |ev| draft.update(|d| d.category = event_target_value(&ev))
                        />
                        <datalist id="event-categories">
                            {EVENT_CATEGORIES.iter().map(|c| view! { <option value=*c></option> }).collect_view()}
                        </datalist>
                    </label>
                    <label>
                        "Priority"
                        <select on:change=move |ev| {
                            if let Some(p) = Priority::parse(&event_target_value(&ev)) {
                                draft.update(|d| d.priority = p);
                            }
                        }>
                            {Priority::ALL
                                .into_iter()
                                .map(|p| {
                                    view! {
                                        <option value=p.as_str() selected=move || draft.with(|d| d.priority == p)>
                                            {p.as_str()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Repeat"
                        <select on:change=move |ev| {
                            if let Some(r) = RepeatType::parse(&event_target_value(&ev)) {
                                draft.update(|d| d.repeat = r);
                            }
                        }>
                            {RepeatType::ALL
                                .into_iter()
                                .map(|r| {
                                    view! {
                                        <option value=r.as_str() selected=move || draft.with(|d| d.repeat == r)>
                                            {r.as_str()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <label>
                    "Description"
                    <textarea
                        rows="3"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="form-actions">
                    <Show when=move || !is_new>
                        <button type="button" class="danger-btn" on:click=delete.clone()>"Delete"</button>
                    </Show>
                    <button type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
