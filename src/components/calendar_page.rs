//! Calendar Page
//!
//! Month grid with events and my task deadlines, an upcoming list, and the
//! event modal.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::calendar::{events_on, tasks_due_on, today, upcoming, MonthView, WEEKDAY_LABELS};
use crate::components::EventFormModal;
use crate::context::{use_api, use_app_context};
use crate::models::CalendarEvent;
use crate::store::{refresh_events, use_app_store, AppStateStoreFields};

/// What the event modal is open for
#[derive(Clone)]
enum EventForm {
    New(NaiveDate),
    Edit(CalendarEvent),
}

#[component]
pub fn CalendarPage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let (month, set_month) = signal(MonthView::containing(today()));
    let (form, set_form) = signal::<Option<EventForm>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let api = api.clone();
        spawn_local(async move {
            refresh_events(&api, store).await;
        });
    });

    let days = Memo::new(move |_| month.get().grid());

    view! {
        <div class="calendar-page">
            <div class="page-header">
                <h1>{move || month.get().title()}</h1>
                <div class="month-nav">
                    <button on:click=move |_| set_month.update(|m| *m = m.previous())>"‹"</button>
                    <button on:click=move |_| set_month.set(MonthView::containing(today()))>"Today"</button>
                    <button on:click=move |_| set_month.update(|m| *m = m.next())>"›"</button>
                </div>
                <button class="primary-btn" on:click=move |_| set_form.set(Some(EventForm::New(today())))>
                    "+ New event"
                </button>
            </div>

            <div class="calendar-layout">
                <div class="month-grid">
                    {WEEKDAY_LABELS.iter().map(|d| view! { <div class="weekday">{*d}</div> }).collect_view()}
                    <For
                        each=move || days.get()
                        key=|d| *d
                        children=move |day| {
                            let in_month = move || month.get().contains(day);
                            let is_today = day == today();
                            let day_events = move || store.events().with(|e| events_on(e, day));
                            let day_tasks = move || store.calendar_tasks().with(|t| tasks_due_on(t, day));
                            let class = move || {
                                let mut c = String::from("day-cell");
                                if !in_month() { c.push_str(" outside"); }
                                if is_today { c.push_str(" today"); }
                                c
                            };
                            view! {
                                <div class=class on:click=move |_| set_form.set(Some(EventForm::New(day)))>
                                    <span class="day-number">{day.format("%-d").to_string()}</span>
                                    {move || {
                                        day_events()
                                            .into_iter()
                                            .map(|event| {
                                                let title = event.title.clone();
                                                let class = format!("event-pill priority-{}", event.priority.as_str().to_lowercase());
                                                view! {
                                                    <div
                                                        class=class
                                                        on:click=move |ev| {
                                                            ev.stop_propagation();
                                                            set_form.set(Some(EventForm::Edit(event.clone())));
                                                        }
                                                    >
                                                        {title}
                                                    </div>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                    {move || {
                                        day_tasks()
                                            .into_iter()
                                            .map(|task| view! { <div class="task-pill">{format!("☐ {}", task.title)}</div> })
                                            .collect_view()
                                    }}
                                </div>
                            }
                        }
                    />
                </div>

                <aside class="panel upcoming">
                    <h2>"Upcoming"</h2>
                    {move || {
                        let events = store.events().with(|e| upcoming(e, today()));
                        if events.is_empty() {
                            return view! { <p class="muted">"Nothing scheduled"</p> }.into_any();
                        }
                        view! {
                            <ul class="event-list">
                                {events
                                    .into_iter()
                                    .map(|event| {
                                        let when = event.start_date.format("%m/%d %H:%M").to_string();
                                        let title = event.title.clone();
                                        let category = event.category.clone();
                                        view! {
                                            <li class="event-item" on:click=move |_| set_form.set(Some(EventForm::Edit(event.clone())))>
                                                <span class="event-date">{when}</span>
                                                <span class="event-title">{title}</span>
                                                <span class="chip">{category}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }}
                </aside>
            </div>

            {move || {
                form.get()
                    .map(|target| {
                        let (event, date) = match target {
                            EventForm::New(date) => (None, date),
                            EventForm::Edit(event) => {
                                let date = event.start_date.date();
                                (Some(event), date)
                            }
                        };
                        view! {
                            <EventFormModal
                                event=event
                                date=date
                                on_saved=move |_| {
                                    set_form.set(None);
                                    ctx.reload();
                                }
                                on_close=move |_| set_form.set(None)
                            />
                        }
                    })
            }}
        </div>
    }
}
