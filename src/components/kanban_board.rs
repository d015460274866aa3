//! Kanban Board
//!
//! Three status columns over one ordered task list. Cards are dragged with
//! mouse events from leptos-dragdrop; every hover reorders the board live
//! and the drop persists whatever moved.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;

use crate::components::{ErrorBanner, TaskDetailModal};
use crate::context::{use_api, use_app_context};
use crate::kanban::{self, Board, DragTarget};
use crate::models::{Task, TaskStatus};

fn drag_target(target: DropTarget<String, TaskStatus>) -> DragTarget {
    match target {
        DropTarget::Card(id) => DragTarget::Task(id),
        DropTarget::Lane(status) => DragTarget::Column(status),
    }
}

#[component]
pub fn KanbanBoard(project_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();

    let board = RwSignal::new(Board::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);
    let (detail, set_detail) = signal::<Option<Task>>(None);
    let pointer = RwSignal::new((0i32, 0i32));

    {
        let api = api.clone();
        let project_id = project_id.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let api = api.clone();
            let project_id = project_id.clone();
            spawn_local(async move {
                set_loading.set(true);
                match api.list_tasks(&project_id).await {
                    Ok(tasks) => {
                        board.set(Board::from_fetched(tasks));
                        set_error.set(None);
                    }
                    Err(err) => {
                        log::error!("failed to load tasks for {}: {}", project_id, err);
                        set_error.set(Some(err.user_message()));
                    }
                }
                set_loading.set(false);
            });
        });
    }

    let dnd = create_dnd_signals::<String, TaskStatus>(ctx.drag_threshold_px);

    let on_start = Callback::new(move |id: String| {
        log::debug!("[DND] start {}", id);
        board.update(|b| b.drag_start(&id));
    });

    let on_over = Callback::new(move |(_, target): (String, DropTarget<String, TaskStatus>)| {
        let target = drag_target(target);
        board.update(|b| {
            b.drag_over(&target);
        });
    });

    let on_end = {
        let api = api.clone();
        Callback::new(move |(id, _): (String, Option<DropTarget<String, TaskStatus>>)| {
            let updates = board.try_update(|b| b.drag_end()).unwrap_or_default();
            if updates.is_empty() {
                return;
            }
            log::debug!("[DND] drop {} -> {} updates", id, updates.len());
            let api = api.clone();
            spawn_local(async move {
                match kanban::persist_order(&api, &updates).await {
                    Ok(()) => board.update(|b| b.accept(&updates)),
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        })
    };

    let handlers = bind_global_handlers(dnd, DragCallbacks { on_start, on_over, on_end });
    on_cleanup(move || handlers.remove());

    let move_handle = window_event_listener(ev::mousemove, move |ev| {
        if dnd.dragging_id_read.try_get_untracked().flatten().is_some() {
            pointer.set((ev.client_x(), ev.client_y()));
        }
    });
    on_cleanup(move || move_handle.remove());

    let quick_add = {
        let api = api.clone();
        let project_id = project_id.clone();
        move |status: TaskStatus, title: String| {
            let Some(request) = board.with_untracked(|b| b.quick_add_request(&project_id, status, &title)) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match kanban::quick_add(&api, &request).await {
                    Ok(task) => {
                        log::info!("added task {}", task.id);
                        board.update(|b| b.push(task));
                    }
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let overlay = move || {
        dnd.dragging_id_read.get()?;
        let task = board.with(|b| b.active().cloned())?;
        let (x, y) = pointer.get();
        Some(view! {
            <div class="kanban-card drag-overlay" style=format!("left: {}px; top: {}px", x + 8, y + 8)>
                {task.title}
            </div>
        })
    };

    view! {
        <div class="kanban">
            <ErrorBanner message=error />
            <Show when=move || loading.get() && board.with(|b| b.is_empty())>
                <p class="muted">"Loading tasks..."</p>
            </Show>
            <div class="kanban-columns">
                {TaskStatus::ALL
                    .into_iter()
                    .map(|status| {
                        let quick_add = quick_add.clone();
                        view! {
                            <KanbanColumn
                                status=status
                                board=board
                                dnd=dnd
                                on_over=on_over
                                on_open=move |task: Task| set_detail.set(Some(task))
                                on_quick_add=move |title: String| quick_add(status, title)
                            />
                        }
                    })
                    .collect_view()}
            </div>
            {overlay}

            {move || {
                detail
                    .get()
                    .map(|task| {
                        view! {
                            <TaskDetailModal
                                task=task
                                on_saved=move |saved: Task| {
                                    board.update(|b| b.replace(saved));
                                    set_detail.set(None);
                                }
                                on_deleted=move |id: String| {
                                    board.update(|b| b.remove(&id));
                                    set_detail.set(None);
                                }
                                on_close=move |_| set_detail.set(None)
                            />
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn KanbanColumn(
    status: TaskStatus,
    board: RwSignal<Board>,
    dnd: DndSignals<String, TaskStatus>,
    on_over: Callback<(String, DropTarget<String, TaskStatus>)>,
    #[prop(into)] on_open: Callback<Task>,
    #[prop(into)] on_quick_add: Callback<String>,
) -> impl IntoView {
    let (new_title, set_new_title) = signal(String::new());
    let cards = Memo::new(move |_| board.with(|b| b.column(status)));

    let on_lane_mouseover = make_on_lane_mouseover(dnd, status, on_over);
    let on_lane_mouseleave = make_on_mouseleave(dnd);
    let is_lane_target = move || matches!(dnd.drop_target_read.get(), Some(DropTarget::Lane(s)) if s == status);

    let submit = move || {
        let title = new_title.get_untracked();
        if !title.trim().is_empty() {
            on_quick_add.run(title);
            set_new_title.set(String::new());
        }
    };

    view! {
        <section class=move || if is_lane_target() { "kanban-column drop-target" } else { "kanban-column" }>
            <header class="kanban-column-header">
                <h3>{status.label()}</h3>
                <span class="count">{move || cards.with(|c| c.len())}</span>
            </header>
            <div class="kanban-lane" on:mouseover=on_lane_mouseover on:mouseleave=on_lane_mouseleave>
                <For
                    each=move || cards.get()
                    key=|t| (t.id.clone(), t.title.clone(), t.assignee.as_ref().map(|a| a.id.clone()), t.deadline)
                    children=move |task| {
                        let id = task.id.clone();
                        let drag_id = id.clone();
                        let target_id = id.clone();
                        let open_task = task.clone();
                        let is_dragging = move || dnd.dragging_id_read.get().as_deref() == Some(drag_id.as_str());
                        let is_drop_target = move || {
                            matches!(dnd.drop_target_read.get(), Some(DropTarget::Card(ref tid)) if *tid == target_id)
                        };
                        let card_class = move || {
                            let mut c = String::from("kanban-card");
                            if is_dragging() { c.push_str(" dragging"); }
                            if is_drop_target() { c.push_str(" drop-target"); }
                            c
                        };
                        view! {
                            <div
                                class=card_class
                                on:mousedown=make_on_mousedown(dnd, id.clone())
                                on:mouseenter=make_on_card_mouseenter(dnd, id.clone(), on_over)
                                on:click=move |_| {
                                    // The click after a drop is not an open
                                    if !dnd.drag_just_ended_read.get_untracked() {
                                        on_open.run(open_task.clone());
                                    }
                                }
                            >
                                <div class="kanban-card-title">{task.title.clone()}</div>
                                <div class="kanban-card-meta">
                                    {task.assignee.as_ref().map(|a| view! { <span class="avatar" title=a.name.clone()>{a.initial()}</span> })}
                                    {task.deadline.map(|d| view! { <span class="deadline">{d.format("%m/%d").to_string()}</span> })}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
            <input
                class="quick-add"
                type="text"
                placeholder="+ Add task"
                prop:value=move || new_title.get()
                on:input=move |ev| set_new_title.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        submit();
                    } else if ev.key() == "Escape" {
                        set_new_title.set(String::new());
                    }
                }
            />
        </section>
    }
}
