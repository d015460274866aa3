//! Category Manager
//!
//! Add, rename and delete finance categories per record type.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DeleteConfirmButton, ErrorBanner, Modal};
use crate::context::use_api;
use crate::ledger::categories_for;
use crate::models::{FinanceCategory, FinancialType};
use crate::store::{refresh_categories, use_app_store, AppStateStoreFields};

#[component]
pub fn CategoryManager(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let (kind, set_kind) = signal(FinancialType::Expense);
    let (new_name, set_new_name) = signal(String::new());
    let (editing, set_editing) = signal::<Option<(String, String)>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let reload = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                refresh_categories(&api, store, None).await;
            });
        }
    };
    reload();

    let add = {
        let api = api.clone();
        let reload = reload.clone();
        move |_| {
            let name = new_name.get().trim().to_string();
            if name.is_empty() {
                return;
            }
            let api = api.clone();
            let reload = reload.clone();
            let kind = kind.get();
            spawn_local(async move {
                match api.add_category(&name, kind).await {
                    Ok(_) => {
                        set_new_name.set(String::new());
                        reload();
                    }
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let rename = {
        let api = api.clone();
        let reload = reload.clone();
        move |category: FinanceCategory, name: String| {
            let name = name.trim().to_string();
            set_editing.set(None);
            if name.is_empty() || name == category.name {
                return;
            }
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.rename_category(&category.id, &name, category.kind).await {
                    Ok(_) => reload(),
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let remove = move |id: String| {
        let api = api.clone();
        let reload = reload.clone();
        spawn_local(async move {
            match api.delete_category(&id).await {
                Ok(()) => reload(),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <Modal title="Categories" on_close=on_close>
            <ErrorBanner message=error />
            <div class="segmented">
                {[FinancialType::Expense, FinancialType::Income]
                    .into_iter()
                    .map(|k| {
                        view! {
                            <button
                                class=move || if kind.get() == k { "segment active" } else { "segment" }
                                on:click=move |_| set_kind.set(k)
                            >
                                {k.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <ul class="category-list">
                <For
                    each=move || store.finance_categories().with(|c| categories_for(c, kind.get()))
                    key=|c| (c.id.clone(), c.name.clone())
                    children=move |category| {
                        let id = category.id.clone();
                        let editing_id = id.clone();
                        let rename = rename.clone();
                        let remove = remove.clone();
                        let is_editing = move || editing.with(|e| e.as_ref().is_some_and(|(i, _)| *i == editing_id));
                        let label = {
                            let id = id.clone();
                            let category = category.clone();
                            move || {
                                if is_editing() {
                                    let category = category.clone();
                                    let rename = rename.clone();
                                    view! {
                                        <input
                                            type="text"
                                            prop:value=move || editing.with(|e| e.as_ref().map(|(_, n)| n.clone()).unwrap_or_default())
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                set_editing.update(|e| {
                                                    if let Some((_, n)) = e {
                                                        *n = value;
                                                    }
                                                });
                                            }
                                            on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                                "Enter" => {
                                                    let name = editing
                                                        .with_untracked(|e| e.as_ref().map(|(_, n)| n.clone()))
                                                        .unwrap_or_default();
                                                    rename(category.clone(), name);
                                                }
                                                "Escape" => set_editing.set(None),
                                                _ => {}
                                            }
                                        />
                                    }
                                        .into_any()
                                } else {
                                    let id = id.clone();
                                    let name = category.name.clone();
                                    let shown = name.clone();
                                    view! {
                                        <span
                                            class="category-name"
                                            title="Double-click to rename"
                                            on:dblclick=move |_| set_editing.set(Some((id.clone(), name.clone())))
                                        >
                                            {shown}
                                        </span>
                                    }
                                        .into_any()
                                }
                            }
                        };
                        view! {
                            <li>
                                {label}
                                <DeleteConfirmButton button_class="icon-btn danger" on_confirm=move |_| remove(id.clone()) />
                            </li>
                        }
                    }
                />
            </ul>
            <div class="inline-form">
                <input
                    type="text"
                    placeholder="New category"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button class="primary-btn" on:click=add>"Add"</button>
            </div>
        </Modal>
    }
}
