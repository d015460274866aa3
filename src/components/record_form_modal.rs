//! Record Form Modal
//!
//! Add or edit an income/expense record, with tax-inclusive entry and an
//! optional receipt upload.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::calendar::today;
use crate::components::fields::{format_date, parse_date};
use crate::components::{ErrorBanner, Modal};
use crate::context::use_api;
use crate::ledger::{categories_for, format_currency, RecordDraft, DEFAULT_TAX_RATE};
use crate::models::{FinancialRecord, FinancialType};
use crate::store::{refresh_categories, refresh_projects, use_app_store, AppStateStoreFields};

#[component]
pub fn RecordFormModal(
    /// Record being edited; None adds a new one
    record: Option<FinancialRecord>,
    /// Preselected project; empty lets the user pick
    #[prop(into)]
    project_id: String,
    #[prop(into)] on_saved: Callback<FinancialRecord>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let editing_id = record.as_ref().map(|r| r.id.clone());
    let is_new = editing_id.is_none();
    let project_locked = !project_id.is_empty();

    let draft = RwSignal::new(match &record {
        Some(r) => RecordDraft::from_record(r),
        None => RecordDraft::new(&project_id, today()),
    });
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    {
        let api = api.clone();
        spawn_local(async move {
            if store.finance_categories().with_untracked(|c| c.is_empty()) {
                refresh_categories(&api, store, None).await;
            }
            if !project_locked && store.projects().with_untracked(|p| p.is_empty()) {
                refresh_projects(&api, store).await;
            }
        });
    }

    let categories = move || store.finance_categories().with(|c| categories_for(c, draft.with(|d| d.kind)));

    let on_receipt = {
        let api = api.clone();
        move |ev: web_sys::Event| {
            let input: web_sys::HtmlInputElement = event_target(&ev);
            let api = api.clone();
            set_busy.set(true);
            spawn_local(async move {
                let result = async {
                    let mut files = browser::read_selected(&input).await?;
                    match files.pop() {
                        Some(file) => api.upload_receipt(&file.name, file.bytes).await.map(Some),
                        None => Ok(None),
                    }
                }
                .await;
                set_busy.set(false);
                match result {
                    Ok(Some(url)) => draft.update(|d| d.receipt_url = Some(url)),
                    Ok(None) => {}
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match draft.with(|d| d.request()) {
            Ok(request) => request,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };
        let api = api.clone();
        let editing_id = editing_id.clone();
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update_record(&id, &request).await,
                None => api.add_record(&request).await,
            };
            set_busy.set(false);
            match result {
                Ok(saved) => {
                    log::info!("saved record {}", saved.id);
                    on_saved.run(saved);
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <Modal title={if is_new { "Add record" } else { "Edit record" }} on_close=on_close>
            <form class="form" on:submit=submit>
                <ErrorBanner message=error />

                <Show when=move || !project_locked>
                    <label>
                        "Project"
                        <select on:change=move |ev| draft.update(|d| d.project_id = event_target_value(&ev))>
                            <option value="" selected=move || draft.with(|d| d.project_id.is_empty())>"Select a project"</option>
                            <For
                                each=move || store.projects().get()
                                key=|p| p.id.clone()
                                children=move |p| {
                                    let id = p.id.clone();
                                    view! {
                                        <option value=p.id.clone() selected=move || draft.with(|d| d.project_id == id)>
                                            {p.title.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </label>
                </Show>

                <div class="segmented">
                    {[FinancialType::Income, FinancialType::Expense]
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <button
                                    type="button"
                                    class=move || if draft.with(|d| d.kind == kind) { "segment active" } else { "segment" }
                                    on:click=move |_| draft.update(|d| {
                                        if d.kind != kind {
                                            d.kind = kind;
                                            d.category.clear();
                                        }
                                    })
                                >
                                    {kind.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="form-row">
                    <label>
                        "Amount"
                        <input
                            type="number"
                            min="0"
                            step="any"
                            prop:value=move || draft.with(|d| d.amount.clone())
                            on:input=move |ev| draft.update(|d| d.amount = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Date"
                        <input
                            type="date"
                            prop:value=move || format_date(draft.with(|d| d.date))
                            on:change=move |ev| draft.update(|d| d.date = parse_date(&event_target_value(&ev)))
                        />
                    </label>
                </div>

                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || draft.with(|d| d.tax_included)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            draft.update(|d| d.tax_included = checked);
                        }
                    />
                    {format!("Add {}% business tax", DEFAULT_TAX_RATE)}
                </label>
                {move || {
                    draft
                        .with(|d| if d.tax_included { d.gross_preview() } else { None })
                        .map(|gross| view! { <p class="muted">{format!("Total with tax: {}", format_currency(gross))}</p> })
                }}

                <label>
                    "Category"
                    <select on:change=move |ev| draft.update(|d| d.category = event_target_value(&ev))>
                        <option value="" selected=move || draft.with(|d| d.category.is_empty())>"Select a category"</option>
                        {move || {
                            categories()
                                .into_iter()
                                .map(|c| {
                                    let name = c.name.clone();
                                    view! {
                                        <option value=c.name.clone() selected=move || draft.with(|d| d.category == name)>
                                            {c.name.clone()}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>

                <label>
                    "Description"
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    />
                </label>

                <label>
                    "Receipt"
                    <input type="file" accept="image/*,application/pdf" on:change=on_receipt />
                </label>
                {move || {
                    draft
                        .with(|d| d.receipt_url.clone())
                        .map(|url| view! { <a class="receipt-link" href=url target="_blank" rel="noopener">"Uploaded receipt"</a> })
                }}

                <div class="form-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>"Save"</button>
                </div>
            </form>
        </Modal>
    }
}
