//! Record Table
//!
//! Financial records with receipt links, edit and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteConfirmButton;
use crate::context::{use_api, use_app_context};
use crate::ledger::signed_amount;
use crate::models::{FinancialRecord, FinancialType};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RecordTable(
    #[prop(into)] records: Signal<Vec<FinancialRecord>>,
    #[prop(into)] on_edit: Callback<FinancialRecord>,
    /// Show the project column (all-projects view)
    #[prop(optional)]
    show_project: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    let project_name = move |id: &str| {
        store
            .projects()
            .with(|ps| ps.iter().find(|p| p.id == id).map(|p| p.title.clone()))
            .unwrap_or_else(|| "-".to_string())
    };

    let delete_record = Callback::new(move |id: String| {
        let api = api.clone();
        spawn_local(async move {
            match api.delete_record(&id).await {
                Ok(()) => {
                    log::info!("deleted record {}", id);
                    ctx.reload();
                }
                Err(err) => store.last_error().set(Some(err.user_message())),
            }
        });
    });

    view! {
        <Show
            when=move || !records.with(|r| r.is_empty())
            fallback=|| view! { <p class="muted empty-state">"No records"</p> }
        >
            <table class="record-table">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        {show_project.then(|| view! { <th>"Project"</th> })}
                        <th>"Category"</th>
                        <th>"Description"</th>
                        <th class="num">"Amount"</th>
                        <th>"Receipt"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || records.get()
                        key=|r| (r.id.clone(), r.amount.to_bits(), r.category.clone(), r.transaction_date)
                        children=move |record| {
                            let edit_record = record.clone();
                            let delete_id = record.id.clone();
                            let tone = match record.kind {
                                FinancialType::Income => "num income",
                                FinancialType::Expense => "num expense",
                            };
                            view! {
                                <tr>
                                    <td>{record.transaction_date.format("%Y/%m/%d").to_string()}</td>
                                    {show_project.then(|| view! { <td>{project_name(&record.project_id)}</td> })}
                                    <td><span class="chip">{record.category.clone()}</span></td>
                                    <td>{record.description.clone().unwrap_or_default()}</td>
                                    <td class=tone>{signed_amount(&record)}</td>
                                    <td>
                                        {record
                                            .receipt_url
                                            .clone()
                                            .map(|url| view! { <a href=url target="_blank" rel="noopener">"View"</a> })}
                                    </td>
                                    <td class="row-actions">
                                        <button class="link-btn" on:click=move |_| on_edit.run(edit_record.clone())>"Edit"</button>
                                        <DeleteConfirmButton
                                            button_class="link-btn danger"
                                            label="Delete"
                                            on_confirm=move |_| delete_record.run(delete_id.clone())
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </Show>
    }
}
