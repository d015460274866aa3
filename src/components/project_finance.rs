//! Project Finance Tab
//!
//! Budget burn, income/expense totals, expense breakdown and the project's
//! records.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{RecordFormModal, RecordTable};
use crate::context::{use_api, use_app_context};
use crate::ledger::{self, bar_percent, format_currency, format_rate, BurnLevel};
use crate::models::{FinancialRecord, Project};
use crate::store::{effective_summary, refresh_finance, use_app_store, AppStateStoreFields};

#[component]
pub fn ProjectFinance(project: Project) -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();
    let project_id = project.id.clone();
    let budget = project.budget;

    // None: closed, Some(None): new record, Some(Some(r)): editing r
    let (form, set_form) = signal::<Option<Option<FinancialRecord>>>(None);

    {
        let project_id = project_id.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let api = api.clone();
            let project_id = project_id.clone();
            spawn_local(async move {
                refresh_finance(&api, store, Some(project_id)).await;
            });
        });
    }

    let summary = Memo::new(move |_| effective_summary(&store, budget));
    let breakdown = Memo::new(move |_| store.finance_records().with(|r| ledger::expense_breakdown(r)));
    let level = move || BurnLevel::from_rate(summary.get().burn_rate);

    view! {
        <div class="project-finance">
            <section class="stat-grid">
                <div class="stat-card">
                    <span class="stat-label">"Budget"</span>
                    <span class="stat-value">{move || format_currency(summary.get().budget)}</span>
                </div>
                <div class="stat-card tone-success">
                    <span class="stat-label">"Income"</span>
                    <span class="stat-value">{move || format_currency(summary.get().total_income)}</span>
                </div>
                <div class="stat-card tone-error">
                    <span class="stat-label">"Expense"</span>
                    <span class="stat-value">{move || format_currency(summary.get().total_expense)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Net"</span>
                    <span class="stat-value">{move || format_currency(summary.get().net_profit)}</span>
                </div>
            </section>

            <section class="panel burn">
                <div class="panel-header">
                    <h2>"Budget burn"</h2>
                    <span class=move || format!("burn-rate {}", level().class())>
                        {move || format_rate(summary.get().burn_rate)}
                    </span>
                </div>
                <div class="progress">
                    <div
                        class=move || format!("progress-bar {}", level().class())
                        style=move || format!("width: {}%", bar_percent(summary.get().burn_rate))
                    ></div>
                </div>
            </section>

            <section class="panel">
                <h2>"Expenses by category"</h2>
                <Show
                    when=move || !breakdown.with(|b| b.is_empty())
                    fallback=|| view! { <p class="muted">"No expenses yet"</p> }
                >
                    <ul class="breakdown">
                        {move || {
                            let total = summary.get().total_expense;
                            breakdown
                                .get()
                                .into_iter()
                                .map(|(category, amount)| {
                                    let share = if total > 0.0 { amount / total * 100.0 } else { 0.0 };
                                    view! {
                                        <li>
                                            <span class="category">{category}</span>
                                            <div class="progress small">
                                                <div class="progress-bar" style=format!("width: {}%", bar_percent(share))></div>
                                            </div>
                                            <span class="amount">{format_currency(amount)}</span>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </section>

            <section class="panel">
                <div class="panel-header">
                    <h2>"Records"</h2>
                    <button class="primary-btn" on:click=move |_| set_form.set(Some(None))>"+ Add record"</button>
                </div>
                <RecordTable
                    records=Signal::derive(move || store.finance_records().get())
                    on_edit=move |record: FinancialRecord| set_form.set(Some(Some(record)))
                />
            </section>

            {move || {
                let project_id = project_id.clone();
                form.get()
                    .map(|record| {
                        view! {
                            <RecordFormModal
                                record=record
                                project_id=project_id
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
