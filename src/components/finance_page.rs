//! Finance Page
//!
//! Records across all projects or one project, with income/expense tabs,
//! CSV export and import, and category management.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::components::{CategoryManager, ErrorBanner, RecordFormModal, RecordTable};
use crate::context::{use_api, use_app_context};
use crate::ledger::{format_currency, summarize, RecordFilter};
use crate::models::FinancialRecord;
use crate::store::{refresh_finance, refresh_projects, use_app_store, AppStateStoreFields};

const EXPORT_FILE_NAME: &str = "financial-records.csv";

#[component]
pub fn FinancePage() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();

    // Empty means every project
    let (project_filter, set_project_filter) = signal(String::new());
    let (tab, set_tab) = signal(RecordFilter::All);
    let (form, set_form) = signal::<Option<Option<FinancialRecord>>>(None);
    let (show_categories, set_show_categories) = signal(false);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    {
        let api = api.clone();
        spawn_local(async move {
            if store.projects().with_untracked(|p| p.is_empty()) {
                refresh_projects(&api, store).await;
            }
        });
    }

    {
        let api = api.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let project = Some(project_filter.get()).filter(|p| !p.is_empty());
            let api = api.clone();
            spawn_local(async move {
                refresh_finance(&api, store, project).await;
            });
        });
    }

    let visible = Signal::derive(move || store.finance_records().with(|r| tab.get().apply(r)));
    let totals = Memo::new(move |_| store.finance_records().with(|r| summarize(r, 0.0)));

    let export = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            let project = Some(project_filter.get()).filter(|p| !p.is_empty());
            spawn_local(async move {
                let result = match api.export_csv(project.as_deref()).await {
                    Ok(bytes) => browser::save_bytes(EXPORT_FILE_NAME, &bytes, Some("text/csv")),
                    Err(err) => Err(err),
                };
                if let Err(err) = result {
                    log::error!("export failed: {}", err);
                    set_error.set(Some(err.user_message()));
                }
            });
        }
    };

    let import = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let project = project_filter.get();
        if project.is_empty() {
            browser::alert("Select a project before importing");
            input.set_value("");
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let result = async {
                let mut files = browser::read_selected(&input).await?;
                match files.pop() {
                    Some(file) => api.import_csv(&project, &file.name, file.bytes).await.map(Some),
                    None => Ok(None),
                }
            }
            .await;
            input.set_value("");
            match result {
                Ok(Some(count)) => {
                    set_notice.set(Some(format!("Imported {} records", count)));
                    ctx.reload();
                }
                Ok(None) => {}
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <div class="finance-page">
            <div class="page-header">
                <h1>"Finance"</h1>
                <select on:change=move |ev| set_project_filter.set(event_target_value(&ev))>
                    <option value="">"All projects"</option>
                    <For
                        each=move || store.projects().get()
                        key=|p| p.id.clone()
                        children=move |p| view! { <option value=p.id.clone()>{p.title.clone()}</option> }
                    />
                </select>
                <button on:click=move |_| set_show_categories.set(true)>"Categories"</button>
                <button on:click=export>"Export CSV"</button>
                <label class="file-btn">
                    "Import CSV"
                    <input type="file" accept=".csv,text/csv" on:change=import hidden=true />
                </label>
                <button class="primary-btn" on:click=move |_| set_form.set(Some(None))>"+ Add record"</button>
            </div>

            <ErrorBanner message=error />
            {move || notice.get().map(|n| view! { <div class="notice">{n}</div> })}

            <section class="stat-grid">
                <div class="stat-card tone-success">
                    <span class="stat-label">"Income"</span>
                    <span class="stat-value">{move || format_currency(totals.get().total_income)}</span>
                </div>
                <div class="stat-card tone-error">
                    <span class="stat-label">"Expense"</span>
                    <span class="stat-value">{move || format_currency(totals.get().total_expense)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Net"</span>
                    <span class="stat-value">{move || format_currency(totals.get().net_profit)}</span>
                </div>
            </section>

            <nav class="tab-bar">
                {RecordFilter::ALL
                    .into_iter()
                    .map(|f| {
                        view! {
                            <button
                                class=move || if tab.get() == f { "tab active" } else { "tab" }
                                on:click=move |_| set_tab.set(f)
                            >
                                {f.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <RecordTable
                records=visible
                show_project=true
                on_edit=move |record: FinancialRecord| set_form.set(Some(Some(record)))
            />

            {move || {
                form.get()
                    .map(|record| {
                        view! {
                            <RecordFormModal
                                record=record
                                project_id=project_filter.get_untracked()
                                on_saved=move |_| {
                                    set_form.set(None);
                                    ctx.reload();
                                }
                                on_close=move |_| set_form.set(None)
                            />
                        }
                    })
            }}
            <Show when=move || show_categories.get()>
                <CategoryManager on_close=move |_| set_show_categories.set(false) />
            </Show>
        </div>
    }
}
