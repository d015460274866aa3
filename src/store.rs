//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Slices are
//! refreshed on demand: each `refresh_*` fetches, replaces the slice on
//! success and records the error message otherwise.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::ledger;
use crate::models::{
    Account, CalendarEvent, FinanceCategory, FinancialRecord, FinancialSummary, FinancialType, Project, Task,
};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user
    pub user: Option<Account>,
    pub projects: Vec<Project>,
    pub events: Vec<CalendarEvent>,
    /// Tasks with deadlines assigned to the signed-in user
    pub calendar_tasks: Vec<Task>,
    pub finance_records: Vec<FinancialRecord>,
    /// Server summary for the selected project
    pub finance_summary: Option<FinancialSummary>,
    pub finance_categories: Vec<FinanceCategory>,
    /// User directory for assignee and team pickers
    pub users: Vec<Account>,
    pub loading: bool,
    pub last_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Apply a fetch result: run `apply` on success, record the error otherwise
fn settle<T>(store: &AppStore, what: &str, result: ApiResult<T>, apply: impl FnOnce(T)) -> bool {
    match result {
        Ok(value) => {
            apply(value);
            store.last_error().set(None);
            true
        }
        Err(err) => {
            log::error!("failed to load {}: {}", what, err);
            store.last_error().set(Some(err.user_message()));
            false
        }
    }
}

// ========================
// Refresh
// ========================

/// Load the signed-in user; false when there is no valid session
pub async fn refresh_user(api: &ApiClient, store: AppStore) -> bool {
    if !api.has_token() {
        store.user().set(None);
        return false;
    }
    match api.current_user().await {
        Ok(user) => {
            store.user().set(Some(user));
            true
        }
        Err(err) => {
            log::info!("session check failed: {}", err);
            store.user().set(None);
            false
        }
    }
}

pub async fn refresh_projects(api: &ApiClient, store: AppStore) -> bool {
    store.loading().set(true);
    let result = api.list_projects().await;
    store.loading().set(false);
    settle(&store, "projects", result, |projects| store.projects().set(projects))
}

/// Events and my calendar tasks, fetched together
pub async fn refresh_events(api: &ApiClient, store: AppStore) -> bool {
    store.loading().set(true);
    let (events, tasks) = futures::join!(api.list_events(), api.my_calendar_tasks());
    store.loading().set(false);
    let events_ok = settle(&store, "events", events, |events| store.events().set(events));
    // Calendar tasks are optional decoration
    match tasks {
        Ok(tasks) => store.calendar_tasks().set(tasks),
        Err(err) => log::warn!("failed to load calendar tasks: {}", err),
    }
    events_ok
}

/// Records for one project (with its summary) or for all projects
pub async fn refresh_finance(api: &ApiClient, store: AppStore, project_id: Option<String>) -> bool {
    store.loading().set(true);
    let records = api.list_records(project_id.as_deref()).await;
    let summary = match project_id.as_deref() {
        Some(id) => Some(api.finance_summary(id).await),
        None => None,
    };
    store.loading().set(false);

    let ok = settle(&store, "finance records", records, |records| store.finance_records().set(records));
    match summary {
        Some(Ok(summary)) => store.finance_summary().set(Some(summary)),
        Some(Err(err)) => {
            log::warn!("failed to load finance summary: {}", err);
            store.finance_summary().set(None);
        }
        None => store.finance_summary().set(None),
    }
    ok
}

pub async fn refresh_categories(api: &ApiClient, store: AppStore, kind: Option<FinancialType>) -> bool {
    let result = api.list_categories(kind).await;
    settle(&store, "finance categories", result, |categories| {
        store.finance_categories().set(categories)
    })
}

pub async fn refresh_users(api: &ApiClient, store: AppStore) -> bool {
    let result = api.list_users().await;
    settle(&store, "users", result, |users| store.users().set(users))
}

// ========================
// Store Helper Functions
// ========================

/// Server summary if loaded, otherwise computed from the cached records
pub fn effective_summary(store: &AppStore, budget: f64) -> FinancialSummary {
    store
        .finance_summary()
        .get()
        .unwrap_or_else(|| ledger::summarize(&store.finance_records().get(), budget))
}

/// Update a project in the store by ID
pub fn store_update_project(store: &AppStore, updated: Project) {
    if let Some(project) = store.projects().write().iter_mut().find(|p| p.id == updated.id) {
        *project = updated;
    }
}

/// Remove a project from the store by ID
pub fn store_remove_project(store: &AppStore, project_id: &str) {
    store.projects().write().retain(|p| p.id != project_id);
}

/// Remove an event from the store by ID
pub fn store_remove_event(store: &AppStore, event_id: &str) {
    store.events().write().retain(|e| e.id != event_id);
}

/// Clear everything tied to the signed-in user
pub fn store_sign_out(store: &AppStore) {
    store.user().set(None);
    store.projects().set(Vec::new());
    store.events().set(Vec::new());
    store.calendar_tasks().set(Vec::new());
    store.finance_records().set(Vec::new());
    store.finance_summary().set(None);
    store.finance_categories().set(Vec::new());
    store.users().set(Vec::new());
    store.loading().set(false);
    store.last_error().set(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn project(id: &str, title: &str) -> Project {
        serde_json::from_value(serde_json::json!({"id": id, "title": title})).unwrap()
    }

    #[test]
    fn test_settle_records_error_message() {
        let store = Store::new(AppState::default());
        let ok = settle(
            &store,
            "projects",
            Err::<Vec<Project>, _>(ApiError::Rejected { message: Some("No access".into()) }),
            |_| panic!("must not apply"),
        );
        assert!(!ok);
        assert_eq!(store.last_error().get_untracked().as_deref(), Some("No access"));

        assert!(settle(&store, "projects", Ok(vec![project("p1", "Site")]), |p| store.projects().set(p)));
        assert_eq!(store.last_error().get_untracked(), None);
        assert_eq!(store.projects().get_untracked().len(), 1);
    }

    #[test]
    fn test_project_helpers() {
        let store = Store::new(AppState::default());
        store.projects().set(vec![project("p1", "Site"), project("p2", "App")]);
        store_update_project(&store, project("p2", "Mobile App"));
        assert_eq!(store.projects().get_untracked()[1].title, "Mobile App");
        store_remove_project(&store, "p1");
        assert_eq!(store.projects().get_untracked().len(), 1);
        store_sign_out(&store);
        assert!(store.projects().get_untracked().is_empty());
    }
}
