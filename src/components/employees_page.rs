//! Employees Page
//!
//! Read-only user directory with a name filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ErrorBanner;
use crate::context::use_api;
use crate::models::{Account, UserRole};
use crate::store::{refresh_users, use_app_store, AppStateStoreFields};

fn matches(account: &Account, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [Some(&account.name), account.email.as_ref(), account.employee_id.as_ref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
}

#[component]
pub fn EmployeesPage() -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let (query, set_query) = signal(String::new());

    spawn_local(async move {
        refresh_users(&api, store).await;
    });

    // Clients are listed under accounts, not here
    let staff = move || {
        let q = query.get();
        store.users().with(|users| {
            users
                .iter()
                .filter(|u| u.role != Some(UserRole::Client) && matches(u, &q))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="employees-page">
            <div class="page-header">
                <h1>"Employees"</h1>
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </div>
            <ErrorBanner message=Signal::derive(move || store.last_error().get()) />
            <div class="card-grid">
                <For
                    each=staff
                    key=|u| u.id.clone()
                    children=|user| {
                        let initial = user.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
                        view! {
                            <article class="person-card">
                                <span class="avatar large">{initial}</span>
                                <h3>{user.name.clone()}</h3>
                                <span class="chip">{user.role.map(|r| r.label()).unwrap_or("-")}</span>
                                <p class="muted">{user.email.clone().unwrap_or_default()}</p>
                                {user.github_username.clone().map(|gh| view! { <p class="muted">{format!("GitHub: {}", gh)}</p> })}
                            </article>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, email: Option<&str>) -> Account {
        serde_json::from_value(serde_json::json!({"id": name, "name": name, "email": email})).unwrap()
    }

    #[test]
    fn test_matches_name_or_email() {
        let a = account("Mei Lin", Some("mei@example.com"));
        assert!(matches(&a, ""));
        assert!(matches(&a, "mei"));
        assert!(matches(&a, "EXAMPLE"));
        assert!(!matches(&a, "bob"));
        assert!(!matches(&account("Bob", None), "example"));
    }
}
