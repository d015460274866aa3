//! Account Management
//!
//! Account table, add-user modal and password reset.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::components::fields::non_empty;
use crate::components::{ErrorBanner, Modal};
use crate::context::use_api;
use crate::models::{Account, NewAccountRequest, UserRole};

#[component]
pub fn AccountManagement() -> impl IntoView {
    let api = use_api();
    let accounts = RwSignal::new(Vec::<Account>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (show_add, set_show_add) = signal(false);

    let reload = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.list_accounts().await {
                    Ok(list) => accounts.set(list),
                    Err(err) => set_error.set(Some(err.user_message())),
                }
                set_loading.set(false);
            });
        }
    };
    reload();

    let reset_password = Callback::new(move |account: Account| {
        if !browser::confirm(&format!("Reset the password of {} to the default?", account.name)) {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            match api.reset_password(&account.id).await {
                Ok(_) => set_notice.set(Some(format!("Password of {} was reset", account.name))),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    });

    let on_created = {
        let reload = reload.clone();
        move |account: Account| {
            log::info!("created account {}", account.id);
            set_show_add.set(false);
            set_notice.set(Some(format!("Account {} created", account.name)));
            reload();
        }
    };

    view! {
        <div class="account-management">
            <div class="page-header">
                <h1>"Accounts"</h1>
                <button class="primary-btn" on:click=move |_| set_show_add.set(true)>"+ Add user"</button>
            </div>
            <ErrorBanner message=error />
            {move || notice.get().map(|n| view! { <div class="notice">{n}</div> })}

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Loading..."</p> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Role"</th>
                            <th>"Employee ID"</th>
                            <th>"Username"</th>
                            <th>"Email"</th>
                            <th>"GitHub"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || accounts.get()
                            key=|a| a.id.clone()
                            children=move |account| {
                                let target = account.clone();
                                view! {
                                    <tr>
                                        <td>{account.name.clone()}</td>
                                        <td><span class="chip">{account.role.map(|r| r.label()).unwrap_or("-")}</span></td>
                                        <td>{account.employee_id.clone().unwrap_or_default()}</td>
                                        <td>{account.username.clone().unwrap_or_default()}</td>
                                        <td>{account.email.clone().unwrap_or_default()}</td>
                                        <td>{account.github_username.clone().unwrap_or_default()}</td>
                                        <td>
                                            <button class="link-btn" on:click=move |_| reset_password.run(target.clone())>
                                                "Reset password"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Show when=move || show_add.get()>
                <AddUserModal on_created=on_created.clone() on_close=move |_| set_show_add.set(false) />
            </Show>
        </div>
    }
}

#[component]
fn AddUserModal(#[prop(into)] on_created: Callback<Account>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let api = use_api();
    let name = RwSignal::new(String::new());
    let role = RwSignal::new(UserRole::Client);
    let employee_id = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let github_username = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(account_name) = non_empty(name.get()) else {
            set_error.set(Some("Name is required".to_string()));
            return;
        };
        let request = NewAccountRequest {
            name: account_name,
            role: role.get(),
            email: non_empty(email.get()),
            employee_id: non_empty(employee_id.get()),
            username: non_empty(username.get()),
            github_username: non_empty(github_username.get()),
            password: None,
        };
        let api = api.clone();
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api.create_account(&request).await;
            set_busy.set(false);
            match result {
                Ok(account) => on_created.run(account),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <Modal title="Add user" on_close=on_close>
            <form class="form" on:submit=submit>
                <ErrorBanner message=error />
                <label>
                    "Name (required)"
                    <input type="text" bind:value=name />
                </label>
                <label>
                    "Role"
                    <select on:change=move |ev| {
                        if let Some(r) = UserRole::parse(&event_target_value(&ev)) {
                            role.set(r);
                        }
                    }>
                        {UserRole::ALL
                            .into_iter()
                            .map(|r| view! { <option value=r.as_str() selected=move || role.get() == r>{r.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <p class="muted">"Employee ID, username or email can be used to sign in."</p>
                <label>
                    "Employee ID"
                    <input type="text" bind:value=employee_id />
                </label>
                <label>
                    "Username"
                    <input type="text" bind:value=username />
                </label>
                <label>
                    "Email"
                    <input type="email" bind:value=email />
                </label>
                <label>
                    "GitHub username"
                    <input type="text" bind:value=github_username />
                </label>
                <div class="form-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>"Create"</button>
                </div>
            </form>
        </Modal>
    }
}
