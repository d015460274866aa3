//! Admin Layout
//!
//! Sidebar navigation, header with the signed-in user, and the page outlet.

use leptos::prelude::*;

use crate::components::{
    AccountManagement, CalendarPage, ChangePasswordModal, Dashboard, EmployeesPage, FinancePage, ProjectDetail,
    ProjectList,
};
use crate::context::{use_api, use_app_context};
use crate::routes::{Route, ADMIN_NAV};
use crate::session::SessionEvent;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AdminLayout() -> impl IntoView {
    let ctx = use_app_context();
    let api = use_api();
    let store = use_app_store();
    let (show_password, set_show_password) = signal(false);

    let user_name = move || store.user().get().map(|u| u.name).unwrap_or_default();
    let user_role = move || {
        store
            .user()
            .get()
            .and_then(|u| u.role)
            .map(|r| r.label())
            .unwrap_or_default()
    };

    let logout = move |_| {
        api.logout();
        api.session().publish(SessionEvent::SignedOut);
    };

    // Only the page changes between admin routes
    let page = Memo::new(move |_| ctx.route.get());

    view! {
        <div class="admin-layout">
            <aside class="sidebar">
                <div class="brand">"Project Desk"</div>
                <nav>
                    {ADMIN_NAV
                        .iter()
                        .map(|(label, make_route)| {
                            let target = make_route();
                            let nav_target = target.clone();
                            let is_active = move || ctx.route.get().nav_root() == target;
                            view! {
                                <button
                                    class=move || if is_active() { "nav-item active" } else { "nav-item" }
                                    on:click=move |_| ctx.navigate(nav_target.clone())
                                >
                                    {*label}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
            </aside>

            <div class="admin-main">
                <header class="topbar">
                    <span class="user-name">{user_name}</span>
                    <span class="user-role muted">{user_role}</span>
                    <button class="link-btn" on:click=move |_| set_show_password.set(true)>"Change password"</button>
                    <button class="link-btn" on:click=logout>"Sign out"</button>
                </header>

                <main class="page">
                    {move || match page.get() {
                        Route::Projects => view! { <ProjectList /> }.into_any(),
                        Route::ProjectDetail(id) => view! { <ProjectDetail project_id=id /> }.into_any(),
                        Route::Calendar => view! { <CalendarPage /> }.into_any(),
                        Route::Finance => view! { <FinancePage /> }.into_any(),
                        Route::Employees => view! { <EmployeesPage /> }.into_any(),
                        Route::Accounts => view! { <AccountManagement /> }.into_any(),
                        _ => view! { <Dashboard /> }.into_any(),
                    }}
                </main>
            </div>

            <Show when=move || show_password.get()>
                <ChangePasswordModal on_close=move |_| set_show_password.set(false) />
            </Show>
        </div>
    }
}
