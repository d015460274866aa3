//! Change Password Modal

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ErrorBanner, Modal};
use crate::context::use_api;
use crate::session::validate_password_change;

#[component]
pub fn ChangePasswordModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let api = use_api();

    let (old_password, set_old_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirmation, set_confirmation) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (done, set_done) = signal(false);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let old = old_password.get();
        let new = new_password.get();
        if let Err(message) = validate_password_change(&new, &confirmation.get()) {
            set_error.set(Some(message.to_string()));
            return;
        }
        let api = api.clone();
        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api.change_password(&old, &new).await {
                Ok(()) => {
                    log::info!("password changed");
                    set_done.set(true);
                    set_old_password.set(String::new());
                    set_new_password.set(String::new());
                    set_confirmation.set(String::new());
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Modal title="Change password" on_close=on_close>
            <form class="form" on:submit=on_submit>
                <ErrorBanner message=error />
                <Show when=move || done.get()>
                    <div class="success-banner">"Password updated"</div>
                </Show>
                <label>
                    "Current password"
                    <input
                        type="password"
                        prop:value=move || old_password.get()
                        on:input=move |ev| set_old_password.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "New password"
                    <input
                        type="password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| set_new_password.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Confirm new password"
                    <input
                        type="password"
                        prop:value=move || confirmation.get()
                        on:input=move |ev| set_confirmation.set(event_target_value(&ev))
                    />
                </label>
                <div class="form-actions">
                    <button type="button" on:click=move |_| on_close.run(())>"Close"</button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get() || done.get()>
                        "Update"
                    </button>
                </div>
            </form>
        </Modal>
    }
}
