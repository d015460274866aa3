//! GitHub Panel
//!
//! Repository link, token, default branch and backup settings for a
//! project, plus repository and branch creation and archive download.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::components::fields::non_empty;
use crate::components::{ErrorBanner, Modal};
use crate::context::use_api;
use crate::models::{CreateBranchRequest, CreateRepoRequest, Project, ProjectRequest};
use crate::repo_files::{slug_from_url, split_slug};

const DEFAULT_BRANCH: &str = "main";

/// Repository name suggested from a project title
fn suggested_repo_name(title: &str) -> String {
    title.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

#[derive(Debug, Clone, PartialEq)]
struct GitHubSettings {
    repo: String,
    branch: String,
    token: String,
    backup_config: String,
    file_location: String,
}

impl GitHubSettings {
    fn from_project(project: &Project) -> Self {
        Self {
            repo: project.github_repo.clone().unwrap_or_default(),
            branch: project.github_branch.clone().unwrap_or_default(),
            token: project.github_token.clone().unwrap_or_default(),
            backup_config: project.backup_config.clone().unwrap_or_default(),
            file_location: project.file_location.clone().unwrap_or_default(),
        }
    }

    fn apply(&self, request: &mut ProjectRequest) {
        request.github_repo = non_empty(self.repo.clone());
        request.github_branch = non_empty(self.branch.clone());
        request.github_token = non_empty(self.token.clone());
        request.backup_config = non_empty(self.backup_config.clone());
        request.file_location = non_empty(self.file_location.clone());
    }
}

#[component]
pub fn GitHubPanel(project: Project, #[prop(into)] on_changed: Callback<Project>) -> impl IntoView {
    let api = use_api();
    let settings = RwSignal::new(GitHubSettings::from_project(&project));
    let branches = RwSignal::new(Vec::<String>::new());
    let github_user = RwSignal::new(None::<String>);
    let (show_token, set_show_token) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let (show_create_repo, set_show_create_repo) = signal(false);
    let new_repo_name = RwSignal::new(suggested_repo_name(&project.title));
    let new_repo_desc = RwSignal::new(project.description.clone().unwrap_or_default());
    let new_repo_private = RwSignal::new(true);

    let (show_create_branch, set_show_create_branch) = signal(false);
    let new_branch = RwSignal::new(String::new());
    let source_branch = RwSignal::new(DEFAULT_BRANCH.to_string());

    // Token owner, shown once a token is entered
    {
        let api = api.clone();
        Effect::new(move |_| {
            let token = settings.with(|s| s.token.clone());
            if token.is_empty() {
                github_user.set(None);
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match api.github_user(&token).await {
                    Ok(login) => github_user.set(Some(login)),
                    Err(err) => log::warn!("failed to fetch GitHub user: {}", err),
                }
            });
        });
    }

    // Branch list follows the repository and token
    {
        let api = api.clone();
        Effect::new(move |_| {
            let (repo, token) = settings.with(|s| (s.repo.clone(), s.token.clone()));
            let Some((owner, name)) = split_slug(&repo) else {
                branches.set(Vec::new());
                return;
            };
            if token.is_empty() {
                return;
            }
            let (owner, name) = (owner.to_string(), name.to_string());
            let api = api.clone();
            spawn_local(async move {
                match api.list_branches(&owner, &name, &token).await {
                    Ok(list) => branches.set(list),
                    Err(err) => log::warn!("failed to fetch branches: {}", err),
                }
            });
        });
    }

    let save = {
        let api = api.clone();
        let project = project.clone();
        move |_| {
            let mut request = ProjectRequest::from_project(&project);
            settings.with(|s| s.apply(&mut request));
            let (repo, token) = settings.with(|s| (s.repo.trim().to_string(), s.token.trim().to_string()));
            let api = api.clone();
            let id = project.id.clone();
            set_busy.set(true);
            set_error.set(None);
            set_notice.set(None);
            spawn_local(async move {
                // A linked repository must be reachable with the given token
                if let (Some((owner, name)), false) = (split_slug(&repo), token.is_empty()) {
                    match api.repo_exists(owner, name, &token).await {
                        Ok(true) => {}
                        Ok(false) => {
                            set_busy.set(false);
                            set_error.set(Some(format!("Repository {} not found", repo)));
                            return;
                        }
                        Err(err) => log::warn!("failed to check repository {}: {}", repo, err),
                    }
                }
                let result = api.update_project(&id, &request).await;
                set_busy.set(false);
                match result {
                    Ok(updated) => {
                        set_notice.set(Some("Settings saved".to_string()));
                        on_changed.run(updated);
                    }
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let create_repo = {
        let api = api.clone();
        Callback::new(move |_: ()| {
            let token = settings.with(|s| s.token.clone());
            if token.is_empty() {
                set_error.set(Some("Enter an access token first".to_string()));
                return;
            }
            let name = new_repo_name.get();
            let description = new_repo_desc.get();
            let private = new_repo_private.get();
            let api = api.clone();
            set_show_create_repo.set(false);
            set_busy.set(true);
            set_error.set(None);
            spawn_local(async move {
                let request = CreateRepoRequest { token: &token, name: &name, description: &description, private };
                let result = api.create_repo(&request).await;
                set_busy.set(false);
                match result {
                    Ok(url) => {
                        if let Some(slug) = slug_from_url(&url) {
                            settings.update(|s| s.repo = slug);
                        }
                        set_notice.set(Some(format!("Repository created: {}", url)));
                    }
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        })
    };

    let create_branch = {
        let api = api.clone();
        Callback::new(move |_: ()| {
            let (repo, token) = settings.with(|s| (s.repo.clone(), s.token.clone()));
            let Some((owner, name)) = split_slug(&repo).map(|(o, n)| (o.to_string(), n.to_string())) else {
                set_error.set(Some("Repository must be owner/repo".to_string()));
                return;
            };
            let branch = new_branch.get().trim().to_string();
            if branch.is_empty() {
                return;
            }
            let source = source_branch.get();
            let api = api.clone();
            set_show_create_branch.set(false);
            set_busy.set(true);
            spawn_local(async move {
                let request = CreateBranchRequest { token: &token, new_branch: &branch, source_branch: &source };
                let result = api.create_branch(&owner, &name, &request).await;
                set_busy.set(false);
                match result {
                    Ok(_) => {
                        branches.update(|b| b.push(branch.clone()));
                        settings.update(|s| s.branch = branch.clone());
                        new_branch.set(String::new());
                        set_notice.set(Some(format!("Branch {} created", branch)));
                    }
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        })
    };

    let download = move |_| {
        let (repo, branch, token) = settings.with(|s| (s.repo.clone(), s.branch.clone(), s.token.clone()));
        let Some((owner, name)) = split_slug(&repo).map(|(o, n)| (o.to_string(), n.to_string())) else {
            set_error.set(Some("Repository must be owner/repo".to_string()));
            return;
        };
        let branch = if branch.is_empty() { DEFAULT_BRANCH.to_string() } else { branch };
        let api = api.clone();
        set_busy.set(true);
        spawn_local(async move {
            let result = api.download_url(&owner, &name, &branch, &token).await;
            set_busy.set(false);
            match result {
                Ok(url) => browser::open_in_new_tab(&url),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <div class="github-panel">
            <div class="panel-header">
                <h2>"GitHub repository"</h2>
                {move || github_user.get().map(|login| view! { <span class="muted">"Linked account: " <strong>{login}</strong></span> })}
            </div>
            <ErrorBanner message=error />
            {move || notice.get().map(|n| view! { <div class="notice">{n}</div> })}

            <div class="form">
                <label>
                    "Access token"
                    <div class="inline-form">
                        <input
                            type=move || if show_token.get() { "text" } else { "password" }
                            prop:value=move || settings.with(|s| s.token.clone())
                            on:change=move |ev| settings.update(|s| s.token = event_target_value(&ev))
                        />
                        <button type="button" class="icon-btn" on:click=move |_| set_show_token.update(|v| *v = !*v)>
                            {move || if show_token.get() { "Hide" } else { "Show" }}
                        </button>
                    </div>
                </label>
                <div class="form-row">
                    <label>
                        "Repository (owner/repo)"
                        <input
                            type="text"
                            placeholder="acme/project-site"
                            prop:value=move || settings.with(|s| s.repo.clone())
                            on:change=move |ev| settings.update(|s| s.repo = event_target_value(&ev))
                        />
                    </label>
                    <button type="button" on:click=move |_| set_show_create_repo.set(true) disabled=move || busy.get()>
                        "Create repository"
                    </button>
                </div>
                <div class="form-row">
                    <label>
                        "Default branch"
                        <select
                            disabled=move || branches.with(|b| b.is_empty())
                            on:change=move |ev| settings.update(|s| s.branch = event_target_value(&ev))
                        >
                            <option value="">"-"</option>
                            <For
                                each=move || branches.get()
                                key=|b| b.clone()
                                children=move |b| {
                                    let current = b.clone();
                                    view! {
                                        <option value=b.clone() selected=move || settings.with(|s| s.branch == current)>
                                            {b.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </label>
                    <button
                        type="button"
                        disabled=move || settings.with(|s| s.repo.is_empty())
                        on:click=move |_| {
                            let current = settings.with(|s| s.branch.clone());
                            source_branch.set(if current.is_empty() { DEFAULT_BRANCH.to_string() } else { current });
                            set_show_create_branch.set(true);
                        }
                    >
                        "New branch"
                    </button>
                    <button type="button" on:click=download disabled=move || busy.get()>"Download ZIP"</button>
                </div>
                <label>
                    "Backup settings"
                    <input
                        type="text"
                        prop:value=move || settings.with(|s| s.backup_config.clone())
                        on:input=move |ev| settings.update(|s| s.backup_config = event_target_value(&ev))
                    />
                </label>
                <label>
                    "File location"
                    <input
                        type="text"
                        prop:value=move || settings.with(|s| s.file_location.clone())
                        on:input=move |ev| settings.update(|s| s.file_location = event_target_value(&ev))
                    />
                </label>
                <div class="form-actions">
                    <button class="primary-btn" on:click=save disabled=move || busy.get()>"Save settings"</button>
                </div>
            </div>

            <Show when=move || show_create_repo.get()>
                <Modal title="Create repository" on_close=move |_| set_show_create_repo.set(false)>
                    <div class="form">
                        <label>
                            "Name"
                            <input type="text" bind:value=new_repo_name />
                        </label>
                        <label>
                            "Description"
                            <input type="text" bind:value=new_repo_desc />
                        </label>
                        <label class="checkbox">
                            <input type="checkbox" bind:checked=new_repo_private />
                            "Private"
                        </label>
                        <div class="form-actions">
                            <button on:click=move |_| set_show_create_repo.set(false)>"Cancel"</button>
                            <button class="primary-btn" on:click=move |_| create_repo.run(())>"Create"</button>
                        </div>
                    </div>
                </Modal>
            </Show>

            <Show when=move || show_create_branch.get()>
                <Modal title="Create branch" on_close=move |_| set_show_create_branch.set(false)>
                    <div class="form">
                        <label>
                            "Branch name"
                            <input type="text" bind:value=new_branch />
                        </label>
                        <label>
                            "From"
                            <input type="text" bind:value=source_branch />
                        </label>
                        <div class="form-actions">
                            <button on:click=move |_| set_show_create_branch.set(false)>"Cancel"</button>
                            <button class="primary-btn" on:click=move |_| create_branch.run(())>"Create"</button>
                        </div>
                    </div>
                </Modal>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_repo_name() {
        assert_eq!(suggested_repo_name("  Company Website  Redesign "), "company-website-redesign");
        assert_eq!(suggested_repo_name("api"), "api");
    }

    #[test]
    fn test_settings_apply_clears_blank_fields() {
        let mut request = ProjectRequest::default();
        let settings = GitHubSettings {
            repo: "acme/site".into(),
            branch: " ".into(),
            token: "tok".into(),
            backup_config: String::new(),
            file_location: "/srv/site".into(),
        };
        settings.apply(&mut request);
        assert_eq!(request.github_repo.as_deref(), Some("acme/site"));
        assert_eq!(request.github_branch, None);
        assert_eq!(request.backup_config, None);
        assert_eq!(request.file_location.as_deref(), Some("/srv/site"));
    }
}
