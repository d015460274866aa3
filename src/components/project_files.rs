//! Project Files Tab
//!
//! Browses the linked GitHub repository and manages files uploaded to the
//! project itself.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::components::{DeleteConfirmButton, ErrorBanner};
use crate::context::use_api;
use crate::models::{EntryKind, Project, RepoEntry};
use crate::repo_files::{breadcrumbs, format_size, sort_entries, split_slug};

#[component]
pub fn ProjectFiles(project: Project) -> impl IntoView {
    view! {
        <div class="project-files">
            <RepoBrowser project=project.clone() />
            <UploadedFiles project_id=project.id />
        </div>
    }
}

#[component]
fn RepoBrowser(project: Project) -> impl IntoView {
    let api = use_api();
    let repo = project.github_repo.clone().unwrap_or_default();
    let token = project.github_token.clone().unwrap_or_default();

    let entries = RwSignal::new(Vec::<RepoEntry>::new());
    let (path, set_path) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let linked = split_slug(&repo).is_some() && !token.is_empty();

    if linked {
        let repo = repo.clone();
        Effect::new(move |_| {
            let current = path.get();
            let Some((owner, name)) = split_slug(&repo).map(|(o, n)| (o.to_string(), n.to_string())) else {
                return;
            };
            let api = api.clone();
            let token = token.clone();
            set_loading.set(true);
            set_error.set(None);
            spawn_local(async move {
                match api.repo_contents(&owner, &name, &current, &token).await {
                    Ok(mut list) => {
                        sort_entries(&mut list);
                        entries.set(list);
                    }
                    Err(err) => {
                        log::error!("failed to read repository contents: {}", err);
                        entries.set(Vec::new());
                        set_error.set(Some(
                            "Could not read the repository; check the token and repository settings".to_string(),
                        ));
                    }
                }
                set_loading.set(false);
            });
        });
    }

    if !linked {
        return view! {
            <section class="panel empty-state">
                <h2>"No repository linked"</h2>
                <p class="muted">"Link a repository and token in the GitHub tab to browse its files."</p>
            </section>
        }
        .into_any();
    }

    let root_name = repo.clone();
    view! {
        <section class="panel repo-browser">
            <nav class="breadcrumbs">
                {move || {
                    let crumbs = breadcrumbs(&root_name, &path.get());
                    let last = crumbs.len().saturating_sub(1);
                    crumbs
                        .into_iter()
                        .enumerate()
                        .map(|(i, crumb)| {
                            if i == last {
                                view! { <span class="crumb current">{crumb.name}</span> }.into_any()
                            } else {
                                view! {
                                    <button class="crumb link-btn" on:click=move |_| set_path.set(crumb.path.clone())>
                                        {crumb.name.clone()}
                                    </button>
                                    <span class="crumb-sep">"/"</span>
                                }
                                    .into_any()
                            }
                        })
                        .collect_view()
                }}
            </nav>
            <ErrorBanner message=error />
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Loading..."</p> }>
                <table class="file-table">
                    <tbody>
                        <For
                            each=move || entries.get()
                            key=|e| e.path.clone()
                            children=move |entry| {
                                let is_dir = entry.kind == EntryKind::Dir;
                                let dir_path = entry.path.clone();
                                let link = entry.html_url.clone();
                                view! {
                                    <tr class=if is_dir { "dir" } else { "file" }>
                                        <td>
                                            {if is_dir {
                                                view! {
                                                    <button class="link-btn" on:click=move |_| set_path.set(dir_path.clone())>
                                                        {format!("📁 {}", entry.name)}
                                                    </button>
                                                }
                                                    .into_any()
                                            } else {
                                                view! {
                                                    <a href=link.unwrap_or_default() target="_blank" rel="noopener">
                                                        {format!("📄 {}", entry.name)}
                                                    </a>
                                                }
                                                    .into_any()
                                            }}
                                        </td>
                                        <td class="num muted">{if is_dir { String::new() } else { format_size(entry.size) }}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || entries.with(|e| e.is_empty())>
                    <p class="muted">"This folder is empty"</p>
                </Show>
            </Show>
        </section>
    }
    .into_any()
}

#[component]
fn UploadedFiles(project_id: String) -> impl IntoView {
    let api = use_api();
    let files = RwSignal::new(Vec::<String>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (uploading, set_uploading) = signal(false);

    let reload = {
        let api = api.clone();
        let project_id = project_id.clone();
        move || {
            let api = api.clone();
            let project_id = project_id.clone();
            spawn_local(async move {
                match api.list_files(&project_id).await {
                    Ok(list) => files.set(list),
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };
    reload();

    let upload = {
        let api = api.clone();
        let project_id = project_id.clone();
        let reload = reload.clone();
        move |ev: web_sys::Event| {
            let input: web_sys::HtmlInputElement = event_target(&ev);
            let api = api.clone();
            let project_id = project_id.clone();
            let reload = reload.clone();
            set_uploading.set(true);
            spawn_local(async move {
                let result = async {
                    let picked = browser::read_selected(&input).await?;
                    if picked.is_empty() {
                        return Ok(Vec::new());
                    }
                    api.upload_files(&project_id, picked).await
                }
                .await;
                input.set_value("");
                set_uploading.set(false);
                match result {
                    Ok(stored) => {
                        log::info!("uploaded {} files", stored.len());
                        reload();
                    }
                    Err(err) => set_error.set(Some(err.user_message())),
                }
            });
        }
    };

    let download = {
        let api = api.clone();
        let project_id = project_id.clone();
        Callback::new(move |name: String| {
            let api = api.clone();
            let project_id = project_id.clone();
            spawn_local(async move {
                let result = match api.download_file(&project_id, &name).await {
                    Ok((bytes, content_type)) => browser::save_bytes(&name, &bytes, content_type.as_deref()),
                    Err(err) => Err(err),
                };
                if let Err(err) = result {
                    set_error.set(Some(err.user_message()));
                }
            });
        })
    };

    let remove = Callback::new(move |name: String| {
        let api = api.clone();
        let project_id = project_id.clone();
        spawn_local(async move {
            match api.delete_file(&project_id, &name).await {
                Ok(()) => files.update(|f| f.retain(|n| *n != name)),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    });

    view! {
        <section class="panel uploaded-files">
            <div class="panel-header">
                <h2>"Uploaded files"</h2>
                <label class="file-btn primary-btn">
                    {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                    <input type="file" multiple=true hidden=true on:change=upload />
                </label>
            </div>
            <ErrorBanner message=error />
            <Show
                when=move || !files.with(|f| f.is_empty())
                fallback=|| view! { <p class="muted">"No files uploaded"</p> }
            >
                <ul class="file-list">
                    <For
                        each=move || files.get()
                        key=|name| name.clone()
                        children=move |name| {
                            let download_name = name.clone();
                            let remove_name = name.clone();
                            view! {
                                <li>
                                    <button class="link-btn" on:click=move |_| download.run(download_name.clone())>
                                        {name.clone()}
                                    </button>
                                    <DeleteConfirmButton button_class="icon-btn danger" on_confirm=move |_| remove.run(remove_name.clone()) />
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
