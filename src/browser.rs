//! Browser Helpers
//!
//! Native dialogs, file reading and downloads.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::ProjectFileUpload;
use crate::error::{ApiError, ApiResult};

/// Native confirm dialog; false when unavailable
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Read a picked file into memory
pub async fn read_file(file: &web_sys::File) -> ApiResult<ProjectFileUpload> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Browser(format!("could not read {}: {:?}", file.name(), e)))?;
    Ok(ProjectFileUpload {
        name: file.name(),
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}

/// Files selected in an `<input type="file">`
pub fn selected_files(input: &web_sys::HtmlInputElement) -> Vec<web_sys::File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Read every selected file of an input
pub async fn read_selected(input: &web_sys::HtmlInputElement) -> ApiResult<Vec<ProjectFileUpload>> {
    let mut uploads = Vec::new();
    for file in selected_files(input) {
        uploads.push(read_file(&file).await?);
    }
    Ok(uploads)
}

/// Offer bytes to the user as a download
pub fn save_bytes(file_name: &str, bytes: &[u8], content_type: Option<&str>) -> ApiResult<()> {
    let browser_err = |e: wasm_bindgen::JsValue| ApiError::Browser(format!("{:?}", e));

    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type.unwrap_or("application/octet-stream"));
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(browser_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser_err)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::Browser("no document".to_string()))?;
    let anchor = document
        .create_element("a")
        .map_err(browser_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ApiError::Browser("not an anchor".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(browser_err)?;
    Ok(())
}

/// Open a URL in a new tab
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}
