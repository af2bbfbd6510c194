//! Small DOM utilities shared by the wizard components.

use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlAnchorElement, HtmlElement, Url};

/// Displays a temporary notification at the bottom of the screen. The toast
/// removes itself after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                html_toast.set_class_name("toast");

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Saves `bytes` under `file_name` through a temporary object URL.
pub fn trigger_download(file_name: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let blob: web_sys::Blob =
        gloo_file::Blob::new_with_options(bytes, Some("text/csv;charset=utf-8")).into();
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.style().set_property("display", "none")?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    Url::revoke_object_url(&url)
}

/// Thousands-separated rendering of a count, e.g. `12,345`.
pub fn format_count(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}

/// Human readable size of an exported file.
pub fn format_bytes(bytes: usize) -> String {
    match bytes {
        0..=1023 => format!("{} B", bytes),
        1024..=1_048_575 => format!("{:.1} KB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MB", bytes as f64 / 1_048_576.0),
    }
}
