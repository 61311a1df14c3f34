//! Browser download of the exported document.

use fg_core::format::{EXPORT_FILE_NAME, EXPORT_MIME};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offer `json` as `diagram.json` through a temporary object URL. The URL
/// is revoked once the click has been dispatched, or as soon as anything
/// after its creation fails.
pub(crate) fn offer_download(json: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;

    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let options = BlobPropertyBag::new();
    options.set_type(EXPORT_MIME);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    with_object_url(
        &url,
        |url| {
            anchor.set_href(url);
            anchor.set_download(EXPORT_FILE_NAME);
            anchor.click();
            Ok(())
        },
        Url::revoke_object_url,
    )?;
    log::debug!("offered {EXPORT_FILE_NAME} ({} bytes)", json.len());
    Ok(())
}

/// Run `use_url` and then `revoke`, whatever `use_url` returned. The first
/// error wins.
fn with_object_url<T, E>(
    url: &str,
    use_url: impl FnOnce(&str) -> Result<T, E>,
    revoke: impl FnOnce(&str) -> Result<(), E>,
) -> Result<T, E> {
    let result = use_url(url);
    let revoked = revoke(url);
    let value = result?;
    revoked?;
    Ok(value)
}
