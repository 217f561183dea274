//! Clipboard access through `navigator.clipboard`.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::types::{AppError, AppResult};

/// Write `text` to the system clipboard.
pub async fn copy_to_clipboard(text: &str) -> AppResult<()> {
    let promise =
        write_text(text).map_err(|e| AppError::Clipboard(format!("Clipboard unavailable: {:?}", e)))?;

    JsFuture::from(promise)
        .await
        .map_err(|e| AppError::Clipboard(format!("{:?}", e)))?;

    Ok(())
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = "writeText", catch)]
    fn write_text(data: &str) -> Result<js_sys::Promise, JsValue>;
}
