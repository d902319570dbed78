//! 静的データセット（data.json）の取得

use qr_credentials_common::{EmployeeRecord, Error, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// デプロイ先のdata.jsonを1回だけ取得
pub async fn fetch_static_dataset(url: String) -> Result<Vec<EmployeeRecord>> {
    let window = web_sys::window().ok_or_else(|| Error::Seed("window is not available".into()))?;

    let resp_value = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| Error::Seed(format!("{}: {:?}", url, e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| Error::Seed(format!("{}: {:?}", url, e)))?;

    if !resp.ok() {
        return Err(Error::Seed(format!("{}: HTTP {}", url, resp.status())));
    }

    let text = resp
        .text()
        .map_err(|e| Error::Seed(format!("{}: {:?}", url, e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| Error::Seed(format!("{}: {:?}", url, e)))?
        .as_string()
        .unwrap_or_default();

    serde_json::from_str(&text).map_err(|e| Error::Seed(format!("{}: {}", url, e)))
}
