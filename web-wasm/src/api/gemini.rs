//! Gemini API連携（ブラウザfetch）
//!
//! リクエストの組み立てとレスポンス解析は `lumiere_common::gemini` が持つ。
//! ここはHTTP送信だけを担当する。

use lumiere_common::{Error, GeminiClient, Result, Transport};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ビルド時に埋め込まれるAPIキー（`GEMINI_API_KEY=... trunk build`）
const API_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

/// `window.fetch` による送信
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn js_error(value: JsValue) -> Error {
    Error::Api(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<String> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let window = web_sys::window().ok_or_else(|| Error::Api("window is unavailable".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        if !resp.ok() {
            return Err(Error::Api(format!("API error: {}", resp.status())));
        }

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        text.as_string().ok_or(Error::EmptyResponse)
    }
}

/// ビルド時のキーで設定したクライアント
pub fn client() -> GeminiClient<FetchTransport> {
    GeminiClient::new(API_KEY.map(str::to_string), FetchTransport)
}

/// AI機能を表示するか（起動時に1回だけ判定）
pub fn ai_enabled() -> bool {
    client().is_configured()
}
