//! reqwestによるGemini API送信

use crate::error::Result;
use lumiere_common::{Error, Transport};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> lumiere_common::Result<String> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            // URLにAPIキーが含まれるためエラーから除く
            .map_err(|e| Error::Api(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        debug!(status = status.as_u16(), "gemini response");
        if !status.is_success() {
            return Err(Error::Api(format!("API error: {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Api(format!("response read failed: {}", e.without_url())))
    }
}
