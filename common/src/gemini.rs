//! Gemini API連携
//!
//! - Bio推敲: テキストのみ。失敗は呼び出し元へ返す
//! - キャプション生成: 画像付き。失敗しても必ず結果を返す
//!
//! HTTP送信は `Transport` としてホスト側（fetch / reqwest）が実装する。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::parse_caption_response;
use crate::prompts::{build_bio_prompt, CAPTION_PROMPT};
use crate::types::ImageCaption;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const BIO_MODEL: &str = "gemini-2.5-flash";
pub const CAPTION_MODEL: &str = "gemini-2.5-flash-image";

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "thinkingConfig")]
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: u32,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出（不明なら"image/jpeg"）
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty() && !s.contains(','))
        .unwrap_or("image/jpeg")
}

/// Bio推敲リクエスト（思考なし）
pub fn build_bio_request(current_bio: &str, tone: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![Part::Text { text: build_bio_prompt(current_bio, tone) }],
        }],
        generation_config: Some(GenerationConfig {
            thinking_config: ThinkingConfig { thinking_budget: 0 },
        }),
    }
}

/// キャプション生成リクエスト（画像 + 指示）
///
/// プレフィックスの無い文字列はそのままBase64として送る。
pub fn build_caption_request(image: &str) -> GeminiRequest {
    let data = extract_base64_from_data_url(image).unwrap_or(image);
    let mime_type = extract_mime_type_from_data_url(image);

    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: data.to_string(),
                    },
                },
                Part::Text { text: CAPTION_PROMPT.to_string() },
            ],
        }],
        generation_config: None,
    }
}

/// レスポンスJSONから本文テキストを取り出す
///
/// 最初の候補のテキストパートを連結する。候補が無ければ空文字。
pub fn parse_generate_response(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)?;
    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default();
    Ok(text)
}

/// HTTP POST（JSON）の送信手段
///
/// 成功時はレスポンス本文、HTTPエラーは `Error::Api` で返す。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: String) -> Result<String>;
}

/// Geminiクライアント
#[derive(Debug, Clone)]
pub struct GeminiClient<T> {
    api_key: Option<String>,
    transport: T,
    bio_model: String,
    caption_model: String,
}

impl<T: Transport> GeminiClient<T> {
    /// 空文字のキーは未設定として扱う
    pub fn new(api_key: Option<String>, transport: T) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            transport,
            bio_model: BIO_MODEL.to_string(),
            caption_model: CAPTION_MODEL.to_string(),
        }
    }

    pub fn with_models(mut self, bio_model: impl Into<String>, caption_model: impl Into<String>) -> Self {
        self.bio_model = bio_model.into();
        self.caption_model = caption_model.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn generate(&self, model: &str, request: &GeminiRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        let url = format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key);
        let body = serde_json::to_string(request)?;
        let response = self.transport.post_json(&url, body).await?;
        parse_generate_response(&response)
    }

    /// Bioを推敲する
    ///
    /// キー未設定なら通信せずに `Error::MissingApiKey`。
    /// 本文が空なら元のBioを返す。
    pub async fn generate_bio(&self, current_bio: &str, tone: &str) -> Result<String> {
        if !self.is_configured() {
            return Err(Error::MissingApiKey);
        }
        let request = build_bio_request(current_bio, tone);
        let text = self.generate(&self.bio_model, &request).await?;
        if text.is_empty() {
            Ok(current_bio.to_string())
        } else {
            Ok(text)
        }
    }

    /// 画像からタイトルと説明を生成する
    ///
    /// キー未設定・通信失敗・JSON不正はすべて
    /// `ImageCaption::unavailable()` になる。エラーは返さない。
    pub async fn generate_image_caption(&self, image: &str) -> ImageCaption {
        let request = build_caption_request(image);
        match self.generate(&self.caption_model, &request).await {
            Ok(text) => parse_caption_response(&text).unwrap_or_else(|_| ImageCaption::unavailable()),
            Err(_) => ImageCaption::unavailable(),
        }
    }
}
