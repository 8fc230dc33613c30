//! AIレスポンスパーサー
//!
//! キャプション生成のレスポンス本文からJSONオブジェクトを抽出する。

use crate::error::{Error, Result};
use crate::types::ImageCaption;

/// フォールバック時のタイトル
pub const UNTITLED: &str = "Untitled";

/// JSONが見つからない場合に説明として使う文字数
const FALLBACK_DESCRIPTION_CHARS: usize = 100;

impl ImageCaption {
    /// 解析できなかった場合の最終フォールバック
    pub fn unavailable() -> Self {
        Self {
            title: UNTITLED.to_string(),
            description: "Could not analyze image.".to_string(),
        }
    }

    /// AIが何も返さなかった場合
    pub fn empty_response() -> Self {
        Self {
            title: UNTITLED.to_string(),
            description: "No description generated.".to_string(),
        }
    }
}

/// 最初の `{` から最後の `}` までを抽出
///
/// どちらかが無い、または `}` が `{` より前にしか無ければNone。
///
/// # Examples
/// ```
/// use lumiere_common::extract_json_object;
///
/// let text = "noise {\"title\":\"A\"} trailing";
/// assert_eq!(extract_json_object(text), Some("{\"title\":\"A\"}"));
/// assert_eq!(extract_json_object("no braces"), None);
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// キャプションのレスポンス本文をパース
///
/// - 空文字 → 「No description generated.」
/// - `{`/`}` なし → タイトル「Untitled」、説明は本文先頭100文字
/// - それ以外 → JSONとしてパース（失敗はErr）
pub fn parse_caption_response(text: &str) -> Result<ImageCaption> {
    if text.is_empty() {
        return Ok(ImageCaption::empty_response());
    }

    if !(text.contains('{') && text.contains('}')) {
        return Ok(ImageCaption {
            title: UNTITLED.to_string(),
            description: text.chars().take(FALLBACK_DESCRIPTION_CHARS).collect(),
        });
    }

    let json = extract_json_object(text)
        .ok_or_else(|| Error::Parse("JSONオブジェクトが見つかりません".into()))?;
    Ok(serde_json::from_str(json)?)
}
