//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("API key missing")]
    MissingApiKey,

    #[error("{0}")]
    Api(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Invalid data URL")]
    InvalidDataUrl,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_storage() {
        let error = Error::Storage("quota exceeded".to_string());
        assert_eq!(format!("{}", error), "Storage error: quota exceeded");
    }

    #[test]
    fn test_error_display_missing_api_key() {
        assert_eq!(format!("{}", Error::MissingApiKey), "API key missing");
    }

    #[test]
    fn test_error_display_api_is_verbatim() {
        let error = Error::Api("API error: 503".to_string());
        assert_eq!(format!("{}", error), "API error: 503");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
