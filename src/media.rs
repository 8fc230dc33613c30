//! 画像ファイル → Data URI 変換

use crate::error::{LumiereError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageReader;
use std::io::{Cursor, ErrorKind};
use std::path::Path;

/// 読み込んだ画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub file_name: String,
    pub data_url: String,
    /// (幅, 高さ)。ヘッダを読めなければNone
    pub dimensions: Option<(u32, u32)>,
}

/// 拡張子からMIMEタイプを判定
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// バイト列をData URIへ
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// 画像ファイルを読み込み、Data URIとサイズを返す
pub async fn load_image(path: &Path) -> Result<LoadedImage> {
    let mime_type = mime_type_for(path)
        .ok_or_else(|| LumiereError::UnsupportedMedia(path.display().to_string()))?;

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => LumiereError::FileNotFound(path.display().to_string()),
        _ => LumiereError::Io(e),
    })?;

    let dimensions = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());

    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(LoadedImage {
        file_name,
        data_url: to_data_url(mime_type, &bytes),
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type_for(Path::new("a.png")), Some("image/png"));
        assert_eq!(mime_type_for(Path::new("notes.txt")), None);
        assert_eq!(mime_type_for(Path::new("no_extension")), None);
    }

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn test_load_png_reads_dimensions() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("frame.png");
        image::RgbImage::new(3, 2).save(&path).expect("write png");

        let loaded = load_image(&path).await.expect("load");
        assert_eq!(loaded.file_name, "frame.png");
        assert!(loaded.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(loaded.dimensions, Some((3, 2)));
    }

    #[tokio::test]
    async fn test_load_corrupt_image_has_no_dimensions() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not really a jpeg").expect("write");

        let loaded = load_image(&path).await.expect("load");
        assert_eq!(loaded.dimensions, None);
        assert!(loaded.data_url.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_load_unsupported_extension() {
        let err = load_image(Path::new("/tmp/readme.txt")).await.unwrap_err();
        assert!(matches!(err, LumiereError::UnsupportedMedia(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_image(Path::new("/nonexistent/path/12345.png")).await.unwrap_err();
        assert!(matches!(err, LumiereError::FileNotFound(_)));
    }
}
