//! ポートフォリオのデータモデル
//!
//! Web(WASM)とネイティブで共有される型:
//! - Photo: ギャラリーの1作品
//! - UserProfile: プロフィール（アプリに1つ）
//! - ViewState: 表示中の画面
//! - Toast: 一時的な通知

use serde::{Deserialize, Serialize};

/// ギャラリーの写真
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,

    /// リモートURLまたはData URI
    pub url: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 追加日時（UNIXミリ秒）
    pub date_added: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// 写真家プロフィール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub title: String,
    pub bio: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// プロフィールの1フィールド更新
///
/// 1つのバリアントは該当フィールドだけを置き換える。
/// 任意項目に空文字を渡すと未設定（None）に戻る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileField {
    Name(String),
    Title(String),
    Bio(String),
    AvatarUrl(String),
    Email(String),
    Instagram(String),
}

impl UserProfile {
    /// フィールド単位でマージ
    pub fn apply(&mut self, field: ProfileField) {
        match field {
            ProfileField::Name(v) => self.name = v,
            ProfileField::Title(v) => self.title = v,
            ProfileField::Bio(v) => self.bio = v,
            ProfileField::AvatarUrl(v) => self.avatar_url = non_empty(v),
            ProfileField::Email(v) => self.email = non_empty(v),
            ProfileField::Instagram(v) => self.instagram = non_empty(v),
        }
    }

    pub fn with(mut self, field: ProfileField) -> Self {
        self.apply(field);
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// 表示中の画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
    #[default]
    Gallery,
    Profile,
    Upload,
}

impl ViewState {
    /// ナビゲーションの並び順
    pub const ALL: [ViewState; 3] = [ViewState::Gallery, ViewState::Profile, ViewState::Upload];

    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Gallery => "Work",
            ViewState::Profile => "Profile",
            ViewState::Upload => "Upload",
        }
    }
}

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    #[default]
    Info,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Info => "info",
            ToastKind::Error => "error",
        }
    }
}

/// 一時通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub kind: ToastKind,
}

/// 通知の内容（ID未採番）
///
/// 子コンポーネントからルートへ渡され、ルートがToastとして採番する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: ToastKind,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self { message: message.into(), kind }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }
}

/// AIが生成したタイトルと説明
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageCaption {
    pub title: String,
    pub description: String,
}

/// 初回起動時のサンプル写真（4枚）
pub fn seed_photos(now_ms: i64) -> Vec<Photo> {
    let samples = [
        ("1", "https://picsum.photos/800/1200?grayscale&random=1", "Solitude", "A quiet moment in the chaotic city."),
        ("2", "https://picsum.photos/800/1000?grayscale&random=2", "Architecture I", "Lines and shadows converging in light."),
        ("3", "https://picsum.photos/800/800?grayscale&random=3", "Texture Study", "The feeling of stone worn by time."),
        ("4", "https://picsum.photos/800/1100?grayscale&random=4", "Portrait of Stranger", "Eyes that tell a thousand unwritten stories."),
    ];

    samples
        .iter()
        .enumerate()
        .map(|(i, (id, url, title, description))| Photo {
            id: id.to_string(),
            url: url.to_string(),
            title: title.to_string(),
            description: Some(description.to_string()),
            date_added: now_ms - (i as i64) * 10_000,
            width: None,
            height: None,
        })
        .collect()
}

/// 初回起動時のサンプルプロフィール
pub fn seed_profile() -> UserProfile {
    UserProfile {
        name: "Alexandre Voss".into(),
        title: "Visual Artist".into(),
        bio: "Capturing the silence between thoughts. My work explores the interplay of light and shadow in urban environments, seeking the sublime in the ordinary. Based in Paris.".into(),
        avatar_url: None,
        email: Some("contact@lumiere.example".into()),
        instagram: Some("lumiere_voss".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_serialize_camel_case() {
        let photo = Photo {
            id: "42".into(),
            url: "data:image/png;base64,AAAA".into(),
            title: "Dawn".into(),
            description: None,
            date_added: 1_700_000_000_000,
            width: Some(800),
            height: None,
        };

        let json = serde_json::to_string(&photo).expect("シリアライズ失敗");
        assert!(json.contains("\"dateAdded\":1700000000000"));
        assert!(json.contains("\"width\":800"));
        assert!(!json.contains("description"));
        assert!(!json.contains("height"));
    }

    #[test]
    fn test_photo_deserialize_without_optionals() {
        let json = r#"{"id":"1","url":"u","title":"t","dateAdded":5}"#;
        let photo: Photo = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(photo.description, None);
        assert_eq!(photo.width, None);
        assert_eq!(photo.date_added, 5);
    }

    #[test]
    fn test_profile_field_merge_preserves_others() {
        let profile = seed_profile().with(ProfileField::Name("Mira".into()));
        assert_eq!(profile.name, "Mira");
        assert_eq!(profile.title, "Visual Artist");
        assert_eq!(profile.email.as_deref(), Some("contact@lumiere.example"));
    }

    #[test]
    fn test_profile_field_empty_optional_clears() {
        let profile = seed_profile()
            .with(ProfileField::Email(String::new()))
            .with(ProfileField::AvatarUrl("https://example.com/me.jpg".into()));
        assert_eq!(profile.email, None);
        assert_eq!(profile.avatar_url.as_deref(), Some("https://example.com/me.jpg"));
        assert_eq!(profile.instagram.as_deref(), Some("lumiere_voss"));
    }

    #[test]
    fn test_profile_serialize_avatar_url_key() {
        let profile = seed_profile().with(ProfileField::AvatarUrl("a.jpg".into()));
        let json = serde_json::to_string(&profile).expect("シリアライズ失敗");
        assert!(json.contains("\"avatarUrl\":\"a.jpg\""));
    }

    #[test]
    fn test_view_state_default_is_gallery() {
        assert_eq!(ViewState::default(), ViewState::Gallery);
        assert_eq!(ViewState::ALL.len(), 3);
    }

    #[test]
    fn test_toast_kind_serialize_lowercase() {
        let json = serde_json::to_string(&ToastKind::Success).expect("シリアライズ失敗");
        assert_eq!(json, "\"success\"");
        assert_eq!(ToastKind::Error.as_str(), "error");
    }

    #[test]
    fn test_seed_photos_newest_first() {
        let photos = seed_photos(100_000);
        assert_eq!(photos.len(), 4);
        assert_eq!(photos[0].id, "1");
        assert_eq!(photos[0].date_added, 100_000);
        assert_eq!(photos[3].date_added, 70_000);
        assert!(photos.windows(2).all(|w| w[0].date_added > w[1].date_added));
    }

    #[test]
    fn test_image_caption_missing_keys_default() {
        let caption: ImageCaption = serde_json::from_str(r#"{"title":"Only"}"#).expect("デシリアライズ失敗");
        assert_eq!(caption.title, "Only");
        assert_eq!(caption.description, "");
    }
}
