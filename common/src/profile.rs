//! プロフィール編集（About画面）の状態

use crate::error::Result;
use crate::types::{Notice, ProfileField, UserProfile};

/// 表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Read,
    Editing,
}

/// AI推敲の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolishOutcome {
    /// 成功時のみBio更新
    pub update: Option<ProfileField>,
    pub notice: Notice,
}

/// About画面のローカル状態
///
/// プロフィール本体はルートが持つ。入力は1文字ごとに
/// `ProfileField` としてルートへ送られるため、保存ボタンは
/// 編集モードを抜けるだけ。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEditor {
    pub mode: EditorMode,
    pub polishing: bool,
}

impl ProfileEditor {
    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    pub fn begin_edit(&mut self) {
        self.mode = EditorMode::Editing;
    }

    pub fn save(&mut self) {
        self.mode = EditorMode::Read;
    }

    /// 推敲を開始できれば対象のBioを返す
    ///
    /// Bioが空、または推敲中ならNone。
    pub fn begin_polish(&mut self, profile: &UserProfile) -> Option<String> {
        if profile.bio.is_empty() || self.polishing {
            return None;
        }
        self.polishing = true;
        Some(profile.bio.clone())
    }

    /// 推敲結果を受け取る。成否に関わらず処理中フラグは解除される
    pub fn finish_polish(&mut self, result: Result<String>) -> PolishOutcome {
        self.polishing = false;
        match result {
            Ok(bio) => PolishOutcome {
                update: Some(ProfileField::Bio(bio)),
                notice: Notice::success("Bio refined by AI"),
            },
            Err(_) => PolishOutcome {
                update: None,
                notice: Notice::error("AI Service unavailable"),
            },
        }
    }
}

/// 連絡先リンク
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLink {
    pub label: &'static str,
    pub href: String,
}

/// 設定済みの連絡先だけを返す
pub fn contact_links(profile: &UserProfile) -> Vec<ContactLink> {
    let mut links = Vec::new();
    if let Some(email) = profile.email.as_deref().filter(|s| !s.is_empty()) {
        links.push(ContactLink {
            label: "Email",
            href: format!("mailto:{}", email),
        });
    }
    if let Some(handle) = profile.instagram.as_deref().filter(|s| !s.is_empty()) {
        links.push(ContactLink {
            label: "Instagram",
            href: format!("https://instagram.com/{}", handle),
        });
    }
    links
}
