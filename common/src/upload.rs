//! アップロード画面の状態遷移
//!
//! 未選択 → 選択済み(プレビュー生成中) → プレビューあり
//!   → (任意) AI解析中 → メタデータ入力済み → 公開中 → 完了
//!
//! 状態は画面と同じ寿命で、画面を離れると破棄される。

use std::time::Duration;

use crate::error::Result;
use crate::types::{ImageCaption, Notice, Photo};

/// 公開時の擬似待ち時間（実アップロードの代わり）
pub const PUBLISH_DELAY: Duration = Duration::from_millis(800);

/// 公開時の入力不足メッセージ
pub const VALIDATION_MESSAGE: &str = "Please provide at least an image and a title.";

/// 現在のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Empty,
    Loading,
    Ready,
    Analyzing,
    Publishing,
}

/// アップロードフォームの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFlow {
    pub file_name: Option<String>,
    pub preview: Option<String>,
    pub title: String,
    pub description: String,
    pub analyzing: bool,
    pub publishing: bool,
}

impl UploadFlow {
    pub fn phase(&self) -> UploadPhase {
        if self.publishing {
            UploadPhase::Publishing
        } else if self.analyzing {
            UploadPhase::Analyzing
        } else if self.preview.is_some() {
            UploadPhase::Ready
        } else if self.file_name.is_some() {
            UploadPhase::Loading
        } else {
            UploadPhase::Empty
        }
    }

    /// ファイル選択。プレビューはData URI変換の完了後に届く
    pub fn select_file(&mut self, file_name: impl Into<String>) {
        self.file_name = Some(file_name.into());
        self.preview = None;
    }

    pub fn preview_ready(&mut self, data_url: String) {
        self.preview = Some(data_url);
    }

    /// 「Change」: ファイル・プレビュー・メタデータをすべて破棄
    pub fn change(&mut self) {
        *self = Self::default();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// AI解析ボタンを出すか
    pub fn can_analyze(&self, ai_enabled: bool) -> bool {
        ai_enabled && self.preview.is_some()
    }

    /// 解析を開始できればプレビューを返す
    pub fn begin_analysis(&mut self) -> Option<String> {
        if self.analyzing {
            return None;
        }
        let preview = self.preview.clone()?;
        self.analyzing = true;
        Some(preview)
    }

    /// 解析結果を反映する。成功時はタイトルと説明を丸ごと上書き
    pub fn finish_analysis(&mut self, result: Result<ImageCaption>) -> Notice {
        self.analyzing = false;
        match result {
            Ok(caption) => {
                self.title = caption.title;
                self.description = caption.description;
                Notice::success("AI generated title and description")
            }
            Err(_) => Notice::error("Could not analyze image"),
        }
    }

    /// 公開開始。プレビューとタイトルが必須
    pub fn begin_publish(&mut self) -> std::result::Result<(), Notice> {
        if self.preview.is_none() || self.title.is_empty() {
            return Err(Notice::info(VALIDATION_MESSAGE));
        }
        self.publishing = true;
        Ok(())
    }

    /// 待ち時間の後に写真を組み立てる
    ///
    /// `dimensions` はホストが画像サイズを把握している場合のみ。
    pub fn finish_publish(&mut self, now_ms: i64, dimensions: Option<(u32, u32)>) -> Photo {
        self.publishing = false;
        Photo {
            id: now_ms.to_string(),
            url: self.preview.clone().unwrap_or_default(),
            title: self.title.clone(),
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            date_added: now_ms,
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::ToastKind;

    const PREVIEW: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn ready() -> UploadFlow {
        let mut flow = UploadFlow::default();
        flow.select_file("dawn.png");
        flow.preview_ready(PREVIEW.into());
        flow
    }

    #[test]
    fn test_phase_transitions() {
        let mut flow = UploadFlow::default();
        assert_eq!(flow.phase(), UploadPhase::Empty);

        flow.select_file("dawn.png");
        assert_eq!(flow.phase(), UploadPhase::Loading);

        flow.preview_ready(PREVIEW.into());
        assert_eq!(flow.phase(), UploadPhase::Ready);

        flow.begin_analysis();
        assert_eq!(flow.phase(), UploadPhase::Analyzing);
    }

    #[test]
    fn test_change_is_full_reset() {
        let mut flow = ready();
        flow.set_title("Dawn");
        flow.set_description("First light");

        flow.change();
        assert_eq!(flow, UploadFlow::default());
    }

    #[test]
    fn test_can_analyze_needs_preview_and_key() {
        let flow = ready();
        assert!(flow.can_analyze(true));
        assert!(!flow.can_analyze(false));
        assert!(!UploadFlow::default().can_analyze(true));
    }

    #[test]
    fn test_analysis_overwrites_metadata() {
        let mut flow = ready();
        flow.set_title("Mine");
        flow.set_description("Manual");

        assert_eq!(flow.begin_analysis().as_deref(), Some(PREVIEW));
        let notice = flow.finish_analysis(Ok(ImageCaption {
            title: "Quiet Dawn".into(),
            description: "Light before the city wakes.".into(),
        }));

        assert!(!flow.analyzing);
        assert_eq!(flow.title, "Quiet Dawn");
        assert_eq!(flow.description, "Light before the city wakes.");
        assert_eq!(notice.kind, ToastKind::Success);
    }

    #[test]
    fn test_analysis_failure_keeps_metadata() {
        let mut flow = ready();
        flow.set_title("Mine");
        flow.begin_analysis();

        let notice = flow.finish_analysis(Err(Error::Api("API error: 500".into())));
        assert!(!flow.analyzing);
        assert_eq!(flow.title, "Mine");
        assert_eq!(notice.kind, ToastKind::Error);
    }

    #[test]
    fn test_begin_analysis_not_reentrant() {
        let mut flow = ready();
        assert!(flow.begin_analysis().is_some());
        assert!(flow.begin_analysis().is_none());
    }

    #[test]
    fn test_publish_requires_title() {
        let mut flow = ready();
        let notice = flow.begin_publish().unwrap_err();
        assert_eq!(notice.message, VALIDATION_MESSAGE);
        assert!(!flow.publishing);
    }

    #[test]
    fn test_publish_requires_preview() {
        let mut flow = UploadFlow::default();
        flow.set_title("Dawn");
        assert!(flow.begin_publish().is_err());
    }

    #[test]
    fn test_publish_builds_photo() {
        let mut flow = ready();
        flow.set_title("Dawn");
        flow.begin_publish().expect("validation");
        assert_eq!(flow.phase(), UploadPhase::Publishing);

        let photo = flow.finish_publish(1_700_000_000_123, Some((640, 480)));
        assert!(!flow.publishing);
        assert_eq!(photo.id, "1700000000123");
        assert_eq!(photo.url, PREVIEW);
        assert_eq!(photo.title, "Dawn");
        assert_eq!(photo.description, None);
        assert_eq!(photo.date_added, 1_700_000_000_123);
        assert_eq!((photo.width, photo.height), (Some(640), Some(480)));
    }

    #[test]
    fn test_publish_delay_constant() {
        assert_eq!(PUBLISH_DELAY.as_millis(), 800);
    }
}
