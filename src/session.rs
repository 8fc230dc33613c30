//! ポートフォリオのセッション（ルート状態の所有者）
//!
//! `AppState` への書き込みはすべて `dispatch` を通る。
//! 通知の期限切れはtokioタイマーからチャネル経由で戻ってくる。
//! ランタイム外で作られた通知は期限切れにならない。

use crate::config::Config;
use crate::error::Result;
use crate::media;
use crate::store::FileStore;
use crate::transport::ReqwestTransport;
use lumiere_common::{
    AppState, Command, Effect, GeminiClient, ImageCaption, KeyValueStore, Notice, Photo,
    PortfolioStore, ProfileEditor, ProfileField, Toast, Transport, UploadFlow, UserProfile,
    ViewState, DEFAULT_BIO_TONE, PUBLISH_DELAY, REMOVE_CONFIRMATION_PROMPT,
};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// 現在時刻（UNIXミリ秒）
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct Session<S, T> {
    state: AppState,
    store: PortfolioStore<S>,
    gemini: GeminiClient<T>,
    /// 起動時に1回だけ判定
    ai_enabled: bool,
    bio_tone: String,
    upload: UploadFlow,
    upload_dimensions: Option<(u32, u32)>,
    editor: ProfileEditor,
    expired_tx: UnboundedSender<String>,
    expired_rx: UnboundedReceiver<String>,
}

impl Session<FileStore, ReqwestTransport> {
    /// `~/.config/lumiere/config.json` の設定で開く
    pub fn open_default() -> Result<Self> {
        Self::open(&Config::load()?)
    }

    /// 設定からファイルストアとGeminiクライアントを組み立てる
    pub fn open(config: &Config) -> Result<Self> {
        let store = FileStore::new(config.data_dir()?)?;
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_seconds))?;
        let gemini = GeminiClient::new(config.api_key(), transport)
            .with_models(config.bio_model.clone(), config.caption_model.clone());

        info!(data_dir = %store.dir().display(), ai_enabled = gemini.is_configured(), "opening portfolio");
        Ok(Self::new(store, gemini)?.with_bio_tone(config.bio_tone.clone()))
    }
}

impl<S: KeyValueStore, T: Transport> Session<S, T> {
    /// 保存済みの状態を読み込む。未保存ならサンプル、壊れていればエラー
    pub fn new(store: S, gemini: GeminiClient<T>) -> Result<Self> {
        let store = PortfolioStore::new(store);
        let photos = store.load_photos(now_ms())?;
        let profile = store.load_profile()?;
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();

        Ok(Self {
            state: AppState::new(photos, profile),
            store,
            ai_enabled: gemini.is_configured(),
            gemini,
            bio_tone: DEFAULT_BIO_TONE.to_string(),
            upload: UploadFlow::default(),
            upload_dimensions: None,
            editor: ProfileEditor::default(),
            expired_tx,
            expired_rx,
        })
    }

    pub fn with_bio_tone(mut self, tone: impl Into<String>) -> Self {
        self.bio_tone = tone.into();
        self
    }

    pub fn view(&self) -> ViewState {
        self.state.view
    }

    pub fn photos(&self) -> &[Photo] {
        &self.state.photos
    }

    pub fn profile(&self) -> &UserProfile {
        &self.state.profile
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    pub fn upload(&self) -> &UploadFlow {
        &self.upload
    }

    pub fn editor(&self) -> &ProfileEditor {
        &self.editor
    }

    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// 表示中の通知（期限切れを反映してから返す）
    pub fn toasts(&mut self) -> &[Toast] {
        while let Ok(id) = self.expired_rx.try_recv() {
            self.dispatch(Command::ExpireToast(id));
        }
        &self.state.toasts
    }

    fn dispatch(&mut self, command: Command) {
        let before = self.state.view;
        let effects = self.state.apply(command, now_ms());
        if self.state.view != before {
            self.discard_view_state(before);
        }
        for effect in effects {
            self.run_effect(effect);
        }
    }

    /// 画面を離れたらその画面のローカル状態は破棄
    fn discard_view_state(&mut self, left: ViewState) {
        match left {
            ViewState::Upload => {
                self.upload = UploadFlow::default();
                self.upload_dimensions = None;
            }
            ViewState::Profile => self.editor = ProfileEditor::default(),
            ViewState::Gallery => {}
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            // 保存失敗は通知しない（メモリ上の状態が正）
            Effect::PersistPhotos => {
                if let Err(e) = self.store.save_photos(&self.state.photos) {
                    warn!(error = %e, "failed to persist photos");
                }
            }
            Effect::PersistProfile => {
                if let Err(e) = self.store.save_profile(&self.state.profile) {
                    warn!(error = %e, "failed to persist profile");
                }
            }
            Effect::ScheduleToastExpiry { id, after } => {
                let Ok(handle) = tokio::runtime::Handle::try_current() else {
                    // ランタイム外では期限切れを予約できない（通知は残る）
                    warn!(toast = %id, "no tokio runtime; toast expiry not scheduled");
                    return;
                };
                let tx = self.expired_tx.clone();
                handle.spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(id);
                });
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.dispatch(Command::AddToast(notice));
    }

    // =============================================
    // ルート操作
    // =============================================

    pub fn set_view(&mut self, view: ViewState) {
        self.dispatch(Command::SetView(view));
    }

    pub fn add_toast(&mut self, message: impl Into<String>, kind: lumiere_common::ToastKind) {
        self.dispatch(Command::toast(message, kind));
    }

    /// 確認が取れた場合だけ削除する
    pub fn remove_photo(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) {
        let confirmed = confirm(REMOVE_CONFIRMATION_PROMPT);
        self.dispatch(Command::RemovePhoto { id: id.to_string(), confirmed });
    }

    // =============================================
    // プロフィール
    // =============================================

    pub fn begin_edit(&mut self) {
        self.editor.begin_edit();
    }

    pub fn update_profile(&mut self, field: ProfileField) {
        self.dispatch(Command::UpdateProfile(field));
    }

    pub fn save_profile(&mut self) {
        self.editor.save();
    }

    /// AIでBioを推敲する（AI無効なら何もしない）
    pub async fn polish_bio(&mut self) {
        if !self.ai_enabled {
            debug!("bio polish unavailable without API key");
            return;
        }
        let Some(bio) = self.editor.begin_polish(&self.state.profile) else {
            return;
        };

        let result = self.gemini.generate_bio(&bio, &self.bio_tone).await;
        if let Err(e) = &result {
            warn!(error = %e, "gemini bio error");
        }

        let outcome = self.editor.finish_polish(result);
        if let Some(field) = outcome.update {
            self.dispatch(Command::UpdateProfile(field));
        }
        self.notify(outcome.notice);
    }

    // =============================================
    // アップロード
    // =============================================

    /// 画像ファイルを選択してプレビューを作る
    pub async fn select_file(&mut self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.upload.select_file(name);

        match media::load_image(path).await {
            Ok(image) => {
                self.upload_dimensions = image.dimensions;
                self.upload.preview_ready(image.data_url);
                Ok(())
            }
            Err(e) => {
                self.change_file();
                Err(e)
            }
        }
    }

    /// 変換済みのData URIを直接選択する
    pub fn select_data_url(&mut self, file_name: &str, data_url: String) {
        self.upload.select_file(file_name);
        self.upload_dimensions = None;
        self.upload.preview_ready(data_url);
    }

    pub fn change_file(&mut self) {
        self.upload.change();
        self.upload_dimensions = None;
    }

    pub fn set_upload_title(&mut self, title: impl Into<String>) {
        self.upload.set_title(title);
    }

    pub fn set_upload_description(&mut self, description: impl Into<String>) {
        self.upload.set_description(description);
    }

    /// AIでタイトルと説明を生成する
    pub async fn generate_metadata(&mut self) {
        if !self.upload.can_analyze(self.ai_enabled) {
            return;
        }
        let Some(preview) = self.upload.begin_analysis() else {
            return;
        };

        let caption = self.gemini.generate_image_caption(&preview).await;
        if caption == ImageCaption::unavailable() {
            warn!("gemini vision fell back to generic caption");
        }

        let notice = self.upload.finish_analysis(Ok(caption));
        self.notify(notice);
    }

    /// 公開。入力不足なら通知だけ出して何も変えない
    pub async fn publish(&mut self) -> Option<Photo> {
        if let Err(notice) = self.upload.begin_publish() {
            self.notify(notice);
            return None;
        }

        tokio::time::sleep(PUBLISH_DELAY).await;

        let photo = self.upload.finish_publish(now_ms(), self.upload_dimensions);
        self.dispatch(Command::Upload(photo));

        // IDは衝突回避で付け替えられている場合があるので保存後の先頭を返す
        let stored = self.state.photos.first().cloned();
        if let Some(photo) = &stored {
            info!(id = %photo.id, title = %photo.title, "photo published");
        }
        stored
    }

    pub fn cancel_upload(&mut self) {
        self.set_view(ViewState::Gallery);
    }
}
