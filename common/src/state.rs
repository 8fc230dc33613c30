//! ルート状態とコマンド処理
//!
//! 画面・写真・プロフィール・通知の4つの状態はここだけが書き換える。
//! 子コンポーネントは `Command` を送り、ホスト（Web/ネイティブ）は
//! 返された `Effect` を解釈して保存やタイマー登録を行う。

use std::time::Duration;

use crate::types::{Notice, Photo, ProfileField, Toast, ToastKind, UserProfile, ViewState};

/// 通知の表示時間
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3000);

/// 削除確認ダイアログの文言
pub const REMOVE_CONFIRMATION_PROMPT: &str = "Are you sure you want to remove this piece?";

/// 状態変更の要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetView(ViewState),
    AddToast(Notice),
    ExpireToast(String),
    Upload(Photo),
    /// `confirmed` はホストが確認ダイアログで得た回答
    RemovePhoto { id: String, confirmed: bool },
    UpdateProfile(ProfileField),
}

impl Command {
    pub fn toast(message: impl Into<String>, kind: ToastKind) -> Self {
        Command::AddToast(Notice::new(message, kind))
    }
}

/// ホストが実行する副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistPhotos,
    PersistProfile,
    /// `after` 経過後に `Command::ExpireToast(id)` を1回だけ送る
    ScheduleToastExpiry { id: String, after: Duration },
}

/// アプリケーションの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub view: ViewState,
    pub photos: Vec<Photo>,
    pub profile: UserProfile,
    pub toasts: Vec<Toast>,
    toast_seq: u64,
}

impl AppState {
    pub fn new(photos: Vec<Photo>, profile: UserProfile) -> Self {
        Self {
            view: ViewState::default(),
            photos,
            profile,
            toasts: Vec::new(),
            toast_seq: 0,
        }
    }

    /// コマンドを適用し、必要な副作用を返す
    pub fn apply(&mut self, command: Command, now_ms: i64) -> Vec<Effect> {
        match command {
            Command::SetView(view) => {
                self.view = view;
                vec![]
            }
            Command::AddToast(notice) => vec![self.push_toast(notice, now_ms)],
            Command::ExpireToast(id) => {
                self.toasts.retain(|t| t.id != id);
                vec![]
            }
            Command::Upload(mut photo) => {
                photo.id = self.unique_photo_id(photo.id);
                // 新しい写真は常に先頭（新しい順）
                self.photos.insert(0, photo);
                self.view = ViewState::Gallery;
                let toast = self.push_toast(Notice::success("Photo added successfully"), now_ms);
                vec![Effect::PersistPhotos, toast]
            }
            Command::RemovePhoto { id, confirmed } => {
                if !confirmed {
                    return vec![];
                }
                self.photos.retain(|p| p.id != id);
                let toast = self.push_toast(Notice::info("Photo removed"), now_ms);
                vec![Effect::PersistPhotos, toast]
            }
            Command::UpdateProfile(field) => {
                self.profile.apply(field);
                vec![Effect::PersistProfile]
            }
        }
    }

    /// 同じミリ秒に作られた写真IDが衝突しないよう連番を付ける
    fn unique_photo_id(&self, id: String) -> String {
        let taken = |candidate: &str| self.photos.iter().any(|p| p.id == candidate);
        if !taken(&id) {
            return id;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", id, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn push_toast(&mut self, notice: Notice, now_ms: i64) -> Effect {
        self.toast_seq += 1;
        let id = format!("{}-{}", now_ms, self.toast_seq);
        self.toasts.push(Toast {
            id: id.clone(),
            message: notice.message,
            kind: notice.kind,
        });
        Effect::ScheduleToastExpiry { id, after: TOAST_LIFETIME }
    }
}
