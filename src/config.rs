use crate::error::{LumiereError, Result};
use lumiere_common::gemini::{BIO_MODEL, CAPTION_MODEL};
use lumiere_common::DEFAULT_BIO_TONE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIキーの環境変数（設定ファイルより優先）
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub bio_model: String,
    pub caption_model: String,
    pub bio_tone: String,
    /// 写真・プロフィールの保存先（未指定ならOS標準のデータディレクトリ）
    pub data_dir: Option<PathBuf>,
    /// Gemini APIのタイムアウト
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            bio_model: BIO_MODEL.into(),
            caption_model: CAPTION_MODEL.into(),
            bio_tone: DEFAULT_BIO_TONE.into(),
            data_dir: None,
            timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LumiereError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("lumiere").join("config.json"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| LumiereError::Config("データディレクトリが見つかりません".into()))?;
        Ok(base.join("lumiere"))
    }

    /// APIキー（環境変数を優先）。未設定ならAI機能は無効
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        self.api_key.clone().filter(|k| !k.trim().is_empty())
    }
}
