//! 永続ストア
//!
//! ブラウザのLocalStorageやネイティブのファイルを
//! `KeyValueStore` として差し替えられるようにする。
//! 写真一覧とプロフィールはそれぞれJSON丸ごと上書きで保存する。

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::types::{seed_photos, seed_profile, Photo, UserProfile};

pub const PHOTOS_KEY: &str = "lumiere_photos";
pub const PROFILE_KEY: &str = "lumiere_profile";

/// 文字列のキー・バリューストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// テスト用のメモリストア
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// ポートフォリオ用の型付きストア
#[derive(Debug)]
pub struct PortfolioStore<S> {
    inner: S,
}

impl<S: KeyValueStore> PortfolioStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// 保存済みの写真一覧。未保存ならサンプルを返す
    ///
    /// 壊れたJSONはエラーとして返す（サンプルへは戻さない）。
    pub fn load_photos(&self, now_ms: i64) -> Result<Vec<Photo>> {
        match self.inner.get(PHOTOS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(seed_photos(now_ms)),
        }
    }

    pub fn load_profile(&self) -> Result<UserProfile> {
        match self.inner.get(PROFILE_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(seed_profile()),
        }
    }

    pub fn save_photos(&self, photos: &[Photo]) -> Result<()> {
        let json = serde_json::to_string(photos)?;
        self.inner.set(PHOTOS_KEY, &json)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.inner.set(PROFILE_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::ProfileField;

    #[test]
    fn test_load_seed_when_absent() {
        let store = PortfolioStore::new(MemoryStore::new());
        let photos = store.load_photos(50_000).expect("load");
        assert_eq!(photos, seed_photos(50_000));
        assert_eq!(store.load_profile().expect("load"), seed_profile());
        // 読み込みだけでは書き込まない
        assert!(store.inner().is_empty());
    }

    #[test]
    fn test_photos_round_trip() {
        let store = PortfolioStore::new(MemoryStore::new());
        let mut photos = seed_photos(1);
        photos[1].description = None;
        photos[2].width = Some(1024);
        photos[2].height = Some(768);

        store.save_photos(&photos).expect("save");
        assert_eq!(store.load_photos(999).expect("load"), photos);
    }

    #[test]
    fn test_empty_collection_round_trip_is_not_seeded() {
        let store = PortfolioStore::new(MemoryStore::new());
        store.save_photos(&[]).expect("save");
        assert!(store.load_photos(0).expect("load").is_empty());
    }

    #[test]
    fn test_profile_round_trip() {
        let store = PortfolioStore::new(MemoryStore::new());
        let profile = seed_profile().with(ProfileField::AvatarUrl("me.jpg".into()));
        store.save_profile(&profile).expect("save");
        assert_eq!(store.load_profile().expect("load"), profile);
    }

    #[test]
    fn test_malformed_value_propagates() {
        let memory = MemoryStore::new();
        memory.set(PHOTOS_KEY, "{not json").expect("set");
        let store = PortfolioStore::new(&memory);

        let err = store.load_photos(0).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_stored_json_shape() {
        let memory = MemoryStore::new();
        let store = PortfolioStore::new(&memory);
        store.save_photos(&seed_photos(0)[..1]).expect("save");

        let json = memory.get(PHOTOS_KEY).expect("get").expect("present");
        assert!(json.starts_with('['));
        assert!(json.contains("\"dateAdded\":0"));
    }
}
