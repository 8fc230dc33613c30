//! ブラウザのlocalStorageを使った保存先

use gloo::storage::{LocalStorage, Storage};
use lumiere_common::{Error, KeyValueStore, Result};
use wasm_bindgen::JsValue;

/// localStorage（キーごとに生のJSON文字列を保存）
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn storage_error(action: &str, key: &str, err: JsValue) -> Error {
    Error::Storage(format!("localStorage {} {} 失敗: {:?}", action, key, err))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| storage_error("get", key, e))
    }

    // 容量超過（QuotaExceededError）もここでErrになる
    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| storage_error("set", key, e))
    }
}
